//! Inspector Capture - AR scan capture session
//!
//! Receives per-frame callbacks from the AR session during a scan, throttles
//! which frames are saved, warns about fast camera movement, and encodes the
//! saved frames on a background worker pool. Stopping a capture runs the
//! overlay reconstruction from `inspector-mesh`.

mod config;
mod encoder;
mod error;
mod frame;
mod motion;
mod session;

pub use config::CaptureConfig;
pub use encoder::{EncoderReport, FrameEncoder};
pub use error::CaptureError;
pub use frame::{frame_file_name, write_frame, ArFrame};
pub use image::RgbaImage;
pub use motion::MotionMonitor;
pub use session::{CaptureSession, CaptureState, CaptureSummary, FrameOutcome};
