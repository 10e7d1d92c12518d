use std::path::{Path, PathBuf};

use glam::{Mat4, Vec3};
use image::{ImageFormat, RgbaImage};
use inspector_core::position_of;

use crate::error::CaptureError;

/// One camera frame delivered by the AR session.
#[derive(Debug, Clone)]
pub struct ArFrame {
    /// Seconds since session start.
    pub timestamp: f64,
    pub camera_transform: Mat4,
    pub image: RgbaImage,
}

impl ArFrame {
    pub fn camera_position(&self) -> Vec3 {
        position_of(&self.camera_transform)
    }
}

/// File name used for a saved frame.
pub fn frame_file_name(index: u64) -> String {
    format!("frame_{}.png", index)
}

/// PNG-encode `image` into `dir` and return the written path.
pub fn write_frame(dir: &Path, index: u64, image: &RgbaImage) -> Result<PathBuf, CaptureError> {
    let path = dir.join(frame_file_name(index));
    image
        .save_with_format(&path, ImageFormat::Png)
        .map_err(|e| CaptureError::Encode(path.clone(), e))?;
    Ok(path)
}
