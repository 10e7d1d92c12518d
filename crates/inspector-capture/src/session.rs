//! Capture session lifecycle
//!
//! A session is `Idle` until `start`, then receives per-frame callbacks and
//! anchor snapshots until `stop`, which drains the frame encoder and runs
//! the reconstruction on the last anchor snapshot.

use std::fs;
use std::path::{Path, PathBuf};

use glam::Vec3;
use inspector_mesh::{MeshAnchor, OverlayMesh, ReconstructionConfig, Reconstructor};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::CaptureConfig;
use crate::encoder::FrameEncoder;
use crate::error::CaptureError;
use crate::frame::ArFrame;
use crate::motion::MotionMonitor;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureState {
    Idle,
    Scanning,
}

/// Result of handling one frame while scanning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameOutcome {
    /// 1-based frame index within the capture.
    pub index: u64,
    /// Whether the camera is moving too fast, when it could be measured.
    pub fast_movement: Option<bool>,
    /// Whether this frame was handed to the encoder.
    pub queued: bool,
}

/// Everything a finished capture produced.
#[derive(Debug, Clone)]
pub struct CaptureSummary {
    pub output_dir: PathBuf,
    /// Saved frames, ordered by frame index.
    pub frames: Vec<PathBuf>,
    /// Frames dropped because the encoder queue was full.
    pub dropped_frames: usize,
    /// Frames that failed to encode or write.
    pub failed_frames: usize,
    /// Overlay for the scanned object, if any point was in range.
    pub overlay: Option<OverlayMesh>,
}

pub struct CaptureSession {
    config: CaptureConfig,
    reconstructor: Reconstructor,
    output_dir: PathBuf,
    state: CaptureState,
    frame_index: u64,
    motion: MotionMonitor,
    encoder: Option<FrameEncoder>,
    anchors: Vec<MeshAnchor>,
    camera_position: Option<Vec3>,
    dropped_frames: usize,
}

impl CaptureSession {
    /// Create a session writing frames to a fresh `capture_<uuid>` folder in
    /// the system temp directory.
    pub fn new(
        config: CaptureConfig,
        reconstruction: ReconstructionConfig,
    ) -> Result<Self, CaptureError> {
        let dir = std::env::temp_dir().join(format!("capture_{}", Uuid::new_v4()));
        Self::with_output_dir(config, reconstruction, dir)
    }

    /// Create a session writing frames to `output_dir`, creating it if needed.
    pub fn with_output_dir(
        config: CaptureConfig,
        reconstruction: ReconstructionConfig,
        output_dir: impl Into<PathBuf>,
    ) -> Result<Self, CaptureError> {
        config.validate()?;
        reconstruction
            .validate()
            .map_err(|e| CaptureError::InvalidConfig(e.to_string()))?;

        let output_dir = output_dir.into();
        fs::create_dir_all(&output_dir).map_err(|e| CaptureError::Io(output_dir.clone(), e))?;
        info!("Capture session writing to {}", output_dir.display());

        Ok(Self {
            motion: MotionMonitor::new(config.speed_threshold),
            config,
            reconstructor: Reconstructor::new(reconstruction),
            output_dir,
            state: CaptureState::Idle,
            frame_index: 0,
            encoder: None,
            anchors: Vec::new(),
            camera_position: None,
            dropped_frames: 0,
        })
    }

    pub fn state(&self) -> CaptureState {
        self.state
    }

    pub fn is_scanning(&self) -> bool {
        self.state == CaptureState::Scanning
    }

    /// Frames seen since the capture started
    pub fn frame_index(&self) -> u64 {
        self.frame_index
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Begin a capture, resetting frame counters and motion tracking.
    pub fn start(&mut self) -> Result<(), CaptureError> {
        if self.is_scanning() {
            return Err(CaptureError::AlreadyScanning);
        }

        self.encoder = Some(FrameEncoder::new(&self.config, self.output_dir.clone())?);
        self.frame_index = 0;
        self.dropped_frames = 0;
        self.motion.reset();
        self.anchors.clear();
        self.camera_position = None;
        self.state = CaptureState::Scanning;

        info!("Capture started");
        Ok(())
    }

    /// Per-frame callback. Returns `None` while idle.
    pub fn on_frame(&mut self, frame: ArFrame) -> Option<FrameOutcome> {
        if !self.is_scanning() {
            return None;
        }

        self.frame_index += 1;
        let index = self.frame_index;

        let camera_position = frame.camera_position();
        self.camera_position = Some(camera_position);
        let fast_movement = self.motion.update(camera_position, frame.timestamp);

        let mut queued = false;
        if self.config.should_capture(index) {
            if let Some(encoder) = &self.encoder {
                match encoder.submit(index, frame.image) {
                    Ok(()) => queued = true,
                    Err(e) => {
                        warn!("Skipping frame {}: {}", index, e);
                        self.dropped_frames += 1;
                    }
                }
            }
        }

        Some(FrameOutcome {
            index,
            fast_movement,
            queued,
        })
    }

    /// Replace the anchor snapshot used at stop time. Ignored while idle.
    pub fn update_anchors(&mut self, anchors: Vec<MeshAnchor>) {
        if !self.is_scanning() {
            debug!("Ignoring anchor update while idle");
            return;
        }
        self.anchors = anchors;
    }

    /// End the capture: wait for pending frames, then reconstruct the overlay
    /// from the last anchor snapshot around the last camera position.
    pub fn stop(&mut self) -> Result<CaptureSummary, CaptureError> {
        if !self.is_scanning() {
            return Err(CaptureError::NotScanning);
        }
        self.state = CaptureState::Idle;

        let report = self
            .encoder
            .take()
            .map(FrameEncoder::finish)
            .unwrap_or_default();

        let anchors = std::mem::take(&mut self.anchors);
        let overlay = self
            .camera_position
            .and_then(|camera| self.reconstructor.reconstruct(&anchors, camera));

        info!(
            "Capture stopped after {} frames: {} saved, {} dropped, overlay: {}",
            self.frame_index,
            report.written.len(),
            self.dropped_frames,
            if overlay.is_some() { "yes" } else { "none" }
        );

        Ok(CaptureSummary {
            output_dir: self.output_dir.clone(),
            frames: report.written,
            dropped_frames: self.dropped_frames,
            failed_frames: report.failed,
            overlay,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Mat4;
    use image::RgbaImage;

    fn session(config: CaptureConfig) -> (CaptureSession, PathBuf) {
        let dir = std::env::temp_dir().join(format!("session_test_{}", Uuid::new_v4()));
        let session =
            CaptureSession::with_output_dir(config, ReconstructionConfig::default(), &dir).unwrap();
        (session, dir)
    }

    fn frame(timestamp: f64, camera: Vec3) -> ArFrame {
        ArFrame {
            timestamp,
            camera_transform: Mat4::from_translation(camera),
            image: RgbaImage::new(2, 2),
        }
    }

    fn small_interval() -> CaptureConfig {
        CaptureConfig {
            capture_interval: 3,
            queue_capacity: 16,
            ..Default::default()
        }
    }

    #[test]
    fn frames_ignored_while_idle() {
        let (mut session, dir) = session(CaptureConfig::default());
        assert_eq!(session.state(), CaptureState::Idle);
        assert!(session.on_frame(frame(0.0, Vec3::ZERO)).is_none());
        assert_eq!(session.frame_index(), 0);
        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn start_and_stop_transitions() {
        let (mut session, dir) = session(CaptureConfig::default());
        assert!(matches!(session.stop(), Err(CaptureError::NotScanning)));

        session.start().unwrap();
        assert!(session.is_scanning());
        assert!(matches!(session.start(), Err(CaptureError::AlreadyScanning)));

        let summary = session.stop().unwrap();
        assert!(!session.is_scanning());
        assert!(summary.frames.is_empty());
        assert!(summary.overlay.is_none());
        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn saves_every_nth_frame() {
        let (mut session, dir) = session(small_interval());
        session.start().unwrap();

        let queued: Vec<u64> = (0..10)
            .filter_map(|i| session.on_frame(frame(i as f64, Vec3::ZERO)))
            .filter(|outcome| outcome.queued)
            .map(|outcome| outcome.index)
            .collect();
        assert_eq!(queued, vec![3, 6, 9]);

        let summary = session.stop().unwrap();
        assert_eq!(
            summary.frames,
            vec![dir.join("frame_3.png"), dir.join("frame_6.png"), dir.join("frame_9.png")]
        );
        assert_eq!(summary.dropped_frames, 0);
        assert_eq!(summary.failed_frames, 0);
        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn reports_fast_movement() {
        let (mut session, dir) = session(CaptureConfig::default());
        session.start().unwrap();

        let first = session.on_frame(frame(0.0, Vec3::ZERO)).unwrap();
        assert_eq!(first.fast_movement, None);

        let fast = session.on_frame(frame(0.1, Vec3::new(0.5, 0.0, 0.0))).unwrap();
        assert_eq!(fast.fast_movement, Some(true));

        let slow = session.on_frame(frame(1.1, Vec3::new(0.55, 0.0, 0.0))).unwrap();
        assert_eq!(slow.fast_movement, Some(false));

        session.stop().unwrap();
        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn restart_resets_counters() {
        let (mut session, dir) = session(small_interval());
        session.start().unwrap();
        session.on_frame(frame(0.0, Vec3::ZERO));
        session.on_frame(frame(1.0, Vec3::ZERO));
        session.stop().unwrap();

        session.start().unwrap();
        let outcome = session.on_frame(frame(5.0, Vec3::X)).unwrap();
        assert_eq!(outcome.index, 1);
        assert_eq!(outcome.fast_movement, None);
        session.stop().unwrap();
        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn stop_reconstructs_last_snapshot() {
        let (mut session, dir) = session(CaptureConfig::default());
        session.start().unwrap();
        session.on_frame(frame(0.0, Vec3::new(0.0, 0.0, 1.0)));

        let near = MeshAnchor::from_positions(
            Mat4::IDENTITY,
            &[
                Vec3::new(0.0, 0.0, 0.0),
                Vec3::new(0.5, 0.0, 0.0),
                Vec3::new(0.0, 0.5, 0.0),
                Vec3::new(0.0, 0.0, 0.5),
            ],
        );
        session.update_anchors(vec![MeshAnchor::from_positions(Mat4::IDENTITY, &[Vec3::ZERO])]);
        session.update_anchors(vec![near]);

        let summary = session.stop().unwrap();
        let overlay = summary.overlay.expect("points within range should produce an overlay");
        assert_eq!(overlay.vertex_count(), 4);
        assert_eq!(overlay.primitive_count(), 4);
        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn anchors_ignored_while_idle() {
        let (mut session, dir) = session(CaptureConfig::default());
        session.update_anchors(vec![MeshAnchor::from_positions(Mat4::IDENTITY, &[Vec3::ZERO])]);
        session.start().unwrap();
        session.on_frame(frame(0.0, Vec3::ZERO));
        assert!(session.stop().unwrap().overlay.is_none());
        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn new_session_writes_to_fresh_temp_dir() {
        let session =
            CaptureSession::new(CaptureConfig::default(), ReconstructionConfig::default()).unwrap();
        let dir = session.output_dir().to_path_buf();
        assert!(dir.is_dir());
        assert!(dir.starts_with(std::env::temp_dir()));
        assert!(dir
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| name.starts_with("capture_")));
        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn rejects_invalid_config() {
        let config = CaptureConfig {
            capture_interval: 0,
            ..Default::default()
        };
        let dir = std::env::temp_dir().join(format!("session_test_{}", Uuid::new_v4()));
        let result = CaptureSession::with_output_dir(config, ReconstructionConfig::default(), &dir);
        assert!(matches!(result, Err(CaptureError::InvalidConfig(_))));
        assert!(!dir.exists());
    }
}
