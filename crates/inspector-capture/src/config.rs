use serde::{Deserialize, Serialize};

use crate::error::CaptureError;

/// Capture settings. Maps to the `[capture]` table in the application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptureConfig {
    /// Save one frame out of every `capture_interval`.
    pub capture_interval: u32,
    /// Camera speed (m/s) above which the user is asked to slow down.
    pub speed_threshold: f32,
    /// Background encoder tasks.
    pub encoder_workers: usize,
    /// Frames that may wait for an encoder before new ones are dropped.
    pub queue_capacity: usize,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            capture_interval: 30,
            speed_threshold: 0.2,
            encoder_workers: 2,
            queue_capacity: 8,
        }
    }
}

impl CaptureConfig {
    pub fn validate(&self) -> Result<(), CaptureError> {
        if self.capture_interval == 0 {
            return Err(CaptureError::InvalidConfig(
                "capture_interval must be at least 1".into(),
            ));
        }
        if self.speed_threshold.is_nan() || self.speed_threshold < 0.0 {
            return Err(CaptureError::InvalidConfig(format!(
                "speed_threshold must be non-negative, got {}",
                self.speed_threshold
            )));
        }
        if self.encoder_workers == 0 {
            return Err(CaptureError::InvalidConfig(
                "encoder_workers must be at least 1".into(),
            ));
        }
        if self.queue_capacity == 0 {
            return Err(CaptureError::InvalidConfig(
                "queue_capacity must be at least 1".into(),
            ));
        }
        Ok(())
    }

    /// Whether the frame with this 1-based index should be saved.
    pub fn should_capture(&self, frame_index: u64) -> bool {
        frame_index % u64::from(self.capture_interval) == 0
    }
}
