use glam::Vec3;

/// Tracks camera speed between consecutive frames.
#[derive(Debug, Clone)]
pub struct MotionMonitor {
    threshold: f32,
    last: Option<(Vec3, f64)>,
}

impl MotionMonitor {
    /// `threshold` is in meters per second.
    pub fn new(threshold: f32) -> Self {
        Self {
            threshold,
            last: None,
        }
    }

    /// Record a camera sample. Returns whether the camera moved faster than
    /// the threshold since the previous sample, or `None` when there is no
    /// previous sample or no time has passed.
    pub fn update(&mut self, position: Vec3, timestamp: f64) -> Option<bool> {
        let previous = self.last.replace((position, timestamp));
        let (last_position, last_timestamp) = previous?;

        let dt = (timestamp - last_timestamp) as f32;
        if dt <= 0.0 {
            return None;
        }
        let speed = position.distance(last_position) / dt;
        Some(speed > self.threshold)
    }

    /// Forget the last sample, e.g. when a new capture starts.
    pub fn reset(&mut self) {
        self.last = None;
    }
}
