//! World-space point aggregation across mesh anchors

use glam::Vec3;

use crate::anchor::MeshAnchor;

/// Default capture radius around the camera, in meters.
pub const DEFAULT_CAPTURE_RADIUS: f32 = 2.0;

/// Collects world-space vertices near a reference camera position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointAggregator {
    pub radius: f32,
}

impl Default for PointAggregator {
    fn default() -> Self {
        Self {
            radius: DEFAULT_CAPTURE_RADIUS,
        }
    }
}

impl PointAggregator {
    pub fn new(radius: f32) -> Self {
        Self { radius }
    }

    /// See [`aggregate`].
    pub fn aggregate(&self, anchors: &[MeshAnchor], camera_position: Vec3) -> Vec<Vec3> {
        aggregate(anchors, camera_position, self.radius)
    }
}

/// Transform every anchor vertex to world space and keep those within
/// `radius` of `camera_position` (inclusive).
///
/// Output follows anchor order, then vertex buffer order. Points shared by
/// overlapping anchors are kept as many times as they appear. Points with
/// non-finite coordinates never satisfy the distance test.
pub fn aggregate(anchors: &[MeshAnchor], camera_position: Vec3, radius: f32) -> Vec<Vec3> {
    anchors
        .iter()
        .flat_map(|anchor| anchor.world_vertices())
        .filter(|p| p.distance(camera_position) <= radius)
        .collect()
}
