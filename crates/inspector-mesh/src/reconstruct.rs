//! Stop-capture reconstruction: anchors in, overlay out

use glam::Vec3;
use inspector_core::Color;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::aggregate::{PointAggregator, DEFAULT_CAPTURE_RADIUS};
use crate::anchor::MeshAnchor;
use crate::error::MeshError;
use crate::hull::{ConvexHullResult, HullReconstructor};
use crate::overlay::{OverlayMaterial, OverlayMesh, DEFAULT_OVERLAY_COLOR};

/// Reconstruction settings. Maps to the `[reconstruction]` table in the
/// application settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReconstructionConfig {
    /// Capture radius around the camera, in meters.
    pub radius: f32,
    /// Overlay tint.
    pub overlay_color: Color,
}

impl Default for ReconstructionConfig {
    fn default() -> Self {
        Self {
            radius: DEFAULT_CAPTURE_RADIUS,
            overlay_color: DEFAULT_OVERLAY_COLOR,
        }
    }
}

impl ReconstructionConfig {
    /// Reject radii the distance filter cannot use.
    pub fn validate(&self) -> Result<(), MeshError> {
        if !self.radius.is_finite() || self.radius < 0.0 {
            return Err(MeshError::InvalidConfig(format!(
                "capture radius must be a finite non-negative number, got {}",
                self.radius
            )));
        }
        Ok(())
    }
}

/// Aggregation followed by hull reconstruction.
#[derive(Debug, Clone, Default)]
pub struct Reconstructor {
    aggregator: PointAggregator,
    hull: HullReconstructor,
    material: OverlayMaterial,
}

impl Reconstructor {
    pub fn new(config: ReconstructionConfig) -> Self {
        Self {
            aggregator: PointAggregator::new(config.radius),
            hull: HullReconstructor,
            material: OverlayMaterial::with_color(config.overlay_color),
        }
    }

    pub fn radius(&self) -> f32 {
        self.aggregator.radius
    }

    /// Hull of the anchor points near `camera_position`, or `None` when no
    /// point lies within the capture radius.
    pub fn reconstruct_hull(
        &self,
        anchors: &[MeshAnchor],
        camera_position: Vec3,
    ) -> Option<ConvexHullResult> {
        let points = self.aggregator.aggregate(anchors, camera_position);
        debug!(
            "Aggregated {} points from {} anchors within {}m",
            points.len(),
            anchors.len(),
            self.aggregator.radius
        );

        let hull = self.hull.compute_hull(&points)?;
        if hull.is_passthrough() {
            debug!("Only {} points, passing through without faces", hull.vertices.len());
        } else {
            debug!("Built tetrahedral hull with {} triangles", hull.triangle_count());
        }
        Some(hull)
    }

    /// Wrap a hull in this reconstructor's overlay material.
    pub fn overlay(&self, hull: &ConvexHullResult) -> OverlayMesh {
        OverlayMesh::from_hull(hull, self.material)
    }

    /// Overlay mesh for the anchors near `camera_position`.
    pub fn reconstruct(
        &self,
        anchors: &[MeshAnchor],
        camera_position: Vec3,
    ) -> Option<OverlayMesh> {
        self.reconstruct_hull(anchors, camera_position)
            .map(|hull| self.overlay(&hull))
    }
}
