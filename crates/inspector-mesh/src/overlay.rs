//! Renderable overlay built from a reconstructed hull

use bytemuck::{Pod, Zeroable};
use inspector_core::Color;
use serde::{Deserialize, Serialize};

use crate::hull::ConvexHullResult;

/// Default overlay tint: red at 30% opacity.
pub const DEFAULT_OVERLAY_COLOR: Color = Color::RED.with_alpha(0.3);

/// Position-only vertex laid out for direct GPU upload
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct OverlayVertex {
    pub position: [f32; 3],
}

impl OverlayVertex {
    pub fn new(position: [f32; 3]) -> Self {
        Self { position }
    }
}

/// Surface settings for the overlay.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OverlayMaterial {
    pub color: Color,
    /// Hull winding is not consistent, so this stays on unless the consumer
    /// reorients faces itself.
    pub double_sided: bool,
}

impl Default for OverlayMaterial {
    fn default() -> Self {
        Self {
            color: DEFAULT_OVERLAY_COLOR,
            double_sided: true,
        }
    }
}

impl OverlayMaterial {
    pub fn with_color(color: Color) -> Self {
        Self {
            color,
            ..Default::default()
        }
    }
}

/// Translucent mesh highlighting the scanned object
#[derive(Clone, Debug)]
pub struct OverlayMesh {
    pub vertices: Vec<OverlayVertex>,
    pub indices: Vec<u32>,
    pub material: OverlayMaterial,
}

impl OverlayMesh {
    pub fn from_hull(hull: &ConvexHullResult, material: OverlayMaterial) -> Self {
        Self {
            vertices: hull
                .vertices
                .iter()
                .map(|v| OverlayVertex::new(v.to_array()))
                .collect(),
            indices: hull.indices.clone(),
            material,
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of triangles to draw
    pub fn primitive_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Nothing to draw: a passthrough hull carries points but no faces.
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Raw vertex buffer (tightly packed float3).
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Raw 32-bit index buffer.
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }
}
