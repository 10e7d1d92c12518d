//! JSON scene snapshots for replaying a scan offline
//!
//! ```json
//! {
//!   "camera_position": [0.0, 0.0, 0.0],
//!   "anchors": [
//!     { "transform": [1,0,0,0, 0,1,0,0, 0,0,1,0, 0,0,0,1],
//!       "vertices": [[0.0, 0.0, 0.5]],
//!       "faces": [] }
//!   ]
//! }
//! ```

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use glam::{Mat4, Vec3};
use inspector_mesh::{ConvexHullResult, FaceSource, MeshAnchor, OverlayMesh, VertexSource};
use serde::{Deserialize, Serialize};

/// One anchor as stored in a snapshot file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnchorRecord {
    /// Local-to-world transform, column-major.
    pub transform: [f32; 16],
    pub vertices: Vec<[f32; 3]>,
    #[serde(default)]
    pub faces: Vec<[u32; 3]>,
}

impl AnchorRecord {
    pub fn to_anchor(&self) -> MeshAnchor {
        let positions: Vec<Vec3> = self.vertices.iter().copied().map(Vec3::from_array).collect();
        MeshAnchor::new(
            Mat4::from_cols_array(&self.transform),
            VertexSource::from_positions(&positions),
            FaceSource::from_triangles(&self.faces),
        )
    }
}

/// Anchors plus the camera position at the moment capture stopped.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneSnapshot {
    pub camera_position: [f32; 3],
    pub anchors: Vec<AnchorRecord>,
}

impl SceneSnapshot {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read snapshot {:?}", path))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse snapshot {:?}", path))
    }

    pub fn camera_position(&self) -> Vec3 {
        Vec3::from_array(self.camera_position)
    }

    pub fn anchors(&self) -> Vec<MeshAnchor> {
        self.anchors.iter().map(AnchorRecord::to_anchor).collect()
    }
}

/// Serializable view of a reconstruction result.
#[derive(Debug, Clone, Serialize)]
pub struct OverlayReport {
    pub vertices: Vec<[f32; 3]>,
    pub indices: Vec<u32>,
    pub color: [f32; 4],
    pub double_sided: bool,
}

impl OverlayReport {
    pub fn new(hull: &ConvexHullResult, overlay: &OverlayMesh) -> Self {
        Self {
            vertices: hull.vertices.iter().map(|v| v.to_array()).collect(),
            indices: hull.indices.clone(),
            color: overlay.material.color.to_array(),
            double_sided: overlay.material.double_sided,
        }
    }
}
