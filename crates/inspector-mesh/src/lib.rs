//! Inspector Mesh - Scan reconstruction for the inspection scanner
//!
//! Turns the mesh anchors gathered during a capture session into a
//! translucent overlay highlighting the scanned object:
//! - Strided vertex/face buffer access for AR mesh anchors
//! - World-space point aggregation around the camera
//! - Coarse tetrahedral hull reconstruction
//! - Render-agnostic overlay mesh

mod aggregate;
mod anchor;
mod error;
mod hull;
mod overlay;
mod reconstruct;

pub use aggregate::{aggregate, PointAggregator, DEFAULT_CAPTURE_RADIUS};
pub use anchor::{FaceSource, MeshAnchor, VertexFormat, VertexSource};
pub use error::MeshError;
pub use hull::{compute_hull, ConvexHullResult, HullReconstructor, TETRAHEDRON_INDICES};
pub use overlay::{OverlayMaterial, OverlayMesh, OverlayVertex, DEFAULT_OVERLAY_COLOR};
pub use reconstruct::{ReconstructionConfig, Reconstructor};
