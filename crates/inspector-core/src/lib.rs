//! Inspector Core - Shared value types for the inspection scanner
//!
//! This crate provides the foundational types used by the scanning crates:
//! - Mathematical primitives (re-exported from glam)
//! - Anchor identifiers for scanned mesh fragments
//! - RGBA colors for overlay materials

pub mod types;

pub use glam::{Mat4, Vec3};
pub use types::{position_of, AnchorId, Color};
