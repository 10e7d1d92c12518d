//! Mesh anchors as handed over by the AR session
//!
//! Vertex and face data arrive as raw byte buffers described by an offset,
//! a stride and an element count. Buffers are validated once on
//! construction so per-vertex reads afterwards cannot go out of bounds.

use glam::{Mat4, Vec3};
use inspector_core::AnchorId;

use crate::error::MeshError;

/// Size in bytes of one float3 position.
const FLOAT3_SIZE: usize = 3 * std::mem::size_of::<f32>();

/// Element layout of a vertex buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VertexFormat {
    Float2,
    Float3,
    Float4,
}

/// Bytes needed to hold `count` elements of `element_size` bytes at `offset`
/// with the given stride, or `None` when that size overflows `usize`.
fn required_len(offset: usize, stride: usize, element_size: usize, count: usize) -> Option<usize> {
    if count == 0 {
        return Some(offset);
    }
    stride
        .checked_mul(count - 1)?
        .checked_add(element_size)?
        .checked_add(offset)
}

/// Strided float3 vertex buffer in anchor-local space.
#[derive(Debug, Clone)]
pub struct VertexSource {
    data: Vec<u8>,
    offset: usize,
    stride: usize,
    count: usize,
}

impl VertexSource {
    /// Wrap a raw vertex buffer, checking that every vertex fits inside it.
    pub fn new(
        data: Vec<u8>,
        format: VertexFormat,
        offset: usize,
        stride: usize,
        count: usize,
    ) -> Result<Self, MeshError> {
        if format != VertexFormat::Float3 {
            return Err(MeshError::UnsupportedFormat(format));
        }
        if stride < FLOAT3_SIZE {
            return Err(MeshError::StrideTooSmall {
                stride,
                min: FLOAT3_SIZE,
            });
        }
        let required = required_len(offset, stride, FLOAT3_SIZE, count).ok_or(
            MeshError::SizeOverflow {
                count,
                element_size: stride,
            },
        )?;
        if data.len() < required {
            return Err(MeshError::BufferTooShort {
                required,
                actual: data.len(),
            });
        }

        Ok(Self {
            data,
            offset,
            stride,
            count,
        })
    }

    /// Tightly packed buffer built from positions.
    pub fn from_positions(positions: &[Vec3]) -> Self {
        let packed: Vec<[f32; 3]> = positions.iter().map(|p| p.to_array()).collect();
        Self {
            data: bytemuck::cast_slice(&packed).to_vec(),
            offset: 0,
            stride: FLOAT3_SIZE,
            count: positions.len(),
        }
    }

    /// Number of vertices in the buffer
    pub fn count(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Read the local-space position of one vertex.
    pub fn vertex(&self, index: usize) -> Result<Vec3, MeshError> {
        if index >= self.count {
            return Err(MeshError::VertexOutOfRange {
                index,
                count: self.count,
            });
        }
        Ok(self.read(index))
    }

    /// All vertices in buffer order.
    pub fn iter(&self) -> impl Iterator<Item = Vec3> + '_ {
        (0..self.count).map(move |index| self.read(index))
    }

    // Bounds were checked in `new`, so `index < count` is enough here.
    fn read(&self, index: usize) -> Vec3 {
        let start = self.offset + self.stride * index;
        let xyz: [f32; 3] = bytemuck::pod_read_unaligned(&self.data[start..start + FLOAT3_SIZE]);
        Vec3::from_array(xyz)
    }
}

/// Primitive index buffer (triangles, or whatever the producer emits).
#[derive(Debug, Clone)]
pub struct FaceSource {
    data: Vec<u8>,
    bytes_per_index: usize,
    indices_per_primitive: usize,
    count: usize,
}

impl FaceSource {
    /// Wrap a raw index buffer of 16- or 32-bit indices.
    pub fn new(
        data: Vec<u8>,
        bytes_per_index: usize,
        indices_per_primitive: usize,
        count: usize,
    ) -> Result<Self, MeshError> {
        if bytes_per_index != 2 && bytes_per_index != 4 {
            return Err(MeshError::UnsupportedIndexWidth(bytes_per_index));
        }
        let required = indices_per_primitive
            .checked_mul(count)
            .and_then(|n| n.checked_mul(bytes_per_index))
            .ok_or(MeshError::SizeOverflow {
                count,
                element_size: bytes_per_index.saturating_mul(indices_per_primitive),
            })?;
        if data.len() < required {
            return Err(MeshError::BufferTooShort {
                required,
                actual: data.len(),
            });
        }

        Ok(Self {
            data,
            bytes_per_index,
            indices_per_primitive,
            count,
        })
    }

    /// Packed 32-bit triangle list.
    pub fn from_triangles(triangles: &[[u32; 3]]) -> Self {
        Self {
            data: bytemuck::cast_slice(triangles).to_vec(),
            bytes_per_index: 4,
            indices_per_primitive: 3,
            count: triangles.len(),
        }
    }

    /// An index buffer with no primitives.
    pub fn empty() -> Self {
        Self::from_triangles(&[])
    }

    /// Number of primitives
    pub fn count(&self) -> usize {
        self.count
    }

    pub fn indices_per_primitive(&self) -> usize {
        self.indices_per_primitive
    }

    /// Vertex indices of one primitive, widened to u32.
    pub fn face(&self, index: usize) -> Result<Vec<u32>, MeshError> {
        if index >= self.count {
            return Err(MeshError::FaceOutOfRange {
                index,
                count: self.count,
            });
        }

        let face_offset = index * self.indices_per_primitive * self.bytes_per_index;
        let indices = (0..self.indices_per_primitive)
            .map(|i| {
                let start = face_offset + i * self.bytes_per_index;
                let bytes = &self.data[start..start + self.bytes_per_index];
                match self.bytes_per_index {
                    2 => u32::from(bytemuck::pod_read_unaligned::<u16>(bytes)),
                    _ => bytemuck::pod_read_unaligned::<u32>(bytes),
                }
            })
            .collect();
        Ok(indices)
    }
}

/// One scanned mesh fragment: a local-to-world transform plus its buffers.
#[derive(Debug, Clone)]
pub struct MeshAnchor {
    pub id: AnchorId,
    pub transform: Mat4,
    pub vertices: VertexSource,
    pub faces: FaceSource,
}

impl MeshAnchor {
    pub fn new(transform: Mat4, vertices: VertexSource, faces: FaceSource) -> Self {
        Self {
            id: AnchorId::new(),
            transform,
            vertices,
            faces,
        }
    }

    /// Anchor with packed positions and no faces.
    pub fn from_positions(transform: Mat4, positions: &[Vec3]) -> Self {
        Self::new(
            transform,
            VertexSource::from_positions(positions),
            FaceSource::empty(),
        )
    }

    /// Vertices mapped to world space, in buffer order.
    ///
    /// Each vertex is promoted to homogeneous `(x, y, z, 1)`; transforms are
    /// affine so no perspective divide is applied.
    pub fn world_vertices(&self) -> impl Iterator<Item = Vec3> + '_ {
        self.vertices
            .iter()
            .map(move |v| (self.transform * v.extend(1.0)).truncate())
    }
}
