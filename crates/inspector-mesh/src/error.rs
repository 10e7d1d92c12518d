/// Errors raised while reading anchor buffers or checking reconstruction output.
#[derive(Debug, thiserror::Error)]
pub enum MeshError {
    #[error("unsupported vertex format {0:?} (expected Float3)")]
    UnsupportedFormat(crate::anchor::VertexFormat),

    #[error("vertex stride {stride} is smaller than a float3 ({min} bytes)")]
    StrideTooSmall { stride: usize, min: usize },

    #[error("unsupported index width: {0} bytes")]
    UnsupportedIndexWidth(usize),

    #[error("buffer holds {actual} bytes but {required} are needed")]
    BufferTooShort { required: usize, actual: usize },

    #[error("buffer size for {count} elements of {element_size} bytes overflows")]
    SizeOverflow { count: usize, element_size: usize },

    #[error("vertex {index} out of range (count: {count})")]
    VertexOutOfRange { index: usize, count: usize },

    #[error("face {index} out of range (count: {count})")]
    FaceOutOfRange { index: usize, count: usize },

    #[error("invalid hull: {0}")]
    InvalidHull(String),

    #[error("invalid reconstruction config: {0}")]
    InvalidConfig(String),
}
