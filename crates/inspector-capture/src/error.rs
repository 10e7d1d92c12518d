use std::path::PathBuf;

/// Errors that can occur in a capture session.
#[derive(Debug, thiserror::Error)]
pub enum CaptureError {
    #[error("invalid capture config: {0}")]
    InvalidConfig(String),

    #[error("capture is already running")]
    AlreadyScanning,

    #[error("capture is not running")]
    NotScanning,

    #[error("encoder queue full, dropped frame {0}")]
    QueueFull(u64),

    #[error("frame encoder has shut down")]
    EncoderClosed,

    #[error("failed to start encoder runtime: {0}")]
    Runtime(#[source] std::io::Error),

    #[error("I/O error at '{0}': {1}")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("failed to encode frame to '{0}': {1}")]
    Encode(PathBuf, #[source] image::ImageError),
}
