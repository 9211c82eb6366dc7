//! Error types for favicache

use thiserror::Error;

/// Main error type for favicon cache operations
#[derive(Debug, Error)]
pub enum FavicacheError {
    /// URL could not be turned into a scheme + host pair
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Image encode/decode errors
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
    /// Raw pixel buffer did not match the requested dimensions
    #[error("Pixel buffer of {len} bytes does not fit {width}x{height}")]
    PixelBuffer { width: u32, height: u32, len: usize },
    /// Bookmark import failed
    #[error("Bookmark import error: {0}")]
    Import(String),
    /// Blocking worker task panicked or was aborted
    #[error("Task error: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Convenience Result type for favicache operations
pub type Result<T> = std::result::Result<T, FavicacheError>;
