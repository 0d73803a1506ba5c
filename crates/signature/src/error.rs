use thiserror::Error;

#[derive(Error, Debug)]
pub enum SignatureError {
    #[error("Failed to load image: {0}")]
    ImageLoad(#[from] image::ImageError),

    #[error("Invalid input shape: {width}x{height}")]
    InvalidInputShape { width: u32, height: u32 },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SignatureError>;

/// Zero-sized images are a caller contract violation, not a degraded input.
pub(crate) fn ensure_nonempty(width: u32, height: u32) -> Result<()> {
    if width == 0 || height == 0 {
        return Err(SignatureError::InvalidInputShape { width, height });
    }
    Ok(())
}
