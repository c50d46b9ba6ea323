//! Vision pipeline error types.

use thiserror::Error;

pub type VisionResult<T> = Result<T, VisionError>;

#[derive(Debug, Error)]
pub enum VisionError {
    #[error("image decode failed: {0}")]
    Decode(#[from] image::ImageError),

    #[error("landmark detection failed: {0}")]
    Detector(String),

    #[error("confusion model load failed: {0}")]
    ModelLoad(String),
}
