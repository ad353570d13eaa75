use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClassifyError {
    #[error("failed to load model from {path}: {message}")]
    ModelLoad { path: PathBuf, message: String },
    #[error("failed to decode image: {0}")]
    Decode(#[from] image::ImageError),
    #[error("inference failed: {0}")]
    Inference(String),
    #[error("input tensor has shape {actual:?} but the model expects {expected:?}")]
    InputShape {
        expected: Vec<usize>,
        actual: Vec<usize>,
    },
    #[error("model produced {actual} scores but {expected} classes are known")]
    OutputLength { expected: usize, actual: usize },
    #[error("model produced an invalid probability {value} at index {index}")]
    InvalidProbability { index: usize, value: f32 },
}
