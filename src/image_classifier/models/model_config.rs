use image::imageops::FilterType;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq)]
pub struct ModelConfig {
    pub onnx_model_path: PathBuf,
    /// Side of the square input the network was trained on.
    pub input_size: u32,
    pub resize_filter: FilterType,
}

impl ModelConfig {
    pub fn input_shape(&self) -> [usize; 4] {
        let size = self.input_size as usize;
        [1, size, size, 3]
    }
}
