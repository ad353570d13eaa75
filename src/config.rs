use chrono::Offset;
use image::imageops::FilterType;
use std::path::PathBuf;

use crate::image_classifier::models::model_config::ModelConfig;

#[derive(Debug, Clone, PartialEq)]
pub enum ClassifierBackend {
    TractOnnx,
    Fake,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub classifier_backend: ClassifierBackend,
    pub model: ModelConfig,
    pub logger_timezone: chrono::FixedOffset,
    pub window_size: [f32; 2],
}

impl Default for Config {
    fn default() -> Self {
        Self {
            classifier_backend: ClassifierBackend::TractOnnx,
            model: ModelConfig {
                onnx_model_path: PathBuf::from("models/fresh_fruit_mobilenetv2.onnx"),
                input_size: 224,
                resize_filter: FilterType::CatmullRom,
            },
            logger_timezone: utc(),
            window_size: [960.0, 640.0],
        }
    }
}

impl Config {
    /// Applies the binary's positional arguments: `[MODEL_PATH|fake] [IMAGE]`.
    /// Returns the image path when one was given.
    pub fn apply_args<I>(&mut self, args: I) -> Option<PathBuf>
    where
        I: IntoIterator<Item = String>,
    {
        let mut args = args.into_iter();

        match args.next() {
            Some(arg) if arg == "fake" => self.classifier_backend = ClassifierBackend::Fake,
            Some(arg) => {
                self.classifier_backend = ClassifierBackend::TractOnnx;
                self.model.onnx_model_path = PathBuf::from(arg);
            }
            None => return None,
        }

        args.next().map(PathBuf::from)
    }
}

fn utc() -> chrono::FixedOffset {
    chrono::Utc.fix()
}
