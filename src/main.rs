use app::presentation::summary;
use config::{ClassifierBackend, Config};
use image_classifier::impl_fake::ImageClassifierFake;
use image_classifier::impl_tract_onnx::ImageClassifierTractOnnx;
use image_classifier::interface::ImageClassifier;
use image_classifier::tract::image::decode_image;
use library::logger::impl_console::LoggerConsole;
use library::logger::interface::Logger;
use std::path::Path;
use std::sync::Arc;

mod app;
mod config;
mod image_classifier;
mod library;

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let mut config = Config::default();
    let image_path = config.apply_args(std::env::args().skip(1));

    let logger: Arc<dyn Logger + Send + Sync> = Arc::new(LoggerConsole::new(config.logger_timezone));

    let image_classifier = new_image_classifier(&config, logger.clone())?;

    match image_path {
        Some(path) => classify_file(&path, image_classifier.as_ref(), logger),
        None => app::impl_gui::run(config, logger, image_classifier),
    }
}

/// Loads the model exactly once. An error here ends the process.
fn new_image_classifier(
    config: &Config,
    logger: Arc<dyn Logger + Send + Sync>,
) -> Result<Arc<dyn ImageClassifier>, Box<dyn std::error::Error + Send + Sync>> {
    match config.classifier_backend {
        ClassifierBackend::TractOnnx => {
            match ImageClassifierTractOnnx::new(config.model.clone(), logger.clone()) {
                Ok(image_classifier) => Ok(Arc::new(image_classifier)),
                Err(error) => {
                    let _ = logger.error(&error.to_string());
                    Err(error.into())
                }
            }
        }
        ClassifierBackend::Fake => Ok(Arc::new(ImageClassifierFake::new(logger))),
    }
}

fn classify_file(
    path: &Path,
    image_classifier: &dyn ImageClassifier,
    logger: Arc<dyn Logger + Send + Sync>,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let logger = logger.with_namespace("classify_file");
    logger.info(&format!("Classifying {}", path.display()))?;

    let bytes = std::fs::read(path)?;
    let image = decode_image(&bytes)?;
    let result = image_classifier.classify(&image)?;

    println!("{}", summary(&result));

    Ok(())
}
