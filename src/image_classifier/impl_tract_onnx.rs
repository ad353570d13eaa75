use crate::image_classifier::classification::ClassificationResult;
use crate::image_classifier::error::ClassifyError;
use crate::image_classifier::interface::{check_input_shape, ImageClassifier};
use crate::image_classifier::models::model_config::ModelConfig;
use crate::image_classifier::tract::image::resize_image_to_tensor;
use crate::library::logger::interface::Logger;
use image::DynamicImage;
use std::sync::Arc;
use tract_onnx::prelude::*;

pub struct ImageClassifierTractOnnx {
    model: SimplePlan<TypedFact, Box<dyn TypedOp>, TypedModel>,
    config: ModelConfig,
    logger: Arc<dyn Logger + Send + Sync>,
}

impl ImageClassifierTractOnnx {
    /// Loads and optimises the model once. Failing here means nothing can be
    /// classified, so callers treat it as fatal.
    pub fn new(
        config: ModelConfig,
        logger: Arc<dyn Logger + Send + Sync>,
    ) -> Result<Self, ClassifyError> {
        let logger = logger.with_namespace("image_classifier:tract_onnx");
        let _ = logger.info(&format!(
            "Loading model from {}",
            config.onnx_model_path.display()
        ));

        let model = Self::load(&config).map_err(|error| ClassifyError::ModelLoad {
            path: config.onnx_model_path.clone(),
            message: format!("{:#}", error),
        })?;

        let _ = logger.info("Model ready");

        Ok(Self {
            model,
            config,
            logger,
        })
    }

    fn load(config: &ModelConfig) -> TractResult<SimplePlan<TypedFact, Box<dyn TypedOp>, TypedModel>> {
        tract_onnx::onnx()
            .model_for_path(&config.onnx_model_path)?
            .with_input_fact(0, f32::fact(config.input_shape()).into())?
            .into_optimized()?
            .into_runnable()
    }
}

impl ImageClassifier for ImageClassifierTractOnnx {
    fn preprocess(&self, image: &DynamicImage) -> Tensor {
        resize_image_to_tensor(image, self.config.input_size, self.config.resize_filter)
    }

    fn classify_input(&self, input: Tensor) -> Result<ClassificationResult, ClassifyError> {
        check_input_shape(&input, self.config.input_shape())?;

        let outputs = self
            .model
            .run(tvec!(input.into_tvalue()))
            .map_err(|error| ClassifyError::Inference(format!("{:#}", error)))?;

        let output = outputs
            .first()
            .ok_or_else(|| ClassifyError::Inference("model produced no outputs".to_string()))?;
        let probabilities: Vec<f32> = output
            .to_array_view::<f32>()
            .map_err(|error| ClassifyError::Inference(format!("{:#}", error)))?
            .iter()
            .copied()
            .collect();

        let result = ClassificationResult::from_probabilities(&probabilities);

        match &result {
            Ok(classification) => {
                let _ = self.logger.info(&format!(
                    "Scores {:?} -> {} ({:.2}%)",
                    probabilities, classification.label, classification.confidence
                ));
            }
            Err(error) => {
                let _ = self.logger.error(&format!("Unusable model output: {}", error));
            }
        }

        result
    }
}
