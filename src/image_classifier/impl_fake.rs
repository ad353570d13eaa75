use crate::image_classifier::classification::{ClassificationResult, Freshness};
use crate::image_classifier::error::ClassifyError;
use crate::image_classifier::interface::{check_input_shape, ImageClassifier};
use crate::image_classifier::tract::image::resize_image_to_tensor;
use crate::library::logger::interface::Logger;
use image::{imageops::FilterType, DynamicImage};
use rand::distr::{Distribution, Uniform};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::Arc;
use tract_onnx::prelude::Tensor;

const INPUT_SIZE: u32 = 224;

/// Stands in for the real network. Scores are either fixed, or drawn from an
/// RNG seeded by the input tensor so the same image always gets the same answer.
pub struct ImageClassifierFake {
    logger: Arc<dyn Logger + Send + Sync>,
    probabilities: Option<Vec<f32>>,
}

impl ImageClassifierFake {
    pub fn new(logger: Arc<dyn Logger + Send + Sync>) -> Self {
        Self {
            logger: logger.with_namespace("image_classifier:fake"),
            probabilities: None,
        }
    }

    #[allow(dead_code)]
    pub fn with_probabilities(mut self, probabilities: Vec<f32>) -> Self {
        self.probabilities = Some(probabilities);
        self
    }

    fn input_shape() -> [usize; 4] {
        let size = INPUT_SIZE as usize;
        [1, size, size, 3]
    }

    fn seeded_probabilities(input: &Tensor) -> Result<Vec<f32>, ClassifyError> {
        let values = input
            .as_slice::<f32>()
            .map_err(|error| ClassifyError::Inference(format!("{:#}", error)))?;

        let mut hasher = DefaultHasher::new();
        for value in values {
            value.to_bits().hash(&mut hasher);
        }
        let mut rng = StdRng::seed_from_u64(hasher.finish());

        let weight_dist = Uniform::new(0.05f32, 1.0f32)
            .map_err(|error| ClassifyError::Inference(error.to_string()))?;
        let weights: Vec<f32> = Freshness::ALL
            .iter()
            .map(|_| weight_dist.sample(&mut rng))
            .collect();
        let total: f32 = weights.iter().sum();

        Ok(weights.iter().map(|weight| weight / total).collect())
    }
}

impl ImageClassifier for ImageClassifierFake {
    fn preprocess(&self, image: &DynamicImage) -> Tensor {
        resize_image_to_tensor(image, INPUT_SIZE, FilterType::CatmullRom)
    }

    fn classify_input(&self, input: Tensor) -> Result<ClassificationResult, ClassifyError> {
        check_input_shape(&input, Self::input_shape())?;

        let probabilities = match &self.probabilities {
            Some(probabilities) => probabilities.clone(),
            None => Self::seeded_probabilities(&input)?,
        };

        let result = ClassificationResult::from_probabilities(&probabilities)?;
        let _ = self.logger.info(&format!(
            "Scores {:?} -> {} ({:.2}%)",
            probabilities, result.label, result.confidence
        ));

        Ok(result)
    }
}
