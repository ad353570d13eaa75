use crate::image_classifier::classification::ClassificationResult;
use crate::image_classifier::error::ClassifyError;
use image::DynamicImage;
use tract_onnx::prelude::Tensor;

pub trait ImageClassifier {
    /// Turns a decoded image into the `[1, H, W, 3]` tensor the model expects.
    fn preprocess(&self, image: &DynamicImage) -> Tensor;

    /// Single forward pass over an already preprocessed tensor.
    fn classify_input(&self, input: Tensor) -> Result<ClassificationResult, ClassifyError>;

    fn classify(&self, image: &DynamicImage) -> Result<ClassificationResult, ClassifyError> {
        let input = self.preprocess(image);
        self.classify_input(input)
    }
}

pub fn check_input_shape(input: &Tensor, expected: [usize; 4]) -> Result<(), ClassifyError> {
    if input.shape() == expected {
        Ok(())
    } else {
        Err(ClassifyError::InputShape {
            expected: expected.to_vec(),
            actual: input.shape().to_vec(),
        })
    }
}
