use crate::app::core::{Effect, Msg};
use crate::image_classifier::interface::ImageClassifier;
use crate::library::logger::interface::Logger;
use std::sync::Arc;

#[derive(Clone)]
pub struct RunEffect {
    logger: Arc<dyn Logger + Send + Sync>,
    image_classifier: Arc<dyn ImageClassifier>,
}

impl RunEffect {
    pub fn new(
        logger: Arc<dyn Logger + Send + Sync>,
        image_classifier: Arc<dyn ImageClassifier>,
    ) -> Self {
        Self {
            logger,
            image_classifier,
        }
    }

    /// Blocks until the effect is done and returns the message it produced.
    pub fn run_effect(&self, effect: Effect) -> Msg {
        let _ = self
            .logger
            .info(&format!("Running effect: {}", effect.to_display_string()));

        match effect {
            Effect::Classify { name, image } => {
                let result = self.image_classifier.classify(&image);
                if let Err(error) = &result {
                    let _ = self.logger.error(&format!("Classification failed: {}", error));
                }
                Msg::ClassifyDone { name, result }
            }
        }
    }
}
