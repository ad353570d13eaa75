use crate::image_classifier::error::ClassifyError;
use std::fmt;

/// Freshness classes in the order of the model's output layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Freshness {
    Fresh,
    Mild,
    Rotten,
}

impl Freshness {
    pub const ALL: [Freshness; 3] = [Freshness::Fresh, Freshness::Mild, Freshness::Rotten];

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Freshness::Fresh => "fresh",
            Freshness::Mild => "mild",
            Freshness::Rotten => "rotten",
        }
    }
}

impl fmt::Display for Freshness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassificationResult {
    pub label: Freshness,
    /// Percentage in `[0, 100]`, rounded to two decimals.
    pub confidence: f64,
}

impl ClassificationResult {
    /// Picks the most probable class from the model output.
    ///
    /// Ties go to the lowest index. Label and confidence always come from the
    /// same index.
    pub fn from_probabilities(probabilities: &[f32]) -> Result<Self, ClassifyError> {
        if probabilities.len() != Freshness::ALL.len() {
            return Err(ClassifyError::OutputLength {
                expected: Freshness::ALL.len(),
                actual: probabilities.len(),
            });
        }

        let mut best_index = 0usize;
        let mut best_score = f32::MIN;
        for (index, &value) in probabilities.iter().enumerate() {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(ClassifyError::InvalidProbability { index, value });
            }
            if value > best_score {
                best_index = index;
                best_score = value;
            }
        }

        let label = Freshness::from_index(best_index).ok_or(ClassifyError::OutputLength {
            expected: Freshness::ALL.len(),
            actual: probabilities.len(),
        })?;

        Ok(Self {
            label,
            confidence: round_confidence(best_score),
        })
    }
}

fn round_confidence(probability: f32) -> f64 {
    let percent = f64::from(probability) * 100.0;
    (percent * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_per_arg_max_index() {
        let vectors = [[0.7, 0.2, 0.1], [0.2, 0.7, 0.1], [0.1, 0.2, 0.7]];

        for (index, probabilities) in vectors.iter().enumerate() {
            let result = ClassificationResult::from_probabilities(probabilities).unwrap();
            assert_eq!(result.label, Freshness::ALL[index]);
        }
    }

    #[test]
    fn test_clear_fresh() {
        let result = ClassificationResult::from_probabilities(&[0.81, 0.10, 0.09]).unwrap();
        assert_eq!(result.label, Freshness::Fresh);
        assert_eq!(result.confidence, 81.00);
    }

    #[test]
    fn test_near_tie_picks_strict_maximum() {
        let result = ClassificationResult::from_probabilities(&[0.33, 0.34, 0.33]).unwrap();
        assert_eq!(result.label, Freshness::Mild);
        assert_eq!(result.confidence, 34.00);
    }

    #[test]
    fn test_exact_tie_picks_first() {
        let result = ClassificationResult::from_probabilities(&[0.4, 0.4, 0.2]).unwrap();
        assert_eq!(result.label, Freshness::Fresh);
        assert_eq!(result.confidence, 40.00);
    }

    #[test]
    fn test_confidence_rounded_to_two_decimals() {
        let result = ClassificationResult::from_probabilities(&[0.1, 0.123456, 0.776544]).unwrap();
        assert_eq!(result.label, Freshness::Rotten);
        assert_eq!(result.confidence, 77.65);
    }

    #[test]
    fn test_confidence_bounds() {
        let certain = ClassificationResult::from_probabilities(&[0.0, 1.0, 0.0]).unwrap();
        assert_eq!(certain.confidence, 100.0);

        let empty = ClassificationResult::from_probabilities(&[0.0, 0.0, 0.0]).unwrap();
        assert_eq!(empty.label, Freshness::Fresh);
        assert_eq!(empty.confidence, 0.0);
    }

    #[test]
    fn test_wrong_length_is_an_error() {
        let error = ClassificationResult::from_probabilities(&[0.5, 0.5]).unwrap_err();
        assert!(matches!(
            error,
            ClassifyError::OutputLength {
                expected: 3,
                actual: 2
            }
        ));

        let error = ClassificationResult::from_probabilities(&[0.25; 4]).unwrap_err();
        assert!(matches!(error, ClassifyError::OutputLength { actual: 4, .. }));
    }

    #[test]
    fn test_invalid_probabilities_are_errors() {
        let error = ClassificationResult::from_probabilities(&[0.2, f32::NAN, 0.3]).unwrap_err();
        assert!(matches!(error, ClassifyError::InvalidProbability { index: 1, .. }));

        let error = ClassificationResult::from_probabilities(&[1.5, 0.0, 0.0]).unwrap_err();
        assert!(matches!(error, ClassifyError::InvalidProbability { index: 0, .. }));
    }

    #[test]
    fn test_index_follows_output_layer_order() {
        assert_eq!(Freshness::from_index(0), Some(Freshness::Fresh));
        assert_eq!(Freshness::from_index(1), Some(Freshness::Mild));
        assert_eq!(Freshness::from_index(2), Some(Freshness::Rotten));
        assert_eq!(Freshness::from_index(3), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(Freshness::Fresh.to_string(), "fresh");
        assert_eq!(Freshness::Mild.to_string(), "mild");
        assert_eq!(Freshness::Rotten.to_string(), "rotten");
    }
}
