use serde::{Deserialize, Serialize};

use super::{ClassId, Outcome};
use crate::constants::CONFIDENCE_DECIMALS;

/// One prediction, ready for the response body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub outcome: Outcome,
    /// Normalized class id.
    pub prediction: i64,
    /// Probability mass on the predicted class, rounded to 4 places.
    pub confidence: f64,
}

impl PredictionResult {
    pub fn new(class: ClassId, confidence: f64) -> Self {
        Self {
            outcome: Outcome::from_class(class),
            prediction: class.value(),
            confidence: round_confidence(confidence),
        }
    }
}

/// Round half away from zero to [`CONFIDENCE_DECIMALS`] places.
pub fn round_confidence(value: f64) -> f64 {
    let scale = 10f64.powi(CONFIDENCE_DECIMALS);
    (value * scale).round() / scale
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_to_four_places() {
        assert_eq!(round_confidence(0.85), 0.85);
        assert_eq!(round_confidence(0.123456), 0.1235);
        assert_eq!(round_confidence(1.0), 1.0);
        assert_eq!(round_confidence(0.0), 0.0);
    }

    #[test]
    fn result_maps_outcome() {
        let r = PredictionResult::new(ClassId(2), 0.85);
        assert_eq!(r.outcome, Outcome::Graduate);
        assert_eq!(r.prediction, 2);
        assert_eq!(r.confidence, 0.85);
    }
}
