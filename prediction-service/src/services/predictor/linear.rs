use super::{Predictor, PredictorError};
use crate::dtos::Row;
use async_trait::async_trait;

/// How the raw score `w1*x1 + w2*x2 + b` is turned into a prediction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Link {
    Identity,
    /// Sigmoid, yields a probability in (0, 1).
    Logistic,
}

#[derive(Debug, Clone)]
pub struct LinearPredictor {
    weights: [f64; 2],
    bias: f64,
    link: Link,
}

impl LinearPredictor {
    pub fn new(weights: [f64; 2], bias: f64, link: Link) -> Self {
        Self { weights, bias, link }
    }

    /// `None` when the identity score overflows f64. The logistic link
    /// saturates instead, so it always yields a value in [0, 1].
    fn score(&self, row: &Row) -> Option<f64> {
        let z = self.weights[0] * row.x1 + self.weights[1] * row.x2 + self.bias;
        match self.link {
            Link::Identity => z.is_finite().then_some(z),
            // inf - inf: the terms cancel out with no usable magnitude
            Link::Logistic if z.is_nan() => Some(0.5),
            Link::Logistic => Some(sigmoid(z)),
        }
    }
}

fn sigmoid(z: f64) -> f64 {
    // Split on sign so exp() never overflows.
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1.0 + e)
    }
}

#[async_trait]
impl Predictor for LinearPredictor {
    fn name(&self) -> &'static str {
        match self.link {
            Link::Identity => "linear",
            Link::Logistic => "logistic",
        }
    }

    async fn predict(&self, rows: &[Row]) -> Result<Vec<f64>, PredictorError> {
        rows.iter()
            .enumerate()
            .map(|(index, row)| {
                self.score(row)
                    .ok_or(PredictorError::InvalidInput { index })
            })
            .collect()
    }

    async fn health_check(&self) -> Result<(), PredictorError> {
        if self.weights.iter().all(|w| w.is_finite()) && self.bias.is_finite() {
            Ok(())
        } else {
            Err(PredictorError::Unavailable(
                "model parameters are not finite".to_string(),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn identity_link_returns_raw_score() {
        let predictor = LinearPredictor::new([2.0, -1.0], 0.5, Link::Identity);
        let preds = predictor
            .predict(&[Row { x1: 1.0, x2: 3.0 }, Row { x1: 0.0, x2: 0.0 }])
            .await
            .unwrap();

        assert_eq!(preds, vec![-0.5, 0.5]);
    }

    #[tokio::test]
    async fn logistic_link_stays_in_unit_interval() {
        let predictor = LinearPredictor::new([1.0, 1.0], 0.0, Link::Logistic);
        let rows = [
            Row { x1: 0.0, x2: 0.0 },
            Row { x1: 1.0, x2: 0.2 },
            Row { x1: -0.9, x2: 0.1 },
            Row { x1: -500.0, x2: -500.0 },
            Row { x1: 500.0, x2: 500.0 },
        ];
        let preds = predictor.predict(&rows).await.unwrap();

        assert_eq!(preds.len(), rows.len());
        assert!((preds[0] - 0.5).abs() < 1e-12);
        assert!(preds[1] > 0.5);
        assert!(preds[2] < 0.5);
        assert!(preds.iter().all(|p| (0.0..=1.0).contains(p)));
    }

    #[tokio::test]
    async fn overflowing_identity_score_is_invalid_input() {
        let predictor = LinearPredictor::new([2.0, 0.0], 0.0, Link::Identity);
        let err = predictor
            .predict(&[Row { x1: 1.0, x2: 0.0 }, Row { x1: 1e308, x2: 0.0 }])
            .await
            .unwrap_err();

        assert!(matches!(err, PredictorError::InvalidInput { index: 1 }));
    }

    #[tokio::test]
    async fn logistic_link_saturates_on_extreme_inputs() {
        let predictor = LinearPredictor::new([2.0, 2.0], 0.0, Link::Logistic);
        let preds = predictor
            .predict(&[
                Row { x1: 1e308, x2: 0.0 },
                Row { x1: -1e308, x2: 0.0 },
                Row { x1: 1e308, x2: -1e308 },
                Row { x1: f64::MAX, x2: f64::MAX },
            ])
            .await
            .unwrap();

        assert_eq!(preds, vec![1.0, 0.0, 0.5, 1.0]);
    }

    #[tokio::test]
    async fn non_finite_parameters_fail_health_check() {
        let predictor = LinearPredictor::new([f64::NAN, 1.0], 0.0, Link::Identity);
        assert!(predictor.health_check().await.is_err());

        let predictor = LinearPredictor::new([1.0, 1.0], 0.0, Link::Logistic);
        assert!(predictor.health_check().await.is_ok());
    }
}
