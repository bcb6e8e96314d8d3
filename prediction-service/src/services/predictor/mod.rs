//! Scoring backends behind a trait seam.
//!
//! The HTTP layer only talks to `dyn Predictor`; which implementation runs
//! is decided once at startup from [`ModelConfig`].

pub mod dummy;
pub mod linear;

pub use dummy::DummyPredictor;
pub use linear::{LinearPredictor, Link};

use crate::config::{ModelConfig, PredictorKind};
use crate::dtos::Row;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Error type for predictor operations.
#[derive(Error, Debug)]
pub enum PredictorError {
    /// The row is valid JSON but its score does not fit in an f64.
    #[error("Score overflowed for row {index}")]
    InvalidInput { index: usize },

    #[error("Prediction failed: {0}")]
    Failed(String),

    #[error("Predictor unavailable: {0}")]
    Unavailable(String),
}

#[async_trait]
pub trait Predictor: Send + Sync {
    /// Short identifier used in logs and metric labels.
    fn name(&self) -> &'static str;

    /// Score every row. The result has exactly one value per row, in order.
    async fn predict(&self, rows: &[Row]) -> Result<Vec<f64>, PredictorError>;

    async fn health_check(&self) -> Result<(), PredictorError> {
        Ok(())
    }
}

pub fn build_predictor(model: &ModelConfig) -> Arc<dyn Predictor> {
    match model.kind {
        PredictorKind::Linear => {
            tracing::info!(weights = ?model.weights, bias = model.bias, "Linear predictor initialized");
            Arc::new(LinearPredictor::new(model.weights, model.bias, Link::Identity))
        }
        PredictorKind::Logistic => {
            tracing::info!(weights = ?model.weights, bias = model.bias, "Logistic predictor initialized");
            Arc::new(LinearPredictor::new(model.weights, model.bias, Link::Logistic))
        }
        PredictorKind::Dummy => {
            tracing::info!("Dummy predictor initialized, all rows score {}", model.bias);
            Arc::new(DummyPredictor::new(model.bias))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows() -> Vec<Row> {
        vec![Row { x1: 1.0, x2: 0.2 }, Row { x1: -0.9, x2: 0.1 }]
    }

    #[tokio::test]
    async fn every_kind_preserves_row_count() {
        for kind in [PredictorKind::Linear, PredictorKind::Logistic, PredictorKind::Dummy] {
            let predictor = build_predictor(&ModelConfig {
                kind,
                ..ModelConfig::default()
            });
            let preds = predictor.predict(&rows()).await.unwrap();
            assert_eq!(preds.len(), 2, "{} changed the row count", predictor.name());

            let empty = predictor.predict(&[]).await.unwrap();
            assert!(empty.is_empty());
        }
    }

    #[tokio::test]
    async fn builder_picks_matching_implementation() {
        let linear = build_predictor(&ModelConfig {
            kind: PredictorKind::Linear,
            ..ModelConfig::default()
        });
        assert_eq!(linear.name(), "linear");

        let dummy = build_predictor(&ModelConfig {
            kind: PredictorKind::Dummy,
            ..ModelConfig::default()
        });
        assert_eq!(dummy.name(), "dummy");
    }
}
