//! Constant predictor for smoke tests and local runs.

use super::{Predictor, PredictorError};
use crate::dtos::Row;
use async_trait::async_trait;

pub struct DummyPredictor {
    value: f64,
}

impl DummyPredictor {
    pub fn new(value: f64) -> Self {
        Self { value }
    }
}

#[async_trait]
impl Predictor for DummyPredictor {
    fn name(&self) -> &'static str {
        "dummy"
    }

    async fn predict(&self, rows: &[Row]) -> Result<Vec<f64>, PredictorError> {
        Ok(vec![self.value; rows.len()])
    }
}
