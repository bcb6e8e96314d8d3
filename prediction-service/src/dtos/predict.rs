use serde::{Deserialize, Serialize};
use validator::Validate;

/// Upper bound on rows accepted by a single `/predict` call.
pub const MAX_ROWS_PER_REQUEST: usize = 10_000;

/// Body limit for `/predict`, sized so a full batch of rows fits even with
/// long number literals and pretty-printing.
pub const MAX_BODY_BYTES: usize = MAX_ROWS_PER_REQUEST * 1024;

/// `MAX_ROWS_PER_REQUEST` as the `u64` the `validator` length check expects.
const MAX_ROWS_PER_REQUEST_U64: u64 = MAX_ROWS_PER_REQUEST as u64;

/// A single input record with two numeric features.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Row {
    pub x1: f64,
    pub x2: f64,
}

#[derive(Debug, Deserialize, Validate)]
pub struct PredictRequest {
    #[validate(length(max = MAX_ROWS_PER_REQUEST_U64, message = "Too many rows in a single request"))]
    pub rows: Vec<Row>,
}

/// One prediction per input row, in input order.
#[derive(Debug, Serialize, Deserialize)]
pub struct PredictResponse {
    pub preds: Vec<f64>,
}
