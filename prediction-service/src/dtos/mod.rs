pub mod predict;

pub use predict::{PredictRequest, PredictResponse, Row, MAX_BODY_BYTES, MAX_ROWS_PER_REQUEST};
