pub mod metrics;
pub mod predictor;

pub use self::metrics::{get_metrics, init_metrics, record_prediction};
pub use predictor::{
    build_predictor, DummyPredictor, LinearPredictor, Link, Predictor, PredictorError,
};
