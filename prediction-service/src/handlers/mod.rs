//! HTTP handlers for prediction-service.

pub mod health;
pub mod metrics;
pub mod not_found;
pub mod predict;

pub use health::{health_check, readiness_check};
pub use self::metrics::metrics;
pub use not_found::not_found;
pub use predict::predict;
