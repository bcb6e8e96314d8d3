use serde::{Deserialize, Serialize};
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;
use std::path::Path;
use std::str::FromStr;

#[derive(Debug, Clone, Deserialize)]
pub struct PredictionConfig {
    #[serde(flatten)]
    pub common: core_config::Config,
    pub model: ModelConfig,
    pub telemetry: TelemetryConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PredictorKind {
    Linear,
    Logistic,
    Dummy,
}

impl FromStr for PredictorKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "linear" => Ok(PredictorKind::Linear),
            "logistic" => Ok(PredictorKind::Logistic),
            "dummy" => Ok(PredictorKind::Dummy),
            other => Err(AppError::ConfigError(anyhow::anyhow!(
                "Unknown predictor kind '{}' (expected linear, logistic or dummy)",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ModelConfig {
    pub kind: PredictorKind,
    /// Coefficients for `x1` and `x2`, in that order.
    pub weights: [f64; 2],
    #[serde(default)]
    pub bias: f64,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            kind: PredictorKind::Logistic,
            weights: [0.5, -0.5],
            bias: 0.0,
        }
    }
}

impl ModelConfig {
    /// Read a model definition from a JSON file, e.g.
    /// `{"kind": "logistic", "weights": [1.2, -0.4], "bias": 0.1}`.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, AppError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            AppError::ConfigError(anyhow::anyhow!(
                "Failed to read model file {}: {}",
                path.display(),
                e
            ))
        })?;

        serde_json::from_str(&raw).map_err(|e| {
            AppError::ConfigError(anyhow::anyhow!(
                "Invalid model file {}: {}",
                path.display(),
                e
            ))
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct TelemetryConfig {
    pub log_level: String,
    /// OTLP collector endpoint. Spans are only exported when set.
    pub otlp_endpoint: Option<String>,
}

impl PredictionConfig {
    pub fn load() -> Result<Self, AppError> {
        let common_config = core_config::Config::load()?;
        let is_prod = env::var("ENVIRONMENT").unwrap_or_else(|_| "dev".to_string()) == "prod";

        let model = match env::var("MODEL_PATH") {
            Ok(path) if !path.trim().is_empty() => {
                tracing::info!(path = %path, "Loading model definition from file");
                ModelConfig::from_file(path)?
            }
            _ => ModelConfig {
                kind: get_env("PREDICTOR_KIND", Some("logistic"), is_prod)?.parse()?,
                weights: parse_weights(&get_env("MODEL_WEIGHTS", Some("0.5,-0.5"), is_prod)?)?,
                bias: get_env("MODEL_BIAS", Some("0.0"), is_prod)?
                    .trim()
                    .parse()
                    .map_err(|e| {
                        AppError::ConfigError(anyhow::anyhow!("Invalid MODEL_BIAS: {}", e))
                    })?,
            },
        };

        Ok(PredictionConfig {
            common: common_config,
            model,
            telemetry: TelemetryConfig {
                log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
                otlp_endpoint: env::var("OTLP_ENDPOINT").ok().filter(|s| !s.is_empty()),
            },
        })
    }
}

/// Parse `"w1,w2"` into the two feature weights.
pub fn parse_weights(raw: &str) -> Result<[f64; 2], AppError> {
    let parsed = raw
        .split(',')
        .map(|part| part.trim().parse::<f64>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| AppError::ConfigError(anyhow::anyhow!("Invalid MODEL_WEIGHTS: {}", e)))?;

    match parsed.as_slice() {
        [w1, w2] => Ok([*w1, *w2]),
        _ => Err(AppError::ConfigError(anyhow::anyhow!(
            "MODEL_WEIGHTS must contain exactly 2 values, got {}",
            parsed.len()
        ))),
    }
}

fn get_env(key: &str, default: Option<&str>, is_prod: bool) -> Result<String, AppError> {
    match env::var(key) {
        Ok(val) => Ok(val),
        Err(_) => {
            if is_prod {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required in production but not set",
                    key
                )))
            } else if let Some(def) = default {
                Ok(def.to_string())
            } else {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required but not set",
                    key
                )))
            }
        }
    }
}
