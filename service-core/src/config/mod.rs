use crate::error::AppError;
use config::{Config as Cfg, Environment, File};
use serde::Deserialize;

/// Settings shared by every service: where the HTTP listener binds.
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_port() -> u16 {
    8080
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: default_port(),
        }
    }
}

impl Config {
    /// Load from an optional `configuration` file, overridden by `APP__*`
    /// environment variables (e.g. `APP__PORT=9000`).
    pub fn load() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let config = Cfg::builder()
            .add_source(File::with_name("configuration").required(false))
            .add_source(Environment::with_prefix("APP").separator("__"))
            .build()?;

        Ok(config.try_deserialize()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_source_uses_default_port() {
        let cfg = Cfg::builder().build().unwrap();
        let config: Config = cfg.try_deserialize().unwrap();
        assert_eq!(config.port, 8080);
    }

    #[test]
    fn explicit_port_overrides_default() {
        let cfg = Cfg::builder().set_override("port", 0).unwrap().build().unwrap();
        let config: Config = cfg.try_deserialize().unwrap();
        assert_eq!(config.port, 0);
    }
}
