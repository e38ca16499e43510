use anyhow::Result;
use figment::{providers::{Env, Format, Serialized, Toml}, Figment};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::PathBuf;

use crate::forecast::DEFAULT_WORKDAYS_PER_WEEK;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub models: ModelsConfig,
    #[serde(default)]
    pub projection: ProjectionConfig,
    #[serde(default)]
    pub prediction: PredictionConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub request_timeout_seconds: u64,
}
impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        Ok(format!("{}:{}", self.host, self.port).parse()?)
    }
}
impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "127.0.0.1".to_string(), port: 8080, request_timeout_seconds: 30 }
    }
}

/// Where estimator artifacts live and how missing ones are fetched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelsConfig {
    pub dir: PathBuf,
    /// Remote host for artifacts absent from `dir`; `None` disables fetching.
    pub base_url: Option<String>,
    pub file_prefix: String,
    pub extension: String,
    pub fetch_timeout_seconds: u64,
    pub fetch_max_retries: u32,
    pub preload: bool,
}
impl Default for ModelsConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("models"),
            base_url: None,
            file_prefix: "rf_model_".to_string(),
            extension: "bin".to_string(),
            fetch_timeout_seconds: 30,
            fetch_max_retries: 3,
            preload: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectionConfig { pub workdays_per_week: f64 }
impl Default for ProjectionConfig {
    fn default() -> Self {
        Self { workdays_per_week: DEFAULT_WORKDAYS_PER_WEEK }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionConfig { pub default_calls: i64 }
impl Default for PredictionConfig {
    fn default() -> Self {
        Self { default_calls: 10 }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::from_figment(
            Figment::from(Serialized::defaults(Config::default()))
                .merge(Toml::file("config/default.toml"))
                .merge(Env::prefixed("PREDICTOR__").split("__")),
        )
    }

    pub fn from_figment(figment: Figment) -> Result<Self> {
        let cfg: Self = figment.extract()?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        let workdays = self.projection.workdays_per_week;
        if !workdays.is_finite() || workdays <= 0.0 {
            anyhow::bail!(
                "projection.workdays_per_week must be positive, got {workdays}"
            );
        }
        if self.prediction.default_calls < 1 {
            anyhow::bail!(
                "prediction.default_calls must be >= 1, got {}",
                self.prediction.default_calls
            );
        }
        if self.server.request_timeout_seconds == 0 {
            anyhow::bail!("server.request_timeout_seconds must be non-zero");
        }
        if self.models.fetch_timeout_seconds == 0 {
            anyhow::bail!("models.fetch_timeout_seconds must be non-zero");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn test_defaults_are_valid() {
        let cfg = Config::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.projection.workdays_per_week, 5.0);
        assert_eq!(cfg.prediction.default_calls, 10);
        assert_eq!(cfg.models.file_prefix, "rf_model_");
    }

    #[test]
    fn test_toml_and_env_layering() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "predictor.toml",
                r#"
                [server]
                host = "0.0.0.0"
                port = 9000
                request_timeout_seconds = 5

                [models]
                dir = "/var/lib/models"
                base_url = "https://models.example.com/artifacts"
                file_prefix = "rf_model_"
                extension = "bin"
                fetch_timeout_seconds = 10
                fetch_max_retries = 2
                preload = false
                "#,
            )?;
            jail.set_env("PREDICTOR__PROJECTION__WORKDAYS_PER_WEEK", "6.0");

            let cfg = Config::from_figment(
                Figment::from(Serialized::defaults(Config::default()))
                    .merge(Toml::file("predictor.toml"))
                    .merge(Env::prefixed("PREDICTOR__").split("__")),
            )
            .map_err(|e| e.to_string())?;

            assert_eq!(cfg.server.port, 9000);
            assert_eq!(cfg.models.dir, PathBuf::from("/var/lib/models"));
            assert!(!cfg.models.preload);
            assert_eq!(cfg.projection.workdays_per_week, 6.0);
            assert_eq!(cfg.prediction.default_calls, 10);
            Ok(())
        });
    }

    #[test]
    fn test_rejects_non_positive_workweek() {
        let mut cfg = Config::default();
        cfg.projection.workdays_per_week = 0.0;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_rejects_non_positive_default_calls() {
        let mut cfg = Config::default();
        cfg.prediction.default_calls = 0;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_rejects_zero_timeouts() {
        let mut cfg = Config::default();
        cfg.server.request_timeout_seconds = 0;
        assert!(cfg.validate().is_err());

        let mut cfg = Config::default();
        cfg.models.fetch_timeout_seconds = 0;
        assert!(cfg.validate().is_err());
    }
}
