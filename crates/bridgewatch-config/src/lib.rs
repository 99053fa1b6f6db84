//! Shared configuration for bridgewatch.
//!
//! TOML file plus `BRIDGEWATCH_*` environment overrides, layered with
//! figment, and translation to `bridgewatch_core::EngineConfig`.

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use bridgewatch_core::EngineConfig;
use bridgewatch_core::config::{DEFAULT_BASE_URL, DEFAULT_SERVICE};

/// Prefix for environment overrides, e.g. `BRIDGEWATCH_BASE_URL`.
pub const ENV_PREFIX: &str = "BRIDGEWATCH_";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config struct ──────────────────────────────────────────────

/// On-disk configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    /// bridget service root, including the version prefix.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Poll period in milliseconds.
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    /// Per-request timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Service tag attached to failure notifications.
    #[serde(default = "default_service")]
    pub service: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            poll_interval_ms: default_poll_interval_ms(),
            timeout_ms: default_timeout_ms(),
            service: default_service(),
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.into()
}
fn default_poll_interval_ms() -> u64 {
    1000
}
fn default_timeout_ms() -> u64 {
    10_000
}
fn default_service() -> String {
    DEFAULT_SERVICE.into()
}

impl Config {
    /// Validate and convert into the engine's runtime configuration.
    pub fn to_engine_config(&self) -> Result<EngineConfig, ConfigError> {
        let base_url: url::Url = self.base_url.parse().map_err(|e| ConfigError::Validation {
            field: "base_url".into(),
            reason: format!("invalid URL '{}': {e}", self.base_url),
        })?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(ConfigError::Validation {
                field: "base_url".into(),
                reason: format!("unsupported scheme '{}'", base_url.scheme()),
            });
        }
        if self.poll_interval_ms == 0 {
            return Err(ConfigError::Validation {
                field: "poll_interval_ms".into(),
                reason: "must be greater than zero".into(),
            });
        }
        if self.timeout_ms == 0 {
            return Err(ConfigError::Validation {
                field: "timeout_ms".into(),
                reason: "must be greater than zero".into(),
            });
        }

        Ok(EngineConfig {
            base_url,
            poll_interval: Duration::from_millis(self.poll_interval_ms),
            timeout: Duration::from_millis(self.timeout_ms),
            service: self.service.clone(),
        })
    }
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("org", "bridgewatch", "bridgewatch").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("bridgewatch");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load config from `path` + environment. A missing file is not an error.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let config: Config = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed(ENV_PREFIX))
        .extract()?;
    Ok(config)
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write it to `path`, creating parent dirs.
pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use figment::Jail;

    use super::*;

    #[test]
    fn defaults_match_engine_defaults() {
        let engine = Config::default().to_engine_config().unwrap();
        assert_eq!(engine, EngineConfig::default());
    }

    #[test]
    fn toml_file_overrides_defaults() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "bridgewatch.toml",
                r#"
                    base_url = "http://blueos.local/bridget/v1.0"
                    poll_interval_ms = 500
                "#,
            )?;

            let cfg = load_config_from(Path::new("bridgewatch.toml")).map_err(|e| e.to_string())?;
            assert_eq!(cfg.base_url, "http://blueos.local/bridget/v1.0");
            assert_eq!(cfg.poll_interval_ms, 500);
            assert_eq!(cfg.timeout_ms, 10_000);
            assert_eq!(cfg.service, "bridget");
            Ok(())
        });
    }

    #[test]
    fn env_overrides_file() {
        Jail::expect_with(|jail| {
            jail.create_file("bridgewatch.toml", "poll_interval_ms = 500")?;
            jail.set_env("BRIDGEWATCH_POLL_INTERVAL_MS", "250");
            jail.set_env("BRIDGEWATCH_SERVICE", "bridget-test");

            let cfg = load_config_from(Path::new("bridgewatch.toml")).map_err(|e| e.to_string())?;
            assert_eq!(cfg.poll_interval_ms, 250);
            assert_eq!(cfg.service, "bridget-test");
            Ok(())
        });
    }

    #[test]
    fn missing_file_yields_defaults() {
        Jail::expect_with(|_jail| {
            let cfg = load_config_from(Path::new("absent.toml")).map_err(|e| e.to_string())?;
            assert_eq!(cfg, Config::default());
            Ok(())
        });
    }

    #[test]
    fn rejects_bad_url() {
        let cfg = Config {
            base_url: "not a url".into(),
            ..Config::default()
        };
        let err = cfg.to_engine_config().unwrap_err();
        assert!(matches!(err, ConfigError::Validation { ref field, .. } if field == "base_url"));
    }

    #[test]
    fn rejects_non_http_scheme() {
        let cfg = Config {
            base_url: "ftp://host/bridget".into(),
            ..Config::default()
        };
        assert!(cfg.to_engine_config().is_err());
    }

    #[test]
    fn rejects_zero_interval() {
        let cfg = Config {
            poll_interval_ms: 0,
            ..Config::default()
        };
        let err = cfg.to_engine_config().unwrap_err();
        assert!(err.to_string().contains("poll_interval_ms"));
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let cfg = Config {
            base_url: "http://10.0.0.2/bridget/v1.0".into(),
            poll_interval_ms: 2000,
            ..Config::default()
        };

        save_config_to(&cfg, &path).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("poll_interval_ms = 2000"));

        let parsed: Config = toml::from_str(&text).unwrap();
        assert_eq!(parsed, cfg);
    }
}
