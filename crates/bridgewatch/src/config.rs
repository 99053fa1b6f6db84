//! CLI configuration: thin wrapper around `bridgewatch_config`.
//!
//! Adds resolution that respects `GlobalOpts` flag overrides
//! (--config, --base-url, --timeout-ms).

use std::path::PathBuf;

use bridgewatch_core::EngineConfig;

use crate::cli::GlobalOpts;
use crate::error::CliError;

pub use bridgewatch_config::{Config, load_config_from, save_config_to};

/// The config file this invocation reads: `--config` or the platform default.
pub fn active_config_path(global: &GlobalOpts) -> PathBuf {
    global
        .config
        .clone()
        .unwrap_or_else(bridgewatch_config::config_path)
}

/// Load the file + environment layers, then apply flag overrides.
pub fn resolve_config(global: &GlobalOpts) -> Result<Config, CliError> {
    let mut cfg = load_config_from(&active_config_path(global))?;

    if let Some(ref url) = global.base_url {
        cfg.base_url.clone_from(url);
    }
    if let Some(timeout_ms) = global.timeout_ms {
        cfg.timeout_ms = timeout_ms;
    }

    Ok(cfg)
}

/// Resolve the engine configuration, optionally overriding the poll period.
pub fn resolve_engine_config(
    global: &GlobalOpts,
    interval_ms: Option<u64>,
) -> Result<EngineConfig, CliError> {
    let mut cfg = resolve_config(global)?;
    if let Some(ms) = interval_ms {
        cfg.poll_interval_ms = ms;
    }
    tracing::debug!(base_url = %cfg.base_url, poll_ms = cfg.poll_interval_ms, "resolved config");
    Ok(cfg.to_engine_config()?)
}
