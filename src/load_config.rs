use crate::config::Config;
use anyhow::{Context, Result};
use reqwest::Url;
use std::fs;
use std::path::Path;
use tracing::{error, info};

/// Environment variable overriding the service endpoint.
pub const ENDPOINT_ENV: &str = "SK_CLIENT_ENDPOINT";

/// Builds the effective [`Config`].
///
/// Precedence, lowest first: built-in defaults, the optional YAML file,
/// `SK_CLIENT_ENDPOINT` from the environment (or `.env`), then
/// `endpoint_override` from the command line. The resulting endpoint must be
/// a valid URL.
pub fn load_config(path: Option<&Path>, endpoint_override: Option<&str>) -> Result<Config> {
    let mut config = match path {
        Some(path) => read_config_file(path)?,
        None => {
            info!("No config file given, using defaults");
            Config::default()
        }
    };

    match std::env::var(ENDPOINT_ENV) {
        Ok(endpoint) if !endpoint.trim().is_empty() => {
            info!(endpoint = %endpoint, "Endpoint taken from environment");
            config.endpoint = endpoint.trim().to_string();
        }
        _ => {}
    }

    if let Some(endpoint) = endpoint_override {
        info!(endpoint = %endpoint, "Endpoint taken from command line");
        config.endpoint = endpoint.to_string();
    }

    endpoint_url(&config)?;
    config.trace_loaded();
    Ok(config)
}

/// Parses the configured endpoint.
pub fn endpoint_url(config: &Config) -> Result<Url> {
    Url::parse(&config.endpoint).map_err(|e| {
        error!(endpoint = %config.endpoint, error = %e, "Invalid endpoint URL");
        anyhow::anyhow!("Invalid endpoint URL {:?}: {e}", config.endpoint)
    })
}

fn read_config_file(path: &Path) -> Result<Config> {
    info!(config_path = ?path, "Loading configuration from file");

    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            error!(error = ?e, config_path = ?path, "Failed to read config file");
            return Err(e).with_context(|| format!("Failed to read config file {path:?}"));
        }
    };

    // An empty file is a valid "all defaults" config.
    if content.trim().is_empty() {
        return Ok(Config::default());
    }

    match serde_yaml::from_str(&content) {
        Ok(config) => {
            info!(config_path = ?path, "Parsed config YAML successfully");
            Ok(config)
        }
        Err(e) => {
            error!(error = ?e, config_path = ?path, "Failed to parse config YAML");
            Err(anyhow::anyhow!("Failed to parse config YAML: {e}"))
        }
    }
}
