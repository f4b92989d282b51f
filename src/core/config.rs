use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_MAX_CONCURRENT: usize = 50;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Optional TOML configuration file
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub gateway: Option<GatewayConfig>,
    pub runner: RunnerConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            gateway: None,
            runner: RunnerConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    pub base_url: String,
    pub auth_key: Option<String>,
}

impl Config {
    /// Gateway base URL: the CLI flag wins over the config file
    pub fn resolve_base_url(&self, cli_url: Option<String>) -> Option<String> {
        cli_url.or_else(|| self.gateway.as_ref().map(|g| g.base_url.clone()))
    }

    /// Auth key: CLI flag, then environment, then config file
    pub fn resolve_auth_key(
        &self,
        cli_key: Option<String>,
        env_key: Option<String>,
    ) -> Option<String> {
        cli_key
            .or(env_key)
            .or_else(|| self.gateway.as_ref().and_then(|g| g.auth_key.clone()))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RunnerConfig {
    pub max_concurrent: usize,
    pub request_timeout_secs: u64,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            max_concurrent: DEFAULT_MAX_CONCURRENT,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

/// Resolved settings for one run, after merging CLI flags, environment and
/// config file
#[derive(Debug, Clone)]
pub struct TesterSettings {
    pub base_url: String,
    pub auth_key: String,
    pub max_concurrent: usize,
    pub request_timeout: Duration,
}

impl TesterSettings {
    pub fn new(
        base_url: &str,
        auth_key: String,
        max_concurrent: usize,
        request_timeout: Duration,
    ) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            auth_key,
            max_concurrent,
            request_timeout,
        }
    }
}
