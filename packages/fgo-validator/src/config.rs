//! Validator service configuration.

use std::time::Duration;

use ::config::ConfigError;
use fgo_types::Dictionary;
use serde::Deserialize;
use tracing::warn;

/// Loaded from `validator.toml` (optional) and `FGO_VALIDATOR_*` env vars.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default = "defaults::rpc_url")]
    pub rpc_url: String,

    #[serde(default = "defaults::fallback_rpc_url")]
    pub fallback_rpc_url: String,

    #[serde(default = "defaults::subgraph_url")]
    pub subgraph_url: String,

    #[serde(default = "defaults::bind_address")]
    pub bind_address: String,

    #[serde(default = "defaults::request_timeout_ms")]
    pub request_timeout_ms: u64,

    /// JSON file with message templates applied when a request carries none.
    #[serde(default)]
    pub dictionary_path: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rpc_url: defaults::rpc_url(),
            fallback_rpc_url: defaults::fallback_rpc_url(),
            subgraph_url: defaults::subgraph_url(),
            bind_address: defaults::bind_address(),
            request_timeout_ms: defaults::request_timeout_ms(),
            dictionary_path: None,
        }
    }
}

impl Config {
    /// Layer `<file>.toml` (optional) under `<ENV_PREFIX>_*` variables.
    ///
    /// Every field has a default, so a missing key is not an error; bad
    /// values and unreadable files are.
    pub fn load(file: &str, env_prefix: &str) -> Result<Self, crate::Error> {
        let loaded = ::config::Config::builder()
            .add_source(::config::File::with_name(file).required(false))
            .add_source(::config::Environment::with_prefix(env_prefix))
            .build()
            .and_then(|c| c.try_deserialize::<Self>());
        match loaded {
            Ok(config) => Ok(config),
            Err(ConfigError::NotFound(key)) => {
                warn!(%key, "Config key not found, using defaults");
                Ok(Self::default())
            }
            Err(e) => Err(crate::Error::Config(e.to_string())),
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    /// Read the default dictionary, if one is configured.
    pub fn load_dictionary(&self) -> Result<Option<Dictionary>, crate::Error> {
        let Some(path) = self.dictionary_path.as_deref() else {
            return Ok(None);
        };
        let raw = std::fs::read_to_string(path)
            .map_err(|e| crate::Error::Config(format!("cannot read dictionary {path}: {e}")))?;
        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|e| crate::Error::Config(format!("invalid dictionary {path}: {e}")))
    }
}

mod defaults {
    pub fn rpc_url() -> String {
        // Priority: FGO_RPC_URL > public Amoy endpoint
        if let Ok(url) = std::env::var("FGO_RPC_URL") {
            if !url.is_empty() {
                return url;
            }
        }
        "https://rpc-amoy.polygon.technology".into()
    }

    pub fn fallback_rpc_url() -> String {
        "https://polygon-amoy.drpc.org".into()
    }

    pub fn subgraph_url() -> String {
        "https://api.studio.thegraph.com/query/fgo/fgo-amoy/version/latest".into()
    }

    pub fn bind_address() -> String {
        "0.0.0.0:3050".into()
    }

    pub fn request_timeout_ms() -> u64 {
        10_000
    }
}
