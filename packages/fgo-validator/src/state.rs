//! Application state shared across handlers.

use std::sync::atomic::AtomicU64;
use std::sync::Arc;
use std::time::Instant;

use fgo_demand::{ContractReader, CreditsLookup, DemandValidator};
use fgo_types::Dictionary;
use tracing::info;

use crate::config::Config;
use crate::rpc::RpcClient;
use crate::subgraph::SubgraphClient;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub validator: DemandValidator,
    /// `None` when the reader is not a JSON-RPC client (tests, tooling).
    pub rpc: Option<Arc<RpcClient>>,
    /// Default message templates for requests that bring none.
    pub dictionary: Option<Dictionary>,
    pub start_time: Instant,
    pub request_count: AtomicU64,
}

impl AppState {
    /// Wire the JSON-RPC reader and subgraph client from configuration.
    pub fn new(config: Config) -> Result<Self, crate::Error> {
        let timeout = config.request_timeout();
        let rpc = Arc::new(RpcClient::new(
            &config.rpc_url,
            &config.fallback_rpc_url,
            timeout,
        )?);
        let credits = Arc::new(SubgraphClient::new(&config.subgraph_url, timeout)?);
        info!(subgraph = %credits.url(), "Credits subgraph configured");

        let mut state = Self::with_collaborators(config, rpc.clone(), credits)?;
        state.rpc = Some(rpc);
        Ok(state)
    }

    /// State over arbitrary collaborators.
    pub fn with_collaborators(
        config: Config,
        reader: Arc<dyn ContractReader>,
        credits: Arc<dyn CreditsLookup>,
    ) -> Result<Self, crate::Error> {
        let dictionary = config.load_dictionary()?;
        if dictionary.is_some() {
            info!(path = ?config.dictionary_path, "Loaded default dictionary");
        }
        Ok(Self {
            config,
            validator: DemandValidator::new(reader, credits),
            rpc: None,
            dictionary,
            start_time: Instant::now(),
            request_count: AtomicU64::new(0),
        })
    }

    /// Request dictionary first, then the configured default.
    pub fn dictionary<'a>(&'a self, requested: Option<&'a Dictionary>) -> Option<&'a Dictionary> {
        requested.or(self.dictionary.as_ref())
    }
}
