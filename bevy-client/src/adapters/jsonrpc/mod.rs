//! Chain provider over Ethereum JSON-RPC (HTTP).

mod artifacts;
mod chain;
mod client;
mod contract;
mod registrar;

use std::sync::Arc;

pub use artifacts::load_bytecode;
pub use chain::RpcChain;
pub use client::RpcClient;
pub use contract::RpcContract;
pub use registrar::Registrar;

use crate::config::Settings;
use crate::error::Result;
use crate::ports::{ChainConnector, ChainProvider};

/// Opens [`RpcChain`]s for the chains named in the settings.
pub struct RpcConnector {
    settings: Arc<Settings>,
    http: reqwest::Client,
}

impl RpcConnector {
    pub fn new(settings: Arc<Settings>) -> Self {
        Self {
            settings,
            http: reqwest::Client::new(),
        }
    }
}

impl ChainConnector for RpcConnector {
    fn connect(&self, name: &str) -> Result<Arc<dyn ChainProvider>> {
        let chain_settings = self.settings.chain(name)?;
        let canonical = Settings::canonical_chain_name(name);
        let client = RpcClient::with_http(self.http.clone(), chain_settings.rpc_url.clone());
        tracing::debug!(chain = canonical, url = %chain_settings.rpc_url, "opening chain");
        Ok(Arc::new(RpcChain::new(
            canonical,
            client,
            chain_settings,
            &self.settings,
        )))
    }
}
