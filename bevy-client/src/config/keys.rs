//! The configuration keys the client knows, and the registry that builds them.

use std::sync::Arc;

use async_trait::async_trait;

use super::{ActiveChain, Constructor, Registry, Resolution, Value};
use crate::error::Result;
use crate::ports::ChainConnector;

pub const ACTIVE_CHAIN: &str = "active_chain";
pub const MANAGER_CONTRACT: &str = "manager_contract";
pub const USER_ADDRESS: &str = "user_address";

pub const DEFAULT_MANAGER_CONTRACT: &str = "ProductManagerV2";

/// `active_chain`: chain name to chain handle.
pub struct ChainByName {
    connector: Arc<dyn ChainConnector>,
}

#[async_trait]
impl Constructor for ChainByName {
    async fn construct(&self, _cx: &Resolution<'_>, raw: String) -> Result<Value> {
        self.connector.connect(&raw).map(Value::Chain)
    }
}

/// `manager_contract`: contract name to a handle fetched or deployed on the
/// active chain.
pub struct ContractOnActiveChain;

#[async_trait]
impl Constructor for ContractOnActiveChain {
    async fn construct(&self, cx: &Resolution<'_>, raw: String) -> Result<Value> {
        let chain: ActiveChain = cx.inject().await?;
        let (contract, deployment) = chain.get_or_deploy_contract(&raw).await?;
        tracing::debug!(
            chain = chain.name(),
            contract = %raw,
            address = %deployment.address,
            deployed = deployment.deployed,
            "resolved contract on active chain"
        );
        Ok(Value::Contract(contract))
    }
}

/// `user_address` has no constructor; it is parsed where it is injected.
pub fn standard_registry(connector: Arc<dyn ChainConnector>) -> Registry {
    Registry::new()
        .register(ACTIVE_CHAIN, ChainByName { connector })
        .register(MANAGER_CONTRACT, ContractOnActiveChain)
}
