use std::sync::Arc;

use async_trait::async_trait;

use super::Contract;
use crate::domain::{Address, Deployment, Receipt, TxHash, U256};
use crate::error::Result;

/// A connection to one named blockchain network.
#[async_trait]
pub trait ChainProvider: Send + Sync {
    fn name(&self) -> &str;

    /// Returns the named contract, deploying it first if this chain has no
    /// record of it.
    async fn get_or_deploy_contract(&self, name: &str)
    -> Result<(Arc<dyn Contract>, Deployment)>;

    async fn accounts(&self) -> Result<Vec<Address>>;
    async fn balance(&self, address: &Address) -> Result<U256>;
    async fn block_number(&self) -> Result<u64>;
    async fn wait_for_receipt(&self, tx_hash: &TxHash) -> Result<Receipt>;

    /// Resolves once the chain head has reached `number`.
    async fn wait_for_block(&self, number: u64) -> Result<u64>;

    /// Blocks that must be mined on top of a claim before its reveal.
    fn confirmations(&self) -> u64 {
        0
    }
}

/// Opens chain handles by name. Opening is cheap; network traffic starts
/// with the first call on the returned provider.
pub trait ChainConnector: Send + Sync {
    fn connect(&self, name: &str) -> Result<Arc<dyn ChainProvider>>;
}
