use async_trait::async_trait;
use serde::Deserialize;

use crate::domain::{Address, B256, Bytes, TxHash};
use crate::error::Result;

/// One emitted event, still ABI-encoded.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EventLog {
    pub topics: Vec<B256>,
    pub data: Bytes,
}

/// A deployed contract: read-only `call`s and state-changing `transact`s on
/// already-encoded calldata. Typed wrappers live in [`crate::abi`].
#[async_trait]
pub trait Contract: Send + Sync {
    fn name(&self) -> &str;
    fn address(&self) -> Address;

    async fn call(&self, input: Bytes) -> Result<Bytes>;
    async fn transact(&self, from: Address, input: Bytes) -> Result<TxHash>;

    /// Logs whose first topic is `topic`, from genesis to the latest block.
    async fn logs(&self, topic: B256) -> Result<Vec<EventLog>>;
}
