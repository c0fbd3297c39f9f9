use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;

use super::client::RpcClient;
use crate::domain::{Address, B256, Bytes, TxHash};
use crate::error::Result;
use crate::ports::{Contract, EventLog};

pub struct RpcContract {
    name: String,
    address: Address,
    client: Arc<RpcClient>,
}

impl RpcContract {
    pub fn new(name: impl Into<String>, address: Address, client: Arc<RpcClient>) -> Self {
        Self {
            name: name.into(),
            address,
            client,
        }
    }
}

#[async_trait]
impl Contract for RpcContract {
    fn name(&self) -> &str {
        &self.name
    }

    fn address(&self) -> Address {
        self.address
    }

    async fn call(&self, input: Bytes) -> Result<Bytes> {
        self.client
            .request(
                "eth_call",
                json!([{ "to": self.address, "data": input }, "latest"]),
            )
            .await
    }

    async fn transact(&self, from: Address, input: Bytes) -> Result<TxHash> {
        let tx_hash: TxHash = self
            .client
            .request(
                "eth_sendTransaction",
                json!([{ "from": from, "to": self.address, "data": input }]),
            )
            .await?;
        tracing::info!(contract = %self.name, %from, %tx_hash, "sent transaction");
        Ok(tx_hash)
    }

    async fn logs(&self, topic: B256) -> Result<Vec<EventLog>> {
        self.client
            .request(
                "eth_getLogs",
                json!([{
                    "address": self.address,
                    "topics": [topic],
                    "fromBlock": "0x0",
                    "toBlock": "latest",
                }]),
            )
            .await
    }
}
