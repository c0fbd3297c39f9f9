use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use alloy::primitives::U64;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

use super::client::RpcClient;
use super::{Registrar, RpcContract, load_bytecode};
use crate::config::{ChainSettings, Settings};
use crate::domain::{Address, Bytes, Deployment, Receipt, TxHash, U256};
use crate::error::{BevyError, Result};
use crate::ports::{ChainProvider, Contract};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawReceipt {
    transaction_hash: TxHash,
    block_number: Option<U64>,
    gas_used: U64,
    contract_address: Option<Address>,
    status: Option<U64>,
}

impl RawReceipt {
    fn into_receipt(self) -> Option<Receipt> {
        // a receipt without a block is still pending on some nodes
        let block = self.block_number?;
        Some(Receipt {
            transaction_hash: self.transaction_hash,
            block_number: block.to(),
            gas_used: self.gas_used.to(),
            contract_address: self.contract_address,
            success: self.status.is_none_or(|status| status == U64::from(1)),
        })
    }
}

pub struct RpcChain {
    name: String,
    client: Arc<RpcClient>,
    settings: ChainSettings,
    registrar_path: PathBuf,
    artifacts_dir: PathBuf,
    poll_interval: Duration,
    receipt_timeout: Duration,
}

impl RpcChain {
    pub fn new(
        name: impl Into<String>,
        client: RpcClient,
        settings: ChainSettings,
        global: &Settings,
    ) -> Self {
        Self {
            name: name.into(),
            client: Arc::new(client),
            settings,
            registrar_path: global.registrar_path(),
            artifacts_dir: global.artifacts_dir(),
            poll_interval: Duration::from_millis(global.client.poll_interval_ms),
            receipt_timeout: Duration::from_secs(global.client.receipt_timeout_secs),
        }
    }

    fn contract(&self, name: &str, address: Address) -> Arc<dyn Contract> {
        Arc::new(RpcContract::new(name, address, Arc::clone(&self.client)))
    }

    async fn default_account(&self) -> Result<Address> {
        if let Some(from) = self.settings.from {
            return Ok(from);
        }
        self.accounts().await?.first().copied().ok_or_else(|| {
            BevyError::Config(format!("chain {} has no accounts to deploy from", self.name))
        })
    }

    async fn has_code(&self, address: &Address) -> Result<bool> {
        let code: Bytes = self
            .client
            .request("eth_getCode", json!([address, "latest"]))
            .await?;
        Ok(!code.is_empty())
    }

    async fn deploy(&self, name: &str) -> Result<(Address, Receipt)> {
        let bytecode = load_bytecode(&self.artifacts_dir, name)?;
        let from = self.default_account().await?;
        let tx_hash: TxHash = self
            .client
            .request(
                "eth_sendTransaction",
                json!([{ "from": from, "data": bytecode }]),
            )
            .await?;
        tracing::info!(chain = %self.name, contract = name, %tx_hash, "deploying contract");

        let receipt = self.wait_for_receipt(&tx_hash).await?;
        let address = receipt.contract_address.ok_or_else(|| {
            BevyError::ContractNotFound(format!("{name}: deployment receipt has no address"))
        })?;
        Ok((address, receipt))
    }
}

#[async_trait]
impl ChainProvider for RpcChain {
    fn name(&self) -> &str {
        &self.name
    }

    async fn get_or_deploy_contract(
        &self,
        name: &str,
    ) -> Result<(Arc<dyn Contract>, Deployment)> {
        let mut registrar = Registrar::load(&self.registrar_path)?;

        if let Some(address) = registrar.get(&self.name, name) {
            if self.has_code(&address).await? {
                let deployment = Deployment {
                    chain: self.name.clone(),
                    contract: name.to_string(),
                    address,
                    deployed: false,
                    receipt: None,
                };
                return Ok((self.contract(name, address), deployment));
            }
            tracing::warn!(
                chain = %self.name,
                contract = name,
                %address,
                "registered address has no code, deploying again"
            );
        }

        let (address, receipt) = self.deploy(name).await?;
        registrar.record(&self.name, name, address);
        registrar.save()?;

        let deployment = Deployment {
            chain: self.name.clone(),
            contract: name.to_string(),
            address,
            deployed: true,
            receipt: Some(receipt),
        };
        Ok((self.contract(name, address), deployment))
    }

    async fn accounts(&self) -> Result<Vec<Address>> {
        self.client.request("eth_accounts", json!([])).await
    }

    async fn balance(&self, address: &Address) -> Result<U256> {
        self.client
            .request("eth_getBalance", json!([address, "latest"]))
            .await
    }

    async fn block_number(&self) -> Result<u64> {
        let number: U64 = self.client.request("eth_blockNumber", json!([])).await?;
        Ok(number.to())
    }

    async fn wait_for_receipt(&self, tx_hash: &TxHash) -> Result<Receipt> {
        let started = tokio::time::Instant::now();
        loop {
            let raw: Option<RawReceipt> = self
                .client
                .request("eth_getTransactionReceipt", json!([tx_hash]))
                .await?;

            if let Some(receipt) = raw.and_then(RawReceipt::into_receipt) {
                if !receipt.success {
                    return Err(BevyError::TransactionFailed(tx_hash.to_string()));
                }
                tracing::info!(
                    %tx_hash,
                    block = receipt.block_number,
                    gas_used = receipt.gas_used,
                    "transaction mined"
                );
                return Ok(receipt);
            }

            if started.elapsed() >= self.receipt_timeout {
                return Err(BevyError::ReceiptTimeout(tx_hash.to_string()));
            }
            tokio::time::sleep(self.poll_interval).await;
        }
    }

    async fn wait_for_block(&self, number: u64) -> Result<u64> {
        let started = tokio::time::Instant::now();
        loop {
            let head = self.block_number().await?;
            if head >= number {
                return Ok(head);
            }
            if started.elapsed() >= self.receipt_timeout {
                return Err(BevyError::ReceiptTimeout(format!("block {number}")));
            }
            tracing::debug!(head, target_block = number, "waiting for confirmations");
            tokio::time::sleep(self.poll_interval).await;
        }
    }

    fn confirmations(&self) -> u64 {
        self.settings.confirmations
    }
}
