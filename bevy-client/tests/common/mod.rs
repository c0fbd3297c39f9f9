#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use alloy::primitives::keccak256;
use alloy::sol_types::{SolCall, SolEvent};
use async_trait::async_trait;
use bevy_client::config::{Environment, Resolver, standard_registry};
use bevy_client::domain::{Address, B256, Bytes, Deployment, Receipt, TxHash, U256};
use bevy_client::ports::{ChainConnector, ChainProvider, Contract, EventLog};
use bevy_client::{BevyError, Result};

pub fn address(last: u8) -> Address {
    let mut bytes = [0u8; 20];
    bytes[19] = last;
    Address::from(bytes)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentTx {
    pub from: Address,
    pub input: Bytes,
}

impl SentTx {
    pub fn decode<C: SolCall>(&self) -> C {
        C::abi_decode(&self.input).unwrap()
    }

    pub fn selector(&self) -> [u8; 4] {
        self.input[..4].try_into().unwrap()
    }
}

pub struct FakeContract {
    name: String,
    address: Address,
    returns: Mutex<HashMap<[u8; 4], Bytes>>,
    logs: Mutex<Vec<EventLog>>,
    sent: Mutex<Vec<SentTx>>,
    next_tx: AtomicU64,
}

impl FakeContract {
    pub fn new(name: &str, address: Address) -> Self {
        Self {
            name: name.to_string(),
            address,
            returns: Mutex::new(HashMap::new()),
            logs: Mutex::new(Vec::new()),
            sent: Mutex::new(Vec::new()),
            next_tx: AtomicU64::new(1),
        }
    }

    pub fn returns_uint<C: SolCall>(&self, value: U256) {
        self.returns
            .lock()
            .unwrap()
            .insert(C::SELECTOR, Bytes::from(value.to_be_bytes::<32>()));
    }

    pub fn emit<E: SolEvent>(&self, event: &E) {
        self.emit_raw(E::SIGNATURE_HASH, event.encode_data().into());
    }

    pub fn emit_raw(&self, topic: B256, data: Bytes) {
        self.logs.lock().unwrap().push(EventLog {
            topics: vec![topic],
            data,
        });
    }

    pub fn sent(&self) -> Vec<SentTx> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Contract for FakeContract {
    fn name(&self) -> &str {
        &self.name
    }

    fn address(&self) -> Address {
        self.address
    }

    async fn call(&self, input: Bytes) -> Result<Bytes> {
        let selector: [u8; 4] = input[..4].try_into().unwrap();
        self.returns
            .lock()
            .unwrap()
            .get(&selector)
            .cloned()
            .ok_or_else(|| BevyError::Rpc {
                code: -32000,
                message: format!("execution reverted: no return for {input}"),
            })
    }

    async fn transact(&self, from: Address, input: Bytes) -> Result<TxHash> {
        self.sent.lock().unwrap().push(SentTx { from, input });
        let n = self.next_tx.fetch_add(1, Ordering::SeqCst);
        Ok(keccak256(n.to_be_bytes()))
    }

    async fn logs(&self, topic: B256) -> Result<Vec<EventLog>> {
        Ok(self
            .logs
            .lock()
            .unwrap()
            .iter()
            .filter(|log| log.topics.first() == Some(&topic))
            .cloned()
            .collect())
    }
}

pub struct FakeChain {
    name: String,
    contracts: Mutex<HashMap<String, Arc<FakeContract>>>,
    balances: Mutex<HashMap<Address, U256>>,
    head: AtomicU64,
    confirmations: u64,
    pub lookups: AtomicUsize,
    pub waited_for_blocks: Mutex<Vec<u64>>,
}

impl FakeChain {
    pub fn new(name: &str) -> Self {
        Self::with_confirmations(name, 0)
    }

    pub fn with_confirmations(name: &str, confirmations: u64) -> Self {
        Self {
            name: name.to_string(),
            contracts: Mutex::new(HashMap::new()),
            balances: Mutex::new(HashMap::new()),
            head: AtomicU64::new(10),
            confirmations,
            lookups: AtomicUsize::new(0),
            waited_for_blocks: Mutex::new(Vec::new()),
        }
    }

    pub fn install(&self, contract: Arc<FakeContract>) {
        self.contracts
            .lock()
            .unwrap()
            .insert(contract.name().to_string(), contract);
    }

    pub fn contract(&self, name: &str) -> Option<Arc<FakeContract>> {
        self.contracts.lock().unwrap().get(name).cloned()
    }

    pub fn set_balance(&self, address: Address, balance: U256) {
        self.balances.lock().unwrap().insert(address, balance);
    }
}

#[async_trait]
impl ChainProvider for FakeChain {
    fn name(&self) -> &str {
        &self.name
    }

    async fn get_or_deploy_contract(
        &self,
        name: &str,
    ) -> Result<(Arc<dyn Contract>, Deployment)> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        let mut contracts = self.contracts.lock().unwrap();
        let deployed = !contracts.contains_key(name);
        let next = u8::try_from(contracts.len() + 1).unwrap();
        let contract = contracts
            .entry(name.to_string())
            .or_insert_with(|| Arc::new(FakeContract::new(name, address(0xc0 + next))))
            .clone();

        let deployment = Deployment {
            chain: self.name.clone(),
            contract: name.to_string(),
            address: contract.address(),
            deployed,
            receipt: None,
        };
        Ok((contract, deployment))
    }

    async fn accounts(&self) -> Result<Vec<Address>> {
        Ok(vec![address(1)])
    }

    async fn balance(&self, address: &Address) -> Result<U256> {
        Ok(self
            .balances
            .lock()
            .unwrap()
            .get(address)
            .copied()
            .unwrap_or_default())
    }

    async fn block_number(&self) -> Result<u64> {
        Ok(self.head.load(Ordering::SeqCst))
    }

    async fn wait_for_receipt(&self, tx_hash: &TxHash) -> Result<Receipt> {
        let block = self.head.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(Receipt {
            transaction_hash: *tx_hash,
            block_number: block,
            gas_used: 21_000,
            contract_address: None,
            success: true,
        })
    }

    async fn wait_for_block(&self, number: u64) -> Result<u64> {
        self.waited_for_blocks.lock().unwrap().push(number);
        self.head.fetch_max(number, Ordering::SeqCst);
        Ok(number)
    }

    fn confirmations(&self) -> u64 {
        self.confirmations
    }
}

pub struct FakeConnector {
    chains: HashMap<String, Arc<FakeChain>>,
    pub connects: Mutex<Vec<String>>,
}

impl FakeConnector {
    pub fn new(chains: impl IntoIterator<Item = Arc<FakeChain>>) -> Self {
        Self {
            chains: chains
                .into_iter()
                .map(|c| (c.name().to_string(), c))
                .collect(),
            connects: Mutex::new(Vec::new()),
        }
    }

    pub fn connect_count(&self) -> usize {
        self.connects.lock().unwrap().len()
    }
}

impl ChainConnector for FakeConnector {
    fn connect(&self, name: &str) -> Result<Arc<dyn ChainProvider>> {
        self.connects.lock().unwrap().push(name.to_string());
        self.chains
            .get(name)
            .cloned()
            .map(|c| c as Arc<dyn ChainProvider>)
            .ok_or_else(|| BevyError::UnknownChain(name.to_string()))
    }
}

pub fn resolver(connector: Arc<FakeConnector>, pairs: &[(&str, &str)]) -> Arc<Resolver> {
    Arc::new(Resolver::new(
        Environment::from_pairs(pairs.iter().copied()),
        standard_registry(connector),
    ))
}
