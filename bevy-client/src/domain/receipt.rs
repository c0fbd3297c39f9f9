use serde::Serialize;

use super::{Address, TxHash};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Receipt {
    pub transaction_hash: TxHash,
    pub block_number: u64,
    pub gas_used: u64,
    pub contract_address: Option<Address>,
    pub success: bool,
}

/// Where a named contract lives on a chain, and whether this call put it there.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Deployment {
    pub chain: String,
    pub contract: String,
    pub address: Address,
    pub deployed: bool,
    pub receipt: Option<Receipt>,
}
