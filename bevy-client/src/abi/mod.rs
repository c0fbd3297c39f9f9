//! Typed calls against [`Contract`] handles, encoded with alloy's `sol!`
//! types.

pub mod product_manager;

use alloy::sol_types::{SolCall, SolEvent};

use crate::domain::{Address, TxHash};
use crate::error::Result;
use crate::ports::Contract;

/// Runs a read-only call and decodes its return value.
pub async fn call<C: SolCall>(contract: &dyn Contract, call: &C) -> Result<C::Return> {
    let output = contract.call(call.abi_encode().into()).await?;
    Ok(C::abi_decode_returns(&output)?)
}

pub async fn send<C: SolCall>(contract: &dyn Contract, from: Address, call: &C) -> Result<TxHash> {
    tracing::debug!(contract = contract.name(), function = C::SIGNATURE, %from, "encoding transaction");
    contract.transact(from, call.abi_encode().into()).await
}

/// Every `E` the contract has emitted, oldest first.
pub async fn events<E: SolEvent>(contract: &dyn Contract) -> Result<Vec<E>> {
    contract
        .logs(E::SIGNATURE_HASH)
        .await?
        .into_iter()
        .map(|log| Ok(E::decode_raw_log(log.topics, &log.data)?))
        .collect()
}
