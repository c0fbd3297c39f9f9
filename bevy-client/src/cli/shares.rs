use std::collections::BTreeMap;

use crate::App;
use crate::config::UserAddress;
use crate::domain::{Address, U256};
use crate::error::Result;

use super::print_json;

/// Amounts go out as decimal strings; they can exceed what JSON numbers hold.
fn emit(json: bool, field: &str, value: U256) -> Result<()> {
    if json {
        print_json(&BTreeMap::from([(field, value.to_string())]))
    } else {
        println!("{value}");
        Ok(())
    }
}

pub async fn total_supply(app: &App, json: bool) -> Result<()> {
    let supply = app.shares().check_total_supply(None).await?;
    emit(json, "total_supply", supply)
}

pub async fn share_value(app: &App, json: bool) -> Result<()> {
    let value = app.shares().check_share_value(None).await?;
    emit(json, "share_value", value)
}

pub async fn balance(app: &App, address: Option<Address>, json: bool) -> Result<()> {
    let balance = app
        .shares()
        .check_balance(address.map(UserAddress), None)
        .await?;
    emit(json, "balance", balance)
}

pub async fn total_value(app: &App, json: bool) -> Result<()> {
    let value = app.shares().check_total_value(None, None).await?;
    emit(json, "total_value", value)
}

pub async fn redeem(app: &App, amount: U256, json: bool) -> Result<()> {
    let outcome = app.shares().redeem_shares(amount, None, None, None).await?;
    if json {
        print_json(&outcome)
    } else {
        println!("Transaction: {}", outcome.tx_hash);
        println!(
            "Receipt: block {}, gas used {}",
            outcome.receipt.block_number, outcome.receipt.gas_used
        );
        Ok(())
    }
}
