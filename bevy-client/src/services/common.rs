use std::sync::Arc;

use super::TransactionOutcome;
use crate::abi::{self, product_manager as pm};
use crate::config::{ActiveChain, ManagerContract, Resolver, UserAddress};
use crate::domain::U256;
use crate::error::Result;

/// Share queries and redemption against the manager contract.
pub struct SharesService {
    resolver: Arc<Resolver>,
}

impl SharesService {
    pub const fn new(resolver: Arc<Resolver>) -> Self {
        Self { resolver }
    }

    pub async fn check_share_value(&self, manager: Option<ManagerContract>) -> Result<U256> {
        let manager = self.resolver.inject(manager).await?;
        abi::call(&*manager, &pm::shareValueCall {}).await
    }

    /// The user's balance of shares.
    pub async fn check_balance(
        &self,
        user: Option<UserAddress>,
        manager: Option<ManagerContract>,
    ) -> Result<U256> {
        let user = self.resolver.inject(user).await?;
        let manager = self.resolver.inject(manager).await?;
        abi::call(&*manager, &pm::balanceOfCall { account: user.0 }).await
    }

    /// The total number of shares.
    pub async fn check_total_supply(&self, manager: Option<ManagerContract>) -> Result<U256> {
        let manager = self.resolver.inject(manager).await?;
        abi::call(&*manager, &pm::totalSupplyCall {}).await
    }

    /// The ether held by the manager contract on the active chain.
    pub async fn check_total_value(
        &self,
        chain: Option<ActiveChain>,
        manager: Option<ManagerContract>,
    ) -> Result<U256> {
        let chain = self.resolver.inject(chain).await?;
        let manager = self.resolver.inject(manager).await?;
        chain.balance(&manager.address()).await
    }

    pub async fn redeem_shares(
        &self,
        amount: U256,
        user: Option<UserAddress>,
        manager: Option<ManagerContract>,
        chain: Option<ActiveChain>,
    ) -> Result<TransactionOutcome> {
        let user = self.resolver.inject(user).await?;
        let manager = self.resolver.inject(manager).await?;
        let chain = self.resolver.inject(chain).await?;

        let tx_hash = abi::send(&*manager, user.0, &pm::redeemCall { amount }).await?;
        tracing::info!(%tx_hash, %amount, "waiting for redeem receipt");
        let receipt = chain.wait_for_receipt(&tx_hash).await?;
        Ok(TransactionOutcome { tx_hash, receipt })
    }
}
