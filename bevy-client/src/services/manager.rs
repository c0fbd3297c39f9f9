use std::sync::Arc;

use super::TransactionOutcome;
use crate::abi::{self, product_manager as pm};
use crate::config::{
    ActiveChain, DEFAULT_MANAGER_CONTRACT, MANAGER_CONTRACT, ManagerContract, Resolver,
    UserAddress,
};
use crate::domain::{Address, Deployment, IterationProposal, Proof, U256};
use crate::error::Result;

/// Operations for the owner of a product manager contract.
pub struct ManagerService {
    resolver: Arc<Resolver>,
}

impl ManagerService {
    pub const fn new(resolver: Arc<Resolver>) -> Self {
        Self { resolver }
    }

    /// Name of the configured manager contract, `ProductManagerV2` if unset.
    pub fn manager_contract_name(&self) -> Result<String> {
        self.resolver.raw(MANAGER_CONTRACT, Some(DEFAULT_MANAGER_CONTRACT))
    }

    pub async fn deploy_manager_contract(
        &self,
        name: Option<String>,
        chain: Option<ActiveChain>,
    ) -> Result<Deployment> {
        let name = match name {
            Some(name) => name,
            None => self.manager_contract_name()?,
        };
        let chain = self.resolver.inject(chain).await?;
        let (_, deployment) = chain.get_or_deploy_contract(&name).await?;
        Ok(deployment)
    }

    pub async fn get_proposals(
        &self,
        manager: Option<ManagerContract>,
    ) -> Result<Vec<IterationProposal>> {
        let manager = self.resolver.inject(manager).await?;
        let events = abi::events::<pm::IterationProposal>(&*manager).await?;
        Ok(events
            .into_iter()
            .map(|event| IterationProposal {
                author: event.author,
                proof: event.proof,
                location: event.location,
            })
            .collect())
    }

    /// Accepts an iteration, paying its author `amount` new shares.
    pub async fn accept_proposal(
        &self,
        author: Address,
        proof: Proof,
        amount: U256,
        user: Option<UserAddress>,
        manager: Option<ManagerContract>,
        chain: Option<ActiveChain>,
    ) -> Result<TransactionOutcome> {
        let user = self.resolver.inject(user).await?;
        let manager = self.resolver.inject(manager).await?;
        let chain = self.resolver.inject(chain).await?;

        let accept = pm::acceptProposalCall {
            author,
            proof,
            amount,
        };
        let tx_hash = abi::send(&*manager, user.0, &accept).await?;
        let receipt = chain.wait_for_receipt(&tx_hash).await?;
        Ok(TransactionOutcome { tx_hash, receipt })
    }
}
