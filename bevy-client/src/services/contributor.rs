use std::sync::Arc;

use serde::Serialize;

use super::TransactionOutcome;
use crate::abi::{self, product_manager as pm};
use crate::config::{ActiveChain, ManagerContract, Resolver, UserAddress};
use crate::domain::{IterationProposal, Proof, proof_of};
use crate::error::Result;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProposalOutcome {
    pub proposal: IterationProposal,
    pub claim: TransactionOutcome,
    pub proposed: TransactionOutcome,
}

/// Operations for contributors proposing iterations.
pub struct ContributorService {
    resolver: Arc<Resolver>,
}

impl ContributorService {
    pub const fn new(resolver: Arc<Resolver>) -> Self {
        Self { resolver }
    }

    pub async fn claim_authorship(
        &self,
        proof: Proof,
        user: Option<UserAddress>,
        manager: Option<ManagerContract>,
        chain: Option<ActiveChain>,
    ) -> Result<TransactionOutcome> {
        let user = self.resolver.inject(user).await?;
        let manager = self.resolver.inject(manager).await?;
        let chain = self.resolver.inject(chain).await?;

        let claim = pm::claimAuthorshipCall {
            author: user.0,
            proof,
        };
        let tx_hash = abi::send(&*manager, user.0, &claim).await?;
        let receipt = chain.wait_for_receipt(&tx_hash).await?;
        Ok(TransactionOutcome { tx_hash, receipt })
    }

    /// Claims authorship of `iteration`, then reveals its location once the
    /// claim is buried under the chain's confirmation depth.
    pub async fn propose_iteration(
        &self,
        iteration: &str,
        location: &str,
        user: Option<UserAddress>,
        manager: Option<ManagerContract>,
        chain: Option<ActiveChain>,
    ) -> Result<ProposalOutcome> {
        let user = self.resolver.inject(user).await?;
        let manager = self.resolver.inject(manager).await?;
        let chain = self.resolver.inject(chain).await?;
        let proof = proof_of(iteration);

        let claim = self
            .claim_authorship(proof, Some(user), Some(manager.clone()), Some(chain.clone()))
            .await?;

        let confirmations = chain.confirmations();
        if confirmations > 0 {
            let target = claim.receipt.block_number + confirmations;
            tracing::info!(%proof, target_block = target, "waiting for claim confirmations");
            chain.wait_for_block(target).await?;
        }

        let propose = pm::proposeIterationCall {
            author: user.0,
            proof,
            location: location.to_string(),
        };
        let tx_hash = abi::send(&*manager, user.0, &propose).await?;
        let receipt = chain.wait_for_receipt(&tx_hash).await?;

        Ok(ProposalOutcome {
            proposal: IterationProposal {
                author: user.0,
                proof,
                location: location.to_string(),
            },
            claim,
            proposed: TransactionOutcome { tx_hash, receipt },
        })
    }
}
