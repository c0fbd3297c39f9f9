use alloy::primitives::{Address, B256, keccak256};
use serde::Serialize;

/// Commitment to an iteration's content, claimed before the iteration's
/// location is revealed.
pub type Proof = B256;

pub fn proof_of(iteration: &str) -> Proof {
    keccak256(iteration.as_bytes())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IterationProposal {
    pub author: Address,
    pub proof: Proof,
    pub location: String,
}
