pub mod proposal;
pub mod receipt;

pub use alloy::primitives::{Address, B256, Bytes, TxHash, U256};
pub use proposal::{IterationProposal, Proof, proof_of};
pub use receipt::{Deployment, Receipt};
