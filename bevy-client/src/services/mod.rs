pub mod common;
pub mod contributor;
pub mod manager;

use serde::Serialize;

pub use common::SharesService;
pub use contributor::{ContributorService, ProposalOutcome};
pub use manager::ManagerService;

use crate::domain::{Receipt, TxHash};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransactionOutcome {
    pub tx_hash: TxHash,
    pub receipt: Receipt,
}
