pub mod chain;
pub mod contract;

pub use chain::{ChainConnector, ChainProvider};
pub use contract::{Contract, EventLog};
