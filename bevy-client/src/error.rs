use thiserror::Error;

#[derive(Error, Debug)]
pub enum BevyError {
    #[error("Configuration key not found: {0}")]
    MissingConfig(String),

    #[error("Cyclic configuration dependency: {0}")]
    CyclicConfig(String),

    #[error("Configuration key {key} did not resolve to {expected}")]
    UnexpectedValue { key: String, expected: &'static str },

    #[error("Unknown chain: {0}")]
    UnknownChain(String),

    #[error("Contract not found: {0}")]
    ContractNotFound(String),

    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("ABI error: {0}")]
    Abi(#[from] alloy::sol_types::Error),

    #[error("RPC error {code}: {message}")]
    Rpc { code: i64, message: String },

    #[error("Transaction failed: {0}")]
    TransactionFailed(String),

    #[error("Timed out waiting for receipt of {0}")]
    ReceiptTimeout(String),

    #[error("Project already initialized at {0}, pass --force to overwrite")]
    AlreadyInitialized(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl BevyError {
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::MissingConfig(_)
            | Self::CyclicConfig(_)
            | Self::UnexpectedValue { .. }
            | Self::Config(_) => 3,
            Self::UnknownChain(_) | Self::ContractNotFound(_) => 1,
            Self::AlreadyInitialized(_) => 2,
            Self::InvalidAddress(_) | Self::Abi(_) => 4,
            Self::Rpc { .. } | Self::Http(_) => 5,
            Self::TransactionFailed(_) | Self::ReceiptTimeout(_) => 6,
            Self::Io(_) | Self::Serialization(_) => 10,
        }
    }
}

pub type Result<T> = std::result::Result<T, BevyError>;
