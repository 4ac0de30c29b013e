use alloy::primitives::B256;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WalletError {
    #[error("Wrong network: connected to chain {actual}, expected chain {expected}")]
    WrongNetwork { expected: u64, actual: u64 },

    #[error("Transport error: {0}")]
    Transport(#[from] alloy::transports::TransportError),

    #[error("Contract call failed: {0}")]
    Contract(#[from] alloy::contract::Error),

    #[error("Transaction {0} reverted")]
    Reverted(B256),

    #[error("Execution reverted: {0}")]
    Rejected(String),

    #[error("Malformed response: {0}")]
    Malformed(String),

    #[error("No signing key configured (set PRIVATE_KEY or MNEMONIC)")]
    MissingSigner,

    #[error("Invalid key: {0}")]
    InvalidKey(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl WalletError {
    pub fn is_wrong_network(&self) -> bool {
        matches!(self, WalletError::WrongNetwork { .. })
    }
}
