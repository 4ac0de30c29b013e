use ico_core::AmountError;
use ico_wallet::WalletError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum IcoError {
    #[error("Wrong network: connected to chain {actual}, expected chain {expected}")]
    WrongNetwork { expected: u64, actual: u64 },

    #[error("Read failed: {0}")]
    ReadFailure(#[source] WalletError),

    #[error("Write failed: {0}")]
    WriteFailure(#[source] WalletError),

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Amount error: {0}")]
    Amount(#[from] AmountError),
}

impl IcoError {
    /// Classify an error raised while reading chain state
    pub fn read(err: WalletError) -> Self {
        match err {
            WalletError::WrongNetwork { expected, actual } => {
                IcoError::WrongNetwork { expected, actual }
            }
            other => IcoError::ReadFailure(other),
        }
    }

    /// Classify an error raised on a write path
    pub fn write(err: WalletError) -> Self {
        match err {
            WalletError::WrongNetwork { expected, actual } => {
                IcoError::WrongNetwork { expected, actual }
            }
            other => IcoError::WriteFailure(other),
        }
    }

    pub fn is_wrong_network(&self) -> bool {
        matches!(self, IcoError::WrongNetwork { .. })
    }

    /// No key was configured, so there is no account to act for
    pub fn is_missing_account(&self) -> bool {
        matches!(
            self,
            IcoError::ReadFailure(WalletError::MissingSigner)
                | IcoError::WriteFailure(WalletError::MissingSigner)
        )
    }
}
