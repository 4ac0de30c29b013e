//! Capability traits at the chain boundary.
//!
//! A `WalletConnector` plays the role of a browser wallet extension: it hands
//! out a read-only `ChainReader`, and on request upgrades it to a
//! `ChainSigner` bound to the selected account.

use alloy::primitives::{Address, B256, U256};

use crate::error::WalletError;

/// Summary of a transaction that made it into a block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inclusion {
    pub tx_hash: B256,
    pub block_number: Option<u64>,
    pub gas_used: u64,
}

/// Read-only view of the NFT and token contracts
#[async_trait::async_trait]
pub trait ChainReader: Send + Sync {
    /// Chain id the connection is bound to
    async fn chain_id(&self) -> Result<u64, WalletError>;

    async fn nft_balance_of(&self, owner: Address) -> Result<U256, WalletError>;

    async fn nft_token_of_owner_by_index(
        &self,
        owner: Address,
        index: U256,
    ) -> Result<U256, WalletError>;

    async fn token_ids_claimed(&self, token_id: U256) -> Result<bool, WalletError>;

    async fn token_balance_of(&self, owner: Address) -> Result<U256, WalletError>;

    async fn total_supply(&self) -> Result<U256, WalletError>;
}

/// A reader that can also authorize writes for one account.
///
/// Write methods return once the transaction is included; a reverted
/// transaction is an error.
#[async_trait::async_trait]
pub trait ChainSigner: ChainReader {
    fn address(&self) -> Address;

    /// `mint(amount)` with `value` wei attached
    async fn mint(&self, amount: U256, value: U256) -> Result<Inclusion, WalletError>;

    async fn claim(&self) -> Result<Inclusion, WalletError>;
}

/// Source of chain connections
#[async_trait::async_trait]
pub trait WalletConnector: Send + Sync {
    type Reader: ChainReader + 'static;
    type Signer: ChainSigner + 'static;

    /// Open a connection and wrap it as a reader
    async fn connect(&self) -> Result<Self::Reader, WalletError>;

    /// Derive a signer for the selected account from a reader
    async fn signer(&self, reader: Self::Reader) -> Result<Self::Signer, WalletError>;
}
