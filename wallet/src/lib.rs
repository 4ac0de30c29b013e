//! Crypto Devs ICO Wallet Module
//!
//! Everything needed to talk to the chain on behalf of a user:
//! - `WalletConnector` / `ChainReader` / `ChainSigner` capability traits
//! - `Session`, the explicit connection object with a per-acquisition network gate
//! - `EvmConnector`, the alloy-backed implementation over JSON-RPC
//! - `wait_for_receipt`, the inclusion wait shared with the deployer
//! - key loading from a private key or a BIP-39 mnemonic
//! - `IcoConfig`, the TOML configuration shared by the front ends

pub mod config;
pub mod connector;
pub mod error;
pub mod evm;
pub mod keys;
pub mod receipt;
pub mod session;

#[cfg(any(test, feature = "test-utils"))]
pub mod memory;

pub use config::IcoConfig;
pub use connector::{ChainReader, ChainSigner, Inclusion, WalletConnector};
pub use error::WalletError;
pub use evm::{ContractAddresses, EvmConnector, EvmReader, EvmSigner};
pub use keys::{load_signer, KeySource};
pub use receipt::wait_for_receipt;
pub use session::{Handle, Session};
