//! Crypto Devs ICO Core Library
//!
//! Shared constants, contract bindings and token unit arithmetic used by the
//! wallet session, the claim/mint client and the deployer.

pub mod constants;
pub mod contracts;
pub mod units;

// Re-export main types
pub use constants::*;
pub use contracts::{ICryptoDevToken, ICryptoDevs};
pub use units::{claimable_tokens, format_tokens, mint_payment, parse_token_amount, AmountError};
