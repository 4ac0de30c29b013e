//! Token amount arithmetic.
//!
//! All amounts stay in integer wei. The mint payment is never computed through
//! floating point, so `quantity * 0.0001 ether` is exact for every quantity.

use alloy::primitives::{utils::format_ether, U256};
use thiserror::Error;

use crate::constants::{TOKENS_PER_NFT, UNIT_PRICE_WEI};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AmountError {
    #[error("Invalid token amount: {0:?}")]
    Invalid(String),

    #[error("Payment for {0} tokens overflows")]
    Overflow(U256),
}

/// Wei to attach to a `mint(quantity)` call
pub fn mint_payment(quantity: U256) -> Result<U256, AmountError> {
    quantity
        .checked_mul(UNIT_PRICE_WEI)
        .ok_or(AmountError::Overflow(quantity))
}

/// Whole tokens a holder receives for `unclaimed_nfts` NFTs
pub fn claimable_tokens(unclaimed_nfts: U256) -> U256 {
    unclaimed_nfts.saturating_mul(U256::from(TOKENS_PER_NFT))
}

/// Parse a user-entered whole token quantity
pub fn parse_token_amount(input: &str) -> Result<U256, AmountError> {
    let trimmed = input.trim();
    if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return Err(AmountError::Invalid(input.to_string()));
    }
    U256::from_str_radix(trimmed, 10).map_err(|_| AmountError::Invalid(input.to_string()))
}

/// Render an 18-decimal amount the way wallets do ("1.0", "0.0005")
pub fn format_tokens(amount: U256) -> String {
    let formatted = format_ether(amount);
    match formatted.split_once('.') {
        Some((whole, fraction)) => {
            let fraction = fraction.trim_end_matches('0');
            if fraction.is_empty() {
                format!("{whole}.0")
            } else {
                format!("{whole}.{fraction}")
            }
        }
        None => format!("{formatted}.0"),
    }
}
