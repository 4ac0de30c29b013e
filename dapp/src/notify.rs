//! User-facing alerts.

use ico_core::REQUIRED_NETWORK_NAME;

pub const MINT_SUCCESS: &str = "Successfully minted Crypto Dev Tokens";
pub const CLAIM_SUCCESS: &str = "Successfully claimed Crypto Dev Tokens";

pub fn wrong_network_alert() -> String {
    format!("Change the network to {}", REQUIRED_NETWORK_NAME)
}

/// Blocking notification surface of a front end
pub trait Notifier: Send + Sync {
    fn alert(&self, message: &str);
}
