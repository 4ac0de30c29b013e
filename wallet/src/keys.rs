//! Signing key loading.
//!
//! A key comes either from a hex private key or from a BIP-39 mnemonic
//! phrase (standard Ethereum derivation path `m/44'/60'/0'/0/{index}`).

use alloy::signers::local::{coins_bip39::English, MnemonicBuilder, PrivateKeySigner};

use crate::error::WalletError;

/// Environment variable holding a hex private key
pub const PRIVATE_KEY_VAR: &str = "PRIVATE_KEY";

/// Environment variable holding a mnemonic phrase
pub const MNEMONIC_VAR: &str = "MNEMONIC";

/// Environment variable selecting the mnemonic account index
pub const MNEMONIC_INDEX_VAR: &str = "MNEMONIC_INDEX";

#[derive(Clone, PartialEq, Eq)]
pub enum KeySource {
    PrivateKey(String),
    Mnemonic { phrase: String, index: u32 },
}

impl std::fmt::Debug for KeySource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never print key material
        match self {
            KeySource::PrivateKey(_) => f.write_str("PrivateKey(..)"),
            KeySource::Mnemonic { index, .. } => write!(f, "Mnemonic {{ index: {} }}", index),
        }
    }
}

impl KeySource {
    /// Resolve the key source through `lookup`; a private key wins over a mnemonic
    pub fn from_lookup<F>(lookup: F) -> Result<Self, WalletError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        if let Some(key) = non_empty(PRIVATE_KEY_VAR) {
            return Ok(KeySource::PrivateKey(key));
        }
        if let Some(phrase) = non_empty(MNEMONIC_VAR) {
            let index = match non_empty(MNEMONIC_INDEX_VAR) {
                Some(raw) => raw.trim().parse().map_err(|_| {
                    WalletError::Config(format!("{} must be an integer: {}", MNEMONIC_INDEX_VAR, raw))
                })?,
                None => 0,
            };
            return Ok(KeySource::Mnemonic { phrase, index });
        }
        Err(WalletError::MissingSigner)
    }

    /// Resolve the key source from the process environment
    pub fn from_env() -> Result<Self, WalletError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }
}

/// Build a local signer from a key source
pub fn load_signer(source: &KeySource) -> Result<PrivateKeySigner, WalletError> {
    match source {
        KeySource::PrivateKey(key) => key
            .trim()
            .parse::<PrivateKeySigner>()
            .map_err(|e| WalletError::InvalidKey(e.to_string())),
        KeySource::Mnemonic { phrase, index } => MnemonicBuilder::<English>::default()
            .phrase(phrase.trim())
            .index(*index)
            .and_then(|builder| builder.build())
            .map_err(|e| WalletError::InvalidKey(e.to_string())),
    }
}
