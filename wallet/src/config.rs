use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use alloy::primitives::Address;
use ico_core::{NFT_CONTRACT_ADDRESS, REQUIRED_CHAIN_ID};
use url::Url;

use crate::error::WalletError;
use crate::evm::{ContractAddresses, EvmConnector};
use crate::keys::{load_signer, KeySource};

/// Environment variable overriding the RPC endpoint
pub const RPC_URL_VAR: &str = "RPC_URL";

/// Environment variable overriding the token contract address
pub const TOKEN_ADDRESS_VAR: &str = "TOKEN_CONTRACT_ADDRESS";

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct IcoConfig {
    #[serde(default = "default_rpc_url")]
    pub rpc_url: String,

    #[serde(default = "default_chain_id")]
    pub chain_id: u64,

    #[serde(default = "default_nft_contract")]
    pub nft_contract: String,

    /// Address of the deployed token; unset until the deployer has run
    #[serde(default)]
    pub token_contract: Option<String>,
}

fn default_rpc_url() -> String {
    "http://127.0.0.1:8545".to_string()
}

fn default_chain_id() -> u64 {
    REQUIRED_CHAIN_ID
}

fn default_nft_contract() -> String {
    NFT_CONTRACT_ADDRESS.to_checksum(None)
}

fn default_config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("cryptodevs-ico")
}

impl Default for IcoConfig {
    fn default() -> Self {
        IcoConfig {
            rpc_url: default_rpc_url(),
            chain_id: default_chain_id(),
            nft_contract: default_nft_contract(),
            token_contract: None,
        }
    }
}

impl IcoConfig {
    pub fn config_path() -> PathBuf {
        default_config_dir().join("ico.toml")
    }

    pub fn load(path: &Path) -> Result<Self, WalletError> {
        let contents = fs::read_to_string(path)?;
        toml::from_str(&contents)
            .map_err(|e| WalletError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Load `path`, writing a default config there first if it does not exist
    pub fn load_or_create(path: &Path) -> Result<Self, WalletError> {
        if path.exists() {
            Self::load(path)
        } else {
            let config = IcoConfig::default();
            config.save(path)?;
            log::info!("📝 Wrote default config to {}", path.display());
            Ok(config)
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), WalletError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents =
            toml::to_string_pretty(self).map_err(|e| WalletError::Config(e.to_string()))?;
        fs::write(path, contents)?;

        Ok(())
    }

    /// Apply overrides found through `lookup`
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(rpc_url) = lookup(RPC_URL_VAR).filter(|v| !v.is_empty()) {
            self.rpc_url = rpc_url;
        }
        if let Some(token) = lookup(TOKEN_ADDRESS_VAR).filter(|v| !v.is_empty()) {
            self.token_contract = Some(token);
        }
    }

    /// Apply overrides from the process environment
    pub fn apply_env(&mut self) {
        self.apply_overrides(|name| std::env::var(name).ok());
    }

    pub fn rpc_endpoint(&self) -> Result<Url, WalletError> {
        self.rpc_url
            .parse()
            .map_err(|e| WalletError::Config(format!("rpc_url {}: {}", self.rpc_url, e)))
    }

    pub fn nft_address(&self) -> Result<Address, WalletError> {
        parse_address("nft_contract", &self.nft_contract)
    }

    pub fn token_address(&self) -> Result<Address, WalletError> {
        let raw = self.token_contract.as_deref().ok_or_else(|| {
            WalletError::Config(format!(
                "token_contract is not set (deploy the token, then set it or {})",
                TOKEN_ADDRESS_VAR
            ))
        })?;
        parse_address("token_contract", raw)
    }

    pub fn contracts(&self) -> Result<ContractAddresses, WalletError> {
        Ok(ContractAddresses {
            nft: self.nft_address()?,
            token: self.token_address()?,
        })
    }

    /// Build a JSON-RPC connector; the signing key is attached when one is configured
    pub fn connector(&self, keys: Option<&KeySource>) -> Result<EvmConnector, WalletError> {
        let connector = EvmConnector::new(self.rpc_endpoint()?, self.contracts()?);
        match keys {
            Some(source) => Ok(connector.with_wallet(load_signer(source)?)),
            None => Ok(connector),
        }
    }
}

fn parse_address(field: &str, raw: &str) -> Result<Address, WalletError> {
    raw.trim()
        .parse()
        .map_err(|e| WalletError::Config(format!("{} {}: {}", field, raw, e)))
}
