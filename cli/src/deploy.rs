//! Token contract deployment from a compiled Hardhat artifact.

use std::fs;
use std::path::{Path, PathBuf};

use alloy::network::{EthereumWallet, ReceiptResponse, TransactionBuilder};
use alloy::primitives::{hex, Address, Bytes, B256};
use alloy::providers::{Provider, ProviderBuilder};
use alloy::rpc::types::{TransactionReceipt, TransactionRequest};
use alloy::sol_types::SolValue;
use ico_core::{DEFAULT_ARTIFACT_PATH, NFT_CONTRACT_ADDRESS, TOKEN_CONTRACT_NAME};
use ico_wallet::{load_signer, wait_for_receipt, KeySource, WalletError};
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;
use url::Url;

pub const RPC_URL_VAR: &str = "RPC_URL";
pub const ARTIFACT_PATH_VAR: &str = "ARTIFACT_PATH";
pub const NFT_ADDRESS_VAR: &str = "NFT_CONTRACT_ADDRESS";

#[derive(Debug, Error)]
pub enum DeployError {
    #[error("Artifact error: {0}")]
    Artifact(String),

    #[error("Constructor expects {expected:?}, got {actual} argument(s)")]
    Constructor { expected: Vec<String>, actual: usize },

    #[error("Environment error: {0}")]
    Env(String),

    #[error("Wallet error: {0}")]
    Wallet(#[from] WalletError),

    #[error("Transport error: {0}")]
    Transport(#[from] alloy::transports::TransportError),

    #[error("Deployment transaction {0} reverted")]
    Reverted(B256),

    #[error("Receipt for {0} carries no contract address")]
    NoContractAddress(B256),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// The parts of a Hardhat artifact a deployment needs
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HardhatArtifact {
    pub contract_name: String,
    pub abi: Vec<Value>,
    pub bytecode: String,
}

impl HardhatArtifact {
    pub fn load(path: &Path) -> Result<Self, DeployError> {
        let contents = fs::read_to_string(path).map_err(|e| {
            DeployError::Artifact(format!("cannot read {}: {}", path.display(), e))
        })?;
        Ok(serde_json::from_str(&contents)?)
    }
}

/// Builds creation transactions for one compiled contract
#[derive(Debug, Clone)]
pub struct ContractFactory {
    name: String,
    constructor_inputs: Vec<String>,
    bytecode: Bytes,
}

impl ContractFactory {
    pub fn from_artifact(artifact: &HardhatArtifact) -> Result<Self, DeployError> {
        if artifact.contract_name != TOKEN_CONTRACT_NAME {
            return Err(DeployError::Artifact(format!(
                "artifact holds {}, expected {}",
                artifact.contract_name, TOKEN_CONTRACT_NAME
            )));
        }
        let bytecode = hex::decode(artifact.bytecode.trim()).map_err(|e| {
            DeployError::Artifact(format!("{} bytecode is not hex: {}", artifact.contract_name, e))
        })?;
        if bytecode.is_empty() {
            // Interfaces and abstract contracts compile to empty bytecode
            return Err(DeployError::Artifact(format!(
                "{} has no deployable bytecode",
                artifact.contract_name
            )));
        }

        let constructor_inputs = artifact
            .abi
            .iter()
            .find(|item| item["type"] == "constructor")
            .and_then(|item| item["inputs"].as_array())
            .map(|inputs| {
                inputs
                    .iter()
                    .map(|input| input["type"].as_str().unwrap_or_default().to_string())
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            name: artifact.contract_name.clone(),
            constructor_inputs,
            bytecode: bytecode.into(),
        })
    }

    pub fn from_artifact_path(path: &Path) -> Result<Self, DeployError> {
        Self::from_artifact(&HardhatArtifact::load(path)?)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn constructor_inputs(&self) -> &[String] {
        &self.constructor_inputs
    }

    /// Creation code with the NFT address appended as the only constructor argument
    pub fn deploy_data(&self, nft_contract: Address) -> Result<Bytes, DeployError> {
        if self.constructor_inputs != ["address"] {
            return Err(DeployError::Constructor {
                expected: self.constructor_inputs.clone(),
                actual: 1,
            });
        }

        let mut data = self.bytecode.to_vec();
        data.extend_from_slice(&(nft_contract,).abi_encode_params());
        Ok(data.into())
    }

    /// Creation transaction for this contract
    pub fn deploy_request(&self, nft_contract: Address) -> Result<TransactionRequest, DeployError> {
        Ok(TransactionRequest::default().with_deploy_code(self.deploy_data(nft_contract)?))
    }

    /// Submit the creation transaction and wait for its receipt
    pub async fn deploy<P: Provider>(
        &self,
        provider: &P,
        nft_contract: Address,
    ) -> Result<Address, DeployError> {
        let tx = self.deploy_request(nft_contract)?;

        let pending = provider.send_transaction(tx).await?;
        let tx_hash = *pending.tx_hash();
        log::info!("📤 Deploying {}: {}", self.name, tx_hash);
        let receipt = wait_for_receipt(provider, tx_hash).await?;
        deployed_address(&receipt)
    }
}

/// Address created by a successful deployment receipt
pub fn deployed_address(receipt: &TransactionReceipt) -> Result<Address, DeployError> {
    let tx_hash = receipt.transaction_hash();
    if !receipt.status() {
        return Err(DeployError::Reverted(tx_hash));
    }
    let address = receipt
        .contract_address()
        .ok_or(DeployError::NoContractAddress(tx_hash))?;
    log::info!(
        "✅ Deployed at {} in block {:?}",
        address,
        receipt.block_number()
    );
    Ok(address)
}

/// Everything the deployer reads from its environment
#[derive(Debug, Clone)]
pub struct DeployEnv {
    pub rpc_url: Url,
    pub keys: KeySource,
    pub artifact_path: PathBuf,
    pub nft_contract: Address,
}

impl DeployEnv {
    pub fn from_lookup<F>(lookup: F) -> Result<Self, DeployError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let raw_url = non_empty(RPC_URL_VAR)
            .ok_or_else(|| DeployError::Env(format!("{} is not set", RPC_URL_VAR)))?;
        let rpc_url = raw_url
            .trim()
            .parse()
            .map_err(|e| DeployError::Env(format!("{} {}: {}", RPC_URL_VAR, raw_url, e)))?;

        let keys = KeySource::from_lookup(&lookup)?;

        let artifact_path = non_empty(ARTIFACT_PATH_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_ARTIFACT_PATH));

        let nft_contract = match non_empty(NFT_ADDRESS_VAR) {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|e| DeployError::Env(format!("{} {}: {}", NFT_ADDRESS_VAR, raw, e)))?,
            None => NFT_CONTRACT_ADDRESS,
        };

        Ok(Self {
            rpc_url,
            keys,
            artifact_path,
            nft_contract,
        })
    }

    pub fn from_env() -> Result<Self, DeployError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }
}

/// Deploy the token contract and return its address
pub async fn deploy_token(env: &DeployEnv) -> Result<Address, DeployError> {
    let factory = ContractFactory::from_artifact_path(&env.artifact_path)?;
    let signer = load_signer(&env.keys)?;
    log::info!(
        "🔑 Deploying {} from {} (NFT contract {})",
        factory.name(),
        signer.address(),
        env.nft_contract
    );

    let provider = ProviderBuilder::new()
        .wallet(EthereumWallet::from(signer))
        .connect_http(env.rpc_url.clone());
    factory.deploy(&provider, env.nft_contract).await
}
