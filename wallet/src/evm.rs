//! JSON-RPC connector backed by alloy providers.

use alloy::network::{EthereumWallet, ReceiptResponse};
use alloy::primitives::{Address, U256};
use alloy::providers::{DynProvider, Provider, ProviderBuilder};
use alloy::rpc::types::{TransactionReceipt, TransactionRequest};
use alloy::signers::local::PrivateKeySigner;
use ico_core::{ICryptoDevToken, ICryptoDevs};
use url::Url;

use crate::connector::{ChainReader, ChainSigner, Inclusion, WalletConnector};
use crate::error::WalletError;
use crate::receipt::wait_for_receipt;

/// Where the two external contracts live
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContractAddresses {
    pub nft: Address,
    pub token: Address,
}

pub struct EvmConnector {
    rpc_url: Url,
    wallet: Option<PrivateKeySigner>,
    contracts: ContractAddresses,
}

impl EvmConnector {
    pub fn new(rpc_url: Url, contracts: ContractAddresses) -> Self {
        Self {
            rpc_url,
            wallet: None,
            contracts,
        }
    }

    /// Attach the account used for signing
    pub fn with_wallet(mut self, signer: PrivateKeySigner) -> Self {
        self.wallet = Some(signer);
        self
    }

    pub fn account(&self) -> Option<Address> {
        self.wallet.as_ref().map(|signer| signer.address())
    }

    pub fn rpc_url(&self) -> &Url {
        &self.rpc_url
    }

    pub fn contracts(&self) -> ContractAddresses {
        self.contracts
    }
}

pub struct EvmReader {
    provider: DynProvider,
    contracts: ContractAddresses,
}

pub struct EvmSigner {
    reader: EvmReader,
    address: Address,
}

#[async_trait::async_trait]
impl WalletConnector for EvmConnector {
    type Reader = EvmReader;
    type Signer = EvmSigner;

    async fn connect(&self) -> Result<Self::Reader, WalletError> {
        log::debug!("🔌 Connecting to {}", self.rpc_url);
        let provider = ProviderBuilder::new()
            .connect_http(self.rpc_url.clone())
            .erased();
        Ok(EvmReader {
            provider,
            contracts: self.contracts,
        })
    }

    async fn signer(&self, reader: Self::Reader) -> Result<Self::Signer, WalletError> {
        let signer = self.wallet.clone().ok_or(WalletError::MissingSigner)?;
        let address = signer.address();
        let provider = ProviderBuilder::new()
            .wallet(EthereumWallet::from(signer))
            .connect_http(self.rpc_url.clone())
            .erased();
        Ok(EvmSigner {
            reader: EvmReader {
                provider,
                contracts: reader.contracts,
            },
            address,
        })
    }
}

#[async_trait::async_trait]
impl ChainReader for EvmReader {
    async fn chain_id(&self) -> Result<u64, WalletError> {
        Ok(self.provider.get_chain_id().await?)
    }

    async fn nft_balance_of(&self, owner: Address) -> Result<U256, WalletError> {
        let nft = ICryptoDevs::new(self.contracts.nft, &self.provider);
        Ok(nft.balanceOf(owner).call().await?)
    }

    async fn nft_token_of_owner_by_index(
        &self,
        owner: Address,
        index: U256,
    ) -> Result<U256, WalletError> {
        let nft = ICryptoDevs::new(self.contracts.nft, &self.provider);
        Ok(nft.tokenOfOwnerByIndex(owner, index).call().await?)
    }

    async fn token_ids_claimed(&self, token_id: U256) -> Result<bool, WalletError> {
        let token = ICryptoDevToken::new(self.contracts.token, &self.provider);
        Ok(token.tokenIdsClaimed(token_id).call().await?)
    }

    async fn token_balance_of(&self, owner: Address) -> Result<U256, WalletError> {
        let token = ICryptoDevToken::new(self.contracts.token, &self.provider);
        Ok(token.balanceOf(owner).call().await?)
    }

    async fn total_supply(&self) -> Result<U256, WalletError> {
        let token = ICryptoDevToken::new(self.contracts.token, &self.provider);
        Ok(token.totalSupply().call().await?)
    }
}

#[async_trait::async_trait]
impl ChainReader for EvmSigner {
    async fn chain_id(&self) -> Result<u64, WalletError> {
        self.reader.chain_id().await
    }

    async fn nft_balance_of(&self, owner: Address) -> Result<U256, WalletError> {
        self.reader.nft_balance_of(owner).await
    }

    async fn nft_token_of_owner_by_index(
        &self,
        owner: Address,
        index: U256,
    ) -> Result<U256, WalletError> {
        self.reader.nft_token_of_owner_by_index(owner, index).await
    }

    async fn token_ids_claimed(&self, token_id: U256) -> Result<bool, WalletError> {
        self.reader.token_ids_claimed(token_id).await
    }

    async fn token_balance_of(&self, owner: Address) -> Result<U256, WalletError> {
        self.reader.token_balance_of(owner).await
    }

    async fn total_supply(&self) -> Result<U256, WalletError> {
        self.reader.total_supply().await
    }
}

#[async_trait::async_trait]
impl ChainSigner for EvmSigner {
    fn address(&self) -> Address {
        self.address
    }

    async fn mint(&self, amount: U256, value: U256) -> Result<Inclusion, WalletError> {
        self.submit("Mint", self.mint_request(amount, value)).await
    }

    async fn claim(&self) -> Result<Inclusion, WalletError> {
        self.submit("Claim", self.claim_request()).await
    }
}

impl EvmSigner {
    /// Payable `mint(amount)` call carrying `value` wei
    pub fn mint_request(&self, amount: U256, value: U256) -> TransactionRequest {
        ICryptoDevToken::new(self.reader.contracts.token, &self.reader.provider)
            .mint(amount)
            .value(value)
            .into_transaction_request()
    }

    pub fn claim_request(&self) -> TransactionRequest {
        ICryptoDevToken::new(self.reader.contracts.token, &self.reader.provider)
            .claim()
            .into_transaction_request()
    }

    async fn submit(&self, what: &str, tx: TransactionRequest) -> Result<Inclusion, WalletError> {
        let pending = self.reader.provider.send_transaction(tx).await?;
        let tx_hash = *pending.tx_hash();
        log::info!("📤 {} submitted: {}", what, tx_hash);
        inclusion(wait_for_receipt(&self.reader.provider, tx_hash).await?)
    }
}

fn inclusion(receipt: TransactionReceipt) -> Result<Inclusion, WalletError> {
    let tx_hash = receipt.transaction_hash();
    if !receipt.status() {
        return Err(WalletError::Reverted(tx_hash));
    }
    log::info!(
        "✅ Transaction {} included in block {:?}",
        tx_hash,
        receipt.block_number()
    );
    Ok(Inclusion {
        tx_hash,
        block_number: receipt.block_number(),
        gas_used: receipt.gas_used(),
    })
}
