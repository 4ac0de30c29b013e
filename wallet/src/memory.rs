//! In-memory chain for tests.
//!
//! Behaves like the deployed contracts: minting charges the unit price per
//! token, claiming pays `TOKENS_PER_NFT` tokens for every unclaimed NFT and
//! marks it claimed. Every call is counted per method and any method can be
//! made to fail.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use alloy::primitives::{Address, B256, U256};
use ico_core::{MAX_TOTAL_SUPPLY, TOKENS_PER_NFT, TOKEN_DECIMALS, UNIT_PRICE_WEI};
use parking_lot::Mutex;

use crate::connector::{ChainReader, ChainSigner, Inclusion, WalletConnector};
use crate::error::WalletError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    ChainId,
    NftBalanceOf,
    TokenOfOwnerByIndex,
    TokenIdsClaimed,
    TokenBalanceOf,
    TotalSupply,
    Mint,
    Claim,
}

#[derive(Debug, Default)]
struct ChainState {
    chain_id: u64,
    nfts: HashMap<Address, Vec<U256>>,
    claimed: HashSet<U256>,
    balances: HashMap<Address, U256>,
    total_supply: U256,
    failing: HashSet<Method>,
    calls: HashMap<Method, usize>,
    block_number: u64,
}

#[derive(Debug, Clone)]
pub struct MemoryChain {
    state: Arc<Mutex<ChainState>>,
    account: Address,
    can_sign: bool,
}

fn one_token() -> U256 {
    U256::from(10u64).pow(U256::from(TOKEN_DECIMALS))
}

impl MemoryChain {
    pub fn new(chain_id: u64, account: Address) -> Self {
        let state = ChainState {
            chain_id,
            ..Default::default()
        };
        Self {
            state: Arc::new(Mutex::new(state)),
            account,
            can_sign: true,
        }
    }

    /// Same chain, different selected account
    pub fn with_account(&self, account: Address) -> Self {
        Self {
            state: self.state.clone(),
            account,
            can_sign: self.can_sign,
        }
    }

    /// Same chain, but the connector has no key to hand out a signer
    pub fn watch_only(&self) -> Self {
        Self {
            state: self.state.clone(),
            account: self.account,
            can_sign: false,
        }
    }

    pub fn account(&self) -> Address {
        self.account
    }

    pub fn set_chain_id(&self, chain_id: u64) {
        self.state.lock().chain_id = chain_id;
    }

    /// Give `owner` an NFT with `token_id`
    pub fn give_nft(&self, owner: Address, token_id: u64) {
        self.state
            .lock()
            .nfts
            .entry(owner)
            .or_default()
            .push(U256::from(token_id));
    }

    pub fn mark_claimed(&self, token_id: u64) {
        self.state.lock().claimed.insert(U256::from(token_id));
    }

    pub fn set_balance(&self, owner: Address, balance: U256) {
        self.state.lock().balances.insert(owner, balance);
    }

    pub fn set_total_supply(&self, total_supply: U256) {
        self.state.lock().total_supply = total_supply;
    }

    pub fn fail(&self, method: Method) {
        self.state.lock().failing.insert(method);
    }

    pub fn heal(&self, method: Method) {
        self.state.lock().failing.remove(&method);
    }

    pub fn calls(&self, method: Method) -> usize {
        self.state.lock().calls.get(&method).copied().unwrap_or(0)
    }

    /// Calls other than the chain id lookup done by the network gate
    pub fn non_gate_calls(&self) -> usize {
        self.state
            .lock()
            .calls
            .iter()
            .filter(|(method, _)| **method != Method::ChainId)
            .map(|(_, count)| count)
            .sum()
    }

    pub fn reset_calls(&self) {
        self.state.lock().calls.clear();
    }

    fn record(&self, method: Method) -> Result<(), WalletError> {
        let mut state = self.state.lock();
        *state.calls.entry(method).or_insert(0) += 1;
        if state.failing.contains(&method) {
            return Err(WalletError::Malformed(format!("{:?} unavailable", method)));
        }
        Ok(())
    }

    fn include(state: &mut ChainState) -> Inclusion {
        state.block_number += 1;
        Inclusion {
            tx_hash: B256::with_last_byte(state.block_number as u8),
            block_number: Some(state.block_number),
            gas_used: 21_000,
        }
    }
}

#[async_trait::async_trait]
impl ChainReader for MemoryChain {
    async fn chain_id(&self) -> Result<u64, WalletError> {
        self.record(Method::ChainId)?;
        Ok(self.state.lock().chain_id)
    }

    async fn nft_balance_of(&self, owner: Address) -> Result<U256, WalletError> {
        self.record(Method::NftBalanceOf)?;
        let state = self.state.lock();
        Ok(U256::from(state.nfts.get(&owner).map_or(0, Vec::len)))
    }

    async fn nft_token_of_owner_by_index(
        &self,
        owner: Address,
        index: U256,
    ) -> Result<U256, WalletError> {
        self.record(Method::TokenOfOwnerByIndex)?;
        let state = self.state.lock();
        let tokens = state.nfts.get(&owner).map(Vec::as_slice).unwrap_or_default();
        if index >= U256::from(tokens.len()) {
            return Err(WalletError::Rejected("owner index out of bounds".into()));
        }
        Ok(tokens[index.to::<u64>() as usize])
    }

    async fn token_ids_claimed(&self, token_id: U256) -> Result<bool, WalletError> {
        self.record(Method::TokenIdsClaimed)?;
        Ok(self.state.lock().claimed.contains(&token_id))
    }

    async fn token_balance_of(&self, owner: Address) -> Result<U256, WalletError> {
        self.record(Method::TokenBalanceOf)?;
        Ok(self
            .state
            .lock()
            .balances
            .get(&owner)
            .copied()
            .unwrap_or_default())
    }

    async fn total_supply(&self) -> Result<U256, WalletError> {
        self.record(Method::TotalSupply)?;
        Ok(self.state.lock().total_supply)
    }
}

#[async_trait::async_trait]
impl ChainSigner for MemoryChain {
    fn address(&self) -> Address {
        self.account
    }

    async fn mint(&self, amount: U256, value: U256) -> Result<Inclusion, WalletError> {
        self.record(Method::Mint)?;
        let mut state = self.state.lock();

        let required = amount
            .checked_mul(UNIT_PRICE_WEI)
            .ok_or_else(|| WalletError::Rejected("payment overflow".into()))?;
        if value < required {
            return Err(WalletError::Rejected("Ether sent is incorrect".into()));
        }
        let minted = amount * one_token();
        let cap = U256::from(MAX_TOTAL_SUPPLY) * one_token();
        if state.total_supply + minted > cap {
            return Err(WalletError::Rejected(
                "Exceeds the max total supply available.".into(),
            ));
        }

        state.total_supply += minted;
        *state.balances.entry(self.account).or_default() += minted;
        Ok(Self::include(&mut state))
    }

    async fn claim(&self) -> Result<Inclusion, WalletError> {
        self.record(Method::Claim)?;
        let mut state = self.state.lock();

        let owned = state.nfts.get(&self.account).cloned().unwrap_or_default();
        let unclaimed: Vec<U256> = owned
            .into_iter()
            .filter(|token_id| !state.claimed.contains(token_id))
            .collect();
        if unclaimed.is_empty() {
            return Err(WalletError::Rejected(
                "You have already claimed all the tokens".into(),
            ));
        }

        let minted = U256::from(unclaimed.len()) * U256::from(TOKENS_PER_NFT) * one_token();
        state.claimed.extend(unclaimed);
        state.total_supply += minted;
        *state.balances.entry(self.account).or_default() += minted;
        Ok(Self::include(&mut state))
    }
}

#[async_trait::async_trait]
impl WalletConnector for MemoryChain {
    type Reader = MemoryChain;
    type Signer = MemoryChain;

    async fn connect(&self) -> Result<Self::Reader, WalletError> {
        Ok(self.clone())
    }

    async fn signer(&self, reader: Self::Reader) -> Result<Self::Signer, WalletError> {
        if !self.can_sign {
            return Err(WalletError::MissingSigner);
        }
        Ok(reader.with_account(self.account))
    }
}
