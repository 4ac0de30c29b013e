//! The three view reads: total supply, account balance and claimable count.
//!
//! Each read acquires its own handle through the session, so each one passes
//! the network gate independently.

use alloy::primitives::U256;
use ico_wallet::{ChainReader, ChainSigner, Session, WalletConnector};

use crate::claimable::count_claimable;
use crate::error::IcoError;

/// Values shown to the user after a refresh
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Snapshot {
    /// Total tokens minted so far (18 decimals)
    pub total_supply: U256,
    /// Tokens held by the connected account (18 decimals)
    pub balance: U256,
    /// NFTs held by the connected account with an unexercised claim
    pub claimable: U256,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadKind {
    TotalSupply,
    Balance,
    Claimable,
}

#[derive(Debug)]
pub struct RefreshReport {
    pub snapshot: Snapshot,
    pub failures: Vec<(ReadKind, IcoError)>,
    /// Account reads left at zero because no account is configured
    pub skipped: Vec<ReadKind>,
}

impl RefreshReport {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn has_account(&self) -> bool {
        self.skipped.is_empty()
    }

    pub fn failed(&self, kind: ReadKind) -> bool {
        self.failures.iter().any(|(k, _)| *k == kind)
    }

    /// First wrong-network failure, if the gate stopped any read
    pub fn wrong_network(&self) -> Option<&IcoError> {
        self.failures
            .iter()
            .map(|(_, err)| err)
            .find(|err| err.is_wrong_network())
    }

    fn settle(&mut self, kind: ReadKind, result: Result<U256, IcoError>) -> U256 {
        match result {
            Ok(value) => value,
            Err(e) if e.is_missing_account() => {
                log::debug!("👀 {:?} read skipped: no account", kind);
                self.skipped.push(kind);
                U256::ZERO
            }
            Err(e) => {
                log::error!("❌ {:?} read failed: {}", kind, e);
                self.failures.push((kind, e));
                U256::ZERO
            }
        }
    }
}

pub async fn fetch_total_supply<C: WalletConnector>(
    session: &Session<C>,
) -> Result<U256, IcoError> {
    let reader = session.reader().await.map_err(IcoError::read)?;
    reader.total_supply().await.map_err(IcoError::read)
}

pub async fn fetch_balance<C: WalletConnector>(session: &Session<C>) -> Result<U256, IcoError> {
    let signer = session.signer().await.map_err(IcoError::read)?;
    signer
        .token_balance_of(signer.address())
        .await
        .map_err(IcoError::read)
}

pub async fn fetch_claimable<C: WalletConnector>(
    session: &Session<C>,
) -> Result<U256, IcoError> {
    let signer = session.signer().await.map_err(IcoError::read)?;
    count_claimable(&signer, signer.address())
        .await
        .map_err(IcoError::read)
}

/// Run the three reads concurrently.
///
/// A failed read reports zero for its own value and leaves the other two
/// untouched. Without a configured account the balance and claimable reads
/// are skipped at zero rather than reported as failures.
pub async fn refresh_all<C: WalletConnector>(session: &Session<C>) -> RefreshReport {
    let (total_supply, balance, claimable) = tokio::join!(
        fetch_total_supply(session),
        fetch_balance(session),
        fetch_claimable(session),
    );

    let mut report = RefreshReport {
        snapshot: Snapshot::default(),
        failures: Vec::new(),
        skipped: Vec::new(),
    };
    let total_supply = report.settle(ReadKind::TotalSupply, total_supply);
    let balance = report.settle(ReadKind::Balance, balance);
    let claimable = report.settle(ReadKind::Claimable, claimable);
    report.snapshot = Snapshot {
        total_supply,
        balance,
        claimable,
    };

    if !report.has_account() {
        log::info!("👀 No account configured, showing supply only");
    }
    if report.is_complete() {
        log::info!(
            "🔄 Refreshed: supply {}, balance {}, claimable NFTs {}",
            total_supply,
            balance,
            claimable
        );
    }
    report
}
