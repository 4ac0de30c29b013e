//! Connect, mint and claim, tied together with the view refresh.
//!
//! The free functions take a shared `Session` so front ends that run work on
//! spawned tasks can call them directly. `IcoApp` wraps them with an owned
//! `IcoState` for front ends that drive one operation at a time.

use alloy::primitives::U256;
use ico_core::mint_payment;
use ico_wallet::{ChainSigner, Inclusion, Session, WalletConnector};

use crate::error::IcoError;
use crate::notify::{wrong_network_alert, Notifier, CLAIM_SUCCESS, MINT_SUCCESS};
use crate::refresh::{refresh_all, RefreshReport};
use crate::view::IcoState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteRequest {
    /// Mint `amount` whole tokens at the unit price
    Mint { amount: U256 },
    Claim,
}

impl WriteRequest {
    pub fn success_message(&self) -> &'static str {
        match self {
            WriteRequest::Mint { .. } => MINT_SUCCESS,
            WriteRequest::Claim => CLAIM_SUCCESS,
        }
    }
}

enum Call {
    Mint { amount: U256, value: U256 },
    Claim,
}

/// A write that was included, and the refresh that followed it
#[derive(Debug)]
pub struct WriteOutcome {
    pub inclusion: Inclusion,
    pub refresh: RefreshReport,
}

/// Pass the network gate once; the session itself holds no connection
pub async fn connect_wallet<C: WalletConnector>(session: &Session<C>) -> Result<(), IcoError> {
    session.reader().await.map_err(IcoError::read)?;
    log::info!("✅ Wallet connected");
    Ok(())
}

/// Submit a write and wait for its inclusion
pub async fn execute_write<C: WalletConnector>(
    session: &Session<C>,
    request: WriteRequest,
) -> Result<Inclusion, IcoError> {
    // Reject bad input before touching the chain
    let call = match request {
        WriteRequest::Mint { amount } if amount.is_zero() => {
            return Err(IcoError::InvalidAmount(
                "mint quantity must be positive".to_string(),
            ))
        }
        WriteRequest::Mint { amount } => Call::Mint {
            amount,
            value: mint_payment(amount)?,
        },
        WriteRequest::Claim => Call::Claim,
    };

    let signer = session.signer().await.map_err(IcoError::write)?;
    let inclusion = match call {
        Call::Mint { amount, value } => {
            log::info!("📤 Minting {} tokens for {} wei", amount, value);
            signer.mint(amount, value).await
        }
        Call::Claim => {
            log::info!("📤 Claiming tokens for {}", signer.address());
            signer.claim().await
        }
    }
    .map_err(IcoError::write)?;

    Ok(inclusion)
}

/// Run a write, then on success alert and refresh the three view values.
///
/// A failed write is logged and returned without refreshing. A refresh that
/// finds the wallet on another network raises the network alert.
pub async fn write_and_refresh<C, N>(
    session: &Session<C>,
    notifier: &N,
    request: WriteRequest,
) -> Result<WriteOutcome, IcoError>
where
    C: WalletConnector,
    N: Notifier + ?Sized,
{
    match execute_write(session, request).await {
        Ok(inclusion) => {
            notifier.alert(request.success_message());
            let refresh = refresh_all(session).await;
            if refresh.wrong_network().is_some() {
                notifier.alert(&wrong_network_alert());
            }
            Ok(WriteOutcome { inclusion, refresh })
        }
        Err(e) => {
            if e.is_wrong_network() {
                notifier.alert(&wrong_network_alert());
            }
            log::error!("❌ {:?} failed: {}", request, e);
            Err(e)
        }
    }
}

pub struct IcoApp<C, N> {
    session: Session<C>,
    notifier: N,
    state: IcoState,
}

impl<C: WalletConnector, N: Notifier> IcoApp<C, N> {
    pub fn new(session: Session<C>, notifier: N) -> Self {
        Self {
            session,
            notifier,
            state: IcoState::default(),
        }
    }

    pub fn state(&self) -> &IcoState {
        &self.state
    }

    pub fn session(&self) -> &Session<C> {
        &self.session
    }

    pub fn set_token_amount_input(&mut self, input: &str) -> Result<U256, IcoError> {
        Ok(self.state.set_token_amount_input(input)?)
    }

    /// Connect the wallet and populate the view
    pub async fn connect(&mut self) -> Result<RefreshReport, IcoError> {
        if let Err(e) = connect_wallet(&self.session).await {
            if e.is_wrong_network() {
                self.notifier.alert(&wrong_network_alert());
            }
            return Err(e);
        }
        self.state.wallet_connected = true;
        Ok(self.refresh().await)
    }

    pub async fn refresh(&mut self) -> RefreshReport {
        let report = refresh_all(&self.session).await;
        if report.wrong_network().is_some() {
            self.notifier.alert(&wrong_network_alert());
        }
        self.state.apply(&report.snapshot);
        report
    }

    pub async fn mint(&mut self, amount: U256) -> Result<WriteOutcome, IcoError> {
        self.write(WriteRequest::Mint { amount }).await
    }

    /// Mint the quantity currently entered in the view
    pub async fn mint_pending(&mut self) -> Result<WriteOutcome, IcoError> {
        let amount = self.state.token_amount;
        self.mint(amount).await
    }

    pub async fn claim(&mut self) -> Result<WriteOutcome, IcoError> {
        self.write(WriteRequest::Claim).await
    }

    pub fn teardown(self) -> C {
        self.session.teardown()
    }

    async fn write(&mut self, request: WriteRequest) -> Result<WriteOutcome, IcoError> {
        self.state.loading = true;
        let result = write_and_refresh(&self.session, &self.notifier, request).await;
        self.state.loading = false;

        let outcome = result?;
        self.state.apply(&outcome.refresh.snapshot);
        Ok(outcome)
    }
}
