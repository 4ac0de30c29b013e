//! Crypto Devs ICO claim/mint client
//!
//! Front-end independent logic: counting claimable NFTs, refreshing the
//! three view values, running mint/claim writes, and deriving the action a
//! front end offers from the current state.

pub mod app;
pub mod claimable;
pub mod error;
pub mod notify;
pub mod refresh;
pub mod view;

pub use app::{connect_wallet, execute_write, write_and_refresh, IcoApp, WriteOutcome, WriteRequest};
pub use claimable::count_claimable;
pub use error::IcoError;
pub use notify::{wrong_network_alert, Notifier, CLAIM_SUCCESS, MINT_SUCCESS};
pub use refresh::{refresh_all, ReadKind, RefreshReport, Snapshot};
pub use view::{Action, IcoState, Phase};
