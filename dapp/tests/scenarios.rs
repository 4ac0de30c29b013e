//! End-to-end client behaviour over the in-memory chain

use std::sync::Arc;

use alloy::primitives::{utils::parse_ether, Address, U256};
use ico_core::{mint_payment, RINKEBY_CHAIN_ID, UNIT_PRICE_WEI};
use ico_dapp::{
    Action, IcoApp, IcoError, Notifier, Phase, ReadKind, CLAIM_SUCCESS, MINT_SUCCESS,
};
use ico_wallet::memory::{MemoryChain, Method};
use ico_wallet::{ChainSigner, Session};
use parking_lot::Mutex;

#[derive(Clone, Default)]
struct RecordingNotifier {
    alerts: Arc<Mutex<Vec<String>>>,
}

impl RecordingNotifier {
    fn alerts(&self) -> Vec<String> {
        self.alerts.lock().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn alert(&self, message: &str) {
        self.alerts.lock().push(message.to_string());
    }
}

/// Moves the wallet to another network as soon as a mint is reported
struct SwitchingNotifier {
    chain: MemoryChain,
    recorder: RecordingNotifier,
}

impl Notifier for SwitchingNotifier {
    fn alert(&self, message: &str) {
        if message == MINT_SUCCESS {
            self.chain.set_chain_id(5);
        }
        self.recorder.alert(message);
    }
}

fn one_token() -> U256 {
    parse_ether("1").unwrap()
}

fn setup(chain_id: u64) -> (MemoryChain, RecordingNotifier, IcoApp<MemoryChain, RecordingNotifier>) {
    let chain = MemoryChain::new(chain_id, Address::repeat_byte(0xaa));
    let notifier = RecordingNotifier::default();
    let session = Session::create(chain.clone(), RINKEBY_CHAIN_ID);
    let app = IcoApp::new(session, notifier.clone());
    (chain, notifier, app)
}

fn assert_each_read_once(chain: &MemoryChain) {
    assert_eq!(chain.calls(Method::TotalSupply), 1);
    assert_eq!(chain.calls(Method::TokenBalanceOf), 1);
    assert_eq!(chain.calls(Method::NftBalanceOf), 1);
}

#[tokio::test]
async fn test_three_nfts_one_claimed() {
    let (chain, _, mut app) = setup(RINKEBY_CHAIN_ID);
    let owner = chain.account();
    for id in [7, 8, 9] {
        chain.give_nft(owner, id);
    }
    chain.mark_claimed(8);

    let report = app.connect().await.unwrap();
    assert!(report.is_complete());
    assert_eq!(app.state().tokens_to_be_claimed, U256::from(2u64));
    assert_eq!(
        app.state().action(),
        Action::Claim {
            tokens: U256::from(20u64)
        }
    );
}

#[tokio::test]
async fn test_mint_five_pays_exact_price() {
    assert_eq!(
        mint_payment(U256::from(5u64)).unwrap(),
        parse_ether("0.0005").unwrap()
    );

    let (chain, notifier, mut app) = setup(RINKEBY_CHAIN_ID);
    app.connect().await.unwrap();
    app.set_token_amount_input("5").unwrap();

    let outcome = app.mint_pending().await.unwrap();
    assert!(outcome.inclusion.block_number.is_some());
    assert_eq!(app.state().balance, U256::from(5u64) * one_token());
    assert_eq!(app.state().tokens_minted, U256::from(5u64) * one_token());
    assert_eq!(app.state().phase(), Phase::Idle);
    assert_eq!(notifier.alerts(), vec![MINT_SUCCESS.to_string()]);

    // One token short of the price is rejected by the contract
    let err = chain.mint(U256::from(2u64), UNIT_PRICE_WEI).await;
    assert!(err.is_err());
}

#[tokio::test]
async fn test_wrong_network_stops_connect() {
    let (chain, notifier, mut app) = setup(1);

    let err = app.connect().await.unwrap_err();
    assert!(matches!(
        err,
        IcoError::WrongNetwork {
            expected: 4,
            actual: 1
        }
    ));
    assert_eq!(chain.non_gate_calls(), 0);
    assert_eq!(notifier.alerts(), vec!["Change the network to Rinkeby".to_string()]);
    assert_eq!(app.state().action(), Action::Connect);
}

#[tokio::test]
async fn test_wrong_network_stops_writes() {
    let (chain, _, mut app) = setup(RINKEBY_CHAIN_ID);
    app.connect().await.unwrap();

    chain.set_chain_id(5);
    chain.reset_calls();

    assert!(app.mint(U256::from(1u64)).await.unwrap_err().is_wrong_network());
    assert!(app.claim().await.unwrap_err().is_wrong_network());
    assert_eq!(chain.non_gate_calls(), 0);
}

#[tokio::test]
async fn test_refresh_runs_once_after_each_write() {
    let (chain, _, mut app) = setup(RINKEBY_CHAIN_ID);
    let owner = chain.account();
    chain.give_nft(owner, 1);
    app.connect().await.unwrap();

    chain.reset_calls();
    app.claim().await.unwrap();
    assert_eq!(chain.calls(Method::Claim), 1);
    assert_each_read_once(&chain);

    // A failing read still counts as its one run
    chain.reset_calls();
    chain.fail(Method::TotalSupply);
    let outcome = app.mint(U256::from(3u64)).await.unwrap();
    assert!(outcome.refresh.failed(ReadKind::TotalSupply));
    assert_each_read_once(&chain);
}

#[tokio::test]
async fn test_claim_flow() {
    let (chain, notifier, mut app) = setup(RINKEBY_CHAIN_ID);
    let owner = chain.account();
    chain.give_nft(owner, 1);
    chain.give_nft(owner, 2);
    app.connect().await.unwrap();

    app.claim().await.unwrap();
    assert!(app.state().tokens_to_be_claimed.is_zero());
    assert_eq!(app.state().balance, U256::from(20u64) * one_token());
    assert_eq!(app.state().action(), Action::Mint { enabled: false });
    assert_eq!(notifier.alerts(), vec![CLAIM_SUCCESS.to_string()]);
}

#[tokio::test]
async fn test_failed_read_resets_to_zero() {
    let (chain, _, mut app) = setup(RINKEBY_CHAIN_ID);
    let owner = chain.account();
    chain.set_balance(owner, U256::from(42u64));
    chain.set_total_supply(U256::from(99u64));
    app.connect().await.unwrap();
    assert_eq!(app.state().balance, U256::from(42u64));

    chain.fail(Method::TokenBalanceOf);
    let report = app.refresh().await;
    assert!(report.failed(ReadKind::Balance));
    assert!(app.state().balance.is_zero());
    assert_eq!(app.state().tokens_minted, U256::from(99u64));
}

#[tokio::test]
async fn test_failed_write_is_surfaced_without_refresh() {
    let (chain, notifier, mut app) = setup(RINKEBY_CHAIN_ID);
    app.connect().await.unwrap();

    // Nothing to claim: the contract rejects the call
    chain.reset_calls();
    let err = app.claim().await.unwrap_err();
    assert!(matches!(err, IcoError::WriteFailure(_)));
    assert!(!app.state().loading);
    assert_eq!(chain.calls(Method::TotalSupply), 0);
    assert!(notifier.alerts().is_empty());
}

#[tokio::test]
async fn test_zero_mint_never_reaches_chain() {
    let (chain, _, mut app) = setup(RINKEBY_CHAIN_ID);
    app.connect().await.unwrap();
    chain.reset_calls();

    let err = app.mint(U256::ZERO).await.unwrap_err();
    assert!(matches!(err, IcoError::InvalidAmount(_)));
    assert_eq!(chain.calls(Method::ChainId), 0);
    assert_eq!(chain.calls(Method::Mint), 0);
}

#[tokio::test]
async fn test_network_switch_after_inclusion_alerts() {
    let chain = MemoryChain::new(RINKEBY_CHAIN_ID, Address::repeat_byte(0xaa));
    let recorder = RecordingNotifier::default();
    let notifier = SwitchingNotifier {
        chain: chain.clone(),
        recorder: recorder.clone(),
    };
    let mut app = IcoApp::new(Session::create(chain.clone(), RINKEBY_CHAIN_ID), notifier);
    app.connect().await.unwrap();

    let outcome = app.mint(U256::from(1u64)).await.unwrap();
    assert_eq!(chain.calls(Method::Mint), 1);
    assert_eq!(outcome.refresh.failures.len(), 3);
    assert!(outcome.refresh.wrong_network().is_some());
    assert!(app.state().balance.is_zero());
    assert_eq!(
        recorder.alerts(),
        vec![
            MINT_SUCCESS.to_string(),
            "Change the network to Rinkeby".to_string()
        ]
    );
}

#[tokio::test]
async fn test_no_account_shows_supply_only() {
    let chain = MemoryChain::new(RINKEBY_CHAIN_ID, Address::repeat_byte(0xaa));
    chain.set_total_supply(U256::from(250u64) * one_token());
    chain.give_nft(chain.account(), 1);
    let recorder = RecordingNotifier::default();
    let session = Session::create(chain.watch_only(), RINKEBY_CHAIN_ID);
    let mut app = IcoApp::new(session, recorder.clone());

    let report = app.connect().await.unwrap();
    assert!(report.is_complete());
    assert!(!report.has_account());
    assert_eq!(app.state().tokens_minted, U256::from(250u64) * one_token());
    assert!(app.state().tokens_to_be_claimed.is_zero());
    assert!(recorder.alerts().is_empty());

    // Writes still need a key
    let err = app.claim().await.unwrap_err();
    assert!(err.is_missing_account());
    assert_eq!(chain.calls(Method::Claim), 0);
}
