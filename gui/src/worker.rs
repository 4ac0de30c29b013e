//! Background tasks for the GUI
//!
//! Every chain operation runs on a spawned task and reports back over an
//! unbounded channel, so the render loop never waits on the network.

use std::sync::Arc;

use ico_dapp::{
    connect_wallet, refresh_all, write_and_refresh, wrong_network_alert, Notifier, Snapshot,
    WriteRequest,
};
use ico_wallet::{Session, WalletConnector};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    Connected,
    Refreshed(Snapshot),
    /// A write was included
    WriteDone,
    /// Connect or write failed
    Failed(String),
    /// Blocking notification for the user
    Alert(String),
}

/// Turns alerts into `UiEvent::Alert`
pub struct ChannelNotifier(mpsc::UnboundedSender<UiEvent>);

impl Notifier for ChannelNotifier {
    fn alert(&self, message: &str) {
        let _ = self.0.send(UiEvent::Alert(message.to_string()));
    }
}

pub struct Worker<C> {
    session: Arc<Session<C>>,
    events: mpsc::UnboundedSender<UiEvent>,
}

impl<C: WalletConnector + 'static> Worker<C> {
    pub fn new(session: Session<C>, events: mpsc::UnboundedSender<UiEvent>) -> Self {
        Self {
            session: Arc::new(session),
            events,
        }
    }

    pub fn connect(&self) -> JoinHandle<()> {
        let session = self.session.clone();
        let events = self.events.clone();

        tokio::spawn(async move {
            match connect_wallet(&session).await {
                Ok(()) => {
                    let _ = events.send(UiEvent::Connected);
                    send_refresh(&session, &events).await;
                }
                Err(e) => {
                    if e.is_wrong_network() {
                        let _ = events.send(UiEvent::Alert(wrong_network_alert()));
                    }
                    log::error!("❌ Connect failed: {}", e);
                    let _ = events.send(UiEvent::Failed(e.to_string()));
                }
            }
        })
    }

    pub fn refresh(&self) -> JoinHandle<()> {
        let session = self.session.clone();
        let events = self.events.clone();

        tokio::spawn(async move {
            send_refresh(&session, &events).await;
        })
    }

    pub fn submit(&self, request: WriteRequest) -> JoinHandle<()> {
        let session = self.session.clone();
        let events = self.events.clone();

        tokio::spawn(async move {
            let notifier = ChannelNotifier(events.clone());
            match write_and_refresh(&session, &notifier, request).await {
                Ok(outcome) => {
                    let _ = events.send(UiEvent::Refreshed(outcome.refresh.snapshot));
                    let _ = events.send(UiEvent::WriteDone);
                }
                Err(e) => {
                    let _ = events.send(UiEvent::Failed(e.to_string()));
                }
            }
        })
    }
}

async fn send_refresh<C: WalletConnector>(
    session: &Session<C>,
    events: &mpsc::UnboundedSender<UiEvent>,
) {
    let report = refresh_all(session).await;
    if report.wrong_network().is_some() {
        let _ = events.send(UiEvent::Alert(wrong_network_alert()));
    }
    let _ = events.send(UiEvent::Refreshed(report.snapshot));
}
