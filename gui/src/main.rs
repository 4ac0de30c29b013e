//! Crypto Devs ICO desktop client
//!
//! Architecture:
//! - chain work runs on tokio tasks (see `worker`)
//! - results come back over a channel and are applied once per frame
//! - the view state and the offered action come from `ico_dapp::IcoState`

use eframe::egui;
use ico_dapp::{Action, IcoState, WriteRequest};
use ico_wallet::{EvmConnector, IcoConfig, KeySource, Session, WalletError};
use tokio::sync::mpsc;

mod worker;

use worker::{UiEvent, Worker};

fn main() -> Result<(), eframe::Error> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    dotenvy::dotenv().ok();

    // Create Tokio runtime and keep it alive
    let rt = tokio::runtime::Runtime::new().map_err(|e| eframe::Error::AppCreation(Box::new(e)))?;
    let _guard = rt.enter();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([720.0, 480.0])
            .with_min_inner_size([520.0, 360.0]),
        ..Default::default()
    };

    let app = IcoGuiApp::new(open_session());
    eframe::run_native(
        "Crypto Devs ICO",
        options,
        Box::new(|_cc| Ok(Box::new(app))),
    )
}

fn open_session() -> Result<Session<EvmConnector>, WalletError> {
    let mut config = IcoConfig::load_or_create(&IcoConfig::config_path())?;
    config.apply_env();

    let keys = match KeySource::from_env() {
        Ok(keys) => Some(keys),
        Err(WalletError::MissingSigner) => None,
        Err(e) => return Err(e),
    };
    let connector = config.connector(keys.as_ref())?;
    Ok(Session::create(connector, config.chain_id))
}

struct IcoGuiApp {
    worker: Option<Worker<EvmConnector>>,
    rx_events: mpsc::UnboundedReceiver<UiEvent>,

    // UI state
    state: IcoState,
    amount_input: String,
    alert: Option<String>,
    error_message: Option<String>,
}

impl IcoGuiApp {
    fn new(session: Result<Session<EvmConnector>, WalletError>) -> Self {
        let (tx_events, rx_events) = mpsc::unbounded_channel();

        let (worker, error_message) = match session {
            Ok(session) => (Some(Worker::new(session, tx_events)), None),
            Err(e) => {
                log::error!("❌ Cannot open session: {}", e);
                (None, Some(e.to_string()))
            }
        };

        let app = Self {
            worker,
            rx_events,
            state: IcoState::default(),
            amount_input: String::new(),
            alert: None,
            error_message,
        };
        // Connect right away, like a page that finds its wallet on load
        app.connect();
        app
    }

    fn connect(&self) {
        if let Some(worker) = &self.worker {
            worker.connect();
        }
    }

    fn submit(&mut self, request: WriteRequest) {
        if let Some(worker) = &self.worker {
            self.state.loading = true;
            self.error_message = None;
            worker.submit(request);
        }
    }

    fn handle_event(&mut self, event: UiEvent) {
        match event {
            UiEvent::Connected => {
                log::info!("✅ Wallet connected");
                self.state.wallet_connected = true;
                self.error_message = None;
            }
            UiEvent::Refreshed(snapshot) => {
                self.state.apply(&snapshot);
            }
            UiEvent::WriteDone => {
                self.state.loading = false;
            }
            UiEvent::Failed(err) => {
                self.state.loading = false;
                self.error_message = Some(err);
            }
            UiEvent::Alert(message) => {
                self.alert = Some(message);
            }
        }
    }

    fn show_action(&mut self, ui: &mut egui::Ui) {
        match self.state.action() {
            Action::Connect => {
                let enabled = self.worker.is_some();
                if ui
                    .add_enabled(enabled, egui::Button::new("Connect your wallet"))
                    .clicked()
                {
                    self.connect();
                }
            }
            Action::Loading => {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label("Loading...");
                });
            }
            Action::Claim { tokens } => {
                ui.label(format!("{} Tokens can be claimed!", tokens));
                if ui.button("Claim Tokens").clicked() {
                    self.submit(WriteRequest::Claim);
                }
            }
            Action::Mint { .. } => {
                ui.horizontal(|ui| {
                    let response = ui.add(
                        egui::TextEdit::singleline(&mut self.amount_input)
                            .hint_text("Amount of Tokens"),
                    );
                    if response.changed() {
                        // Bad input leaves the amount at zero and the button disabled
                        let _ = self.state.set_token_amount_input(&self.amount_input);
                    }
                });
                ui.add_space(10.0);

                let enabled = !self.state.token_amount.is_zero();
                if ui
                    .add_enabled(enabled, egui::Button::new("Mint Tokens"))
                    .clicked()
                {
                    self.submit(WriteRequest::Mint {
                        amount: self.state.token_amount,
                    });
                }
            }
        }
    }

    fn show_alert(&mut self, ctx: &egui::Context) {
        let Some(message) = self.alert.clone() else {
            return;
        };

        egui::Window::new("Crypto Devs")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label(message);
                ui.add_space(10.0);
                if ui.button("OK").clicked() {
                    self.alert = None;
                }
            });
    }
}

impl eframe::App for IcoGuiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Process async results
        while let Ok(event) = self.rx_events.try_recv() {
            self.handle_event(event);
        }

        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("Welcome to Crypto Devs ICO!");
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let idle = self.state.wallet_connected && !self.state.loading;
                    if ui.add_enabled(idle, egui::Button::new("🔄 Refresh")).clicked() {
                        if let Some(worker) = &self.worker {
                            worker.refresh();
                        }
                    }
                });
            });
        });

        // A pending alert blocks the rest of the window
        let blocked = self.alert.is_some();
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.add_enabled_ui(!blocked, |ui| {
                ui.label("You can claim or mint Crypto Dev tokens here");
                ui.add_space(20.0);

                if self.state.wallet_connected {
                    ui.label(format!(
                        "You have minted {} Crypto Dev Tokens",
                        self.state.balance_display()
                    ));
                    ui.label(format!(
                        "Overall {} have been minted!!!",
                        self.state.supply_display()
                    ));
                    ui.add_space(20.0);
                }

                self.show_action(ui);

                if let Some(err) = &self.error_message {
                    ui.add_space(10.0);
                    ui.colored_label(egui::Color32::RED, err);
                }
            });
        });

        self.show_alert(ctx);

        // Keep polling the channel while tasks are in flight
        ctx.request_repaint_after(std::time::Duration::from_millis(200));
    }
}
