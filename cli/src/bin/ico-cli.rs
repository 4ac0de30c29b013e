//! Crypto Devs ICO CLI - claim and mint Crypto Dev Tokens

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use ico_cli::{print_outcome, print_status, TerminalNotifier};
use ico_dapp::{Action, IcoApp};
use ico_wallet::{IcoConfig, KeySource, Session, WalletError};
use owo_colors::OwoColorize;

#[derive(Parser, Debug)]
#[command(name = "ico-cli")]
#[command(about = "Crypto Devs token ICO client", version)]
struct Cli {
    /// Configuration file (created with defaults if missing)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// JSON-RPC endpoint, overrides the configuration
    #[arg(long)]
    rpc_url: Option<String>,

    /// Deployed token contract, overrides the configuration
    #[arg(long)]
    token: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show balance, minted supply and claimable tokens
    Status,

    /// Mint tokens at 0.0001 ETH each
    Mint {
        /// Number of whole tokens to mint
        #[arg(short, long)]
        amount: String,
    },

    /// Claim tokens for every unclaimed Crypto Devs NFT
    Claim,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config_path = cli.config.clone().unwrap_or_else(IcoConfig::config_path);
    let mut config = IcoConfig::load_or_create(&config_path)
        .with_context(|| format!("loading {}", config_path.display()))?;
    config.apply_env();
    if let Some(rpc_url) = cli.rpc_url {
        config.rpc_url = rpc_url;
    }
    if let Some(token) = cli.token {
        config.token_contract = Some(token);
    }

    let keys = match KeySource::from_env() {
        Ok(keys) => Some(keys),
        Err(WalletError::MissingSigner) => None,
        Err(e) => return Err(e.into()),
    };
    let session = Session::create(config.connector(keys.as_ref())?, config.chain_id);
    log::info!(
        "🌐 {} (chain {})",
        session.connector().rpc_url(),
        session.required_chain_id()
    );
    let account = session.connector().account();
    let mut app = IcoApp::new(session, TerminalNotifier);

    let report = app.connect().await?;
    if !report.is_complete() {
        log::warn!("⚠️  {} of 3 reads failed", report.failures.len());
    }

    match cli.command {
        Commands::Status => {
            print_status(app.state(), account);
        }

        Commands::Mint { amount } => {
            app.set_token_amount_input(&amount)?;
            let outcome = app.mint_pending().await?;
            print_outcome(&outcome);
            print_status(app.state(), account);
        }

        Commands::Claim => {
            if !matches!(app.state().action(), Action::Claim { .. }) {
                println!("\n{}", "Nothing to claim for this account".yellow());
                print_status(app.state(), account);
                return Ok(());
            }
            let outcome = app.claim().await?;
            print_outcome(&outcome);
            print_status(app.state(), account);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_mint() {
        let cli = Cli::try_parse_from(["ico-cli", "--rpc-url", "http://x", "mint", "--amount", "5"])
            .unwrap();
        assert_eq!(cli.rpc_url.as_deref(), Some("http://x"));
        assert!(matches!(cli.command, Commands::Mint { ref amount } if amount == "5"));
    }

    #[test]
    fn test_mint_requires_amount() {
        assert!(Cli::try_parse_from(["ico-cli", "mint"]).is_err());
        assert!(Cli::try_parse_from(["ico-cli", "claim"]).is_ok());
    }
}
