//! Deploys the Crypto Dev Token contract

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use ico_cli::{deploy_token, DeployEnv, DeployError};
use owo_colors::OwoColorize;

#[derive(Parser, Debug)]
#[command(name = "ico-deploy")]
#[command(about = "Deploy the Crypto Dev Token contract", version)]
struct Args {
    /// Environment file with RPC_URL and PRIVATE_KEY or MNEMONIC
    #[arg(long, default_value = ".env")]
    env_file: PathBuf,
}

async fn run(args: &Args) -> Result<(), DeployError> {
    match dotenvy::from_path(&args.env_file) {
        Ok(()) => log::info!("📝 Loaded {}", args.env_file.display()),
        Err(e) if e.not_found() => {
            log::warn!("⚠️  {} not found, using process environment", args.env_file.display())
        }
        Err(e) => return Err(DeployError::Env(format!("{}: {}", args.env_file.display(), e))),
    }

    let env = DeployEnv::from_env()?;
    let address = deploy_token(&env).await?;
    println!("Crypto Devs Token Contract Address: {}", address);
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    match run(&args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", "❌".red(), e);
            ExitCode::FAILURE
        }
    }
}
