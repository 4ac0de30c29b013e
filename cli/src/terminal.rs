//! Terminal rendering of the client state.

use alloy::primitives::Address;
use ico_dapp::{Action, IcoState, Notifier, WriteOutcome};
use owo_colors::OwoColorize;

/// Prints alerts as highlighted lines
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn alert(&self, message: &str) {
        println!("\n{} {}", "🔔".yellow(), message.bold());
    }
}

pub const NO_ACCOUNT: &str = "No account configured (set PRIVATE_KEY or MNEMONIC)";

fn account_line(account: Option<Address>) -> String {
    match account {
        Some(account) => format!("Account:         {}", account.to_string().bright_blue()),
        None => format!("Account:         {}", NO_ACCOUNT.yellow()),
    }
}

pub fn print_status(state: &IcoState, account: Option<Address>) {
    println!("\n🪙 Crypto Devs ICO");
    println!("═══════════════════════════════════");
    println!("{}", account_line(account));
    println!(
        "Balance:         {} Crypto Dev Tokens",
        state.balance_display().green()
    );
    println!("Minted:          {}", state.supply_display());

    match state.action() {
        Action::Claim { tokens } => {
            println!(
                "\n{} {} tokens can be claimed (run `ico-cli claim`)",
                "✓".green(),
                tokens.to_string().bold()
            );
        }
        Action::Mint { .. } if account.is_none() => {}
        Action::Mint { .. } => {
            println!(
                "\nNo unclaimed NFTs; mint with `ico-cli mint --amount N` at 0.0001 ETH each"
            );
        }
        Action::Connect | Action::Loading => {}
    }
    println!();
}

pub fn print_outcome(outcome: &WriteOutcome) {
    println!("\n📦 Transaction included");
    println!("═══════════════════════════════════");
    println!("Hash:            {}", outcome.inclusion.tx_hash);
    if let Some(block) = outcome.inclusion.block_number {
        println!("Block:           {}", block);
    }
    println!("Gas used:        {}", outcome.inclusion.gas_used);

    for (kind, err) in &outcome.refresh.failures {
        println!("{} {:?} refresh failed: {}", "⚠️ ".yellow(), kind, err);
    }
}
