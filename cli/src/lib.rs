//! Crypto Devs ICO command line tools
//!
//! - `ico-deploy`: deploys the token contract from its compiled artifact
//! - `ico-cli`: status, mint and claim against a deployed token

pub mod deploy;
pub mod terminal;

pub use deploy::{deploy_token, ContractFactory, DeployEnv, DeployError, HardhatArtifact};
pub use terminal::{print_outcome, print_status, TerminalNotifier};
