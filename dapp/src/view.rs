//! What the front ends render.

use alloy::primitives::U256;
use ico_core::{claimable_tokens, format_tokens, parse_token_amount, AmountError, MAX_TOTAL_SUPPLY};

use crate::refresh::Snapshot;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Disconnected,
    Idle,
    Pending,
}

/// The single action offered to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Connect,
    Loading,
    /// Claim `tokens` whole tokens
    Claim { tokens: U256 },
    Mint { enabled: bool },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IcoState {
    pub wallet_connected: bool,
    pub loading: bool,
    /// Unclaimed NFTs held by the connected account
    pub tokens_to_be_claimed: U256,
    pub balance: U256,
    pub tokens_minted: U256,
    /// Quantity the user wants to mint
    pub token_amount: U256,
}

impl IcoState {
    pub fn phase(&self) -> Phase {
        match (self.wallet_connected, self.loading) {
            (false, _) => Phase::Disconnected,
            (true, true) => Phase::Pending,
            (true, false) => Phase::Idle,
        }
    }

    pub fn apply(&mut self, snapshot: &Snapshot) {
        self.tokens_minted = snapshot.total_supply;
        self.balance = snapshot.balance;
        self.tokens_to_be_claimed = snapshot.claimable;
    }

    /// Parse user input into the pending amount; bad input resets it to zero
    pub fn set_token_amount_input(&mut self, input: &str) -> Result<U256, AmountError> {
        match parse_token_amount(input) {
            Ok(amount) => {
                self.token_amount = amount;
                Ok(amount)
            }
            Err(e) => {
                self.token_amount = U256::ZERO;
                Err(e)
            }
        }
    }

    pub fn action(&self) -> Action {
        match self.phase() {
            Phase::Disconnected => Action::Connect,
            Phase::Pending => Action::Loading,
            Phase::Idle if !self.tokens_to_be_claimed.is_zero() => Action::Claim {
                tokens: claimable_tokens(self.tokens_to_be_claimed),
            },
            Phase::Idle => Action::Mint {
                enabled: !self.token_amount.is_zero(),
            },
        }
    }

    pub fn balance_display(&self) -> String {
        format_tokens(self.balance)
    }

    /// "minted/max" line
    pub fn supply_display(&self) -> String {
        format!("{}/{}", format_tokens(self.tokens_minted), MAX_TOTAL_SUPPLY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::utils::parse_ether;

    fn connected() -> IcoState {
        IcoState {
            wallet_connected: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_action_selection() {
        assert_eq!(IcoState::default().action(), Action::Connect);

        let mut state = connected();
        assert_eq!(state.action(), Action::Mint { enabled: false });

        state.set_token_amount_input("3").unwrap();
        assert_eq!(state.action(), Action::Mint { enabled: true });

        state.tokens_to_be_claimed = U256::from(2u64);
        assert_eq!(
            state.action(),
            Action::Claim {
                tokens: U256::from(20u64)
            }
        );

        state.loading = true;
        assert_eq!(state.phase(), Phase::Pending);
        assert_eq!(state.action(), Action::Loading);
    }

    #[test]
    fn test_bad_input_disables_mint() {
        let mut state = connected();
        state.set_token_amount_input("4").unwrap();
        assert!(state.set_token_amount_input("4.5").is_err());
        assert!(state.token_amount.is_zero());
        assert_eq!(state.action(), Action::Mint { enabled: false });
    }

    #[test]
    fn test_apply_snapshot_and_display() {
        let mut state = connected();
        state.apply(&Snapshot {
            total_supply: parse_ether("25").unwrap(),
            balance: parse_ether("5").unwrap(),
            claimable: U256::ZERO,
        });

        assert_eq!(state.balance_display(), "5.0");
        assert_eq!(state.supply_display(), "25.0/10000");
        assert_eq!(state.phase(), Phase::Idle);
    }
}
