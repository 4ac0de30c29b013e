//! Connection session with network gating.
//!
//! Every acquisition reconnects through the connector and re-reads the chain
//! id, so a user who switches networks mid-session is stopped on their next
//! action.

use crate::connector::{ChainReader, WalletConnector};
use crate::error::WalletError;

/// What an acquisition hands back
pub enum Handle<C: WalletConnector> {
    Reader(C::Reader),
    Signer(C::Signer),
}

pub struct Session<C> {
    connector: C,
    required_chain_id: u64,
}

impl<C: WalletConnector> Session<C> {
    /// Create a session that only accepts connections bound to `required_chain_id`
    pub fn create(connector: C, required_chain_id: u64) -> Self {
        log::debug!("🔌 Session created (required chain {})", required_chain_id);
        Self {
            connector,
            required_chain_id,
        }
    }

    pub fn required_chain_id(&self) -> u64 {
        self.required_chain_id
    }

    pub fn connector(&self) -> &C {
        &self.connector
    }

    /// Acquire a reader, or a signer when `need_signer` is set
    pub async fn acquire(&self, need_signer: bool) -> Result<Handle<C>, WalletError> {
        let reader = self.gated_reader().await?;
        if need_signer {
            Ok(Handle::Signer(self.connector.signer(reader).await?))
        } else {
            Ok(Handle::Reader(reader))
        }
    }

    /// Acquire a read-only handle
    pub async fn reader(&self) -> Result<C::Reader, WalletError> {
        self.gated_reader().await
    }

    /// Acquire a handle able to authorize writes
    pub async fn signer(&self) -> Result<C::Signer, WalletError> {
        let reader = self.gated_reader().await?;
        self.connector.signer(reader).await
    }

    /// Close the session and give the connector back
    pub fn teardown(self) -> C {
        log::debug!("🔌 Session closed");
        self.connector
    }

    async fn gated_reader(&self) -> Result<C::Reader, WalletError> {
        let reader = self.connector.connect().await?;
        let actual = reader.chain_id().await?;
        if actual != self.required_chain_id {
            log::warn!(
                "⚠️  Connected to chain {}, expected chain {}",
                actual,
                self.required_chain_id
            );
            return Err(WalletError::WrongNetwork {
                expected: self.required_chain_id,
                actual,
            });
        }
        Ok(reader)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connector::ChainSigner;
    use crate::memory::{MemoryChain, Method};
    use alloy::primitives::Address;

    #[tokio::test]
    async fn test_acquire_reader_on_required_chain() {
        let chain = MemoryChain::new(4, Address::repeat_byte(1));
        let session = Session::create(chain.clone(), 4);

        let handle = session.acquire(false).await.unwrap();
        assert!(matches!(handle, Handle::Reader(_)));
        assert_eq!(chain.calls(Method::ChainId), 1);
    }

    #[tokio::test]
    async fn test_acquire_signer_carries_account() {
        let account = Address::repeat_byte(7);
        let session = Session::create(MemoryChain::new(4, account), 4);

        match session.acquire(true).await.unwrap() {
            Handle::Signer(signer) => assert_eq!(signer.address(), account),
            Handle::Reader(_) => panic!("expected a signer"),
        }
    }

    #[tokio::test]
    async fn test_wrong_network_rejected() {
        let chain = MemoryChain::new(1, Address::repeat_byte(1));
        let session = Session::create(chain.clone(), 4);

        let err = session.signer().await.err().unwrap();
        assert!(matches!(
            err,
            WalletError::WrongNetwork {
                expected: 4,
                actual: 1
            }
        ));
        assert_eq!(chain.non_gate_calls(), 0);
    }

    #[tokio::test]
    async fn test_gate_runs_on_every_acquisition() {
        let chain = MemoryChain::new(4, Address::repeat_byte(1));
        let session = Session::create(chain.clone(), 4);

        session.reader().await.unwrap();
        session.reader().await.unwrap();

        // User switches network between two actions
        chain.set_chain_id(5);
        assert!(session.reader().await.err().unwrap().is_wrong_network());
        assert_eq!(chain.calls(Method::ChainId), 3);
    }

    #[tokio::test]
    async fn test_teardown_returns_connector() {
        let chain = MemoryChain::new(4, Address::repeat_byte(1));
        let session = Session::create(chain, 4);
        let connector = session.teardown();
        assert_eq!(connector.account(), Address::repeat_byte(1));
    }
}
