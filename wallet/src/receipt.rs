//! Waiting for a submitted transaction to be included.

use std::time::Duration;

use alloy::primitives::B256;
use alloy::providers::Provider;
use alloy::rpc::types::TransactionReceipt;
use ico_core::RECEIPT_POLL_INTERVAL_MS;

use crate::error::WalletError;

/// Poll for the receipt of `tx_hash` until the transaction is included.
///
/// There is no deadline: a transaction that never lands keeps the caller
/// waiting. A transport error ends the wait immediately.
pub async fn wait_for_receipt<P: Provider>(
    provider: &P,
    tx_hash: B256,
) -> Result<TransactionReceipt, WalletError> {
    let mut lookups = 0u64;
    loop {
        if let Some(receipt) = provider.get_transaction_receipt(tx_hash).await? {
            return Ok(receipt);
        }
        lookups += 1;
        log::debug!("⏳ {} not included yet ({} lookups)", tx_hash, lookups);
        tokio::time::sleep(Duration::from_millis(RECEIPT_POLL_INTERVAL_MS)).await;
    }
}

/// Receipt as a node returns it, for driving the mocked transport
#[cfg(test)]
pub(crate) fn sample_receipt(
    tx_hash: B256,
    success: bool,
    contract_address: Option<alloy::primitives::Address>,
) -> TransactionReceipt {
    use alloy::consensus::{Eip658Value, Receipt, ReceiptEnvelope, ReceiptWithBloom};
    use alloy::primitives::{Address, Bloom};

    TransactionReceipt {
        inner: ReceiptEnvelope::Legacy(ReceiptWithBloom {
            receipt: Receipt {
                status: Eip658Value::Eip658(success),
                cumulative_gas_used: 61_000,
                logs: Vec::new(),
            },
            logs_bloom: Bloom::ZERO,
        }),
        transaction_hash: tx_hash,
        transaction_index: Some(0),
        block_hash: Some(B256::repeat_byte(0xbb)),
        block_number: Some(10_500_000),
        gas_used: 61_000,
        effective_gas_price: 1_000_000_000,
        blob_gas_used: None,
        blob_gas_price: None,
        from: Address::repeat_byte(0xf0),
        to: None,
        contract_address,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::network::ReceiptResponse;
    use alloy::providers::{ProviderBuilder, RootProvider};
    use alloy::transports::mock::Asserter;

    fn mocked(asserter: &Asserter) -> RootProvider {
        ProviderBuilder::new()
            .disable_recommended_fillers()
            .connect_mocked_client(asserter.clone())
    }

    #[tokio::test(start_paused = true)]
    async fn test_polls_until_included() {
        let asserter = Asserter::new();
        let provider = mocked(&asserter);
        let tx_hash = B256::repeat_byte(0x11);

        asserter.push_success(&Option::<TransactionReceipt>::None);
        asserter.push_success(&Option::<TransactionReceipt>::None);
        asserter.push_success(&sample_receipt(tx_hash, true, None));

        let receipt = wait_for_receipt(&provider, tx_hash).await.unwrap();
        assert_eq!(receipt.transaction_hash(), tx_hash);
        assert!(receipt.status());
        assert!(asserter.read_q().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_error_after_pending_lookups() {
        let asserter = Asserter::new();
        let provider = mocked(&asserter);
        for _ in 0..5 {
            asserter.push_success(&Option::<TransactionReceipt>::None);
        }
        asserter.push_failure_msg("connection reset");

        let err = wait_for_receipt(&provider, B256::repeat_byte(0x22)).await.unwrap_err();
        assert!(matches!(err, WalletError::Transport(_)));
        assert!(asserter.read_q().is_empty());
    }

    #[tokio::test]
    async fn test_transport_error_ends_wait() {
        let asserter = Asserter::new();
        let provider = mocked(&asserter);
        asserter.push_failure_msg("header not found");

        let err = wait_for_receipt(&provider, B256::ZERO).await.unwrap_err();
        assert!(matches!(err, WalletError::Transport(_)));
    }
}
