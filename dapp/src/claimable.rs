//! Counting NFTs whose token claim has not been exercised.

use alloy::primitives::{Address, U256};
use futures::stream::{self, StreamExt, TryStreamExt};
use ico_core::MAX_CONCURRENT_CLAIM_CHECKS;
use ico_wallet::{ChainReader, WalletError};

/// Number of NFTs held by `owner` whose id is not yet marked claimed.
///
/// The per-index lookups run concurrently, at most
/// `MAX_CONCURRENT_CLAIM_CHECKS` at a time. Any failed lookup fails the
/// whole count.
pub async fn count_claimable<R>(reader: &R, owner: Address) -> Result<U256, WalletError>
where
    R: ChainReader + ?Sized,
{
    let held = reader.nft_balance_of(owner).await?;
    if held.is_zero() {
        return Ok(U256::ZERO);
    }
    if held > U256::from(u64::MAX) {
        return Err(WalletError::Malformed(format!(
            "NFT holding count {} out of range",
            held
        )));
    }
    let held = held.to::<u64>();

    let unclaimed = stream::iter(0..held)
        .map(move |index| async move {
            let token_id = reader
                .nft_token_of_owner_by_index(owner, U256::from(index))
                .await?;
            let claimed = reader.token_ids_claimed(token_id).await?;
            Ok::<bool, WalletError>(!claimed)
        })
        .buffer_unordered(MAX_CONCURRENT_CLAIM_CHECKS)
        .try_fold(0u64, |count, unclaimed| async move {
            Ok::<u64, WalletError>(if unclaimed { count + 1 } else { count })
        })
        .await?;

    log::debug!("🔍 {} of {} NFTs unclaimed for {}", unclaimed, held, owner);
    Ok(U256::from(unclaimed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ico_wallet::memory::{MemoryChain, Method};

    #[tokio::test]
    async fn test_no_nfts_skips_per_token_queries() {
        let owner = Address::repeat_byte(1);
        let chain = MemoryChain::new(4, owner);

        assert!(count_claimable(&chain, owner).await.unwrap().is_zero());
        assert_eq!(chain.calls(Method::NftBalanceOf), 1);
        assert_eq!(chain.calls(Method::TokenOfOwnerByIndex), 0);
        assert_eq!(chain.calls(Method::TokenIdsClaimed), 0);
    }

    #[tokio::test]
    async fn test_counts_unclaimed_for_every_split() {
        let owner = Address::repeat_byte(1);
        for held in 0u64..=12 {
            for claimed in 0..=held {
                let chain = MemoryChain::new(4, owner);
                for id in 0..held {
                    chain.give_nft(owner, 100 + id);
                }
                for id in 0..claimed {
                    chain.mark_claimed(100 + id);
                }

                let count = count_claimable(&chain, owner).await.unwrap();
                assert_eq!(count, U256::from(held - claimed), "held {held}, claimed {claimed}");
                assert_eq!(chain.calls(Method::TokenOfOwnerByIndex) as u64, held);
            }
        }
    }

    #[tokio::test]
    async fn test_single_failure_fails_count() {
        let owner = Address::repeat_byte(1);
        let chain = MemoryChain::new(4, owner);
        chain.give_nft(owner, 1);
        chain.give_nft(owner, 2);
        chain.fail(Method::TokenIdsClaimed);

        assert!(count_claimable(&chain, owner).await.is_err());
    }

    #[tokio::test]
    async fn test_other_holders_ignored() {
        let owner = Address::repeat_byte(1);
        let chain = MemoryChain::new(4, owner);
        chain.give_nft(Address::repeat_byte(2), 9);
        chain.give_nft(owner, 10);

        assert_eq!(count_claimable(&chain, owner).await.unwrap(), U256::from(1u64));
    }
}
