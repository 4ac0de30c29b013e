//! ABI bindings for the two external contracts.
//!
//! Only the functions this workspace calls are declared; the contracts
//! themselves live on chain and are never compiled from here.

use alloy::sol;

sol! {
    /// Crypto Devs NFT collection (ERC721 enumerable)
    #[allow(missing_docs)]
    #[derive(Debug, PartialEq, Eq)]
    #[sol(rpc)]
    interface ICryptoDevs {
        /// Number of NFTs held by `owner`
        function balanceOf(address owner) external view returns (uint256);

        /// Token id of the `index`-th NFT held by `owner`
        function tokenOfOwnerByIndex(address owner, uint256 index) external view returns (uint256);
    }
}

sol! {
    /// Crypto Dev Token (ERC20 with NFT-gated claims)
    #[allow(missing_docs)]
    #[derive(Debug, PartialEq, Eq)]
    #[sol(rpc)]
    interface ICryptoDevToken {
        function balanceOf(address account) external view returns (uint256);

        function totalSupply() external view returns (uint256);

        /// Whether the tokens for NFT `tokenId` have been claimed
        function tokenIdsClaimed(uint256 tokenId) external view returns (bool);

        /// Mint `amount` whole tokens, paying the unit price for each
        function mint(uint256 amount) external payable;

        /// Mint the tokens owed for every unclaimed NFT of the caller
        function claim() external;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::{Address, U256};
    use alloy::sol_types::SolCall;

    #[test]
    fn test_mint_selector_and_encoding() {
        let call = ICryptoDevToken::mintCall {
            amount: U256::from(5u64),
        };
        let encoded = call.abi_encode();

        assert_eq!(&encoded[..4], &ICryptoDevToken::mintCall::SELECTOR);
        assert_eq!(encoded.len(), 4 + 32);
        assert_eq!(encoded[35], 5);
    }

    #[test]
    fn test_token_of_owner_by_index_encoding() {
        let owner = Address::repeat_byte(0x11);
        let call = ICryptoDevs::tokenOfOwnerByIndexCall {
            owner,
            index: U256::from(2u64),
        };
        let encoded = call.abi_encode();

        assert_eq!(encoded.len(), 4 + 64);
        assert_eq!(&encoded[16..36], owner.as_slice());
        assert_eq!(encoded[67], 2);
    }

    #[test]
    fn test_claim_has_no_arguments() {
        let encoded = ICryptoDevToken::claimCall {}.abi_encode();
        assert_eq!(encoded.len(), 4);
    }
}
