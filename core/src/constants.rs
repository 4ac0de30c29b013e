//! Network, contract and token parameters of the Crypto Devs ICO

use alloy::primitives::{address, Address, U256};

/// Chain id of the Rinkeby test network
pub const RINKEBY_CHAIN_ID: u64 = 4;

/// Every session must be bound to this chain unless configured otherwise
pub const REQUIRED_CHAIN_ID: u64 = RINKEBY_CHAIN_ID;

/// Human readable name of the required network, used in alerts
pub const REQUIRED_NETWORK_NAME: &str = "Rinkeby";

/// Address of the Crypto Devs NFT collection
pub const NFT_CONTRACT_ADDRESS: Address = address!("0xa817b1eaf2b3308c46f2fc2974012d50c736df5e");

/// Contract name inside the compiled artifact
pub const TOKEN_CONTRACT_NAME: &str = "CryptoDevToken";

/// Default location of the compiled token contract (Hardhat layout)
pub const DEFAULT_ARTIFACT_PATH: &str = "artifacts/contracts/CryptoDevToken.sol/CryptoDevToken.json";

/// Price of one token, as a decimal ether string
pub const UNIT_PRICE_ETHER: &str = "0.0001";

/// Price of one token in wei (0.0001 ether)
pub const UNIT_PRICE_WEI: U256 = U256::from_limbs([100_000_000_000_000, 0, 0, 0]);

/// Whole tokens granted for every unclaimed NFT
pub const TOKENS_PER_NFT: u64 = 10;

/// Maximum number of whole tokens that can ever exist
pub const MAX_TOTAL_SUPPLY: u64 = 10_000;

/// Token decimals (ERC20 default)
pub const TOKEN_DECIMALS: u8 = 18;

/// Upper bound on in-flight claim checks during a claimable-count refresh
pub const MAX_CONCURRENT_CLAIM_CHECKS: usize = 8;

/// Delay between receipt lookups while a transaction is pending
pub const RECEIPT_POLL_INTERVAL_MS: u64 = 2_000;

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::utils::parse_ether;

    #[test]
    fn test_unit_price_matches_decimal_string() {
        assert_eq!(parse_ether(UNIT_PRICE_ETHER).unwrap(), UNIT_PRICE_WEI);
    }

    #[test]
    fn test_nft_address_parses_from_mixed_case() {
        let parsed: Address = "0xA817B1eaF2b3308C46F2FC2974012D50C736Df5e".parse().unwrap();
        assert_eq!(parsed, NFT_CONTRACT_ADDRESS);
    }
}
