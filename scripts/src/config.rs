//! The constructor parameters of the deployed contracts

use std::{fs, path::Path, str::FromStr};

use alloy_primitives::{
    utils::{format_ether, parse_ether},
    Address, U256,
};
use serde::{Deserialize, Serialize};

use crate::{
    constants::{
        DEFAULT_FIRST_TOKEN, DEFAULT_RECIPIENT, DEFAULT_SALE_FEE_PERCENTAGE,
        DEFAULT_SECOND_TOKEN, DEFAULT_STAKING_POOL_ACTIONS_FEE, DEFAULT_STAKING_RATIOS,
        DEFAULT_TOKEN_FEE_PERCENTAGE, DEFAULT_TOKEN_SUPPLY,
    },
    errors::ScriptError,
    types::RegistryAddress,
};

/// The name and symbol of a vToken
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenConfig {
    /// The ERC20 name
    pub name: String,
    /// The ERC20 symbol, also used as the token's registry role
    pub symbol: String,
}

impl TokenConfig {
    /// Construct a token config from a name and symbol
    pub fn new(name: &str, symbol: &str) -> Self {
        Self {
            name: name.to_string(),
            symbol: symbol.to_string(),
        }
    }
}

/// Every literal passed to a contract constructor during deployment.
///
/// Ether amounts are written as decimal ether strings, e.g. `"0.0003"`,
/// and held in wei.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DeploymentConfig {
    /// The fee charged by `StakingPoolActions`
    #[serde(with = "ether_amount")]
    pub staking_pool_actions_fee: U256,
    /// The two vTokens, in deployment order
    pub tokens: [TokenConfig; 2],
    /// The total supply minted for each vToken
    #[serde(with = "ether_amount")]
    pub token_supply: U256,
    /// The recipient of the token supply, also the staking pool's beneficiary
    pub recipient: RegistryAddress,
    /// The trailing percentage parameter of each vToken
    pub token_fee_percentage: u64,
    /// The two trailing ratio parameters of `SpecialStakingPool`
    pub staking_ratios: [u64; 2],
    /// The fee parameter of `TokenSaleCreator`
    pub sale_fee_percentage: u64,
}

impl DeploymentConfig {
    /// Load a deployment config from a JSON file.
    ///
    /// Fields absent from the file keep their default values.
    pub fn load(path: &Path) -> Result<Self, ScriptError> {
        let contents = fs::read_to_string(path)
            .map_err(|e| ScriptError::Config(format!("{}: {}", path.display(), e)))?;
        serde_json::from_str(&contents)
            .map_err(|e| ScriptError::Config(format!("{}: {}", path.display(), e)))
    }

    /// The recipient address
    pub fn recipient(&self) -> Address {
        self.recipient.0
    }
}

impl Default for DeploymentConfig {
    fn default() -> Self {
        // The default literals are checked by the unit tests below
        let ether = |s: &str| parse_ether(s).unwrap_or_default();
        let recipient = Address::from_str(DEFAULT_RECIPIENT).unwrap_or_default();

        Self {
            staking_pool_actions_fee: ether(DEFAULT_STAKING_POOL_ACTIONS_FEE),
            tokens: [
                TokenConfig::new(DEFAULT_FIRST_TOKEN.0, DEFAULT_FIRST_TOKEN.1),
                TokenConfig::new(DEFAULT_SECOND_TOKEN.0, DEFAULT_SECOND_TOKEN.1),
            ],
            token_supply: ether(DEFAULT_TOKEN_SUPPLY),
            recipient: RegistryAddress(recipient),
            token_fee_percentage: DEFAULT_TOKEN_FEE_PERCENTAGE,
            staking_ratios: DEFAULT_STAKING_RATIOS,
            sale_fee_percentage: DEFAULT_SALE_FEE_PERCENTAGE,
        }
    }
}

/// De/serializes a wei amount as a decimal ether string
mod ether_amount {
    use alloy_primitives::U256;
    use serde::{de::Error as DeError, Deserialize, Deserializer, Serializer};

    use super::{format_ether, parse_ether};

    /// Write the amount in ether
    pub fn serialize<S: Serializer>(amount: &U256, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format_ether(*amount))
    }

    /// Read an amount given in ether
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<U256, D::Error> {
        let s = String::deserialize(deserializer)?;
        parse_ether(&s).map_err(|e| D::Error::custom(format!("invalid ether amount `{s}`: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use alloy_primitives::{address, U256};

    use super::DeploymentConfig;

    #[test]
    fn test_default_matches_deployed_literals() {
        let config = DeploymentConfig::default();

        assert_eq!(
            config.staking_pool_actions_fee,
            U256::from(300_000_000_000_000u64)
        );
        assert_eq!(
            config.token_supply,
            U256::from(300_000_000u64) * U256::from(10u64).pow(U256::from(18u64))
        );
        assert_eq!(
            config.recipient(),
            address!("b69DB7b7B3aD64d53126DCD1f4D5fBDaea4fF578")
        );
        assert_eq!(config.tokens[0].symbol, "vBTC");
        assert_eq!(config.tokens[1].symbol, "vBTR");
        assert_eq!(config.token_fee_percentage, 3);
        assert_eq!(config.staking_ratios, [20, 10]);
        assert_eq!(config.sale_fee_percentage, 30);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{ "stakingPoolActionsFee": "0.001", "saleFeePercentage": 25 }}"#
        )
        .unwrap();

        let config = DeploymentConfig::load(file.path()).unwrap();
        assert_eq!(
            config.staking_pool_actions_fee,
            U256::from(1_000_000_000_000_000u64)
        );
        assert_eq!(config.sale_fee_percentage, 25);
        assert_eq!(config.tokens, DeploymentConfig::default().tokens);
    }

    #[test]
    fn test_bad_ether_amount_is_config_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "tokenSupply": "lots" }}"#).unwrap();

        let err = DeploymentConfig::load(file.path()).unwrap_err();
        assert!(matches!(err, crate::errors::ScriptError::Config(_)));
    }
}
