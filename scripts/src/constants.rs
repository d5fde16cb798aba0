//! Constants used in the deploy scripts

/// The default RPC URL, a local Hardhat or Anvil node
pub const DEFAULT_RPC_URL: &str = "http://127.0.0.1:8545";

/// The default directory holding the compiled Hardhat artifacts
pub const DEFAULT_ARTIFACTS_DIR: &str = "artifacts/contracts";

/// The default path of the full-system address registry
pub const DEFAULT_REGISTRY_PATH: &str = "addresses.json";

/// The default path of the `StakingPoolActions`-only address registry
pub const DEFAULT_ACTIONS_REGISTRY_PATH: &str = "staking_pool_actions_addresses.json";

/// The extension of a Solidity source directory in the artifacts tree
pub const SOLIDITY_EXTENSION: &str = "sol";

/// The extension of a compiled artifact file
pub const ARTIFACT_EXTENSION: &str = "json";

/// The indentation used when writing registry files
pub const REGISTRY_INDENT: &[u8] = b"  ";

/// The default log filter, used when `RUST_LOG` is unset
pub const DEFAULT_LOG_FILTER: &str = "info";

// --- Registry roles --- //

/// The `StakingPoolActions` contract key in the registry
pub const STAKING_POOL_ACTIONS_KEY: &str = "stakingPoolActions";

/// The `SpecialStakingPool` contract key in the registry
pub const SPECIAL_STAKING_POOL_KEY: &str = "specialStakingPool";

/// The `TokenSaleCreator` contract key in the registry
pub const TOKEN_SALE_CREATOR_KEY: &str = "tokenSaleCreator";

// --- Default constructor parameters --- //

/// The default fee charged by `StakingPoolActions`, in ether
pub const DEFAULT_STAKING_POOL_ACTIONS_FEE: &str = "0.0003";

/// The default total supply of each vToken, in ether
pub const DEFAULT_TOKEN_SUPPLY: &str = "300000000";

/// The default recipient of the token supply and pool proceeds
pub const DEFAULT_RECIPIENT: &str = "0xb69DB7b7B3aD64d53126DCD1f4D5fBDaea4fF578";

/// The default trailing percentage parameter of the vToken constructor
pub const DEFAULT_TOKEN_FEE_PERCENTAGE: u64 = 3;

/// The default ratio parameters of the `SpecialStakingPool` constructor
pub const DEFAULT_STAKING_RATIOS: [u64; 2] = [20, 10];

/// The default fee parameter of the `TokenSaleCreator` constructor
pub const DEFAULT_SALE_FEE_PERCENTAGE: u64 = 30;

/// The default name and symbol of the first vToken
pub const DEFAULT_FIRST_TOKEN: (&str, &str) = ("vBitcoin", "vBTC");

/// The default name and symbol of the second vToken
pub const DEFAULT_SECOND_TOKEN: (&str, &str) = ("vBitraiser", "vBTR");
