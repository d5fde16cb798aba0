//! Type definitions used throughout the scripts

use std::{
    collections::BTreeMap,
    fmt::{self, Display},
    str::FromStr,
};

use alloy::dyn_abi::DynSolValue;
use alloy_primitives::Address;
use serde::{de::Error as DeError, Deserialize, Deserializer, Serialize, Serializer};

use crate::errors::ScriptError;

/// The contracts this tool knows how to deploy
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ContractKind {
    /// The fee-configured staking pool actions contract
    StakingPoolActions,
    /// The vToken ERC20 contract
    VToken,
    /// The staking pool over a pair of vTokens
    SpecialStakingPool,
    /// The token sale factory contract
    TokenSaleCreator,
}

impl Display for ContractKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContractKind::StakingPoolActions => write!(f, "StakingPoolActions"),
            ContractKind::VToken => write!(f, "vToken"),
            ContractKind::SpecialStakingPool => write!(f, "SpecialStakingPool"),
            ContractKind::TokenSaleCreator => write!(f, "TokenSaleCreator"),
        }
    }
}

/// Computes a step's constructor arguments from the instances deployed earlier in the run
pub type ArgsBuilder =
    Box<dyn Fn(&[DeployedInstance]) -> Result<Vec<DynSolValue>, ScriptError> + Send + Sync>;

/// A single contract deployment within a plan
pub struct DeploymentStep {
    /// The contract to deploy
    pub contract: ContractKind,
    /// The role name under which the deployed address is recorded
    pub role: String,
    /// The roles of earlier steps whose addresses the args builder reads
    pub depends_on: Vec<String>,
    /// Computes the constructor arguments
    pub args_builder: ArgsBuilder,
}

impl DeploymentStep {
    /// Create a step with no dependencies on earlier steps
    pub fn new<F>(contract: ContractKind, role: impl Into<String>, args_builder: F) -> Self
    where
        F: Fn(&[DeployedInstance]) -> Result<Vec<DynSolValue>, ScriptError>
            + Send
            + Sync
            + 'static,
    {
        Self {
            contract,
            role: role.into(),
            depends_on: Vec::new(),
            args_builder: Box::new(args_builder),
        }
    }

    /// Declare that this step reads the addresses of the given roles
    pub fn depends_on<I, S>(mut self, roles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.depends_on.extend(roles.into_iter().map(Into::into));
        self
    }

    /// Build the constructor arguments given the instances deployed so far
    pub fn build_args(&self, prior: &[DeployedInstance]) -> Result<Vec<DynSolValue>, ScriptError> {
        (self.args_builder)(prior)
    }
}

impl fmt::Debug for DeploymentStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeploymentStep")
            .field("contract", &self.contract)
            .field("role", &self.role)
            .field("depends_on", &self.depends_on)
            .finish_non_exhaustive()
    }
}

/// A confirmed contract deployment
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeployedInstance {
    /// The deployed contract
    pub contract: ContractKind,
    /// The role the contract was deployed for
    pub role: String,
    /// The address the contract was deployed at
    pub address: Address,
}

/// An EVM address as stored in the registry.
///
/// Written as EIP-55 checksummed hex, read from 40 hex characters with an
/// optional `0x` prefix.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct RegistryAddress(pub Address);

impl From<Address> for RegistryAddress {
    fn from(address: Address) -> Self {
        Self(address)
    }
}

impl Serialize for RegistryAddress {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0.to_checksum(None /* chain_id */))
    }
}

impl<'de> Deserialize<'de> for RegistryAddress {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Address::from_str(&s)
            .map(RegistryAddress)
            .map_err(|e| D::Error::custom(format!("invalid address `{s}`: {e}")))
    }
}

/// The addresses deployed to a single network, keyed by role name
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NetworkRecord(BTreeMap<String, RegistryAddress>);

impl NetworkRecord {
    /// Record the address of a role, replacing any previous address
    pub fn insert(&mut self, role: impl Into<String>, address: Address) {
        self.0.insert(role.into(), RegistryAddress(address));
    }

    /// Get the address recorded for a role
    pub fn get(&self, role: &str) -> Option<Address> {
        self.0.get(role).map(|a| a.0)
    }

    /// The number of roles recorded
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the record is empty
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over the recorded roles and addresses
    pub fn iter(&self) -> impl Iterator<Item = (&str, Address)> {
        self.0.iter().map(|(role, addr)| (role.as_str(), addr.0))
    }
}

impl FromIterator<DeployedInstance> for NetworkRecord {
    fn from_iter<I: IntoIterator<Item = DeployedInstance>>(iter: I) -> Self {
        let mut record = NetworkRecord::default();
        for instance in iter {
            record.insert(instance.role, instance.address);
        }
        record
    }
}
