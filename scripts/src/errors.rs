//! Definitions of errors that can occur during the execution of the deploy scripts

use std::{
    error::Error,
    fmt::{self, Display, Formatter},
};

/// Errors that can occur during the execution of the deploy scripts
#[derive(Debug)]
pub enum ScriptError {
    /// Error initializing the RPC client
    ClientInitialization(String),
    /// Error reading or parsing a compiled contract artifact
    ArtifactParsing(String),
    /// Error ABI-encoding constructor arguments
    CalldataConstruction(String),
    /// The network rejected a deployment, or the deployment reverted
    ContractDeployment {
        /// The contract being deployed
        contract: String,
        /// The underlying failure
        reason: String,
    },
    /// A deployment transaction was accepted but never confirmed with an address.
    ///
    /// The contract may exist on-chain; the transaction hash is kept so that the
    /// operator can inspect it.
    UnconfirmedDeployment {
        /// The contract being deployed
        contract: String,
        /// The hash of the deployment transaction, in hex
        tx_hash: String,
        /// The underlying failure
        reason: String,
    },
    /// A step's constructor arguments referenced a role that no earlier step produced
    ArgumentWiring(String),
    /// Error reading an existing address registry
    ReadRegistry(String),
    /// An address registry exists but is not in the expected format
    RegistryFormat(String),
    /// Error writing the address registry
    WriteRegistry(String),
    /// Error loading the deployment configuration
    Config(String),
}

impl Display for ScriptError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ScriptError::ClientInitialization(s) => write!(f, "error initializing client: {}", s),
            ScriptError::ArtifactParsing(s) => write!(f, "error parsing artifact: {}", s),
            ScriptError::CalldataConstruction(s) => write!(f, "error constructing calldata: {}", s),
            ScriptError::ContractDeployment { contract, reason } => {
                write!(f, "error deploying {}: {}", contract, reason)
            }
            ScriptError::UnconfirmedDeployment {
                contract,
                tx_hash,
                reason,
            } => write!(
                f,
                "deployment of {} was sent in tx {} but not confirmed: {}",
                contract, tx_hash, reason
            ),
            ScriptError::ArgumentWiring(s) => write!(f, "error wiring constructor arguments: {}", s),
            ScriptError::ReadRegistry(s) => write!(f, "error reading address registry: {}", s),
            ScriptError::RegistryFormat(s) => write!(f, "malformed address registry: {}", s),
            ScriptError::WriteRegistry(s) => write!(f, "error writing address registry: {}", s),
            ScriptError::Config(s) => write!(f, "error loading deployment config: {}", s),
        }
    }
}

impl Error for ScriptError {}
