//! Utilities for the deploy scripts.

use std::{fs::File, path::Path, str::FromStr};

use alloy::{
    dyn_abi::{DynSolValue, JsonAbiExt},
    json_abi::JsonAbi,
    network::EthereumWallet,
    primitives::Bytes,
    providers::{DynProvider, ProviderBuilder},
    signers::local::PrivateKeySigner,
    transports::http::reqwest::Url,
};
use serde::Deserialize;

use crate::{
    constants::{ARTIFACT_EXTENSION, SOLIDITY_EXTENSION},
    errors::ScriptError,
    types::ContractKind,
};

/// Sets up the signing provider through which contracts are deployed
pub fn setup_client(priv_key: &str, rpc_url: &str) -> Result<DynProvider, ScriptError> {
    let url = Url::parse(rpc_url).map_err(|e| ScriptError::ClientInitialization(e.to_string()))?;
    let signer = PrivateKeySigner::from_str(priv_key)
        .map_err(|e| ScriptError::ClientInitialization(e.to_string()))?;

    let provider = ProviderBuilder::new()
        .wallet(EthereumWallet::from(signer))
        .on_http(url);

    Ok(DynProvider::new(provider))
}

/// The parts of a Hardhat compilation artifact needed for deployment
#[derive(Debug, Deserialize)]
pub struct ContractArtifact {
    /// The contract ABI
    pub abi: JsonAbi,
    /// The contract creation bytecode
    pub bytecode: Bytes,
}

impl ContractArtifact {
    /// Read the artifact of a contract from a Hardhat artifacts directory.
    ///
    /// Hardhat lays artifacts out as `<dir>/<Name>.sol/<Name>.json`.
    pub fn load(artifacts_dir: &Path, contract: ContractKind) -> Result<Self, ScriptError> {
        let name = contract.to_string();
        let path = artifacts_dir
            .join(format!("{name}.{SOLIDITY_EXTENSION}"))
            .join(format!("{name}.{ARTIFACT_EXTENSION}"));

        let file = File::open(&path)
            .map_err(|e| ScriptError::ArtifactParsing(format!("{}: {}", path.display(), e)))?;
        serde_json::from_reader(file)
            .map_err(|e| ScriptError::ArtifactParsing(format!("{}: {}", path.display(), e)))
    }

    /// The creation bytecode with the ABI-encoded constructor arguments appended
    pub fn deploy_code(&self, args: &[DynSolValue]) -> Result<Bytes, ScriptError> {
        let encoded_args = match self.abi.constructor() {
            Some(constructor) => constructor
                .abi_encode_input(args)
                .map_err(|e| ScriptError::CalldataConstruction(e.to_string()))?,
            None if args.is_empty() => Vec::new(),
            None => {
                return Err(ScriptError::CalldataConstruction(format!(
                    "artifact has no constructor but {} arguments were given",
                    args.len()
                )))
            }
        };

        let mut code = self.bytecode.to_vec();
        code.extend(encoded_args);
        Ok(code.into())
    }
}
