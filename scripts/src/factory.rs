//! The network-facing collaborators of the executor

use std::path::PathBuf;

use alloy::{
    dyn_abi::DynSolValue,
    network::{ReceiptResponse, TransactionBuilder},
    primitives::Address,
    providers::{DynProvider, Provider},
    rpc::types::TransactionRequest,
};
use tracing::debug;

use crate::{errors::ScriptError, types::ContractKind, utils::ContractArtifact};

/// Deploys a contract and waits for the deployment to be confirmed
#[allow(async_fn_in_trait)]
pub trait ContractFactory {
    /// Deploy `contract` with the given constructor arguments, returning
    /// its address once the deployment is confirmed
    async fn deploy(
        &self,
        contract: ContractKind,
        args: &[DynSolValue],
    ) -> Result<Address, ScriptError>;
}

/// Exposes the identity of the active network
#[allow(async_fn_in_trait)]
pub trait NetworkContext {
    /// The chain ID of the active network
    async fn chain_id(&self) -> Result<u64, ScriptError>;
}

/// A [`ContractFactory`] deploying Hardhat-compiled contracts over JSON-RPC
#[derive(Clone)]
pub struct RpcContractFactory {
    /// The signing provider
    provider: DynProvider,
    /// The directory holding the Hardhat artifacts
    artifacts_dir: PathBuf,
}

impl RpcContractFactory {
    /// Create a factory over the given provider and artifacts directory
    pub fn new(provider: DynProvider, artifacts_dir: impl Into<PathBuf>) -> Self {
        Self {
            provider,
            artifacts_dir: artifacts_dir.into(),
        }
    }
}

impl ContractFactory for RpcContractFactory {
    async fn deploy(
        &self,
        contract: ContractKind,
        args: &[DynSolValue],
    ) -> Result<Address, ScriptError> {
        let artifact = ContractArtifact::load(&self.artifacts_dir, contract)?;
        let code = artifact.deploy_code(args)?;
        let tx = TransactionRequest::default().with_deploy_code(code);

        let pending_tx = self.provider.send_transaction(tx).await.map_err(|e| {
            ScriptError::ContractDeployment {
                contract: contract.to_string(),
                reason: e.to_string(),
            }
        })?;
        let tx_hash = *pending_tx.tx_hash();
        debug!("{contract} deployment sent in tx {tx_hash:#x}");

        // From here on the contract may exist on-chain
        let unconfirmed = |reason: String| ScriptError::UnconfirmedDeployment {
            contract: contract.to_string(),
            tx_hash: format!("{tx_hash:#x}"),
            reason,
        };

        let receipt = pending_tx
            .get_receipt()
            .await
            .map_err(|e| unconfirmed(e.to_string()))?;

        if !receipt.status() {
            return Err(ScriptError::ContractDeployment {
                contract: contract.to_string(),
                reason: format!("deployment reverted in tx {tx_hash:#x}"),
            });
        }

        receipt
            .contract_address
            .ok_or_else(|| unconfirmed("receipt has no contract address".to_string()))
    }
}

impl NetworkContext for RpcContractFactory {
    async fn chain_id(&self) -> Result<u64, ScriptError> {
        self.provider
            .get_chain_id()
            .await
            .map_err(|e| ScriptError::ClientInitialization(e.to_string()))
    }
}
