//! Definitions of CLI arguments and commands for deploy scripts

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::{
    commands::{deploy_full_system, deploy_staking_pool_actions},
    config::DeploymentConfig,
    constants::{
        DEFAULT_ACTIONS_REGISTRY_PATH, DEFAULT_ARTIFACTS_DIR, DEFAULT_REGISTRY_PATH,
        DEFAULT_RPC_URL,
    },
    errors::ScriptError,
    factory::RpcContractFactory,
};

/// Deploy the staking pool contracts to an EVM chain
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Private key of the deployer
    #[arg(short, long, env = "PKEY")]
    pub priv_key: String,

    /// Network RPC URL
    #[arg(short, long, env = "RPC_URL", default_value = DEFAULT_RPC_URL)]
    pub rpc_url: String,

    /// Directory containing the Hardhat compilation artifacts
    #[arg(long, default_value = DEFAULT_ARTIFACTS_DIR)]
    pub artifacts_dir: PathBuf,

    /// Optional JSON file overriding the default constructor parameters
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// The deployment to run
    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// The deployment config, read from `--config` if given
    pub fn deployment_config(&self) -> Result<DeploymentConfig, ScriptError> {
        match &self.config {
            Some(path) => DeploymentConfig::load(path),
            None => Ok(DeploymentConfig::default()),
        }
    }
}

/// The deployment scenarios
#[derive(Subcommand)]
pub enum Command {
    /// Deploy every contract and record their addresses
    Deploy(DeployArgs),
    /// Deploy only `StakingPoolActions` and record its address
    DeployActions(DeployActionsArgs),
}

impl Command {
    /// Run the selected deployment
    pub async fn run(
        self,
        factory: &RpcContractFactory,
        config: DeploymentConfig,
    ) -> Result<(), ScriptError> {
        match self {
            Command::Deploy(args) => {
                deploy_full_system(factory, config, &args.registry).await?;
            }
            Command::DeployActions(args) => {
                deploy_staking_pool_actions(factory, config, &args.registry).await?;
            }
        }
        Ok(())
    }
}

/// Deploy the full contract suite
#[derive(Args)]
pub struct DeployArgs {
    /// Path of the address registry
    #[arg(long, default_value = DEFAULT_REGISTRY_PATH)]
    pub registry: PathBuf,
}

/// Deploy `StakingPoolActions` alone
#[derive(Args)]
pub struct DeployActionsArgs {
    /// Path of the address registry
    #[arg(long, default_value = DEFAULT_ACTIONS_REGISTRY_PATH)]
    pub registry: PathBuf,
}
