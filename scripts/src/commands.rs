//! Implementations of the deploy scripts

use std::path::Path;

use serde::{de::DeserializeOwned, Serialize};
use tracing::info;

use crate::{
    config::DeploymentConfig,
    constants::STAKING_POOL_ACTIONS_KEY,
    errors::ScriptError,
    executor::{execute_plan, DeploymentRun},
    factory::{ContractFactory, NetworkContext},
    plan::{DeploymentPlan, FullSystemPlan, StakingPoolActionsPlan},
    registry::{AddressRegistry, Registry},
    types::{NetworkRecord, RegistryAddress},
};

/// Deploy the full contract suite and record every address under the
/// active chain in the registry at `registry_path`
pub async fn deploy_full_system<F: ContractFactory + NetworkContext>(
    factory: &F,
    config: DeploymentConfig,
    registry_path: &Path,
) -> Result<Registry<NetworkRecord>, ScriptError> {
    let chain_id = factory.chain_id().await?;
    let registry = AddressRegistry::new(registry_path);

    run_deployment(
        &FullSystemPlan::new(config),
        factory,
        chain_id,
        &registry,
        |run| Ok(run.into_record()),
    )
    .await
}

/// Deploy only `StakingPoolActions` and record its address under the
/// active chain in the registry at `registry_path`
pub async fn deploy_staking_pool_actions<F: ContractFactory + NetworkContext>(
    factory: &F,
    config: DeploymentConfig,
    registry_path: &Path,
) -> Result<Registry<RegistryAddress>, ScriptError> {
    let chain_id = factory.chain_id().await?;
    let registry = AddressRegistry::new(registry_path);

    run_deployment(
        &StakingPoolActionsPlan::new(config),
        factory,
        chain_id,
        &registry,
        |run| {
            run.address_of(STAKING_POOL_ACTIONS_KEY)
                .map(RegistryAddress)
                .ok_or_else(|| {
                    ScriptError::ArgumentWiring(format!(
                        "plan did not deploy `{STAKING_POOL_ACTIONS_KEY}`"
                    ))
                })
        },
    )
    .await
}

/// Execute `plan` on `chain_id` and merge its result into `registry`.
///
/// The registry is read before anything is deployed, so a malformed file
/// aborts the run up front. Nothing is written unless every step succeeds.
pub async fn run_deployment<P, F, R, M>(
    plan: &P,
    factory: &F,
    chain_id: u64,
    registry: &AddressRegistry<R>,
    to_record: M,
) -> Result<Registry<R>, ScriptError>
where
    P: DeploymentPlan,
    F: ContractFactory,
    R: Serialize + DeserializeOwned,
    M: FnOnce(DeploymentRun) -> Result<R, ScriptError>,
{
    println!("---------- Deploying to chain {} ----------", chain_id);

    let existing = registry.load()?;
    let steps = plan.produce_steps();
    info!(
        "running {} plan ({} steps) on chain {}",
        plan.name(),
        steps.len(),
        chain_id
    );

    let run = execute_plan(&steps, factory, chain_id).await?;
    let updated = existing.merge(chain_id, to_record(run)?);
    registry.persist(&updated)?;

    info!(
        "{} plan complete, addresses recorded in {}",
        plan.name(),
        registry.path().display()
    );
    Ok(updated)
}
