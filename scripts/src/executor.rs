//! Sequential execution of a deployment plan

use alloy_primitives::Address;
use tracing::info;

use crate::{
    errors::ScriptError,
    factory::ContractFactory,
    types::{DeployedInstance, DeploymentStep, NetworkRecord},
};

/// The result of a successful deployment run
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeploymentRun {
    /// The chain the run deployed to
    pub chain_id: u64,
    /// The deployed instances, in step order
    pub instances: Vec<DeployedInstance>,
}

impl DeploymentRun {
    /// The address deployed for the given role
    pub fn address_of(&self, role: &str) -> Option<Address> {
        self.instances
            .iter()
            .find(|instance| instance.role == role)
            .map(|instance| instance.address)
    }

    /// Collect the run into a registry record keyed by role
    pub fn into_record(self) -> NetworkRecord {
        self.instances.into_iter().collect()
    }
}

/// Execute the given steps in order against `factory`.
///
/// Each deployment is awaited to confirmation before the next step's
/// arguments are built. The first failure aborts the run; instances deployed
/// before it are not returned.
pub async fn execute_plan<F: ContractFactory>(
    steps: &[DeploymentStep],
    factory: &F,
    chain_id: u64,
) -> Result<DeploymentRun, ScriptError> {
    let mut instances: Vec<DeployedInstance> = Vec::with_capacity(steps.len());

    for (i, step) in steps.iter().enumerate() {
        let args = step.build_args(&instances)?;

        info!(
            "[{}/{}] deploying {} as `{}` on chain {}",
            i + 1,
            steps.len(),
            step.contract,
            step.role,
            chain_id
        );
        let address = factory.deploy(step.contract, &args).await?;
        info!("`{}` deployed at {}", step.role, address);

        instances.push(DeployedInstance {
            contract: step.contract,
            role: step.role.clone(),
            address,
        });
    }

    Ok(DeploymentRun {
        chain_id,
        instances,
    })
}
