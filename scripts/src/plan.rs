//! Deployment plans: the ordered steps of each deployment scenario

use std::collections::HashSet;

use alloy::dyn_abi::DynSolValue;
use alloy_primitives::{Address, U256};
use itertools::Itertools;

use crate::{
    config::DeploymentConfig,
    constants::{SPECIAL_STAKING_POOL_KEY, STAKING_POOL_ACTIONS_KEY, TOKEN_SALE_CREATOR_KEY},
    errors::ScriptError,
    types::{ContractKind, DeployedInstance, DeploymentStep},
};

/// A named deployment scenario
pub trait DeploymentPlan {
    /// A human-readable name for the plan
    fn name(&self) -> &'static str;

    /// The ordered steps of the plan
    fn produce_steps(&self) -> Vec<DeploymentStep>;
}

/// Deploys the whole contract suite
#[derive(Clone, Debug, Default)]
pub struct FullSystemPlan {
    /// The constructor parameters
    pub config: DeploymentConfig,
}

impl FullSystemPlan {
    /// Create a full-system plan over the given config
    pub fn new(config: DeploymentConfig) -> Self {
        Self { config }
    }
}

impl DeploymentPlan for FullSystemPlan {
    fn name(&self) -> &'static str {
        "full-system"
    }

    fn produce_steps(&self) -> Vec<DeploymentStep> {
        let config = &self.config;
        let recipient = config.recipient();
        let [first_token, second_token] = config.tokens.clone();
        let [ratio_a, ratio_b] = config.staking_ratios;

        let mut steps = vec![staking_pool_actions_step(config)];

        for token in [first_token.clone(), second_token.clone()] {
            let supply = config.token_supply;
            let fee = config.token_fee_percentage;
            steps.push(DeploymentStep::new(
                ContractKind::VToken,
                token.symbol.clone(),
                move |_| {
                    Ok(vec![
                        DynSolValue::String(token.name.clone()),
                        DynSolValue::String(token.symbol.clone()),
                        uint(supply),
                        DynSolValue::Address(recipient),
                        uint(U256::from(fee)),
                    ])
                },
            ));
        }

        let (first_role, second_role) = (first_token.symbol, second_token.symbol);
        let dependencies = [first_role.clone(), second_role.clone()];
        steps.push(
            DeploymentStep::new(
                ContractKind::SpecialStakingPool,
                SPECIAL_STAKING_POOL_KEY,
                move |prior| {
                    Ok(vec![
                        DynSolValue::Address(recipient),
                        DynSolValue::Address(prior_address(prior, &first_role)?),
                        DynSolValue::Address(prior_address(prior, &second_role)?),
                        uint(U256::from(ratio_a)),
                        uint(U256::from(ratio_b)),
                    ])
                },
            )
            .depends_on(dependencies),
        );

        let sale_fee = config.sale_fee_percentage;
        steps.push(DeploymentStep::new(
            ContractKind::TokenSaleCreator,
            TOKEN_SALE_CREATOR_KEY,
            move |_| Ok(vec![uint(U256::from(sale_fee))]),
        ));

        steps
    }
}

/// Deploys only `StakingPoolActions`
#[derive(Clone, Debug, Default)]
pub struct StakingPoolActionsPlan {
    /// The constructor parameters
    pub config: DeploymentConfig,
}

impl StakingPoolActionsPlan {
    /// Create a single-contract plan over the given config
    pub fn new(config: DeploymentConfig) -> Self {
        Self { config }
    }
}

impl DeploymentPlan for StakingPoolActionsPlan {
    fn name(&self) -> &'static str {
        "staking-pool-actions"
    }

    fn produce_steps(&self) -> Vec<DeploymentStep> {
        vec![staking_pool_actions_step(&self.config)]
    }
}

/// The `StakingPoolActions` step, shared by both plans
fn staking_pool_actions_step(config: &DeploymentConfig) -> DeploymentStep {
    let fee = config.staking_pool_actions_fee;
    DeploymentStep::new(
        ContractKind::StakingPoolActions,
        STAKING_POOL_ACTIONS_KEY,
        move |_| Ok(vec![uint(fee)]),
    )
}

/// A `uint256` constructor argument
fn uint(value: U256) -> DynSolValue {
    DynSolValue::Uint(value, 256)
}

/// Look up the address deployed earlier in the run for the given role
pub fn prior_address(prior: &[DeployedInstance], role: &str) -> Result<Address, ScriptError> {
    prior
        .iter()
        .find(|instance| instance.role == role)
        .map(|instance| instance.address)
        .ok_or_else(|| {
            ScriptError::ArgumentWiring(format!("`{role}` has not been deployed yet in this run"))
        })
}

/// Check that roles are unique and that every step depends only on roles
/// produced by strictly earlier steps
pub fn check_ordering(steps: &[DeploymentStep]) -> Result<(), ScriptError> {
    if let Some(dup) = steps.iter().map(|s| s.role.as_str()).duplicates().next() {
        return Err(ScriptError::ArgumentWiring(format!(
            "role `{dup}` is produced by more than one step"
        )));
    }

    let mut produced = HashSet::new();
    for step in steps {
        if let Some(missing) = step.depends_on.iter().find(|r| !produced.contains(r.as_str())) {
            return Err(ScriptError::ArgumentWiring(format!(
                "`{}` depends on `{}`, which is not deployed before it",
                step.role, missing
            )));
        }
        produced.insert(step.role.as_str());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use alloy::dyn_abi::DynSolValue;
    use alloy_primitives::{Address, U256};

    use super::{
        check_ordering, prior_address, DeploymentPlan, FullSystemPlan, StakingPoolActionsPlan,
    };
    use crate::{
        config::DeploymentConfig,
        errors::ScriptError,
        types::{ContractKind, DeployedInstance, DeploymentStep},
    };

    /// Instances for every role, with address bytes equal to their index + 1
    fn fake_instances(steps: &[DeploymentStep]) -> Vec<DeployedInstance> {
        steps
            .iter()
            .enumerate()
            .map(|(i, step)| DeployedInstance {
                contract: step.contract,
                role: step.role.clone(),
                address: Address::repeat_byte(i as u8 + 1),
            })
            .collect()
    }

    #[test]
    fn test_full_system_plan_order() {
        let steps = FullSystemPlan::default().produce_steps();
        let roles: Vec<_> = steps.iter().map(|s| s.role.as_str()).collect();
        assert_eq!(
            roles,
            [
                "stakingPoolActions",
                "vBTC",
                "vBTR",
                "specialStakingPool",
                "tokenSaleCreator"
            ]
        );
        assert_eq!(steps[1].contract, ContractKind::VToken);
        assert_eq!(steps[2].contract, ContractKind::VToken);
        check_ordering(&steps).unwrap();
    }

    #[test]
    fn test_single_contract_plan() {
        let steps = StakingPoolActionsPlan::default().produce_steps();
        assert_eq!(steps.len(), 1);
        assert_eq!(steps[0].contract, ContractKind::StakingPoolActions);
        check_ordering(&steps).unwrap();
    }

    #[test]
    fn test_token_args() {
        let config = DeploymentConfig::default();
        let steps = FullSystemPlan::new(config.clone()).produce_steps();

        let args = steps[2].build_args(&[]).unwrap();
        assert_eq!(
            args,
            vec![
                DynSolValue::String("vBitraiser".to_string()),
                DynSolValue::String("vBTR".to_string()),
                DynSolValue::Uint(config.token_supply, 256),
                DynSolValue::Address(config.recipient()),
                DynSolValue::Uint(U256::from(3u64), 256),
            ]
        );
    }

    #[test]
    fn test_pool_args_use_token_addresses() {
        let steps = FullSystemPlan::default().produce_steps();
        let prior = fake_instances(&steps[..3]);

        let args = steps[3].build_args(&prior).unwrap();
        assert_eq!(args[1], DynSolValue::Address(Address::repeat_byte(2)));
        assert_eq!(args[2], DynSolValue::Address(Address::repeat_byte(3)));
        assert_eq!(args[3], DynSolValue::Uint(U256::from(20u64), 256));
        assert_eq!(args[4], DynSolValue::Uint(U256::from(10u64), 256));
    }

    #[test]
    fn test_pool_args_before_tokens_is_wiring_error() {
        let steps = FullSystemPlan::default().produce_steps();
        let prior = fake_instances(&steps[..2]);

        let err = steps[3].build_args(&prior).unwrap_err();
        assert!(matches!(err, ScriptError::ArgumentWiring(_)));
    }

    #[test]
    fn test_forward_reference_rejected() {
        let mut steps = FullSystemPlan::default().produce_steps();
        steps.swap(2, 3);
        assert!(matches!(
            check_ordering(&steps),
            Err(ScriptError::ArgumentWiring(_))
        ));
    }

    #[test]
    fn test_duplicate_roles_rejected() {
        let mut config = DeploymentConfig::default();
        config.tokens[1] = config.tokens[0].clone();
        let steps = FullSystemPlan::new(config).produce_steps();
        assert!(check_ordering(&steps).is_err());
    }

    #[test]
    fn test_prior_address_lookup() {
        let steps = StakingPoolActionsPlan::default().produce_steps();
        let prior = fake_instances(&steps);
        assert_eq!(
            prior_address(&prior, "stakingPoolActions").unwrap(),
            Address::repeat_byte(1)
        );
        assert!(prior_address(&prior, "vBTC").is_err());
    }
}
