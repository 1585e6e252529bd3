//! Printable summary of an environment after a trait pass.

use ktrait_builder::StepPhase;
use ktrait_traits::Environment;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Serialize)]
pub struct StepReport {
    pub name: String,
    pub phase: StepPhase,
}

#[derive(Debug, Serialize)]
pub struct EnvironmentReport {
    pub resource: String,
    pub phase: String,
    pub dependencies: Vec<String>,
    pub env_vars: BTreeMap<String, String>,
    /// Steps in execution order.
    pub steps: Vec<StepReport>,
    pub executed_traits: Vec<String>,
}

impl EnvironmentReport {
    pub fn from_environment(env: &Environment) -> Self {
        let (phase, dependencies) = match (&env.integration, &env.context) {
            (Some(i), _) => (i.phase().to_string(), i.spec.dependencies.clone()),
            (None, Some(c)) => (c.phase().to_string(), c.spec.dependencies.clone()),
            (None, None) => (String::new(), Vec::new()),
        };

        Self {
            resource: env.resource_name().to_string(),
            phase,
            dependencies,
            env_vars: env
                .env_vars
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
            steps: env
                .steps
                .ordered()
                .into_iter()
                .map(|s| StepReport {
                    name: s.name().to_string(),
                    phase: s.phase(),
                })
                .collect(),
            executed_traits: env.executed_traits.clone(),
        }
    }
}
