//! The per-pass context shared by all traits.

use ktrait_builder::StepRegistry;
use ktrait_core::{BuildContext, BuildContextPhase, Integration, IntegrationPhase};
use std::collections::HashMap;

/// Mutable context of one reconciliation pass.
///
/// Rebuilt for every pass. Only changes written back into the resources
/// outlive it; a pass that failed must not be reused.
#[derive(Debug, Clone, Default)]
pub struct Environment {
    pub integration: Option<Integration>,
    pub context: Option<BuildContext>,
    /// Environment variables of the launched integration.
    pub env_vars: HashMap<String, String>,
    /// Build steps, consumed later by the builder.
    pub steps: StepRegistry,
    /// Ids of the traits applied during this pass.
    pub executed_traits: Vec<String>,
}

impl Environment {
    pub fn for_integration(integration: Integration) -> Self {
        Self {
            integration: Some(integration),
            ..Self::default()
        }
    }

    pub fn for_context(context: BuildContext) -> Self {
        Self {
            context: Some(context),
            ..Self::default()
        }
    }

    pub fn with_steps(mut self, steps: StepRegistry) -> Self {
        self.steps = steps;
        self
    }

    pub fn with_env_var(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.env_vars.insert(name.into(), value.into());
        self
    }

    pub fn integration_in_phase(&self, phase: IntegrationPhase) -> bool {
        self.integration
            .as_ref()
            .is_some_and(|i| i.phase() == phase)
    }

    pub fn context_in_phase(&self, phase: BuildContextPhase) -> bool {
        self.context.as_ref().is_some_and(|c| c.phase() == phase)
    }

    /// Name of the resource this pass works on, for logging.
    pub fn resource_name(&self) -> &str {
        self.integration
            .as_ref()
            .map(|i| i.name.as_str())
            .or_else(|| self.context.as_ref().map(|c| c.name.as_str()))
            .unwrap_or("")
    }

    pub(crate) fn record_executed(&mut self, trait_id: &str) {
        if !self.executed_traits.iter().any(|id| id == trait_id) {
            self.executed_traits.push(trait_id.to_string());
        }
    }
}
