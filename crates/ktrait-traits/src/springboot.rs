//! Runs integrations on the Spring Boot runtime.

use ktrait_builder::{BuildStep, StepPhase, springboot};
use ktrait_config::TraitConfig;
use ktrait_core::{BuildContextPhase, IntegrationPhase, Result, add_unique_sorted};
use tracing::debug;

use crate::{Environment, Trait};

pub const RUNTIME_DEPENDENCY: &str = "runtime:spring-boot";

/// The pass stages this trait reacts to. At most one matches an environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    /// Integration with an unset phase: its resource spec is being authored.
    Authoring,
    /// Build context being compiled and packaged.
    Building,
    /// Integration launch configuration.
    Deploying,
}

impl Stage {
    fn of(env: &Environment) -> Option<Self> {
        if env.context_in_phase(BuildContextPhase::Building) {
            Some(Stage::Building)
        } else if env.integration_in_phase(IntegrationPhase::Deploying) {
            Some(Stage::Deploying)
        } else if env.integration_in_phase(IntegrationPhase::None) {
            Some(Stage::Authoring)
        } else {
            None
        }
    }
}

/// Swaps the plain JVM runtime for Spring Boot. Opt-in only.
#[derive(Debug, Clone, Default)]
pub struct SpringBootTrait {
    config: TraitConfig,
}

impl SpringBootTrait {
    pub const ID: &'static str = "springboot";

    pub fn new(config: TraitConfig) -> Self {
        Self { config }
    }
}

impl Trait for SpringBootTrait {
    fn id(&self) -> &str {
        Self::ID
    }

    fn is_auto(&self) -> bool {
        false
    }

    fn is_enabled(&self) -> bool {
        self.config.enabled.unwrap_or(false)
    }

    fn applies_to(&self, env: &Environment) -> bool {
        Stage::of(env).is_some()
    }

    fn apply(&self, env: &mut Environment) -> Result<()> {
        let Some(stage) = Stage::of(env) else {
            return Ok(());
        };
        debug!(trait_id = Self::ID, ?stage, resource = %env.resource_name(), "Applying trait");

        match stage {
            Stage::Authoring => {
                if let Some(integration) = env.integration.as_mut() {
                    add_unique_sorted(&mut integration.spec.dependencies, RUNTIME_DEPENDENCY);
                }
            }
            Stage::Deploying => {
                env.env_vars.insert(
                    "JAVA_MAIN_CLASS".to_string(),
                    springboot::LAUNCHER_MAIN_CLASS.to_string(),
                );
                env.env_vars
                    .insert("LOADER_PATH".to_string(), springboot::LOADER_PATH.to_string());
            }
            Stage::Building => {
                let extra = [
                    BuildStep::new(
                        "initialize/spring-boot",
                        StepPhase::INIT,
                        springboot::initialize,
                    ),
                    BuildStep::new(
                        "build/compute-boot-dependencies",
                        StepPhase::PROJECT_BUILD.after(),
                        springboot::compute_dependencies,
                    ),
                ];
                for step in extra {
                    if !env.steps.contains(step.name()) {
                        env.steps.append(step);
                    }
                }

                let replaced = env.steps.replace_at_phase(
                    StepPhase::PROJECT_GENERATION,
                    BuildStep::new(
                        "generate/spring-boot",
                        StepPhase::PROJECT_GENERATION,
                        springboot::generate_project,
                    ),
                );
                if !replaced {
                    debug!(trait_id = Self::ID, "No project generation step to replace");
                }
            }
        }

        Ok(())
    }
}
