//! Ordered trait catalog and the per-pass application loop.

use ktrait_config::TraitsConfig;
use ktrait_core::Result;
use tracing::{debug, error, info};

use crate::springboot::SpringBootTrait;
use crate::{Environment, Trait};

/// The traits offered to every reconciliation pass, in application order.
pub struct Catalog {
    traits: Vec<Box<dyn Trait>>,
}

impl Catalog {
    /// Build the standard traits from explicit configuration.
    pub fn new(config: &TraitsConfig) -> Self {
        let springboot: Box<dyn Trait> =
            Box::new(SpringBootTrait::new(config.get(SpringBootTrait::ID)));
        Self {
            traits: vec![springboot],
        }
    }

    /// Build the standard traits for the resource held by `env`.
    ///
    /// The resource's own trait configuration wins over `config`.
    pub fn for_environment(config: &TraitsConfig, env: &Environment) -> Result<Self> {
        let resource_traits = env
            .integration
            .as_ref()
            .map(|i| &i.spec.traits)
            .or_else(|| env.context.as_ref().map(|c| &c.spec.traits));

        let merged = match resource_traits {
            Some(traits) => config.merge_resource(traits)?,
            None => config.clone(),
        };
        Ok(Self::new(&merged))
    }

    pub fn with_traits(traits: Vec<Box<dyn Trait>>) -> Self {
        Self { traits }
    }

    pub fn ids(&self) -> Vec<&str> {
        self.traits.iter().map(|t| t.id()).collect()
    }

    pub fn get(&self, id: &str) -> Option<&dyn Trait> {
        self.traits.iter().find(|t| t.id() == id).map(|t| &**t)
    }

    /// Apply every enabled trait whose phase gate matches, in catalog order.
    ///
    /// The first failing trait aborts the pass. Mutations made before the
    /// failure stay in `env`, which the caller must then discard.
    pub fn apply(&self, env: &mut Environment) -> Result<()> {
        for t in &self.traits {
            if !t.is_enabled() {
                debug!(trait_id = %t.id(), auto = t.is_auto(), "Trait disabled, skipping");
                continue;
            }
            if !t.applies_to(env) {
                debug!(trait_id = %t.id(), "Trait does not apply to current phase");
                continue;
            }

            if let Err(e) = t.apply(env) {
                error!(trait_id = %t.id(), resource = %env.resource_name(), error = %e, "Trait failed");
                return Err(e);
            }

            info!(trait_id = %t.id(), resource = %env.resource_name(), "Trait applied");
            env.record_executed(t.id());
        }
        Ok(())
    }
}

impl std::fmt::Debug for Catalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Catalog")
            .field("traits", &self.ids())
            .finish()
    }
}
