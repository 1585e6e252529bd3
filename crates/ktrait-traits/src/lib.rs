//! Trait application model.
//!
//! A trait is a conditionally activated unit of configuration logic. During a
//! reconciliation pass the [`Catalog`] offers an [`Environment`] to every
//! enabled trait, in a fixed order, and each trait whose phase gate matches
//! mutates the environment's dependencies, env vars or build steps.

pub mod catalog;
pub mod environment;
pub mod springboot;

pub use catalog::Catalog;
pub use environment::Environment;
pub use springboot::SpringBootTrait;

use ktrait_core::Result;

/// A self-contained, conditionally activated environment mutator.
pub trait Trait {
    /// Unique trait identifier, also the key of its configuration.
    fn id(&self) -> &str;

    /// Whether the trait may activate itself without explicit opt-in.
    fn is_auto(&self) -> bool;

    /// Whether the trait should run at all.
    fn is_enabled(&self) -> bool;

    /// Phase gate. Must depend only on the resource variant and its phase.
    fn applies_to(&self, env: &Environment) -> bool;

    /// Mutate the environment. Errors abort the remaining traits of the pass.
    fn apply(&self, env: &mut Environment) -> Result<()>;
}
