//! Core resource model for the ktrait platform.
//!
//! This crate contains:
//! - Integration and build context resources with their lifecycle phases
//! - Dependency identifiers and the order-stable dependency set helpers
//! - The crate-wide error type

pub mod dependency;
pub mod error;
pub mod resource;

pub use dependency::{Dependency, add_unique, add_unique_sorted};
pub use error::{Error, Result};
pub use resource::{
    BuildContext, BuildContextPhase, BuildContextSpec, BuildContextStatus, Integration,
    IntegrationPhase, IntegrationSpec, IntegrationStatus, TraitSpec,
};
