//! Build step registry and reference builder.
//!
//! Traits register and order [`BuildStep`]s in a [`StepRegistry`]; the
//! [`Builder`] later executes them in phase order against a [`BuildSession`].

pub mod builder;
pub mod registry;
pub mod session;
pub mod springboot;
pub mod step;

pub use builder::{Builder, default_steps};
pub use registry::StepRegistry;
pub use session::{BuildSession, MavenDependency, Project};
pub use step::{BuildStep, StepAction, StepPhase};
