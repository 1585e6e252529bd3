//! Build steps and the step phase scale.

use derive_more::Display;
use ktrait_core::Result;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

use crate::session::BuildSession;

/// Position of a step on the build pipeline's ordering scale.
///
/// Phases are not unique to a step. Several steps may share one, in which
/// case they run in registration order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Display,
)]
#[display("{_0}")]
pub struct StepPhase(i32);

impl StepPhase {
    pub const INIT: StepPhase = StepPhase(0);
    pub const PROJECT_GENERATION: StepPhase = StepPhase(10);
    pub const PROJECT_BUILD: StepPhase = StepPhase(20);
    pub const APPLICATION_PACKAGE: StepPhase = StepPhase(30);
    pub const APPLICATION_PUBLISH: StepPhase = StepPhase(40);

    /// The phase that runs right after `self` and before the next named phase.
    ///
    /// This is a `+1` offset on the ordinal, so it relies on named phases
    /// being spaced more than one apart.
    pub const fn after(self) -> Self {
        Self(self.0 + 1)
    }
}

/// Work performed by a step against the build session.
pub type StepAction = Arc<dyn Fn(&mut BuildSession) -> Result<()> + Send + Sync>;

/// A named, phase-tagged unit of work executed later by the builder.
#[derive(Clone)]
pub struct BuildStep {
    name: String,
    phase: StepPhase,
    action: StepAction,
}

impl BuildStep {
    pub fn new<F>(name: impl Into<String>, phase: StepPhase, action: F) -> Self
    where
        F: Fn(&mut BuildSession) -> Result<()> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            phase,
            action: Arc::new(action),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn phase(&self) -> StepPhase {
        self.phase
    }

    pub fn execute(&self, session: &mut BuildSession) -> Result<()> {
        (self.action)(session)
    }
}

impl fmt::Debug for BuildStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BuildStep")
            .field("name", &self.name)
            .field("phase", &self.phase)
            .finish_non_exhaustive()
    }
}
