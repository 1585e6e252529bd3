//! Ordered registry of build steps.

use crate::step::{BuildStep, StepPhase};

/// An ordered collection of build steps.
///
/// Some phases are extensible lists that several traits append to. Others are
/// singleton slots whose occupant a more specific trait replaces wholesale
/// with [`StepRegistry::replace_at_phase`].
#[derive(Debug, Clone, Default)]
pub struct StepRegistry {
    steps: Vec<BuildStep>,
}

impl StepRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `step` to the end of the sequence.
    pub fn append(&mut self, step: BuildStep) {
        self.steps.push(step);
    }

    /// Replaces, in place, the first step registered at `phase`.
    ///
    /// Later steps sharing the phase are left untouched. When nothing occupies
    /// the phase the registry is unchanged and `false` is returned.
    pub fn replace_at_phase(&mut self, phase: StepPhase, step: BuildStep) -> bool {
        match self.steps.iter_mut().find(|s| s.phase() == phase) {
            Some(slot) => {
                *slot = step;
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.steps.iter().any(|s| s.name() == name)
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Steps in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &BuildStep> {
        self.steps.iter()
    }

    pub fn names(&self) -> Vec<&str> {
        self.steps.iter().map(|s| s.name()).collect()
    }

    /// Steps in execution order: by phase ascending, ties kept in registration order.
    pub fn ordered(&self) -> Vec<&BuildStep> {
        let mut ordered: Vec<&BuildStep> = self.steps.iter().collect();
        ordered.sort_by_key(|s| s.phase());
        ordered
    }
}

impl From<Vec<BuildStep>> for StepRegistry {
    fn from(steps: Vec<BuildStep>) -> Self {
        Self { steps }
    }
}

impl FromIterator<BuildStep> for StepRegistry {
    fn from_iter<T: IntoIterator<Item = BuildStep>>(iter: T) -> Self {
        Self {
            steps: iter.into_iter().collect(),
        }
    }
}
