//! Integration and build context resources.
//!
//! Phases serialize to the exact strings used by the resource schema, with
//! the unset phase encoded as an empty string.

use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Lifecycle phase of an [`Integration`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum IntegrationPhase {
    /// Freshly created, the resource spec is still being authored.
    #[default]
    #[serde(rename = "")]
    #[display("")]
    None,
    /// Waiting for its build context to be built.
    Building,
    /// Launch configuration is being computed.
    Deploying,
    Running,
    Error,
}

/// Lifecycle phase of a [`BuildContext`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum BuildContextPhase {
    #[default]
    #[serde(rename = "")]
    #[display("")]
    None,
    /// Sources are being generated, compiled and packaged.
    Building,
    Ready,
    Error,
}

/// Per-resource configuration of a single trait.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraitSpec {
    /// Raw trait properties (e.g. `enabled = "true"`).
    #[serde(default)]
    pub configuration: HashMap<String, String>,
}

impl TraitSpec {
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.configuration.insert(key.into(), value.into());
        self
    }
}

/// A running or deploying integration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Integration {
    pub name: String,
    #[serde(default)]
    pub spec: IntegrationSpec,
    #[serde(default)]
    pub status: IntegrationStatus,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntegrationSpec {
    /// Dependency identifiers. Semantically a set, kept sorted for stable diffs.
    #[serde(default)]
    pub dependencies: Vec<String>,
    /// Trait configuration keyed by trait id.
    #[serde(default)]
    pub traits: HashMap<String, TraitSpec>,
    /// Name of the build context this integration runs on, once known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntegrationStatus {
    #[serde(default)]
    pub phase: IntegrationPhase,
}

impl Integration {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_phase(mut self, phase: IntegrationPhase) -> Self {
        self.status.phase = phase;
        self
    }

    pub fn with_dependencies<I, S>(mut self, dependencies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.spec.dependencies = dependencies.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_trait(mut self, id: impl Into<String>, spec: TraitSpec) -> Self {
        self.spec.traits.insert(id.into(), spec);
        self
    }

    pub fn phase(&self) -> IntegrationPhase {
        self.status.phase
    }
}

/// An immutable build definition shared by integrations with the same dependencies.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildContext {
    pub name: String,
    #[serde(default)]
    pub spec: BuildContextSpec,
    #[serde(default)]
    pub status: BuildContextStatus,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildContextSpec {
    #[serde(default)]
    pub dependencies: Vec<String>,
    #[serde(default)]
    pub traits: HashMap<String, TraitSpec>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildContextStatus {
    #[serde(default)]
    pub phase: BuildContextPhase,
}

impl BuildContext {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_phase(mut self, phase: BuildContextPhase) -> Self {
        self.status.phase = phase;
        self
    }

    pub fn with_dependencies<I, S>(mut self, dependencies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.spec.dependencies = dependencies.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_trait(mut self, id: impl Into<String>, spec: TraitSpec) -> Self {
        self.spec.traits.insert(id.into(), spec);
        self
    }

    pub fn phase(&self) -> BuildContextPhase {
        self.status.phase
    }
}
