//! Working state shared by the steps of a single build.

use ktrait_core::BuildContext;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const DEFAULT_CAMEL_VERSION: &str = "2.22.1";
pub const DEFAULT_RUNTIME_VERSION: &str = "0.0.3";

/// A Maven coordinate in the generated project.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MavenDependency {
    pub group_id: String,
    pub artifact_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

impl MavenDependency {
    pub fn new(group_id: impl Into<String>, artifact_id: impl Into<String>) -> Self {
        Self {
            group_id: group_id.into(),
            artifact_id: artifact_id.into(),
            version: None,
        }
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Jar file name as laid out in the dependencies directory.
    pub fn jar_name(&self, default_version: &str) -> String {
        format!(
            "{}.{}-{}.jar",
            self.group_id,
            self.artifact_id,
            self.version.as_deref().unwrap_or(default_version)
        )
    }
}

impl fmt::Display for MavenDependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.version {
            Some(v) => write!(f, "{}:{}:{}", self.group_id, self.artifact_id, v),
            None => write!(f, "{}:{}", self.group_id, self.artifact_id),
        }
    }
}

/// The generated build project.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub group_id: String,
    pub artifact_id: String,
    pub version: String,
    /// Imported bills of materials.
    pub boms: Vec<MavenDependency>,
    pub dependencies: Vec<MavenDependency>,
}

/// State carried from step to step while a build context is built.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildSession {
    pub context_name: String,
    /// Requested dependency identifiers, copied from the build context.
    pub dependencies: Vec<String>,
    pub camel_version: String,
    pub runtime_version: String,
    pub spring_boot: bool,
    pub project: Option<Project>,
    /// Classpath entries of the packaged application, sorted.
    pub classpath: Vec<String>,
    pub main_class: Option<String>,
    /// Files making up the packaged application.
    pub artifacts: Vec<String>,
    /// Names of executed steps, in execution order.
    pub executed: Vec<String>,
}

impl Default for BuildSession {
    fn default() -> Self {
        Self {
            context_name: String::new(),
            dependencies: Vec::new(),
            camel_version: DEFAULT_CAMEL_VERSION.to_string(),
            runtime_version: DEFAULT_RUNTIME_VERSION.to_string(),
            spring_boot: false,
            project: None,
            classpath: Vec::new(),
            main_class: None,
            artifacts: Vec::new(),
            executed: Vec::new(),
        }
    }
}

impl BuildSession {
    pub fn for_context(context: &BuildContext) -> Self {
        Self {
            context_name: context.name.clone(),
            dependencies: context.spec.dependencies.clone(),
            ..Self::default()
        }
    }
}
