//! Reference builder: executes registered steps in phase order.

use ktrait_core::{Dependency, Error, Result, add_unique_sorted};
use tracing::{error, info};

use crate::registry::StepRegistry;
use crate::session::{BuildSession, MavenDependency, Project};
use crate::step::{BuildStep, StepPhase};

pub const PROJECT_GROUP_ID: &str = "org.apache.camel.k.integration";
pub const PROJECT_ARTIFACT_ID: &str = "camel-k-integration";
pub const JVM_MAIN_CLASS: &str = "org.apache.camel.k.jvm.Application";

/// Executes the steps of a registry against a build session.
#[derive(Debug, Clone, Default)]
pub struct Builder;

impl Builder {
    pub fn new() -> Self {
        Self
    }

    /// Run every step in phase order. The first failing step fails the build.
    pub fn run(&self, steps: &StepRegistry, session: &mut BuildSession) -> Result<()> {
        if steps.is_empty() {
            return Err(Error::InvalidInput(format!(
                "no build steps registered for context '{}'",
                session.context_name
            )));
        }

        for step in steps.ordered() {
            info!(step = %step.name(), phase = %step.phase(), context = %session.context_name, "Executing build step");

            if let Err(e) = step.execute(session) {
                error!(step = %step.name(), error = %e, "Build step failed");
                return Err(match e {
                    Error::StepFailed { .. } => e,
                    other => Error::StepFailed {
                        step: step.name().to_string(),
                        reason: other.to_string(),
                    },
                });
            }

            session.executed.push(step.name().to_string());
        }

        info!(context = %session.context_name, steps = session.executed.len(), "Build completed");
        Ok(())
    }
}

/// The platform's standard build steps.
pub fn default_steps() -> StepRegistry {
    StepRegistry::from(vec![
        BuildStep::new(
            "generate/project",
            StepPhase::PROJECT_GENERATION,
            generate_project,
        ),
        BuildStep::new("build/project", StepPhase::PROJECT_BUILD, build_project),
        BuildStep::new(
            "package/application",
            StepPhase::APPLICATION_PACKAGE,
            package_application,
        ),
    ])
}

/// Generates a plain JVM runtime project from the requested dependencies.
pub fn generate_project(session: &mut BuildSession) -> Result<()> {
    let mut project = base_project(session);
    project
        .boms
        .push(MavenDependency::new("org.apache.camel", "camel-bom").with_version(&session.camel_version));

    for id in &session.dependencies {
        let dependency = match id.parse::<Dependency>()? {
            Dependency::Camel(component) => {
                MavenDependency::new("org.apache.camel", camel_artifact(&component))
            }
            Dependency::Runtime(name) => {
                MavenDependency::new("org.apache.camel.k", format!("camel-k-runtime-{}", name))
                    .with_version(&session.runtime_version)
            }
            maven @ Dependency::Maven { .. } => maven_coordinate(maven),
        };
        push_unique(&mut project.dependencies, dependency);
    }

    session.project = Some(project);
    Ok(())
}

/// Resolves the generated project into classpath entries.
pub fn build_project(session: &mut BuildSession) -> Result<()> {
    let project = session
        .project
        .as_ref()
        .ok_or_else(|| Error::InvalidInput("project has not been generated".to_string()))?;

    let mut classpath = Vec::new();
    for dependency in &project.dependencies {
        add_unique_sorted(
            &mut classpath,
            format!("dependencies/{}", dependency.jar_name(&session.camel_version)),
        );
    }

    session.classpath = classpath;
    if session.main_class.is_none() {
        session.main_class = Some(JVM_MAIN_CLASS.to_string());
    }
    Ok(())
}

pub fn package_application(session: &mut BuildSession) -> Result<()> {
    if session.project.is_none() {
        return Err(Error::InvalidInput(
            "cannot package an application without a project".to_string(),
        ));
    }
    session.artifacts = session.classpath.clone();
    Ok(())
}

pub(crate) fn base_project(session: &BuildSession) -> Project {
    Project {
        group_id: PROJECT_GROUP_ID.to_string(),
        artifact_id: PROJECT_ARTIFACT_ID.to_string(),
        version: session.runtime_version.clone(),
        boms: Vec::new(),
        dependencies: Vec::new(),
    }
}

pub(crate) fn camel_artifact(component: &str) -> String {
    if component.starts_with("camel-") {
        component.to_string()
    } else {
        format!("camel-{}", component)
    }
}

pub(crate) fn maven_coordinate(dependency: Dependency) -> MavenDependency {
    match dependency {
        Dependency::Maven {
            group_id,
            artifact_id,
            version,
        } => MavenDependency {
            group_id,
            artifact_id,
            version,
        },
        Dependency::Camel(component) => {
            MavenDependency::new("org.apache.camel", camel_artifact(&component))
        }
        Dependency::Runtime(name) => {
            MavenDependency::new("org.apache.camel.k", format!("camel-k-runtime-{}", name))
        }
    }
}

pub(crate) fn push_unique(list: &mut Vec<MavenDependency>, dependency: MavenDependency) {
    if !list.contains(&dependency) {
        list.push(dependency);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ktrait_core::BuildContext;
    use std::sync::{Arc, Mutex};

    fn make_session(deps: &[&str]) -> BuildSession {
        BuildSession::for_context(
            &BuildContext::new("ctx-test").with_dependencies(deps.iter().copied()),
        )
    }

    #[test]
    fn test_default_build_runs_all_steps() {
        let mut session = make_session(&["camel:log", "runtime:jvm"]);
        Builder::new().run(&default_steps(), &mut session).unwrap();

        assert_eq!(
            session.executed,
            vec!["generate/project", "build/project", "package/application"]
        );
        assert_eq!(session.main_class.as_deref(), Some(JVM_MAIN_CLASS));
        assert_eq!(
            session.classpath,
            vec![
                "dependencies/org.apache.camel.camel-log-2.22.1.jar",
                "dependencies/org.apache.camel.k.camel-k-runtime-jvm-0.0.3.jar",
            ]
        );
        assert_eq!(session.artifacts, session.classpath);
    }

    #[test]
    fn test_steps_execute_in_phase_order() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut registry = StepRegistry::new();
        for (name, phase) in [
            ("package", StepPhase::APPLICATION_PACKAGE),
            ("init", StepPhase::INIT),
            ("after-build", StepPhase::PROJECT_BUILD.after()),
            ("build", StepPhase::PROJECT_BUILD),
        ] {
            let seen = seen.clone();
            registry.append(BuildStep::new(name, phase, move |_| {
                seen.lock().unwrap().push(name);
                Ok(())
            }));
        }

        let mut session = BuildSession::default();
        Builder::new().run(&registry, &mut session).unwrap();

        assert_eq!(
            *seen.lock().unwrap(),
            vec!["init", "build", "after-build", "package"]
        );
    }

    #[test]
    fn test_failing_step_aborts_build() {
        let mut registry = default_steps();
        registry.append(BuildStep::new("init/fail", StepPhase::INIT, |_| {
            Err(Error::Internal("boom".to_string()))
        }));

        let mut session = make_session(&["camel:log"]);
        let err = Builder::new().run(&registry, &mut session).unwrap_err();

        match err {
            Error::StepFailed { step, reason } => {
                assert_eq!(step, "init/fail");
                assert!(reason.contains("boom"));
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(session.executed.is_empty());
        assert!(session.project.is_none());
    }

    #[test]
    fn test_empty_registry_is_rejected() {
        let mut session = BuildSession::default();
        let result = Builder::new().run(&StepRegistry::new(), &mut session);
        assert!(matches!(result, Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_generate_project_rejects_unknown_dependency() {
        let mut session = make_session(&["b-lib"]);
        let result = generate_project(&mut session);
        assert!(matches!(result, Err(Error::InvalidDependency(_))));
    }

    #[test]
    fn test_generate_project_maps_dependencies() {
        let mut session = make_session(&["camel:http", "mvn:org.acme:widgets:1.0", "camel:http"]);
        generate_project(&mut session).unwrap();

        let project = session.project.unwrap();
        assert_eq!(project.group_id, PROJECT_GROUP_ID);
        assert_eq!(project.boms[0].artifact_id, "camel-bom");
        assert_eq!(
            project.dependencies,
            vec![
                MavenDependency::new("org.apache.camel", "camel-http"),
                MavenDependency::new("org.acme", "widgets").with_version("1.0"),
            ]
        );
    }

    #[test]
    fn test_build_requires_generated_project() {
        let mut session = BuildSession::default();
        assert!(build_project(&mut session).is_err());
    }
}
