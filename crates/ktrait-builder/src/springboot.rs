//! Build steps for integrations running on the Spring Boot runtime.

use ktrait_core::{Dependency, Error, Result, add_unique_sorted};

use crate::builder::{base_project, camel_artifact, maven_coordinate, push_unique};
use crate::session::{BuildSession, MavenDependency};

pub const SPRING_BOOT_VERSION: &str = "2.0.3.RELEASE";
pub const LAUNCHER_MAIN_CLASS: &str = "org.springframework.boot.loader.PropertiesLauncher";
/// Directory the launcher loads the application classpath from.
pub const LOADER_PATH: &str = "/deployments/dependencies/";

/// Marks the session as a Spring Boot build.
pub fn initialize(session: &mut BuildSession) -> Result<()> {
    session.spring_boot = true;
    session.main_class = Some(LAUNCHER_MAIN_CLASS.to_string());
    Ok(())
}

/// Generates a project using Camel starters and the Spring Boot runtime.
pub fn generate_project(session: &mut BuildSession) -> Result<()> {
    let mut project = base_project(session);
    project.boms.push(
        MavenDependency::new("org.springframework.boot", "spring-boot-dependencies")
            .with_version(SPRING_BOOT_VERSION),
    );
    project.boms.push(
        MavenDependency::new("org.apache.camel", "camel-spring-boot-dependencies")
            .with_version(&session.camel_version),
    );

    for id in &session.dependencies {
        let dependency = match id.parse::<Dependency>()? {
            Dependency::Camel(component) => MavenDependency::new(
                "org.apache.camel",
                format!("{}-starter", camel_artifact(&component)),
            ),
            // The Spring Boot runtime replaces the plain JVM one.
            Dependency::Runtime(name) if name == "jvm" => continue,
            Dependency::Runtime(name) => {
                MavenDependency::new("org.apache.camel.k", format!("camel-k-runtime-{}", name))
                    .with_version(&session.runtime_version)
            }
            other => maven_coordinate(other),
        };
        push_unique(&mut project.dependencies, dependency);
    }

    push_unique(
        &mut project.dependencies,
        MavenDependency::new("org.apache.camel.k", "camel-k-runtime-spring-boot")
            .with_version(&session.runtime_version),
    );

    session.project = Some(project);
    Ok(())
}

/// Lays the project dependencies out under the launcher's loader path.
pub fn compute_dependencies(session: &mut BuildSession) -> Result<()> {
    let project = session.project.as_ref().ok_or_else(|| {
        Error::InvalidInput("spring boot dependencies need a generated project".to_string())
    })?;

    let mut classpath = Vec::new();
    for dependency in &project.dependencies {
        add_unique_sorted(
            &mut classpath,
            format!(
                "{}{}",
                LOADER_PATH,
                dependency.jar_name(&session.camel_version)
            ),
        );
    }
    session.classpath = classpath;
    Ok(())
}
