//! Kubernetes Deployment rendering.

use k8s_openapi::api::apps::v1::{Deployment, DeploymentSpec};
use k8s_openapi::api::core::v1::{Container, EnvVar, PodSpec, PodTemplateSpec};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::{LabelSelector, ObjectMeta};
use ktrait_core::{Error, IntegrationPhase, Result};
use ktrait_traits::Environment;
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

pub const INTEGRATION_LABEL: &str = "camel.apache.org/integration";

/// Renders env vars sorted by name so unchanged input yields identical manifests.
pub fn container_env(env_vars: &HashMap<String, String>) -> Vec<EnvVar> {
    let sorted: BTreeMap<&String, &String> = env_vars.iter().collect();
    sorted
        .into_iter()
        .map(|(name, value)| EnvVar {
            name: name.clone(),
            value: Some(value.clone()),
            value_from: None,
        })
        .collect()
}

/// Renders integrations as Kubernetes Deployments.
#[derive(Debug, Clone)]
pub struct KubernetesDeployer {
    namespace: String,
}

impl KubernetesDeployer {
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
        }
    }

    /// Build the Deployment for the integration of a deploy-phase environment.
    pub fn deployment(&self, env: &Environment, image: &str) -> Result<Deployment> {
        let integration = env.integration.as_ref().ok_or_else(|| {
            Error::InvalidInput("deployment requires an integration".to_string())
        })?;

        if integration.phase() != IntegrationPhase::Deploying {
            return Err(Error::InvalidInput(format!(
                "integration '{}' is in phase '{}', not Deploying",
                integration.name,
                integration.phase()
            )));
        }

        let labels: BTreeMap<String, String> =
            [(INTEGRATION_LABEL.to_string(), integration.name.clone())]
                .into_iter()
                .collect();

        let container = Container {
            name: integration.name.clone(),
            image: Some(image.to_string()),
            env: Some(container_env(&env.env_vars)),
            ..Container::default()
        };

        debug!(integration = %integration.name, namespace = %self.namespace, env = env.env_vars.len(), "Rendering deployment");

        Ok(Deployment {
            metadata: ObjectMeta {
                name: Some(integration.name.clone()),
                namespace: Some(self.namespace.clone()),
                labels: Some(labels.clone()),
                ..ObjectMeta::default()
            },
            spec: Some(DeploymentSpec {
                replicas: Some(1),
                selector: LabelSelector {
                    match_labels: Some(labels.clone()),
                    ..LabelSelector::default()
                },
                template: PodTemplateSpec {
                    metadata: Some(ObjectMeta {
                        labels: Some(labels),
                        ..ObjectMeta::default()
                    }),
                    spec: Some(PodSpec {
                        containers: vec![container],
                        ..PodSpec::default()
                    }),
                },
                ..DeploymentSpec::default()
            }),
            ..Deployment::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ktrait_core::Integration;

    fn deploying_env() -> Environment {
        Environment::for_integration(
            Integration::new("hello").with_phase(IntegrationPhase::Deploying),
        )
        .with_env_var("LOADER_PATH", "/deployments/dependencies/")
        .with_env_var(
            "JAVA_MAIN_CLASS",
            "org.springframework.boot.loader.PropertiesLauncher",
        )
    }

    #[test]
    fn test_container_env_is_sorted() {
        let env = deploying_env();
        let vars = container_env(&env.env_vars);

        let names: Vec<&str> = vars.iter().map(|v| v.name.as_str()).collect();
        assert_eq!(names, vec!["JAVA_MAIN_CLASS", "LOADER_PATH"]);
        assert_eq!(vars[1].value.as_deref(), Some("/deployments/dependencies/"));
    }

    #[test]
    fn test_deployment_carries_env_and_labels() {
        let deployer = KubernetesDeployer::new("camel");
        let deployment = deployer
            .deployment(&deploying_env(), "registry/hello:1")
            .unwrap();

        assert_eq!(deployment.metadata.name.as_deref(), Some("hello"));
        assert_eq!(deployment.metadata.namespace.as_deref(), Some("camel"));

        let spec = deployment.spec.unwrap();
        let pod = spec.template.spec.unwrap();
        assert_eq!(pod.containers.len(), 1);
        assert_eq!(pod.containers[0].image.as_deref(), Some("registry/hello:1"));
        assert_eq!(pod.containers[0].env.as_ref().unwrap().len(), 2);
        assert_eq!(
            spec.selector.match_labels.unwrap()[INTEGRATION_LABEL],
            "hello"
        );
    }

    #[test]
    fn test_rendering_is_deterministic() {
        let deployer = KubernetesDeployer::new("camel");
        let a = deployer.deployment(&deploying_env(), "img").unwrap();
        let b = deployer.deployment(&deploying_env(), "img").unwrap();
        assert_eq!(
            serde_json::to_string(&a).unwrap(),
            serde_json::to_string(&b).unwrap()
        );
    }

    #[test]
    fn test_deployment_requires_deploying_phase() {
        let deployer = KubernetesDeployer::new("camel");
        let env = Environment::for_integration(Integration::new("hello"));
        assert!(deployer.deployment(&env, "img").is_err());
        assert!(deployer.deployment(&Environment::default(), "img").is_err());
    }
}
