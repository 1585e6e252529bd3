//! Kubernetes rendering of trait environments.
//!
//! Turns the environment produced by a deploy-phase pass into the
//! Deployment that launches the integration.

pub mod kubernetes;

pub use kubernetes::{INTEGRATION_LABEL, KubernetesDeployer, container_env};
