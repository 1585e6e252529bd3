//! CLI command implementations.

pub mod report;

use anyhow::{Context, Result, bail};
use ktrait_builder::{BuildSession, Builder, default_steps};
use ktrait_config::{TraitsConfig, load_traits_config, parse_traits_config};
use ktrait_core::{BuildContext, BuildContextPhase, Integration};
use ktrait_deployer::KubernetesDeployer;
use ktrait_traits::{Catalog, Environment};
use serde::de::DeserializeOwned;
use tracing::info;

use crate::ResourceKind;
use report::EnvironmentReport;

pub fn load_config(path: Option<&str>) -> Result<TraitsConfig> {
    match path {
        Some(path) => load_traits_config(path)
            .with_context(|| format!("failed to load trait configuration from {}", path)),
        None => Ok(TraitsConfig::new()),
    }
}

fn read_resource<T: DeserializeOwned>(path: &str) -> Result<T> {
    let content =
        std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path))?;
    serde_json::from_str(&content).with_context(|| format!("invalid resource in {}", path))
}

/// Run the catalog over `env`, configured for the resource it holds.
fn run_pass(config: &TraitsConfig, env: &mut Environment) -> Result<()> {
    let catalog = Catalog::for_environment(config, env)?;
    catalog.apply(env)?;
    info!(resource = %env.resource_name(), traits = ?env.executed_traits, "Trait pass completed");
    Ok(())
}

pub fn apply(config: &TraitsConfig, path: &str, kind: ResourceKind) -> Result<()> {
    let mut env = match kind {
        ResourceKind::Integration => Environment::for_integration(read_resource(path)?),
        ResourceKind::Context => {
            Environment::for_context(read_resource(path)?).with_steps(default_steps())
        }
    };

    run_pass(config, &mut env)?;

    let report = EnvironmentReport::from_environment(&env);
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

pub fn build(config: &TraitsConfig, path: &str) -> Result<()> {
    let context: BuildContext = read_resource(path)?;
    if context.phase() != BuildContextPhase::Building {
        bail!(
            "context '{}' is in phase '{}', expected Building",
            context.name,
            context.phase()
        );
    }

    let mut session = BuildSession::for_context(&context);
    let mut env = Environment::for_context(context).with_steps(default_steps());
    run_pass(config, &mut env)?;

    Builder::new().run(&env.steps, &mut session)?;
    println!("{}", serde_json::to_string_pretty(&session)?);
    Ok(())
}

pub fn deploy(config: &TraitsConfig, path: &str, image: &str, namespace: &str) -> Result<()> {
    let integration: Integration = read_resource(path)?;
    let mut env = Environment::for_integration(integration);
    run_pass(config, &mut env)?;

    let deployment = KubernetesDeployer::new(namespace).deployment(&env, image)?;
    println!("{}", serde_json::to_string_pretty(&deployment)?);
    Ok(())
}

pub fn validate(path: &str) -> Result<()> {
    let content = std::fs::read_to_string(path)?;
    match parse_traits_config(&content) {
        Ok(config) => {
            println!("Configuration is valid ({} traits)", config.len());
            Ok(())
        }
        Err(e) => {
            println!("Configuration error: {}", e);
            std::process::exit(1);
        }
    }
}
