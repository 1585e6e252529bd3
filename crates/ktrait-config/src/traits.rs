//! Trait enablement configuration.
//!
//! Operators enable traits in a KDL document:
//!
//! ```kdl
//! trait "springboot" enabled=#true
//! trait "debug" {
//!     enabled #false
//! }
//! ```
//!
//! Resources may override the operator defaults through their `traits` map,
//! where values are strings (e.g. `enabled = "true"`).

use crate::{ConfigError, ConfigResult};
use kdl::{KdlDocument, KdlNode};
use ktrait_core::TraitSpec;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Explicit configuration of one trait. Unset fields fall back to the trait's own default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraitConfig {
    pub enabled: Option<bool>,
}

impl TraitConfig {
    pub fn enabled(enabled: bool) -> Self {
        Self {
            enabled: Some(enabled),
        }
    }

    /// Read the properties of a resource-level trait spec.
    pub fn from_spec(trait_id: &str, spec: &TraitSpec) -> ConfigResult<Self> {
        let enabled = match spec.configuration.get("enabled") {
            Some(raw) => Some(parse_bool(raw).ok_or_else(|| ConfigError::InvalidValue {
                field: format!("{}.enabled", trait_id),
                message: format!("expected a boolean, got '{}'", raw),
            })?),
            None => None,
        };
        Ok(Self { enabled })
    }

    /// Fields set in `other` win over the ones in `self`.
    pub fn overlay(self, other: TraitConfig) -> Self {
        Self {
            enabled: other.enabled.or(self.enabled),
        }
    }
}

/// Configuration of all traits, keyed by trait id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraitsConfig {
    traits: HashMap<String, TraitConfig>,
}

impl TraitsConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, trait_id: impl Into<String>, config: TraitConfig) -> Self {
        self.traits.insert(trait_id.into(), config);
        self
    }

    /// Configuration for `trait_id`, empty when the trait is not mentioned.
    pub fn get(&self, trait_id: &str) -> TraitConfig {
        self.traits.get(trait_id).copied().unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.traits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.traits.is_empty()
    }

    /// Overlay the trait map of a resource on top of this configuration.
    pub fn merge_resource(&self, traits: &HashMap<String, TraitSpec>) -> ConfigResult<Self> {
        let mut merged = self.clone();
        for (id, spec) in traits {
            let resource = TraitConfig::from_spec(id, spec)?;
            let base = merged.get(id);
            merged.traits.insert(id.clone(), base.overlay(resource));
        }
        Ok(merged)
    }
}

/// Parse operator trait configuration from KDL text.
pub fn parse_traits_config(kdl: &str) -> ConfigResult<TraitsConfig> {
    let doc: KdlDocument = kdl.parse()?;
    let mut config = TraitsConfig::new();

    for node in doc.nodes() {
        if node.name().value() != "trait" {
            continue;
        }

        let id = get_first_string_arg(node)
            .ok_or_else(|| ConfigError::MissingField("trait name".to_string()))?;

        if config.traits.contains_key(&id) {
            return Err(ConfigError::Duplicate(format!("trait '{}'", id)));
        }

        let enabled = get_bool_setting(node, "enabled").map_err(|message| {
            ConfigError::InvalidValue {
                field: format!("{}.enabled", id),
                message,
            }
        })?;

        config.traits.insert(id, TraitConfig { enabled });
    }

    Ok(config)
}

/// Read and parse a trait configuration file.
pub fn load_traits_config(path: impl AsRef<Path>) -> ConfigResult<TraitsConfig> {
    let content = std::fs::read_to_string(path)?;
    parse_traits_config(&content)
}

/// Accepts the boolean spellings resources commonly use.
fn parse_bool(raw: &str) -> Option<bool> {
    match raw {
        "1" | "t" | "T" | "true" | "TRUE" | "True" => Some(true),
        "0" | "f" | "F" | "false" | "FALSE" | "False" => Some(false),
        _ => None,
    }
}

// Helper functions for extracting values from KDL nodes

fn get_first_string_arg(node: &KdlNode) -> Option<String> {
    node.entries()
        .iter()
        .find(|e| e.name().is_none())
        .and_then(|e| e.value().as_string())
        .map(|s| s.to_string())
}

/// A boolean given either as a property (`enabled=#true`) or a child node (`enabled #true`).
fn get_bool_setting(node: &KdlNode, name: &str) -> Result<Option<bool>, String> {
    let value = match node.get(name) {
        Some(value) => value,
        None => {
            let child = node
                .children()
                .and_then(|c| c.nodes().iter().find(|n| n.name().value() == name));
            match child.and_then(|c| c.entries().iter().find(|e| e.name().is_none())) {
                Some(entry) => entry.value(),
                None => return Ok(None),
            }
        }
    };

    value
        .as_bool()
        .map(Some)
        .ok_or_else(|| format!("expected a boolean, got {}", value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_inline_and_block_syntax() {
        let kdl = r#"
            trait "springboot" enabled=#true

            trait "debug" {
                enabled #false
            }

            trait "logging"
        "#;

        let config = parse_traits_config(kdl).unwrap();
        assert_eq!(config.len(), 3);
        assert_eq!(config.get("springboot").enabled, Some(true));
        assert_eq!(config.get("debug").enabled, Some(false));
        assert_eq!(config.get("logging").enabled, None);
        assert_eq!(config.get("unknown"), TraitConfig::default());
    }

    #[test]
    fn test_unknown_nodes_are_ignored() {
        let kdl = r#"
            platform "kubernetes"
            trait "springboot" enabled=#true
        "#;
        let config = parse_traits_config(kdl).unwrap();
        assert_eq!(config.len(), 1);
    }

    #[test]
    fn test_duplicate_trait_is_rejected() {
        let kdl = r#"
            trait "springboot" enabled=#true
            trait "springboot" enabled=#false
        "#;
        let result = parse_traits_config(kdl);
        assert!(matches!(result.unwrap_err(), ConfigError::Duplicate(_)));
    }

    #[test]
    fn test_non_boolean_property_value() {
        let result = parse_traits_config(r#"trait "springboot" enabled="yes""#);
        assert!(matches!(
            result.unwrap_err(),
            ConfigError::InvalidValue { .. }
        ));
    }

    #[test]
    fn test_missing_trait_name() {
        let result = parse_traits_config("trait enabled=#true");
        assert!(matches!(result.unwrap_err(), ConfigError::MissingField(_)));
    }

    #[test]
    fn test_non_boolean_block_value() {
        let kdl = r#"
            trait "springboot" {
                enabled "yes"
            }
        "#;
        let result = parse_traits_config(kdl);
        assert!(matches!(
            result.unwrap_err(),
            ConfigError::InvalidValue { .. }
        ));
    }

    #[test]
    fn test_resource_overrides_operator_config() {
        let base = TraitsConfig::new()
            .with("springboot", TraitConfig::enabled(false))
            .with("debug", TraitConfig::enabled(true));

        let mut traits = HashMap::new();
        traits.insert(
            "springboot".to_string(),
            TraitSpec::default().with_property("enabled", "true"),
        );
        traits.insert("debug".to_string(), TraitSpec::default());

        let merged = base.merge_resource(&traits).unwrap();
        assert_eq!(merged.get("springboot").enabled, Some(true));
        // An empty resource spec keeps the operator value.
        assert_eq!(merged.get("debug").enabled, Some(true));
    }

    #[test]
    fn test_resource_invalid_boolean() {
        let mut traits = HashMap::new();
        traits.insert(
            "springboot".to_string(),
            TraitSpec::default().with_property("enabled", "sure"),
        );

        let result = TraitsConfig::new().merge_resource(&traits);
        match result.unwrap_err() {
            ConfigError::InvalidValue { field, .. } => assert_eq!(field, "springboot.enabled"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_parse_bool_spellings() {
        assert_eq!(parse_bool("True"), Some(true));
        assert_eq!(parse_bool("0"), Some(false));
        assert_eq!(parse_bool("yes"), None);
    }
}
