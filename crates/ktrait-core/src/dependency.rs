//! Dependency identifiers and order-stable dependency sets.
//!
//! Dependency lists are stored as plain strings on resources. They behave as
//! sets but are kept in lexicographic order so that reconciling an unchanged
//! resource always serializes to the same bytes.

use regex::Regex;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use crate::{Error, Result};

static MAVEN_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^mvn:([A-Za-z0-9_.\-]+):([A-Za-z0-9_.\-]+)(?::([A-Za-z0-9_.\-]+))?$").unwrap()
});

static NAME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9][a-z0-9\-.]*$").unwrap());

/// Appends `value` to `list` unless an equal entry is already present.
///
/// Returns whether the list changed. The list is not re-sorted, see
/// [`add_unique_sorted`] for the variant every mutation site should use.
pub fn add_unique(list: &mut Vec<String>, value: impl Into<String>) -> bool {
    let value = value.into();
    if list.iter().any(|existing| *existing == value) {
        return false;
    }
    list.push(value);
    true
}

/// Unique insertion followed by a full lexicographic sort of the list.
///
/// Duplicates already present in `list` are collapsed as well, so the result
/// is a strictly increasing list whatever the input.
pub fn add_unique_sorted(list: &mut Vec<String>, value: impl Into<String>) -> bool {
    let added = add_unique(list, value);
    list.sort();
    list.dedup();
    added
}

/// A parsed dependency identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Dependency {
    /// `camel:<component>`
    Camel(String),
    /// `runtime:<name>`
    Runtime(String),
    /// `mvn:<groupId>:<artifactId>[:<version>]`
    Maven {
        group_id: String,
        artifact_id: String,
        version: Option<String>,
    },
}

impl FromStr for Dependency {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        if let Some(caps) = MAVEN_REGEX.captures(s) {
            return Ok(Dependency::Maven {
                group_id: caps[1].to_string(),
                artifact_id: caps[2].to_string(),
                version: caps.get(3).map(|m| m.as_str().to_string()),
            });
        }

        let (scheme, name) = s
            .split_once(':')
            .ok_or_else(|| Error::InvalidDependency(s.to_string()))?;

        if !NAME_REGEX.is_match(name) {
            return Err(Error::InvalidDependency(s.to_string()));
        }

        match scheme {
            "camel" => Ok(Dependency::Camel(name.to_string())),
            "runtime" => Ok(Dependency::Runtime(name.to_string())),
            _ => Err(Error::InvalidDependency(s.to_string())),
        }
    }
}

impl fmt::Display for Dependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dependency::Camel(name) => write!(f, "camel:{}", name),
            Dependency::Runtime(name) => write!(f, "runtime:{}", name),
            Dependency::Maven {
                group_id,
                artifact_id,
                version: Some(version),
            } => write!(f, "mvn:{}:{}:{}", group_id, artifact_id, version),
            Dependency::Maven {
                group_id,
                artifact_id,
                version: None,
            } => write!(f, "mvn:{}:{}", group_id, artifact_id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn list(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_add_unique_appends_missing_value() {
        let mut deps = list(&["b-lib"]);
        assert!(add_unique(&mut deps, "a-lib"));
        assert_eq!(deps, list(&["b-lib", "a-lib"]));
    }

    #[test]
    fn test_add_unique_is_idempotent() {
        let mut once = list(&["x", "y"]);
        add_unique(&mut once, "z");

        let mut twice = once.clone();
        assert!(!add_unique(&mut twice, "z"));
        assert_eq!(once, twice);
    }

    #[test]
    fn test_add_unique_uses_exact_match() {
        let mut deps = list(&["camel:http"]);
        assert!(add_unique(&mut deps, "camel:HTTP"));
        assert_eq!(deps.len(), 2);
    }

    #[test]
    fn test_add_unique_sorted_sorts_whole_list() {
        let mut deps = list(&["zeta", "alpha", "mid"]);
        add_unique_sorted(&mut deps, "beta");
        assert_eq!(deps, list(&["alpha", "beta", "mid", "zeta"]));

        // Already present still leaves the list sorted.
        let mut deps = list(&["c", "a"]);
        assert!(!add_unique_sorted(&mut deps, "a"));
        assert_eq!(deps, list(&["a", "c"]));
    }

    #[test]
    fn test_add_unique_sorted_collapses_existing_duplicates() {
        let mut deps = list(&["b-lib", "camel:log", "b-lib"]);
        assert!(add_unique_sorted(&mut deps, "runtime:spring-boot"));
        assert_eq!(deps, list(&["b-lib", "camel:log", "runtime:spring-boot"]));

        let mut deps = list(&["b-lib", "b-lib"]);
        assert!(!add_unique_sorted(&mut deps, "b-lib"));
        assert_eq!(deps, list(&["b-lib"]));
    }

    // Short identifiers over a small alphabet so generated lists collide often.
    fn identifier() -> impl Strategy<Value = String> {
        prop_oneof![
            "[a-c:]{0,3}",
            any::<String>(),
        ]
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(256))]

        #[test]
        fn test_add_unique_is_idempotent_for_any_list(
            deps in prop::collection::vec(identifier(), 0..12),
            value in identifier(),
        ) {
            let mut once = deps.clone();
            add_unique(&mut once, value.clone());
            let mut twice = once.clone();
            prop_assert!(!add_unique(&mut twice, value.clone()));
            prop_assert_eq!(&once, &twice);
            prop_assert!(once.contains(&value));
        }

        #[test]
        fn test_add_unique_sorted_is_strictly_ordered(
            deps in prop::collection::vec(identifier(), 0..12),
            value in identifier(),
        ) {
            let mut result = deps.clone();
            add_unique_sorted(&mut result, value.clone());

            prop_assert!(result.windows(2).all(|w| w[0] < w[1]), "not a sorted set: {:?}", result);
            prop_assert!(result.contains(&value));
            for dep in &deps {
                prop_assert!(result.contains(dep));
            }

            let mut again = result.clone();
            prop_assert!(!add_unique_sorted(&mut again, value));
            prop_assert_eq!(again, result);
        }
    }

    #[test]
    fn test_parse_dependencies() {
        assert_eq!(
            "camel:http".parse::<Dependency>().unwrap(),
            Dependency::Camel("http".to_string())
        );
        assert_eq!(
            "runtime:spring-boot".parse::<Dependency>().unwrap(),
            Dependency::Runtime("spring-boot".to_string())
        );
        assert_eq!(
            "mvn:org.acme:widgets:1.2.0".parse::<Dependency>().unwrap(),
            Dependency::Maven {
                group_id: "org.acme".to_string(),
                artifact_id: "widgets".to_string(),
                version: Some("1.2.0".to_string()),
            }
        );
        assert!(matches!(
            "mvn:org.acme:widgets".parse::<Dependency>().unwrap(),
            Dependency::Maven { version: None, .. }
        ));
    }

    #[test]
    fn test_parse_invalid_dependency() {
        for bad in ["b-lib", "npm:left-pad", "camel:", "mvn:only-group"] {
            let result = bad.parse::<Dependency>();
            assert!(
                matches!(result, Err(Error::InvalidDependency(_))),
                "expected {} to be rejected",
                bad
            );
        }
    }

    #[test]
    fn test_dependency_display_round_trips_identifier() {
        for id in ["camel:log", "runtime:jvm", "mvn:org.acme:widgets:1.0"] {
            assert_eq!(id.parse::<Dependency>().unwrap().to_string(), id);
        }
    }
}
