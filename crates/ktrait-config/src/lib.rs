//! KDL configuration for ktrait.
//!
//! This crate handles:
//! - Operator-level trait enablement (traits.kdl)
//! - Per-resource trait configuration overlays

pub mod error;
pub mod traits;

pub use error::{ConfigError, ConfigResult};
pub use traits::{TraitConfig, TraitsConfig, load_traits_config, parse_traits_config};
