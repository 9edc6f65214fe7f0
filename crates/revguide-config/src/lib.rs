//! Rule-set configuration for revguide
//!
//! This crate provides:
//! - The validated rule-set data model (`RuleSet`, `Rule`, sampling strategies)
//! - YAML loading and invariant validation (`Loader`)
//! - Configuration file discovery (CWD and parent directories)

pub mod config_file;
pub mod loader;
pub mod rule_set;

pub use config_file::{find_config_file, CONFIG_FILE_NAMES};
pub use loader::{ConfigError, Loader};
pub use rule_set::{ContentDefaults, Rule, RuleSet, Sampling, Strategy};
