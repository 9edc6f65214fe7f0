//! YAML configuration loading and invariant validation.
//!
//! The on-disk schema keeps the original field names (`patterns`,
//! `content_strategy`, `content_lines`); validation converts that raw shape
//! into the typed [`RuleSet`] model so the rest of the system never sees an
//! untyped `content_lines` list.

use crate::config_file::CONFIG_FILE_NAMES;
use crate::rule_set::{ContentDefaults, Rule, RuleSet, Sampling, Strategy};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("failed to read config file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    #[error("invalid configuration: {0}")]
    Validation(String),
}

/// Raw on-disk shape of the configuration file.
#[derive(Debug, Default, Deserialize)]
struct RuleSetFile {
    #[serde(default)]
    content_defaults: ContentDefaultsFile,
    #[serde(default)]
    patterns: Vec<RuleFile>,
}

#[derive(Debug, Deserialize)]
struct ContentDefaultsFile {
    #[serde(default = "default_strategy")]
    strategy: String,
    #[serde(default = "default_lines")]
    lines: usize,
}

fn default_strategy() -> String {
    Strategy::FirstLines.as_str().to_string()
}

fn default_lines() -> usize {
    ContentDefaults::default().lines
}

impl Default for ContentDefaultsFile {
    fn default() -> Self {
        Self {
            strategy: default_strategy(),
            lines: default_lines(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RuleFile {
    #[serde(default)]
    name: String,
    #[serde(default)]
    filename: Option<String>,
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    content_strategy: Option<String>,
    #[serde(default)]
    content_lines: Vec<usize>,
    #[serde(default)]
    context: Vec<String>,
    #[serde(default)]
    diff_context: Vec<String>,
    #[serde(default)]
    stop: bool,
}

/// Loads rule-set configuration from YAML files or strings.
pub struct Loader;

impl Loader {
    pub fn new() -> Self {
        Self
    }

    /// Load configuration from the first default location that parses and
    /// validates, falling back to [`RuleSet::default`] when none is found.
    pub fn load(&self) -> Result<RuleSet, ConfigError> {
        for name in CONFIG_FILE_NAMES {
            if let Ok(rules) = self.load_file(Path::new(name)) {
                log::info!("loaded config from {name}");
                return Ok(rules);
            }
        }

        log::debug!("no config file found, using defaults");
        Ok(RuleSet::default())
    }

    /// Load and validate configuration from a specific file path.
    pub fn load_file(&self, path: &Path) -> Result<RuleSet, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }

        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        self.load_from_str(&text)
    }

    /// Load and validate configuration supplied as a YAML string.
    ///
    /// Useful in CI, where the config may arrive as an environment value
    /// rather than a file.
    pub fn load_from_str(&self, yaml: &str) -> Result<RuleSet, ConfigError> {
        let raw: RuleSetFile = serde_yaml_ng::from_str(yaml)?;
        validate(raw)
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Check every load-time invariant and build the typed model.
fn validate(raw: RuleSetFile) -> Result<RuleSet, ConfigError> {
    let strategy = Strategy::parse(&raw.content_defaults.strategy).ok_or_else(|| {
        ConfigError::Validation(format!(
            "invalid default strategy: {}",
            raw.content_defaults.strategy
        ))
    })?;

    let content_defaults = ContentDefaults {
        strategy,
        lines: raw.content_defaults.lines,
    };

    let mut rules = Vec::with_capacity(raw.patterns.len());
    for (i, rule) in raw.patterns.into_iter().enumerate() {
        rules.push(validate_rule(rule, i)?);
    }

    Ok(RuleSet {
        content_defaults,
        rules,
    })
}

fn validate_rule(raw: RuleFile, index: usize) -> Result<Rule, ConfigError> {
    if raw.name.is_empty() {
        return Err(ConfigError::Validation(format!(
            "rule {index}: name is required"
        )));
    }

    let filename = raw.filename.filter(|p| !p.is_empty());
    let content = raw.content.filter(|p| !p.is_empty());

    if filename.is_none() && content.is_none() {
        return Err(ConfigError::Validation(format!(
            "rule {}: must have either a filename or a content regex",
            raw.name
        )));
    }

    if raw.context.is_empty() && raw.diff_context.is_empty() {
        return Err(ConfigError::Validation(format!(
            "rule {}: must have at least one context or diff_context guide",
            raw.name
        )));
    }

    let sampling = match raw.content_strategy.as_deref() {
        None | Some("") => None,
        Some(name) => {
            let strategy = Strategy::parse(name).ok_or_else(|| {
                ConfigError::Validation(format!(
                    "rule {}: invalid content strategy: {name}",
                    raw.name
                ))
            })?;
            Some(match strategy {
                Strategy::FirstLines => Sampling::FirstLines {
                    lines: raw.content_lines.first().copied(),
                },
                Strategy::FullFile => Sampling::FullFile,
                Strategy::Smart => {
                    if raw.content_lines.len() != 3 {
                        return Err(ConfigError::Validation(format!(
                            "rule {}: smart strategy requires exactly 3 values for content_lines",
                            raw.name
                        )));
                    }
                    Sampling::Smart {
                        first: raw.content_lines[0],
                        last: raw.content_lines[1],
                        random: raw.content_lines[2],
                    }
                }
            })
        }
    };

    Ok(Rule {
        name: raw.name,
        filename,
        content,
        sampling,
        context: raw.context,
        diff_context: raw.diff_context,
        stop: raw.stop,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const VALID_CONFIG: &str = r#"
content_defaults:
  strategy: first_lines
  lines: 50

patterns:
  - name: test-files
    filename: "_test\\.go$"
    context:
      - testing.md
    stop: true

  - name: go-files
    filename: "\\.go$"
    context:
      - go.md
    diff_context:
      - go-diff.md

  - name: sql-usage
    content: "database/sql"
    content_strategy: smart
    content_lines: [10, 10, 5]
    context:
      - database.md
"#;

    #[test]
    fn load_from_str_builds_typed_rules() {
        let rules = Loader::new().load_from_str(VALID_CONFIG).unwrap();

        assert_eq!(rules.content_defaults.strategy, Strategy::FirstLines);
        assert_eq!(rules.content_defaults.lines, 50);
        assert_eq!(rules.rules.len(), 3);

        assert_eq!(rules.rules[0].name, "test-files");
        assert!(rules.rules[0].stop);
        assert_eq!(rules.rules[0].sampling, None);

        assert_eq!(rules.rules[1].diff_context, vec!["go-diff.md".to_string()]);

        assert_eq!(
            rules.rules[2].sampling,
            Some(Sampling::Smart {
                first: 10,
                last: 10,
                random: 5
            })
        );
        assert!(rules.has_content_rules());
    }

    #[test]
    fn empty_config_gets_defaults() {
        let rules = Loader::new().load_from_str("{}").unwrap();
        assert_eq!(rules.content_defaults, ContentDefaults::default());
        assert!(rules.rules.is_empty());
    }

    #[test]
    fn rule_without_name_is_rejected() {
        let yaml = r#"
patterns:
  - filename: "\\.go$"
    context: [go.md]
"#;
        let err = Loader::new().load_from_str(yaml).unwrap_err();
        assert!(err.to_string().contains("name is required"), "{err}");
    }

    #[test]
    fn rule_without_any_pattern_is_rejected() {
        let yaml = r#"
patterns:
  - name: empty
    context: [go.md]
"#;
        let err = Loader::new().load_from_str(yaml).unwrap_err();
        assert!(
            err.to_string().contains("filename or a content regex"),
            "{err}"
        );
    }

    #[test]
    fn rule_without_guides_is_rejected() {
        let yaml = r#"
patterns:
  - name: no-guides
    filename: "\\.go$"
"#;
        let err = Loader::new().load_from_str(yaml).unwrap_err();
        assert!(err.to_string().contains("context or diff_context"), "{err}");
    }

    #[test]
    fn smart_strategy_requires_three_counts() {
        let yaml = r#"
patterns:
  - name: bad-smart
    content: "TODO"
    content_strategy: smart
    content_lines: [10, 10]
    context: [todo.md]
"#;
        let err = Loader::new().load_from_str(yaml).unwrap_err();
        assert!(err.to_string().contains("exactly 3 values"), "{err}");
    }

    #[test]
    fn unknown_strategy_is_rejected() {
        let yaml = r#"
content_defaults:
  strategy: everything
  lines: 50
"#;
        let err = Loader::new().load_from_str(yaml).unwrap_err();
        assert!(err.to_string().contains("invalid default strategy"), "{err}");
    }

    #[test]
    fn first_lines_override_takes_single_value() {
        let yaml = r#"
patterns:
  - name: headers
    content: "Copyright"
    content_strategy: first_lines
    content_lines: [5]
    context: [license.md]
"#;
        let rules = Loader::new().load_from_str(yaml).unwrap();
        assert_eq!(
            rules.rules[0].sampling,
            Some(Sampling::FirstLines { lines: Some(5) })
        );
    }

    #[test]
    fn load_file_reports_missing_path() {
        let err = Loader::new()
            .load_file(Path::new("/nonexistent/revguide.yml"))
            .unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn load_file_round_trips_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("revguide.yml");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(VALID_CONFIG.as_bytes()).unwrap();

        let rules = Loader::new().load_file(&path).unwrap();
        assert_eq!(rules.rules.len(), 3);
    }
}
