//! Validated rule-set data model.
//!
//! A `RuleSet` is built once per invocation by the [`Loader`](crate::Loader)
//! and is immutable afterwards. The matcher assumes the invariants enforced
//! at load time and never re-validates.

use serde::Serialize;

/// Content scanning strategy names accepted in configuration files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Scan only the first N lines of the file.
    FirstLines,
    /// Scan the entire file content.
    FullFile,
    /// Scan the first and last blocks plus random lines from the middle.
    Smart,
}

impl Strategy {
    /// Parse a strategy name from its configuration spelling.
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "first_lines" => Some(Strategy::FirstLines),
            "full_file" => Some(Strategy::FullFile),
            "smart" => Some(Strategy::Smart),
            _ => None,
        }
    }

    /// The configuration spelling of this strategy.
    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::FirstLines => "first_lines",
            Strategy::FullFile => "full_file",
            Strategy::Smart => "smart",
        }
    }
}

/// A rule's validated sampling override.
///
/// The raw `content_lines` list means different things per strategy (one
/// value for `first_lines`, exactly three for `smart`), so validation turns
/// it into a tagged variant and call sites never see an untyped list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Sampling {
    /// First N lines; `None` falls back to the rule set's default line count.
    FirstLines { lines: Option<usize> },
    /// The whole file.
    FullFile,
    /// First/last blocks plus random middle draws.
    Smart {
        first: usize,
        last: usize,
        random: usize,
    },
}

/// Global fallback used when a rule does not override scanning behavior.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContentDefaults {
    pub strategy: Strategy,
    /// Line count for the `first_lines` strategy.
    pub lines: usize,
}

impl Default for ContentDefaults {
    fn default() -> Self {
        Self {
            strategy: Strategy::FirstLines,
            lines: 50,
        }
    }
}

/// One configured matching directive pairing filename/content predicates
/// with guide names.
///
/// Invariants (enforced by the loader): at least one of `filename`/`content`
/// is present, and at least one of `context`/`diff_context` is non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rule {
    /// Identifier used in diagnostics; unique by convention.
    pub name: String,
    /// Regex tested against the file path string.
    pub filename: Option<String>,
    /// Regex tested against a sampled slice of file bytes.
    pub content: Option<String>,
    /// Sampling override; `None` means "use the rule set defaults".
    pub sampling: Option<Sampling>,
    /// Guide names for full-file review.
    pub context: Vec<String>,
    /// Guide names for diff-mode review.
    pub diff_context: Vec<String>,
    /// When true and this rule matches, later rules are not evaluated.
    pub stop: bool,
}

impl Rule {
    /// True if this rule tests file content.
    pub fn has_content_pattern(&self) -> bool {
        self.content.is_some()
    }
}

/// The validated configuration: scan defaults plus an ordered rule list.
///
/// Rule order is semantically significant; rules are evaluated top to bottom.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleSet {
    pub content_defaults: ContentDefaults,
    pub rules: Vec<Rule>,
}

impl Default for RuleSet {
    /// The configuration used when no config file is found.
    fn default() -> Self {
        Self {
            content_defaults: ContentDefaults::default(),
            rules: Vec::new(),
        }
    }
}

impl RuleSet {
    /// True if any rule carries a content pattern (content-only rules
    /// included). The resolver uses this to decide whether a file's bytes
    /// must be read at all.
    pub fn has_content_rules(&self) -> bool {
        self.rules.iter().any(Rule::has_content_pattern)
    }
}
