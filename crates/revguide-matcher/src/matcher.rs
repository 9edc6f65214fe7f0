//! Ordered rule evaluation against file names and sampled content.

use crate::sampling;
use revguide_config::{Rule, RuleSet};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;

/// Which of a rule's two regexes failed to compile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternKind {
    Filename,
    Content,
}

impl fmt::Display for PatternKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PatternKind::Filename => "filename",
            PatternKind::Content => "content",
        })
    }
}

/// Errors raised while matching a file against the rule set.
#[derive(Debug, Error)]
pub enum MatchError {
    /// A rule's regex failed to compile. Always surfaced: a broken rule
    /// silently not matching would hide review guidance.
    #[error("invalid {kind} regex for rule {rule}: {source}")]
    PatternCompile {
        rule: String,
        kind: PatternKind,
        source: regex::Error,
    },

    #[error("failed to read file {}: {source}", .path.display())]
    ContentRead {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Evaluates the ordered rule list against files.
///
/// Each instance owns a private cache of compiled regexes, populated on
/// first use and keyed by rule name per pattern kind. The cache is safe to
/// reuse sequentially; parallel callers create one `Matcher` per worker.
pub struct Matcher {
    rules: Arc<RuleSet>,
    filename_regexes: HashMap<String, regex::Regex>,
    content_regexes: HashMap<String, regex::bytes::Regex>,
}

impl Matcher {
    pub fn new(rules: Arc<RuleSet>) -> Self {
        Self {
            rules,
            filename_regexes: HashMap::new(),
            content_regexes: HashMap::new(),
        }
    }

    /// Evaluate filename patterns only, in rule order.
    ///
    /// A rule matches here only when it has a filename pattern that finds a
    /// match anywhere in `filename`. A matched rule with `stop` terminates
    /// evaluation; later rules are not evaluated at all.
    pub fn match_file(&mut self, filename: &str) -> Result<Vec<Rule>, MatchError> {
        let rules = Arc::clone(&self.rules);
        let mut matched = Vec::new();

        for rule in &rules.rules {
            let Some(pattern) = rule.filename.as_deref() else {
                continue;
            };
            let regex = self.filename_regex(&rule.name, pattern)?;
            if regex.is_match(filename) {
                matched.push(rule.clone());
                if rule.stop {
                    break;
                }
            }
        }

        Ok(matched)
    }

    /// Evaluate every rule against both filename and content.
    ///
    /// Content-only rules participate regardless of filename; rules carrying
    /// both patterns require both to match, with the content regex tested
    /// against the slice selected by the rule's effective sampling strategy.
    /// Stop semantics are the same as [`match_file`](Self::match_file).
    pub fn match_file_content(
        &mut self,
        filename: &str,
        content: &[u8],
    ) -> Result<Vec<Rule>, MatchError> {
        let by_filename: HashSet<String> = self
            .match_file(filename)?
            .into_iter()
            .map(|rule| rule.name)
            .collect();

        let rules = Arc::clone(&self.rules);
        let mut matched = Vec::new();

        for rule in &rules.rules {
            let hit = match (&rule.filename, &rule.content) {
                (Some(_), Some(pattern)) => {
                    by_filename.contains(&rule.name)
                        && self.content_matches(rule, pattern, content)?
                }
                (Some(_), None) => by_filename.contains(&rule.name),
                (None, Some(pattern)) => self.content_matches(rule, pattern, content)?,
                (None, None) => false,
            };

            if hit {
                matched.push(rule.clone());
                if rule.stop {
                    break;
                }
            }
        }

        Ok(matched)
    }

    /// Map matched rules to their guides, de-duplicated in first-seen order.
    ///
    /// In diff mode a rule's `diff_context` wins when non-empty; otherwise
    /// its `context` applies.
    pub fn matched_guides(&self, rules: &[Rule], diff_mode: bool) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut guides = Vec::new();

        for rule in rules {
            let source = if diff_mode && !rule.diff_context.is_empty() {
                &rule.diff_context
            } else {
                &rule.context
            };
            for guide in source {
                if seen.insert(guide.as_str()) {
                    guides.push(guide.clone());
                }
            }
        }

        guides
    }

    /// Read a file from disk and return the rules that match it.
    pub fn scan_file(&mut self, path: &str) -> Result<Vec<Rule>, MatchError> {
        let content = std::fs::read(path).map_err(|source| MatchError::ContentRead {
            path: PathBuf::from(path),
            source,
        })?;
        self.match_file_content(path, &content)
    }

    fn content_matches(
        &mut self,
        rule: &Rule,
        pattern: &str,
        content: &[u8],
    ) -> Result<bool, MatchError> {
        let defaults = self.rules.content_defaults.clone();
        let strategy = sampling::effective_sampling(rule, &defaults);
        let scan = sampling::sample(content, &strategy, &defaults);
        let regex = self.content_regex(&rule.name, pattern)?;
        Ok(regex.is_match(&scan))
    }

    fn filename_regex(&mut self, rule: &str, pattern: &str) -> Result<&regex::Regex, MatchError> {
        if !self.filename_regexes.contains_key(rule) {
            let regex =
                regex::Regex::new(pattern).map_err(|source| MatchError::PatternCompile {
                    rule: rule.to_string(),
                    kind: PatternKind::Filename,
                    source,
                })?;
            self.filename_regexes.insert(rule.to_string(), regex);
        }
        Ok(&self.filename_regexes[rule])
    }

    fn content_regex(
        &mut self,
        rule: &str,
        pattern: &str,
    ) -> Result<&regex::bytes::Regex, MatchError> {
        if !self.content_regexes.contains_key(rule) {
            let regex =
                regex::bytes::Regex::new(pattern).map_err(|source| MatchError::PatternCompile {
                    rule: rule.to_string(),
                    kind: PatternKind::Content,
                    source,
                })?;
            self.content_regexes.insert(rule.to_string(), regex);
        }
        Ok(&self.content_regexes[rule])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use revguide_config::{ContentDefaults, Sampling, Strategy};

    fn rule(name: &str) -> Rule {
        Rule {
            name: name.into(),
            filename: None,
            content: None,
            sampling: None,
            context: vec![format!("{name}.md")],
            diff_context: vec![],
            stop: false,
        }
    }

    fn rule_set(rules: Vec<Rule>) -> Arc<RuleSet> {
        Arc::new(RuleSet {
            content_defaults: ContentDefaults::default(),
            rules,
        })
    }

    fn names(rules: &[Rule]) -> Vec<&str> {
        rules.iter().map(|r| r.name.as_str()).collect()
    }

    #[test]
    fn match_file_respects_rule_order_and_stop() {
        let test_rule = Rule {
            filename: Some(r"_test\.go$".into()),
            stop: true,
            ..rule("test-files")
        };
        let go_rule = Rule {
            filename: Some(r"\.go$".into()),
            ..rule("go-files")
        };

        let mut matcher = Matcher::new(rule_set(vec![test_rule.clone(), go_rule.clone()]));
        assert_eq!(names(&matcher.match_file("main_test.go").unwrap()), ["test-files"]);
        assert_eq!(names(&matcher.match_file("main.go").unwrap()), ["go-files"]);

        // Reordered, the stop rule no longer shadows the general one.
        let mut matcher = Matcher::new(rule_set(vec![go_rule, test_rule]));
        assert_eq!(
            names(&matcher.match_file("main_test.go").unwrap()),
            ["go-files", "test-files"]
        );
    }

    #[test]
    fn match_file_skips_content_only_rules() {
        let content_rule = Rule {
            content: Some("database/sql".into()),
            ..rule("sql")
        };
        let mut matcher = Matcher::new(rule_set(vec![content_rule]));
        assert!(matcher.match_file("main.go").unwrap().is_empty());
    }

    #[test]
    fn match_file_surfaces_compile_errors_with_rule_and_kind() {
        let bad = Rule {
            filename: Some("[unclosed".into()),
            ..rule("broken")
        };
        let mut matcher = Matcher::new(rule_set(vec![bad]));
        let err = matcher.match_file("main.go").unwrap_err();

        match err {
            MatchError::PatternCompile { rule, kind, .. } => {
                assert_eq!(rule, "broken");
                assert_eq!(kind, PatternKind::Filename);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn match_file_content_requires_both_patterns_of_a_combined_rule() {
        let combined = Rule {
            filename: Some(r"\.go$".into()),
            content: Some("database/sql".into()),
            sampling: Some(Sampling::FullFile),
            ..rule("go-sql")
        };
        let mut matcher = Matcher::new(rule_set(vec![combined]));

        let hit = matcher
            .match_file_content("db.go", b"import \"database/sql\"")
            .unwrap();
        assert_eq!(names(&hit), ["go-sql"]);

        // Filename matches, content does not.
        assert!(matcher
            .match_file_content("db.go", b"no imports here")
            .unwrap()
            .is_empty());

        // Content matches, filename does not.
        assert!(matcher
            .match_file_content("db.py", b"import \"database/sql\"")
            .unwrap()
            .is_empty());
    }

    #[test]
    fn match_file_content_lets_content_only_rules_match_any_filename() {
        let content_rule = Rule {
            content: Some("TODO".into()),
            sampling: Some(Sampling::FullFile),
            ..rule("todos")
        };
        let mut matcher = Matcher::new(rule_set(vec![content_rule]));

        let hit = matcher
            .match_file_content("whatever.txt", b"x\nTODO: fix\n")
            .unwrap();
        assert_eq!(names(&hit), ["todos"]);
    }

    #[test]
    fn match_file_content_honors_stop_across_rule_kinds() {
        let content_rule = Rule {
            content: Some("secret".into()),
            sampling: Some(Sampling::FullFile),
            stop: true,
            ..rule("secrets")
        };
        let go_rule = Rule {
            filename: Some(r"\.go$".into()),
            ..rule("go-files")
        };
        let mut matcher = Matcher::new(rule_set(vec![content_rule, go_rule]));

        let hit = matcher.match_file_content("main.go", b"secret token").unwrap();
        assert_eq!(names(&hit), ["secrets"]);
    }

    #[test]
    fn sampling_window_decides_content_matches() {
        // Twelve lines with the match text on line 6: visible to full_file,
        // invisible to a five-line first_lines window.
        let mut lines: Vec<String> = (0..12).map(|i| format!("line{i}")).collect();
        lines[5] = "uses database/sql here".into();
        let content = lines.join("\n").into_bytes();

        let full = Rule {
            content: Some("database/sql".into()),
            sampling: Some(Sampling::FullFile),
            ..rule("full")
        };
        let narrow = Rule {
            content: Some("database/sql".into()),
            sampling: Some(Sampling::FirstLines { lines: Some(5) }),
            ..rule("narrow")
        };

        let mut matcher = Matcher::new(rule_set(vec![full, narrow]));
        let hit = matcher.match_file_content("report.txt", &content).unwrap();
        assert_eq!(names(&hit), ["full"]);
    }

    #[test]
    fn default_first_lines_window_applies_without_rule_override() {
        let mut lines: Vec<String> = (0..12).map(|i| format!("line{i}")).collect();
        lines[5] = "uses database/sql here".into();
        let content = lines.join("\n").into_bytes();

        let content_rule = Rule {
            content: Some("database/sql".into()),
            ..rule("sql")
        };
        let narrow_defaults = Arc::new(RuleSet {
            content_defaults: ContentDefaults {
                strategy: Strategy::FirstLines,
                lines: 5,
            },
            rules: vec![content_rule],
        });

        let mut matcher = Matcher::new(narrow_defaults);
        assert!(matcher
            .match_file_content("report.txt", &content)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn content_patterns_match_non_utf8_bytes() {
        let content_rule = Rule {
            content: Some("MAGIC".into()),
            sampling: Some(Sampling::FullFile),
            ..rule("magic")
        };
        let mut matcher = Matcher::new(rule_set(vec![content_rule]));

        let mut content = vec![0xff, 0xfe, b'\n'];
        content.extend_from_slice(b"MAGIC\n");
        let hit = matcher.match_file_content("blob.bin", &content).unwrap();
        assert_eq!(names(&hit), ["magic"]);
    }

    #[test]
    fn matched_guides_dedupes_in_first_seen_order() {
        let a = Rule {
            context: vec!["shared.md".into(), "a.md".into()],
            ..rule("a")
        };
        let b = Rule {
            context: vec!["b.md".into(), "shared.md".into()],
            ..rule("b")
        };
        let matcher = Matcher::new(rule_set(vec![]));

        let guides = matcher.matched_guides(&[a, b], false);
        assert_eq!(guides, vec!["shared.md", "a.md", "b.md"]);
    }

    #[test]
    fn matched_guides_prefers_diff_context_in_diff_mode() {
        let with_diff = Rule {
            diff_context: vec!["diff.md".into()],
            ..rule("a")
        };
        let without_diff = rule("b");
        let matcher = Matcher::new(rule_set(vec![]));

        let guides = matcher.matched_guides(&[with_diff.clone(), without_diff.clone()], true);
        assert_eq!(guides, vec!["diff.md", "b.md"]);

        let guides = matcher.matched_guides(&[with_diff, without_diff], false);
        assert_eq!(guides, vec!["a.md", "b.md"]);
    }

    #[test]
    fn scan_file_reads_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, "has a TODO in it\n").unwrap();

        let content_rule = Rule {
            content: Some("TODO".into()),
            sampling: Some(Sampling::FullFile),
            ..rule("todos")
        };
        let mut matcher = Matcher::new(rule_set(vec![content_rule]));

        let hit = matcher.scan_file(path.to_str().unwrap()).unwrap();
        assert_eq!(names(&hit), ["todos"]);

        let err = matcher
            .scan_file(dir.path().join("missing.txt").to_str().unwrap())
            .unwrap_err();
        assert!(matches!(err, MatchError::ContentRead { .. }));
    }
}
