//! Guide resolution: which guides apply to a file, reading content only
//! when a rule actually asks for it.

use crate::guides::{self, Guide};
use crate::matcher::{MatchError, Matcher};
use revguide_config::{Rule, RuleSet};
use std::path::PathBuf;
use std::sync::Arc;

/// Orchestrates the [`Matcher`] to answer, per file, "should this be
/// reviewed?" and "which guides apply?".
pub struct Resolver {
    rules: Arc<RuleSet>,
    matcher: Matcher,
}

impl Resolver {
    pub fn new(rules: RuleSet) -> Self {
        let rules = Arc::new(rules);
        Self {
            matcher: Matcher::new(Arc::clone(&rules)),
            rules,
        }
    }

    /// Resolve the full-file review guides for `path`.
    ///
    /// Content is read only when it can change the outcome: filename-only
    /// matches with no content patterns short-circuit, and a failed read
    /// degrades to the filename-only matches when any exist.
    pub fn guides(&mut self, path: &str) -> Result<Vec<String>, MatchError> {
        let filename_matches = self.matcher.match_file(path)?;

        let needs_content = filename_matches.iter().any(Rule::has_content_pattern);
        if !filename_matches.is_empty() && !needs_content {
            return Ok(self.matcher.matched_guides(&filename_matches, false));
        }

        if self.rules.has_content_rules() {
            let content = match std::fs::read(path) {
                Ok(content) => content,
                Err(source) => {
                    if !filename_matches.is_empty() {
                        log::warn!(
                            "cannot read {path}, falling back to filename matches: {source}"
                        );
                        return Ok(self.matcher.matched_guides(&filename_matches, false));
                    }
                    return Err(MatchError::ContentRead {
                        path: PathBuf::from(path),
                        source,
                    });
                }
            };

            let matches = self.matcher.match_file_content(path, &content)?;
            return Ok(self.matcher.matched_guides(&matches, false));
        }

        Ok(self.matcher.matched_guides(&filename_matches, false))
    }

    /// Resolve the diff-mode review guides for `path`.
    ///
    /// Content sampling is deliberately skipped: the diff text, not the full
    /// file, is the review subject.
    pub fn diff_guides(&mut self, path: &str) -> Result<Vec<String>, MatchError> {
        let filename_matches = self.matcher.match_file(path)?;
        Ok(self.matcher.matched_guides(&filename_matches, true))
    }

    /// True when the resolved full-file guide list is non-empty. Errors
    /// count as "no"; callers that need the cause use [`guides`](Self::guides).
    pub fn should_review(&mut self, path: &str) -> bool {
        self.guides(path).map(|g| !g.is_empty()).unwrap_or(false)
    }

    /// Load the contents of the named guide documents from disk, skipping
    /// names that resolve to no file.
    pub fn load_guides(&self, names: &[String]) -> Vec<Guide> {
        guides::load_guides(names)
    }
}
