//! Diff data structures representing one file's changes.

use serde::Serialize;
use std::fmt::Write as _;

/// Structured information about a single file's diff.
///
/// Value-like: built once by the parser, never mutated in place.
#[derive(Debug, Clone, Default, Serialize)]
pub struct FileDiff {
    /// The target file path, as supplied by the caller.
    pub path: String,
    /// Old path from the `--- ` header line, verbatim.
    pub old_path: Option<String>,
    /// New path from the `+++ ` header line, verbatim.
    pub new_path: Option<String>,
    /// True when the old side is `/dev/null`.
    pub is_new: bool,
    /// True when the new side is `/dev/null`.
    pub is_deleted: bool,
    /// Set by callers that track renames; the parser never sets it.
    pub is_renamed: bool,
    /// Change hunks, in input order. Empty when the text had no `@@` lines.
    pub hunks: Vec<Hunk>,
}

impl FileDiff {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    /// All added lines, flattened across hunks in input order.
    pub fn added_lines(&self) -> impl Iterator<Item = &DiffLine> {
        self.lines_of_kind(LineKind::Added)
    }

    /// All removed lines, flattened across hunks in input order.
    pub fn removed_lines(&self) -> impl Iterator<Item = &DiffLine> {
        self.lines_of_kind(LineKind::Removed)
    }

    /// All unchanged context lines, flattened across hunks in input order.
    pub fn context_lines(&self) -> impl Iterator<Item = &DiffLine> {
        self.lines_of_kind(LineKind::Context)
    }

    fn lines_of_kind(&self, kind: LineKind) -> impl Iterator<Item = &DiffLine> {
        self.hunks
            .iter()
            .flat_map(|h| h.lines.iter())
            .filter(move |l| l.kind == kind)
    }

    /// Render the diff for human consumption: file status, then each hunk's
    /// verbatim header followed by its lines with `+`/`-`/` ` markers.
    ///
    /// Display only; semantic decisions never depend on this text.
    pub fn review_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "File: {}", self.path);

        if self.is_new {
            out.push_str("Status: New file\n");
        } else if self.is_deleted {
            out.push_str("Status: Deleted file\n");
        } else if self.is_renamed {
            let old = self.old_path.as_deref().unwrap_or("<unknown>");
            let _ = writeln!(out, "Status: Renamed from {old}");
        }

        out.push_str("\nChanges:\n");

        for hunk in &self.hunks {
            out.push('\n');
            out.push_str(&hunk.header);
            out.push('\n');

            for line in &hunk.lines {
                match line.kind {
                    LineKind::Added => {
                        let _ = writeln!(out, "+{}", line.content);
                    }
                    LineKind::Removed => {
                        let _ = writeln!(out, "-{}", line.content);
                    }
                    LineKind::Context => {
                        let _ = writeln!(out, " {}", line.content);
                    }
                    LineKind::NoNewline => {}
                }
            }
        }

        out
    }
}

/// A contiguous block of changes with its own line-number base.
#[derive(Debug, Clone, Serialize)]
pub struct Hunk {
    /// Old file starting line.
    pub old_start: u32,
    /// Number of lines on the old side.
    pub old_count: u32,
    /// New file starting line.
    pub new_start: u32,
    /// Number of lines on the new side.
    pub new_count: u32,
    /// The verbatim header line, kept for display fidelity.
    pub header: String,
    /// Lines in this hunk, in input order.
    pub lines: Vec<DiffLine>,
}

/// A single line in a diff.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiffLine {
    pub kind: LineKind,
    /// Line text with the leading `+`/`-`/` ` marker stripped; a
    /// [`LineKind::NoNewline`] line keeps the marker line verbatim.
    pub content: String,
    /// Line number in the old file (`Removed` and `Context`).
    pub old_line: Option<u32>,
    /// Line number in the new file (`Added` and `Context`).
    pub new_line: Option<u32>,
}

impl DiffLine {
    pub fn added(content: impl Into<String>, new_line: u32) -> Self {
        Self {
            kind: LineKind::Added,
            content: content.into(),
            old_line: None,
            new_line: Some(new_line),
        }
    }

    pub fn removed(content: impl Into<String>, old_line: u32) -> Self {
        Self {
            kind: LineKind::Removed,
            content: content.into(),
            old_line: Some(old_line),
            new_line: None,
        }
    }

    pub fn context(content: impl Into<String>, old_line: u32, new_line: u32) -> Self {
        Self {
            kind: LineKind::Context,
            content: content.into(),
            old_line: Some(old_line),
            new_line: Some(new_line),
        }
    }
}

/// Line type in a diff.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LineKind {
    Added,
    Removed,
    Context,
    /// A `\ No newline at end of file` marker; carries no line numbers.
    NoNewline,
}
