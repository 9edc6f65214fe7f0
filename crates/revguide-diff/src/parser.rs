//! Parse one file's unified-diff text into a [`FileDiff`].

use crate::types::{DiffLine, FileDiff, Hunk, LineKind};
use thiserror::Error;

/// Errors that can occur during diff parsing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A line beginning with `@@` did not match
    /// `@@ -<start>[,<count>] +<start>[,<count>] @@`.
    #[error("invalid hunk header: {0}")]
    InvalidHunkHeader(String),
}

/// Parse raw unified-diff text for a single file.
///
/// The input may be empty or contain no hunk headers at all; the result then
/// carries an empty `hunks` list rather than an error. Lines inside a hunk
/// that start with anything other than `+`, `-`, a space, or `\` are skipped,
/// tolerating stray metadata lines emitted by diff generators.
pub fn parse_file_diff(diff_text: &str, file_path: &str) -> Result<FileDiff, ParseError> {
    let mut lines: Vec<&str> = diff_text.split('\n').collect();
    // A trailing empty element from a final newline is not a diff line.
    if lines.last() == Some(&"") {
        lines.pop();
    }

    let mut diff = FileDiff::new(file_path);
    let mut current: Option<Hunk> = None;
    let mut old_line: u32 = 0;
    let mut new_line: u32 = 0;

    for line in lines {
        if let Some(rest) = line.strip_prefix("--- ") {
            diff.old_path = Some(rest.to_string());
            if rest == "/dev/null" {
                diff.is_new = true;
            }
            continue;
        }

        if let Some(rest) = line.strip_prefix("+++ ") {
            diff.new_path = Some(rest.to_string());
            if rest == "/dev/null" {
                diff.is_deleted = true;
            }
            continue;
        }

        if line.starts_with("@@") {
            if let Some(hunk) = current.take() {
                diff.hunks.push(hunk);
            }
            let hunk = parse_hunk_header(line)?;
            // Running counters are seeded from the header's start values.
            old_line = hunk.old_start;
            new_line = hunk.new_start;
            current = Some(hunk);
            continue;
        }

        let Some(hunk) = current.as_mut() else {
            continue;
        };
        let Some(marker) = line.bytes().next() else {
            continue;
        };

        match marker {
            b'+' => {
                hunk.lines.push(DiffLine::added(&line[1..], new_line));
                new_line += 1;
            }
            b'-' => {
                hunk.lines.push(DiffLine::removed(&line[1..], old_line));
                old_line += 1;
            }
            b' ' => {
                hunk.lines
                    .push(DiffLine::context(&line[1..], old_line, new_line));
                old_line += 1;
                new_line += 1;
            }
            b'\\' => {
                // "\ No newline at end of file" - kept verbatim, no numbers.
                hunk.lines.push(DiffLine {
                    kind: LineKind::NoNewline,
                    content: line.to_string(),
                    old_line: None,
                    new_line: None,
                });
            }
            _ => {}
        }
    }

    if let Some(hunk) = current.take() {
        diff.hunks.push(hunk);
    }

    Ok(diff)
}

/// Parse a header like `@@ -1,4 +1,6 @@` or `@@ -1 +1 @@ fn main()`.
fn parse_hunk_header(line: &str) -> Result<Hunk, ParseError> {
    let err = || ParseError::InvalidHunkHeader(line.to_string());

    // The ranges sit between the opening `@@` and the closing `@@`; any
    // trailing section heading stays in the verbatim header only.
    let inner = line
        .strip_prefix("@@")
        .and_then(|rest| rest.split("@@").next())
        .ok_or_else(err)?;

    let mut parts = inner.split_whitespace();
    let old = parts
        .next()
        .and_then(|p| p.strip_prefix('-'))
        .ok_or_else(err)?;
    let new = parts
        .next()
        .and_then(|p| p.strip_prefix('+'))
        .ok_or_else(err)?;
    if parts.next().is_some() {
        return Err(err());
    }

    let (old_start, old_count) = parse_range(old).ok_or_else(err)?;
    let (new_start, new_count) = parse_range(new).ok_or_else(err)?;

    Ok(Hunk {
        old_start,
        old_count,
        new_start,
        new_count,
        header: line.to_string(),
        lines: Vec::new(),
    })
}

/// Parse `start[,count]`; the count defaults to 1 when omitted.
fn parse_range(range: &str) -> Option<(u32, u32)> {
    match range.split_once(',') {
        Some((start, count)) => Some((start.parse().ok()?, count.parse().ok()?)),
        None => Some((range.parse().ok()?, 1)),
    }
}
