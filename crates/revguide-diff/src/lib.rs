//! Unified-diff parsing for review routing.
//!
//! This crate turns one file's raw unified-diff text into a structured,
//! line-addressable model:
//!
//! - [`FileDiff`] - one file's changes plus header metadata
//!   - [`Hunk`] - one contiguous block with its own line-number base
//!     - [`DiffLine`] - a typed line carrying old/new line numbers
//!
//! Parsing is a pure transformation of an in-memory string; the crate has no
//! awareness of the version-control system that produced the text.
//!
//! ## Usage
//!
//! ```
//! use revguide_diff::{parse_file_diff, LineKind};
//!
//! let raw = "--- a/main.go\n+++ b/main.go\n@@ -1,2 +1,2 @@\n-old\n+new\n";
//! let diff = parse_file_diff(raw, "main.go").unwrap();
//! assert_eq!(diff.hunks.len(), 1);
//! assert_eq!(diff.hunks[0].lines[0].kind, LineKind::Removed);
//! ```

pub mod parser;
pub mod types;

pub use parser::{parse_file_diff, ParseError};
pub use types::{DiffLine, FileDiff, Hunk, LineKind};
