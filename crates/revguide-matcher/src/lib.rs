//! Pattern matching and guide resolution for revguide.
//!
//! Given a validated [`RuleSet`](revguide_config::RuleSet), this crate
//! answers two questions per file: "should this file be reviewed?" and
//! "which guides apply?".
//!
//! - [`Matcher`] evaluates the ordered rule list against a file's name and,
//!   when a rule asks for it, a sampled slice of the file's bytes. Compiled
//!   regexes are cached per instance; for parallel batch processing,
//!   instantiate one `Matcher` (or [`Resolver`]) per worker instead of
//!   sharing one.
//! - [`Resolver`] drives the matcher and decides when file content must be
//!   read at all, degrading to filename-only matches when a read fails.
//! - [`guides`] resolves guide names to document contents on disk.
//!
//! All matching is synchronous; the one piece of I/O is the resolver's
//! content read.

pub mod guides;
pub mod matcher;
pub mod resolver;
pub mod sampling;

pub use guides::{load_guides, Guide};
pub use matcher::{MatchError, Matcher, PatternKind};
pub use resolver::Resolver;
