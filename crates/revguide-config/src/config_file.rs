//! Configuration file discovery.
//!
//! Searches the working directory for the well-known config file names, and
//! optionally walks parent directories so the tool can run from anywhere in
//! a repository.

use std::path::{Path, PathBuf};

/// File names probed, in order, when loading configuration.
pub const CONFIG_FILE_NAMES: &[&str] = &[
    "revguide.yml",
    "revguide.yaml",
    ".revguide.yml",
    ".revguide.yaml",
];

/// Search `start` and its parent directories for a config file.
///
/// Returns the first existing path, or `None` when no directory up to the
/// filesystem root contains one.
pub fn find_config_file(start: &Path) -> Option<PathBuf> {
    let mut dir = start;
    loop {
        for name in CONFIG_FILE_NAMES {
            let candidate = dir.join(name);
            if candidate.is_file() {
                log::debug!("found config at {}", candidate.display());
                return Some(candidate);
            }
        }
        dir = dir.parent()?;
    }
}
