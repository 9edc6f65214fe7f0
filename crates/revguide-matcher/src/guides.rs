//! Guide document loading.
//!
//! Guide names in the rule set are opaque strings; this module resolves them
//! to file contents by probing a small fixed list of candidate locations. A
//! name that resolves to no file is a documentation gap, not a matching bug,
//! so it is skipped with a warning rather than failing the resolution.

use std::path::Path;

/// A guide document resolved to its content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Guide {
    pub name: String,
    pub content: String,
}

/// Load guide documents relative to the current directory.
///
/// Results preserve the input order; unresolvable names are skipped.
pub fn load_guides(names: &[String]) -> Vec<Guide> {
    load_guides_from(Path::new("."), names)
}

/// Load guide documents relative to `root`.
///
/// Candidates per name, first readable wins: `guides/<name>`,
/// `.revguide/guides/<name>`, then `<name>` as a direct path.
pub fn load_guides_from(root: &Path, names: &[String]) -> Vec<Guide> {
    names
        .iter()
        .filter_map(|name| {
            let candidates = [
                root.join("guides").join(name),
                root.join(".revguide").join("guides").join(name),
                root.join(name),
            ];

            for path in &candidates {
                if let Ok(content) = std::fs::read_to_string(path) {
                    log::debug!("loaded guide {name} from {}", path.display());
                    return Some(Guide {
                        name: name.clone(),
                        content,
                    });
                }
            }

            log::warn!("guide not found: {name}");
            None
        })
        .collect()
}
