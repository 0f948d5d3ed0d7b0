//! Name mapping overrides
//!
//! Users can map a Zero Install interface (full URL or short name) to a
//! PyPI package name via `.zero2pypi` files: one in the home directory,
//! one in the working directory. Each line is a whitespace-separated
//! `key value` pair. The working-directory file is loaded second, so its
//! entries win on duplicate keys; missing files and malformed lines are
//! ignored.
//!
//! The mapping is built once per run and threaded into the dependency
//! resolver, read-only.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Mapping file name, both in $HOME and in the working directory
pub const MAPPING_FILE: &str = ".zero2pypi";

/// Interface identifier -> PyPI package name overrides
#[derive(Debug, Default)]
pub struct NameMapping {
    entries: HashMap<String, String>,
}

impl NameMapping {
    /// Load the default mapping files: `~/.zero2pypi` then `./.zero2pypi`
    pub fn load() -> Self {
        let mut paths = Vec::new();
        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(MAPPING_FILE));
        }
        paths.push(PathBuf::from(MAPPING_FILE));
        Self::load_from(&paths)
    }

    /// Load mapping files in order; later files overwrite same-key entries
    pub fn load_from(paths: &[PathBuf]) -> Self {
        let mut mapping = NameMapping::default();
        for path in paths {
            mapping.read_file(path);
        }
        mapping
    }

    fn read_file(&mut self, path: &Path) {
        let Ok(contents) = fs::read_to_string(path) else {
            tracing::debug!(path = %path.display(), "No mapping file, skipping");
            return;
        };
        for line in contents.lines() {
            let mut parts = line.split_whitespace();
            match (parts.next(), parts.next(), parts.next()) {
                (Some(key), Some(value), None) => {
                    self.entries.insert(key.to_string(), value.to_string());
                }
                (None, _, _) => {} // blank line
                _ => {
                    tracing::debug!(path = %path.display(), line, "Ignoring malformed mapping line");
                }
            }
        }
        tracing::debug!(path = %path.display(), entries = self.entries.len(), "Loaded mapping file");
    }

    /// Resolve an interface identifier to its override, trying the full
    /// identifier first and the short name second
    pub fn resolve(&self, identifier: &str) -> Option<&str> {
        self.entries
            .get(identifier)
            .or_else(|| self.entries.get(short_name(identifier)))
            .map(String::as_str)
    }
}

/// Short name of an interface identifier: the trailing segment after the
/// last `/` or `.`, with an optional `.xml` suffix stripped first.
///
/// `http://example.org/foo.xml` -> `foo`, `http://x/a.b.xml` -> `b`,
/// `foo` -> `foo`.
pub fn short_name(identifier: &str) -> &str {
    let trimmed = identifier.strip_suffix(".xml").unwrap_or(identifier);
    match trimmed.rfind(['/', '.']) {
        Some(idx) => &trimmed[idx + 1..],
        None => trimmed,
    }
}
