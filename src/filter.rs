/*!
 * Inclusion rules for scanned entries
 */

use std::fs;
use std::path::{Component, Path, PathBuf};

use glob_match::glob_match;

use crate::config::Policy;
use crate::types::Entry;

/// Pure predicate deciding which entries a scan includes
#[derive(Debug, Clone)]
pub struct PathFilter {
    policy: Policy,
    /// Resolved path of the snapshot being written
    output_file: Option<PathBuf>,
}

impl PathFilter {
    /// Create a filter from the run policy
    pub fn new(policy: Policy) -> Self {
        Self {
            policy,
            output_file: None,
        }
    }

    /// Exclude the snapshot file itself from the scan
    pub fn excluding_output(mut self, output_file: &Path) -> Self {
        self.output_file = Some(resolve(output_file));
        self
    }

    /// Decide whether an entry is included
    pub fn should_include(&self, entry: &Entry) -> bool {
        !self.should_ignore(entry)
    }

    /// Check if an entry should be skipped
    pub fn should_ignore(&self, entry: &Entry) -> bool {
        let in_ignored_dir = entry.rel_path.components().any(|component| match component {
            Component::Normal(part) => self
                .policy
                .ignored_dirs
                .contains(part.to_string_lossy().as_ref()),
            _ => false,
        });
        if in_ignored_dir {
            return true;
        }

        let name = entry.name();
        if self.matches_ignored_file(&name) {
            return true;
        }

        if entry.is_file() && !self.has_allowed_extension(&entry.abs_path) {
            return true;
        }

        // Don't read the snapshot we are producing
        matches!(&self.output_file, Some(output) if *output == entry.abs_path)
    }

    fn matches_ignored_file(&self, name: &str) -> bool {
        self.policy.ignored_files.iter().any(|pattern| {
            if pattern.starts_with('*') {
                glob_match(pattern, name)
            } else {
                pattern == name
            }
        })
    }

    fn has_allowed_extension(&self, path: &Path) -> bool {
        path.extension()
            .map(|ext| {
                self.policy
                    .allowed_extensions
                    .contains(ext.to_string_lossy().as_ref())
            })
            .unwrap_or(false)
    }
}

/// Absolute path of a file that may not exist yet
fn resolve(path: &Path) -> PathBuf {
    if let Ok(canonical) = fs::canonicalize(path) {
        return canonical;
    }

    let parent = match path.parent() {
        Some(parent) if parent != Path::new("") => parent,
        _ => Path::new("."),
    };

    match (fs::canonicalize(parent), path.file_name()) {
        (Ok(dir), Some(name)) => dir.join(name),
        _ => path.to_path_buf(),
    }
}
