/*!
 * Directory traversal, tree rendering and content capture
 */

use std::fs::{self, File};
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use indicatif::ProgressBar;
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::config::Config;
use crate::error::Result;
use crate::filter::PathFilter;
use crate::sanitizer::Sanitizer;
use crate::types::{BlockBody, ContentBlock, Entry};

/// Scanner statistics
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanStatistics {
    /// Directories listed in the tree
    pub directories: usize,
    /// Files listed in the tree
    pub files: usize,
    /// Files whose content was captured
    pub files_captured: usize,
    /// Files skipped for exceeding the size ceiling
    pub files_too_large: usize,
    /// Files that failed to read
    pub files_failed: usize,
    /// Lines replaced by a redaction marker
    pub redacted_lines: usize,
    /// Bytes read from captured files
    pub bytes_read: u64,
}

/// Tree lines and content blocks from one traversal
#[derive(Debug, Clone, Default)]
pub struct Rendering {
    /// Indented tree lines, in traversal order
    pub tree: Vec<String>,
    /// One block per included file, in traversal order
    pub blocks: Vec<ContentBlock>,
    /// Counters gathered along the way
    pub statistics: ScanStatistics,
}

/// Scanner for directory contents
pub struct Scanner {
    /// Canonical scan root
    root: PathBuf,
    filter: PathFilter,
    sanitizer: Sanitizer,
    max_file_size: u64,
    /// Progress bar
    pub progress: Arc<ProgressBar>,
}

impl Scanner {
    /// Create a new scanner for the configured root
    pub fn new(config: &Config, progress: Arc<ProgressBar>) -> Result<Self> {
        let root = fs::canonicalize(&config.target_dir).map_err(|e| {
            crate::error!(
                PathNotFound,
                "{}: {}",
                config.target_dir.display(),
                e
            )
        })?;
        let filter = PathFilter::new(config.policy.clone()).excluding_output(&config.output_file);
        let sanitizer = Sanitizer::new(&config.policy)?;

        Ok(Self {
            root,
            filter,
            sanitizer,
            max_file_size: config.policy.max_file_size,
            progress,
        })
    }

    /// Display name of the root directory
    pub fn root_name(&self) -> String {
        self.root
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| self.root.display().to_string())
    }

    /// Walk the root once, in lexicographic order, and render tree and content
    pub fn scan(&self) -> Rendering {
        let mut rendering = Rendering::default();
        let mut walker = WalkDir::new(&self.root)
            .min_depth(1)
            .sort_by_file_name()
            .into_iter();

        while let Some(next) = walker.next() {
            let dent = match next {
                Ok(dent) => dent,
                Err(e) => {
                    warn!("Skipping unreadable entry: {}", e);
                    continue;
                }
            };

            let entry = Entry::from_dir_entry(&self.root, &dent);
            if !self.filter.should_include(&entry) {
                debug!("Ignoring {}", entry.rel_path.display());
                if dent.file_type().is_dir() {
                    walker.skip_current_dir();
                }
                continue;
            }

            let indent = "  ".repeat(entry.depth.saturating_sub(1));
            if entry.is_dir() {
                rendering.tree.push(format!("{}📁 {}/", indent, entry.name()));
                rendering.statistics.directories += 1;
                continue;
            }

            rendering.tree.push(format!("{}📄 {}", indent, entry.name()));
            rendering.statistics.files += 1;

            let block = self.process_file(&entry, &mut rendering.statistics);
            rendering.blocks.push(block);
        }

        rendering
    }

    /// Capture a single file, turning any failure into an inline error block
    fn process_file(&self, entry: &Entry, stats: &mut ScanStatistics) -> ContentBlock {
        self.progress.inc(1);
        self.progress
            .set_message(format!("Current file: {}", entry.rel_path.display()));

        let body = match self.read_file_content(entry, stats) {
            Ok(body) => body,
            Err(e) => {
                warn!("Failed to read {}: {}", entry.rel_path.display(), e);
                stats.files_failed += 1;
                BlockBody::Error {
                    name: entry.name(),
                    message: e.to_string(),
                }
            }
        };

        ContentBlock {
            rel_path: entry.rel_path.clone(),
            body,
        }
    }

    /// Read the content of a file below the size ceiling and sanitize it
    fn read_file_content(&self, entry: &Entry, stats: &mut ScanStatistics) -> io::Result<BlockBody> {
        // Pipes, sockets and devices are never opened
        let Some(size) = entry.size else {
            fs::metadata(&entry.abs_path)?;
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "not a regular file",
            ));
        };

        // Checked before reading so oversized files never reach memory
        if size > self.max_file_size {
            stats.files_too_large += 1;
            return Ok(BlockBody::TooLarge { size });
        }

        let Some(bytes) = read_bounded(&entry.abs_path, self.max_file_size)? else {
            // Grew past the ceiling after it was listed
            stats.files_too_large += 1;
            let size = fs::metadata(&entry.abs_path)?.len();
            return Ok(BlockBody::TooLarge {
                size: size.max(self.max_file_size.saturating_add(1)),
            });
        };
        let content = String::from_utf8_lossy(&bytes);
        let sanitized = self.sanitizer.sanitize_counted(&content, &entry.name());

        stats.files_captured += 1;
        stats.bytes_read += bytes.len() as u64;
        stats.redacted_lines += sanitized.redacted_lines;

        Ok(BlockBody::Sanitized(sanitized.text))
    }
}

/// Read at most `limit` bytes; `None` when the file holds more
pub fn read_bounded(path: &Path, limit: u64) -> io::Result<Option<Vec<u8>>> {
    let mut bytes = Vec::new();
    File::open(path)?
        .take(limit.saturating_add(1))
        .read_to_end(&mut bytes)?;

    if bytes.len() as u64 > limit {
        Ok(None)
    } else {
        Ok(Some(bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_bounded_stops_past_limit() -> io::Result<()> {
        let temp_dir = tempfile::tempdir()?;
        let path = temp_dir.path().join("data.txt");
        fs::write(&path, vec![b'a'; 100])?;

        assert_eq!(read_bounded(&path, 100)?.map(|b| b.len()), Some(100));
        assert_eq!(read_bounded(&path, 99)?, None);
        assert_eq!(read_bounded(&path, 0)?, None);
        Ok(())
    }
}
