/*!
 * Core types and data structures for the projsnap application
 */

use std::fs;
use std::path::{Path, PathBuf};

use walkdir::DirEntry;

/// Kind of a filesystem entry visited during a scan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// Directory (or symlink to one)
    Directory,
    /// Regular file (or symlink to one)
    File,
}

/// A filesystem node visited during one traversal pass
#[derive(Debug, Clone)]
pub struct Entry {
    /// Absolute path of the entry
    pub abs_path: PathBuf,
    /// Path relative to the scan root
    pub rel_path: PathBuf,
    /// Directory or file
    pub kind: EntryKind,
    /// Size in bytes, regular files only
    pub size: Option<u64>,
    /// Number of path segments below the root
    pub depth: usize,
}

impl Entry {
    /// Build an entry from a walker item rooted at `root`
    pub fn from_dir_entry(root: &Path, dent: &DirEntry) -> Self {
        let abs_path = dent.path().to_path_buf();
        let rel_path = abs_path
            .strip_prefix(root)
            .map(Path::to_path_buf)
            .unwrap_or_else(|_| PathBuf::from(dent.file_name()));

        // Symlinks are classified by their target
        let target = if dent.path_is_symlink() {
            fs::metadata(&abs_path).ok()
        } else {
            dent.metadata().ok()
        };

        let kind = match &target {
            Some(meta) if meta.is_dir() => EntryKind::Directory,
            Some(_) => EntryKind::File,
            None if dent.file_type().is_dir() => EntryKind::Directory,
            None => EntryKind::File,
        };

        let size = target
            .filter(|meta| meta.is_file())
            .map(|meta| meta.len());

        Self {
            depth: rel_path.components().count(),
            abs_path,
            rel_path,
            kind,
            size,
        }
    }

    /// Base name of the entry
    pub fn name(&self) -> String {
        self.abs_path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string()
    }

    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Directory
    }

    pub fn is_file(&self) -> bool {
        self.kind == EntryKind::File
    }
}

/// What a content block carries for one included file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockBody {
    /// Sanitized file text
    Sanitized(String),
    /// File exceeded the size ceiling and was not read
    TooLarge { size: u64 },
    /// Reading or processing the file failed
    Error { name: String, message: String },
}

/// The content captured for one included file, paired with its relative path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentBlock {
    /// Path relative to the scan root
    pub rel_path: PathBuf,
    /// Block payload
    pub body: BlockBody,
}
