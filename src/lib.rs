/*!
 * projsnap - Generate a sanitized plain-text snapshot of a project
 *
 * This library walks a directory tree under a fixed inclusion policy,
 * redacts sensitive-looking lines and writes the tree plus every included
 * file into one text artifact, optionally delivered to a shared folder.
 */

pub mod config;
pub mod delivery;
pub mod error;
pub mod filter;
pub mod report;
pub mod sanitizer;
pub mod scanner;
pub mod stats;
pub mod types;
pub mod utils;
pub mod writer;


// Re-export main components for easier access
pub use config::{Config, Policy};
pub use delivery::{deliver, DeliveryStatus};
pub use error::{Result, SnapshotError};
pub use filter::PathFilter;
pub use report::{Reporter, ScanReport};
pub use sanitizer::Sanitizer;
pub use scanner::{Rendering, ScanStatistics, Scanner};
pub use stats::{word_stats, WordStats};
pub use types::{BlockBody, ContentBlock, Entry, EntryKind};
pub use utils::format_file_size;
pub use writer::{Snapshot, SnapshotWriter};

/// Version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
