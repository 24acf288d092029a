/*!
 * Delivery of the finished snapshot to a shared folder
 *
 * The destination is often a network share or removable drive, so a missing
 * folder is treated as "not mounted" and skipped rather than failing the run.
 */

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use filetime::FileTime;
use thiserror::Error;
use tracing::{info, warn};

/// Error type for delivery operations
#[derive(Error, Debug)]
pub enum DeliveryError {
    /// The snapshot to deliver does not exist
    #[error("Source file not found: {0}")]
    SourceMissing(PathBuf),

    /// The destination folder is missing or not mounted
    #[error("Destination not available (not mounted?): {0}")]
    DestinationMissing(PathBuf),

    /// The destination already holds this very file
    #[error("Source and destination are the same file: {0}")]
    SameFile(PathBuf),

    /// Copy failed
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Result type for delivery operations
pub type Result<T> = std::result::Result<T, DeliveryError>;

/// Outcome of a delivery attempt
#[derive(Debug)]
pub enum DeliveryStatus {
    /// Copied to the contained path
    Delivered(PathBuf),
    /// Nothing was copied
    Skipped(DeliveryError),
    /// The copy started but failed
    Failed(DeliveryError),
}

impl DeliveryStatus {
    pub fn is_delivered(&self) -> bool {
        matches!(self, Self::Delivered(_))
    }
}

impl fmt::Display for DeliveryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Delivered(path) => write!(f, "copiado a {}", path.display()),
            Self::Skipped(e) => write!(f, "omitido ({})", e),
            Self::Failed(e) => write!(f, "falló ({})", e),
        }
    }
}

//--------------------------------------------------------------------
// Public API
//--------------------------------------------------------------------

/// Copy `source` into `destination_dir` under its own name
///
/// Never fails the caller: a missing source or destination is logged and
/// skipped, a failed copy is logged and reported.
///
/// # Examples
/// ```no_run
/// use std::path::Path;
/// use projsnap::delivery::deliver;
///
/// let status = deliver(Path::new("proyecto_completo.txt"), Path::new("/mnt/share"));
/// println!("Delivery: {}", status);
/// ```
pub fn deliver(source: &Path, destination_dir: &Path) -> DeliveryStatus {
    match copy_into(source, destination_dir) {
        Ok(target) => {
            info!("Snapshot delivered to {}", target.display());
            DeliveryStatus::Delivered(target)
        }
        Err(
            e @ (DeliveryError::SourceMissing(_)
            | DeliveryError::DestinationMissing(_)
            | DeliveryError::SameFile(_)),
        ) => {
            warn!("{}", e);
            DeliveryStatus::Skipped(e)
        }
        Err(e) => {
            warn!("Failed to deliver {}: {}", source.display(), e);
            DeliveryStatus::Failed(e)
        }
    }
}

/// Copy preserving permissions and timestamps, overwriting an existing file
pub fn copy_into(source: &Path, destination_dir: &Path) -> Result<PathBuf> {
    if !source.is_file() {
        return Err(DeliveryError::SourceMissing(source.to_path_buf()));
    }
    if !destination_dir.is_dir() {
        return Err(DeliveryError::DestinationMissing(
            destination_dir.to_path_buf(),
        ));
    }

    let file_name = source
        .file_name()
        .ok_or_else(|| DeliveryError::SourceMissing(source.to_path_buf()))?;
    let target = destination_dir.join(file_name);

    // Copying a file onto itself truncates it
    if target.exists() && fs::canonicalize(source)? == fs::canonicalize(&target)? {
        return Err(DeliveryError::SameFile(target));
    }

    fs::copy(source, &target)?;

    let metadata = fs::metadata(source)?;
    let atime = FileTime::from_last_access_time(&metadata);
    let mtime = FileTime::from_last_modification_time(&metadata);
    if let Err(e) = filetime::set_file_times(&target, atime, mtime) {
        warn!("Could not preserve timestamps on {}: {}", target.display(), e);
    }

    Ok(target)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_destination_is_skipped() -> io::Result<()> {
        let temp_dir = tempfile::tempdir()?;
        let source = temp_dir.path().join("snap.txt");
        fs::write(&source, "content")?;

        let status = deliver(&source, &temp_dir.path().join("not-mounted"));

        assert!(matches!(
            status,
            DeliveryStatus::Skipped(DeliveryError::DestinationMissing(_))
        ));
        assert!(!temp_dir.path().join("not-mounted").exists());
        Ok(())
    }

    #[test]
    fn test_missing_source_is_skipped() -> io::Result<()> {
        let temp_dir = tempfile::tempdir()?;

        let status = deliver(&temp_dir.path().join("absent.txt"), temp_dir.path());

        assert!(matches!(
            status,
            DeliveryStatus::Skipped(DeliveryError::SourceMissing(_))
        ));
        Ok(())
    }

    #[test]
    fn test_copy_overwrites_and_preserves_mtime() -> io::Result<()> {
        let src_dir = tempfile::tempdir()?;
        let dest_dir = tempfile::tempdir()?;
        let source = src_dir.path().join("snap.txt");
        fs::write(&source, "fresh")?;
        fs::write(dest_dir.path().join("snap.txt"), "old and stale")?;

        let mtime = FileTime::from_unix_time(1_600_000_000, 0);
        filetime::set_file_mtime(&source, mtime)?;

        let status = deliver(&source, dest_dir.path());
        assert!(status.is_delivered());

        let target = dest_dir.path().join("snap.txt");
        assert_eq!(fs::read_to_string(&target)?, "fresh");
        let copied = FileTime::from_last_modification_time(&fs::metadata(&target)?);
        assert_eq!(copied, mtime);
        Ok(())
    }

    #[test]
    fn test_same_folder_is_skipped_and_left_intact() -> io::Result<()> {
        let temp_dir = tempfile::tempdir()?;
        let source = temp_dir.path().join("snap.txt");
        fs::write(&source, "primary artifact")?;

        // Same folder reached through a `.` component
        let status = deliver(&source, &temp_dir.path().join("."));

        assert!(matches!(
            status,
            DeliveryStatus::Skipped(DeliveryError::SameFile(_))
        ));
        assert_eq!(fs::read_to_string(&source)?, "primary artifact");
        Ok(())
    }

    #[cfg(unix)]
    #[test]
    fn test_read_only_destination_fails_without_panicking() -> io::Result<()> {
        use std::os::unix::fs::PermissionsExt;

        let src_dir = tempfile::tempdir()?;
        let dest_dir = tempfile::tempdir()?;
        let source = src_dir.path().join("snap.txt");
        fs::write(&source, "content")?;
        fs::set_permissions(dest_dir.path(), fs::Permissions::from_mode(0o555))?;

        // Privileged users can write regardless of the mode
        if fs::write(dest_dir.path().join("write-check"), "x").is_ok() {
            fs::set_permissions(dest_dir.path(), fs::Permissions::from_mode(0o755))?;
            return Ok(());
        }

        let status = deliver(&source, dest_dir.path());

        fs::set_permissions(dest_dir.path(), fs::Permissions::from_mode(0o755))?;
        assert!(matches!(status, DeliveryStatus::Failed(DeliveryError::Io(_))));
        assert!(status.to_string().starts_with("falló"));
        Ok(())
    }
}
