/*!
 * Configuration handling for projsnap
 */

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use clap::Parser;
use clap_complete::Shell;

use crate::ensure;
use crate::error::Result;
use crate::utils::{
    DEFAULT_ALLOWED_EXTENSIONS, DEFAULT_IGNORE_DIRS, DEFAULT_IGNORE_FILES,
    DEFAULT_SENSITIVE_KEYWORDS,
};

/// Default name of the snapshot written into the scan root
pub const DEFAULT_OUTPUT_FILE: &str = "proyecto_completo.txt";

/// Files larger than this are listed but never read (1 MiB)
pub const MAX_FILE_SIZE: u64 = 1024 * 1024;

/// Words-to-tokens multiplier used for the token estimate
pub const TOKEN_MULTIPLIER: f64 = 1.3;

/// Command-line arguments for projsnap
#[derive(Parser, Debug, Clone)]
#[clap(
    name = "projsnap",
    version = env!("CARGO_PKG_VERSION"),
    about = "Generate a sanitized plain-text snapshot of a project",
    long_about = "Walks a project directory, filters it with a fixed policy, redacts sensitive-looking lines and writes the directory tree plus every included file into a single text artifact."
)]
pub struct Args {
    /// Directory to snapshot
    #[clap(default_value = ".")]
    pub directory_path: String,

    /// Output file name (a bare name is placed inside the scanned directory)
    #[clap(default_value = DEFAULT_OUTPUT_FILE)]
    pub output_file: String,

    /// Folder the finished snapshot is copied to
    #[clap(long, env = "PROJSNAP_DEST", value_name = "DIR")]
    pub dest: Option<String>,

    /// Skip the confirmation prompt
    #[clap(short, long)]
    pub yes: bool,

    /// Generate shell completions
    #[clap(long = "generate", value_enum)]
    pub generate: Option<Shell>,
}

/// Fixed filtering and redaction policy, built once per run
#[derive(Clone, Debug)]
pub struct Policy {
    /// Directory names never descended into
    pub ignored_dirs: HashSet<String>,
    /// Exact file names, or `*suffix` globs
    pub ignored_files: Vec<String>,
    /// Extensions, without the dot, whose content is captured
    pub allowed_extensions: HashSet<String>,
    /// Substrings that mark a line as sensitive, matched case-insensitively
    pub sensitive_keywords: Vec<String>,
    /// Size ceiling for content capture, in bytes
    pub max_file_size: u64,
    /// Multiplier applied to the word count for the token estimate
    pub token_multiplier: f64,
}

impl Default for Policy {
    fn default() -> Self {
        Self {
            ignored_dirs: DEFAULT_IGNORE_DIRS.iter().map(|s| s.to_string()).collect(),
            ignored_files: DEFAULT_IGNORE_FILES.iter().map(|s| s.to_string()).collect(),
            allowed_extensions: DEFAULT_ALLOWED_EXTENSIONS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            sensitive_keywords: DEFAULT_SENSITIVE_KEYWORDS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            max_file_size: MAX_FILE_SIZE,
            token_multiplier: TOKEN_MULTIPLIER,
        }
    }
}

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    /// Directory to scan
    pub target_dir: PathBuf,

    /// Snapshot file path
    pub output_file: PathBuf,

    /// Optional delivery folder
    pub destination: Option<PathBuf>,

    /// Skip the confirmation prompt
    pub assume_yes: bool,

    /// Filtering and redaction policy
    pub policy: Policy,
}

impl Config {
    /// Create a configuration with the default policy
    pub fn new(target_dir: impl Into<PathBuf>, output_file: impl Into<PathBuf>) -> Self {
        let target_dir = target_dir.into();
        let output_file = resolve_output_file(&target_dir, output_file.into());

        Self {
            target_dir,
            output_file,
            destination: None,
            assume_yes: false,
            policy: Policy::default(),
        }
    }

    /// Create configuration from command-line arguments
    pub fn from_args(args: Args) -> Self {
        let mut config = Self::new(args.directory_path, args.output_file);
        config.destination = args.dest.map(PathBuf::from);
        config.assume_yes = args.yes;
        config
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.target_dir.is_dir(),
            PathNotFound,
            "Target directory not found: {}",
            self.target_dir.display()
        );

        // The writer never creates parent directories
        if let Some(parent) = self.output_file.parent() {
            ensure!(
                parent == Path::new("") || parent.is_dir(),
                PathNotFound,
                "Output directory not found: {}",
                parent.display()
            );
        }

        Ok(())
    }
}

/// A bare file name lands inside the scanned directory; any other path is kept as given
fn resolve_output_file(target_dir: &Path, output: PathBuf) -> PathBuf {
    let is_bare_name = !output.is_absolute()
        && output
            .parent()
            .map_or(true, |parent| parent == Path::new(""));

    if is_bare_name {
        target_dir.join(output)
    } else {
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_file_resolution() {
        let root = PathBuf::from("/tmp/project");

        let test_cases = vec![
            ("proyecto_completo.txt", root.join("proyecto_completo.txt")),
            ("out/snap.txt", PathBuf::from("out/snap.txt")),
            ("/tmp/snap.txt", PathBuf::from("/tmp/snap.txt")),
        ];

        for (input, expected) in test_cases {
            let config = Config::new(&root, input);
            assert_eq!(config.output_file, expected);
        }
    }

    #[test]
    fn test_default_policy_matches_canonical_lists() {
        let policy = Policy::default();

        assert!(policy.ignored_dirs.contains("node_modules"));
        assert!(policy.ignored_files.iter().any(|p| p == "*.log"));
        assert!(policy.allowed_extensions.contains("jsx"));
        assert!(!policy.allowed_extensions.contains(".jsx"));
        assert_eq!(
            policy.sensitive_keywords,
            vec!["api_key", "password", "secret", "token", "auth"]
        );
        assert_eq!(policy.max_file_size, 1_048_576);
    }

    #[test]
    fn test_validate_rejects_missing_root() {
        let config = Config::new("/definitely/not/here", "out.txt");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_from_args() {
        let args = Args::parse_from(["projsnap", "/tmp/project", "--dest", "/mnt/share", "-y"]);
        let config = Config::from_args(args);

        assert_eq!(config.target_dir, PathBuf::from("/tmp/project"));
        assert_eq!(
            config.output_file,
            PathBuf::from("/tmp/project").join(DEFAULT_OUTPUT_FILE)
        );
        assert_eq!(config.destination, Some(PathBuf::from("/mnt/share")));
        assert!(config.assume_yes);
    }
}
