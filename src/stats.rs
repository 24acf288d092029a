//! Word and token-estimate counts over a finished snapshot

use std::fs;
use std::path::Path;

use tracing::warn;

/// Counts derived from the rendered snapshot text
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WordStats {
    /// Whitespace-separated words
    pub words: usize,
    /// Approximate LLM token count
    pub tokens: usize,
}

impl WordStats {
    /// Count words in `text` and scale them by `multiplier`
    pub fn from_text(text: &str, multiplier: f64) -> Self {
        let words = text.split_whitespace().count();
        let tokens = (words as f64 * multiplier).round() as usize;

        Self { words, tokens }
    }
}

/// Read back the artifact at `path`; a failed read yields zero counts
pub fn word_stats(path: &Path, multiplier: f64) -> WordStats {
    match fs::read(path) {
        Ok(bytes) => WordStats::from_text(&String::from_utf8_lossy(&bytes), multiplier),
        Err(e) => {
            warn!("Could not read {} for statistics: {}", path.display(), e);
            WordStats::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_and_rounding() {
        let stats = WordStats::from_text("one two\nthree\tfour  five", 1.3);

        assert_eq!(stats.words, 5);
        // 5 * 1.3 = 6.5
        assert_eq!(stats.tokens, 7);
    }

    #[test]
    fn test_empty_text() {
        assert_eq!(WordStats::from_text("  \n ", 1.3), WordStats::default());
    }

    #[test]
    fn test_missing_file_reports_zero() {
        let temp_dir = tempfile::tempdir().unwrap();
        let stats = word_stats(&temp_dir.path().join("nope.txt"), 1.3);

        assert_eq!(stats, WordStats { words: 0, tokens: 0 });
    }
}
