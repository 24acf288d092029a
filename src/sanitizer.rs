//! Line-level redaction of sensitive-looking content

use regex::{Regex, RegexBuilder};

use crate::config::Policy;
use crate::error::Result;

/// Text after redaction, with the number of lines replaced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sanitized {
    pub text: String,
    pub redacted_lines: usize,
}

/// Replaces every line containing a sensitive keyword with a marker
pub struct Sanitizer {
    /// `None` when the policy has no keywords
    matcher: Option<Regex>,
}

impl Sanitizer {
    /// Compile the policy's keywords into one case-insensitive matcher
    pub fn new(policy: &Policy) -> Result<Self> {
        let keywords: Vec<String> = policy
            .sensitive_keywords
            .iter()
            .filter(|keyword| !keyword.is_empty())
            .map(|keyword| regex::escape(keyword))
            .collect();

        if keywords.is_empty() {
            return Ok(Self { matcher: None });
        }

        let matcher = RegexBuilder::new(&keywords.join("|"))
            .case_insensitive(true)
            .build()?;

        Ok(Self {
            matcher: Some(matcher),
        })
    }

    /// Marker substituted for a redacted line of `label`
    pub fn marker(label: &str) -> String {
        format!("[CONTENIDO SENSIBLE ELIMINADO: {}]", label)
    }

    /// Check whether a single line would be redacted
    pub fn is_sensitive(&self, line: &str) -> bool {
        self.matcher
            .as_ref()
            .is_some_and(|matcher| matcher.is_match(line))
    }

    /// Redact `text`, naming `label` in each marker
    pub fn sanitize(&self, text: &str, label: &str) -> String {
        self.sanitize_counted(text, label).text
    }

    /// Redact `text` and report how many lines were replaced
    pub fn sanitize_counted(&self, text: &str, label: &str) -> Sanitized {
        let marker = Self::marker(label);
        let mut redacted_lines = 0;

        let lines: Vec<&str> = text
            .split('\n')
            .map(|line| {
                if self.is_sensitive(line) {
                    redacted_lines += 1;
                    marker.as_str()
                } else {
                    line
                }
            })
            .collect();

        Sanitized {
            text: lines.join("\n"),
            redacted_lines,
        }
    }
}
