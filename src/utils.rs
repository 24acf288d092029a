/*!
 * Utility functions and default policy tables for projsnap
 */

use once_cell::sync::Lazy;

/// Format a human-readable file size
pub fn format_file_size(size: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if size >= GB {
        format!("{:.2} GB", size as f64 / GB as f64)
    } else if size >= MB {
        format!("{:.2} MB", size as f64 / MB as f64)
    } else if size >= KB {
        format!("{:.2} KB", size as f64 / KB as f64)
    } else {
        format!("{} bytes", size)
    }
}

/// Directory names that are never descended into
pub static DEFAULT_IGNORE_DIRS: Lazy<Vec<&'static str>> = Lazy::new(|| {
    vec![
        ".git",
        "node_modules",
        "dist",
        "build",
        ".next",
        "__pycache__",
        "env",
        "venv",
        ".idea",
        ".vscode",
    ]
});

/// File names skipped by exact match, or by suffix when prefixed with `*`
pub static DEFAULT_IGNORE_FILES: Lazy<Vec<&'static str>> = Lazy::new(|| {
    vec![
        ".DS_Store",
        ".env",
        ".env.*",
        "package-lock.json",
        "yarn.lock",
        "pnpm-lock.yaml",
        "*.log",
        "*.pid",
    ]
});

/// Extensions (without the dot) whose content is captured
pub static DEFAULT_ALLOWED_EXTENSIONS: Lazy<Vec<&'static str>> = Lazy::new(|| {
    vec![
        "js", "jsx", "ts", "tsx", "css", "scss", "html", "json", "md", "py", "txt", "yml", "yaml",
    ]
});

/// Case-insensitive substrings that mark a line as sensitive
pub static DEFAULT_SENSITIVE_KEYWORDS: Lazy<Vec<&'static str>> =
    Lazy::new(|| vec!["api_key", "password", "secret", "token", "auth"]);

/// Fixed stack description written into every report header
pub const STACK_DESCRIPTION: &[&str] = &[
    "- Frontend: React (JSX) con Vite",
    "- Enrutamiento: react-router-dom",
    "- Persistencia local: IndexedDB mediante Dexie.js",
    "- Gráficos: recharts",
    "- Estilos: CSS / SCSS",
];
