/*!
 * Console summary for projsnap runs
 *
 * Renders the end-of-run summary with the tabled library.
 */

use std::time::Duration;

use tabled::{
    settings::{object::Columns, Alignment, Modify, Padding, Style},
    Table, Tabled,
};

use crate::scanner::ScanStatistics;
use crate::stats::WordStats;
use crate::utils::format_file_size;

/// Everything the end-of-run summary shows
#[derive(Debug, Clone)]
pub struct ScanReport {
    /// Output file path
    pub output_file: String,
    /// Size of the written snapshot
    pub output_size: u64,
    /// Time taken to scan and write
    pub duration: Duration,
    /// Traversal counters
    pub statistics: ScanStatistics,
    /// Word and token counts over the snapshot
    pub words: WordStats,
    /// Delivery outcome, when a destination was configured
    pub delivery: Option<String>,
}

/// Report generator for scan results
pub struct Reporter;

impl Reporter {
    /// Create a new reporter
    pub fn new() -> Self {
        Self
    }

    /// Format a number with human-readable units
    fn format_number(&self, num: usize) -> String {
        if num >= 1_000_000 {
            format!("{:.1}M", num as f64 / 1_000_000.0)
        } else if num >= 1_000 {
            format!("{:.1}K", num as f64 / 1_000.0)
        } else {
            num.to_string()
        }
    }

    /// Generate the summary table
    pub fn generate_report(&self, report: &ScanReport) -> String {
        #[derive(Tabled)]
        struct SummaryRow {
            #[tabled(rename = "Métrica")]
            key: String,

            #[tabled(rename = "Valor")]
            value: String,
        }

        let stats = &report.statistics;
        let mut rows = vec![
            ("📂 Archivo de salida", report.output_file.clone()),
            ("💾 Tamaño", format_file_size(report.output_size)),
            ("⏱️ Tiempo", format!("{:.4?}", report.duration)),
            ("📁 Directorios", self.format_number(stats.directories)),
            ("📄 Archivos listados", self.format_number(stats.files)),
            ("📝 Archivos capturados", self.format_number(stats.files_captured)),
            ("📏 Omitidos (tamaño)", self.format_number(stats.files_too_large)),
            ("⚠️ Errores de lectura", self.format_number(stats.files_failed)),
            ("🔒 Líneas sensibles", self.format_number(stats.redacted_lines)),
            ("🔤 Palabras", self.format_number(report.words.words)),
            (
                "📦 Tokens LLM",
                format!("{} tokens (estimados)", self.format_number(report.words.tokens)),
            ),
        ];

        if let Some(delivery) = &report.delivery {
            rows.push(("🚚 Entrega", delivery.clone()));
        }

        let rows: Vec<SummaryRow> = rows
            .into_iter()
            .map(|(key, value)| SummaryRow {
                key: key.to_string(),
                value,
            })
            .collect();

        let mut table = Table::new(rows);
        table
            .with(Style::rounded())
            .with(Padding::new(1, 1, 0, 0))
            .with(Modify::new(Columns::new(..)).with(Alignment::left()));

        format!("✅  RESUMEN GENERADO\n{}", table)
    }

    /// Print the report to stdout
    pub fn print_report(&self, report: &ScanReport) {
        println!("\n{}", self.generate_report(report));
    }
}

impl Default for Reporter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number() {
        let reporter = Reporter::new();

        assert_eq!(reporter.format_number(999), "999");
        assert_eq!(reporter.format_number(1_500), "1.5K");
        assert_eq!(reporter.format_number(2_300_000), "2.3M");
    }

    #[test]
    fn test_report_lists_word_and_token_counts() {
        let report = ScanReport {
            output_file: "proyecto_completo.txt".to_string(),
            output_size: 2048,
            duration: Duration::from_millis(12),
            statistics: ScanStatistics {
                files: 3,
                files_captured: 2,
                redacted_lines: 4,
                ..ScanStatistics::default()
            },
            words: WordStats {
                words: 120,
                tokens: 156,
            },
            delivery: Some("omitido (no montado)".to_string()),
        };

        let text = Reporter::new().generate_report(&report);

        assert!(text.contains("proyecto_completo.txt"));
        assert!(text.contains("2.00 KB"));
        assert!(text.contains("156 tokens (estimados)"));
        assert!(text.contains("omitido (no montado)"));
    }
}
