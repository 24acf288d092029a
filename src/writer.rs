/*!
 * Snapshot assembly and plain-text writer for projsnap
 */

use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use chrono::{DateTime, Local};
use tracing::info;

use crate::config::Config;
use crate::error::{Result, ResultExt};
use crate::scanner::{Rendering, Scanner};
use crate::types::{BlockBody, ContentBlock};
use crate::utils::STACK_DESCRIPTION;

const HEAVY_RULE_WIDTH: usize = 60;
const LIGHT_RULE_WIDTH: usize = 30;

/// Header metadata written at the top of a snapshot
#[derive(Debug, Clone)]
pub struct SnapshotHeader {
    /// Name of the scanned root directory
    pub project_name: String,
    /// When the snapshot was generated
    pub generated_at: DateTime<Local>,
    /// Fixed technical description lines
    pub description: &'static [&'static str],
}

/// The finished artifact: header, tree and sanitized content
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub header: SnapshotHeader,
    pub rendering: Rendering,
}

impl Snapshot {
    /// Assemble a snapshot stamped with the current local time
    pub fn new(project_name: impl Into<String>, rendering: Rendering) -> Self {
        Self::with_timestamp(project_name, Local::now(), rendering)
    }

    /// Assemble a snapshot with an explicit timestamp
    pub fn with_timestamp(
        project_name: impl Into<String>,
        generated_at: DateTime<Local>,
        rendering: Rendering,
    ) -> Self {
        Self {
            header: SnapshotHeader {
                project_name: project_name.into(),
                generated_at,
                description: STACK_DESCRIPTION,
            },
            rendering,
        }
    }

    fn write_header(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "=".repeat(HEAVY_RULE_WIDTH);

        writeln!(f, "PROYECTO: {}", self.header.project_name.to_uppercase())?;
        writeln!(
            f,
            "FECHA DE GENERACIÓN: {}",
            self.header.generated_at.format("%d/%m/%Y %H:%M:%S")
        )?;
        writeln!(f, "{}", rule)?;
        writeln!(f, "DESCRIPCIÓN TÉCNICA DEL STACK:")?;
        for line in self.header.description {
            writeln!(f, "{}", line)?;
        }
        writeln!(f, "{}", rule)
    }

    fn write_block(f: &mut fmt::Formatter<'_>, block: &ContentBlock) -> fmt::Result {
        writeln!(f, "FILE: {}", block.rel_path.display())?;
        writeln!(f, "{}", "-".repeat(LIGHT_RULE_WIDTH))?;
        match &block.body {
            BlockBody::Sanitized(text) => writeln!(f, "{}", text)?,
            BlockBody::TooLarge { size } => {
                writeln!(f, "[ARCHIVO DEMASIADO GRANDE: {} bytes]", size)?
            }
            BlockBody::Error { name, message } => {
                writeln!(f, "[ERROR leyendo {}: {}]", name, message)?
            }
        }
        writeln!(f, "{}", "*".repeat(HEAVY_RULE_WIDTH))
    }
}

impl fmt::Display for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_header(f)?;

        writeln!(f)?;
        writeln!(f, "--- ÁRBOL DE DIRECTORIOS ---")?;
        for line in &self.rendering.tree {
            writeln!(f, "{}", line)?;
        }

        writeln!(f)?;
        writeln!(f, "{}", "=".repeat(HEAVY_RULE_WIDTH))?;
        writeln!(f)?;
        writeln!(f, "--- CONTENIDO DE ARCHIVOS (SANITIZADO) ---")?;
        for block in &self.rendering.blocks {
            Self::write_block(f, block)?;
        }

        Ok(())
    }
}

/// Writes snapshots to the configured output file
pub struct SnapshotWriter {
    /// Writer configuration
    config: Config,
}

impl SnapshotWriter {
    /// Create a new snapshot writer
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Scan once and write the result, overwriting any existing file
    pub fn generate(&self, scanner: &Scanner) -> Result<Snapshot> {
        let snapshot = Snapshot::new(scanner.root_name(), scanner.scan());
        self.write(&snapshot)?;
        Ok(snapshot)
    }

    /// Write a snapshot to the output file
    pub fn write(&self, snapshot: &Snapshot) -> Result<()> {
        write_snapshot(snapshot, &self.config.output_file)
    }
}

/// Create or truncate `path` and write the snapshot into it
pub fn write_snapshot(snapshot: &Snapshot, path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    let mut writer = BufWriter::new(file);

    write!(writer, "{}", snapshot)
        .and_then(|_| writer.flush())
        .with_context(|| format!("Failed to write {}", path.display()))?;

    info!("Snapshot written to {}", path.display());
    Ok(())
}
