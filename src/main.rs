/*!
 * Command-line interface for projsnap
 */

use std::fs;
use std::io::{self, BufRead, Write};
use std::process::ExitCode;
use std::sync::Arc;
use std::time::{Duration, Instant};

use clap::{CommandFactory, Parser};
use indicatif::{ProgressBar, ProgressStyle};
use tracing_subscriber::EnvFilter;

use projsnap::config::{Args, Config};
use projsnap::delivery::deliver;
use projsnap::error::Result;
use projsnap::report::{Reporter, ScanReport};
use projsnap::scanner::Scanner;
use projsnap::stats::word_stats;
use projsnap::writer::SnapshotWriter;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    if let Some(shell) = args.generate {
        clap_complete::generate(shell, &mut Args::command(), "projsnap", &mut io::stdout());
        return ExitCode::SUCCESS;
    }

    match run(Config::from_args(args)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("✗ Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(config: Config) -> Result<()> {
    config.validate()?;

    println!("Directorio a analizar: {}", config.target_dir.display());
    if !config.assume_yes && !confirm("¿Continuar? (s/n): ")? {
        println!("Operación cancelada");
        return Ok(());
    }

    // The file total is unknown until the scan finishes
    let progress = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner()
        .template("{spinner:.green} {prefix:.bold.cyan} {wide_msg:.dim.white} {pos} archivos")
    {
        progress.set_style(style);
    }
    progress.enable_steady_tick(Duration::from_millis(100));
    progress.set_prefix("📊 Analizando proyecto...");

    let scanner = Scanner::new(&config, Arc::new(progress.clone()))?;

    let writer = SnapshotWriter::new(config.clone());

    let start_time = Instant::now();
    let snapshot = writer.generate(&scanner)?;
    let duration = start_time.elapsed();

    progress.finish_and_clear();

    // Read back only after the write has completed
    let words = word_stats(&config.output_file, config.policy.token_multiplier);

    let delivery = config
        .destination
        .as_deref()
        .map(|dest| deliver(&config.output_file, dest).to_string());

    let report = ScanReport {
        output_file: config.output_file.display().to_string(),
        output_size: fs::metadata(&config.output_file)
            .map(|meta| meta.len())
            .unwrap_or(0),
        duration,
        statistics: snapshot.rendering.statistics,
        words,
        delivery,
    };

    Reporter::new().print_report(&report);
    println!(
        "✓ Proceso finalizado. Resultado en: {}",
        config.output_file.display()
    );

    Ok(())
}

/// Ask a yes/no question on stdin; accepts `s` or `y`
fn confirm(prompt: &str) -> io::Result<bool> {
    print!("{}", prompt);
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;

    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes" | "s" | "si" | "sí"))
}
