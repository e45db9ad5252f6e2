//! screwbreach CLI - screw breach detection from surface meshes.
//!
//! Usage: screwbreach <COMMAND> [OPTIONS] ...
//!
//! Run `screwbreach --help` for available commands.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Instant;

use clap::{Parser, Subcommand, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

use screwbreach::algo::batch::{process_batch_with_progress, BatchOptions};
use screwbreach::algo::{Progress, DEFAULT_TOLERANCE};
use screwbreach::io;
use screwbreach::report;

#[derive(Parser)]
#[command(name = "screwbreach")]
#[command(author, version, about = "Screw breach detection CLI", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug); RUST_LOG overrides
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check screws against the medial and lateral walls
    Check {
        /// Medial wall mesh file
        medial: PathBuf,

        /// Lateral wall mesh file
        lateral: PathBuf,

        /// Screw mesh file, directory of screw meshes, or .zip archive
        screws: PathBuf,

        /// Minimum clearance in mesh units (mm)
        #[arg(default_value_t = DEFAULT_TOLERANCE)]
        tolerance: f64,

        /// Output format
        #[arg(short, long, value_enum, default_value = "json")]
        format: OutputFormat,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,

        /// Write the report to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Show a progress bar on stderr
        #[arg(long)]
        progress: bool,

        /// Use single-threaded execution (for benchmarking)
        #[arg(long)]
        sequential: bool,
    },

    /// Display mesh information
    Info {
        /// Input mesh file
        input: PathBuf,
    },
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// JSON document
    Json,
    /// Plain-text table and trace
    Text,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Check {
            medial,
            lateral,
            screws,
            tolerance,
            format,
            pretty,
            output,
            progress,
            sequential,
        } => {
            let options = BatchOptions::default()
                .with_tolerance(tolerance)
                .with_parallel(!sequential);
            cmd_check(
                &medial,
                &lateral,
                &screws,
                &options,
                format,
                pretty,
                output.as_deref(),
                progress,
            )?;
        }

        Commands::Info { input } => {
            cmd_info(&input)?;
        }
    }

    Ok(())
}

/// Create a progress reporter that displays a progress bar on the terminal.
fn create_progress() -> Progress {
    let shown = Arc::new(AtomicUsize::new(0));

    Progress::new(move |current, total, message| {
        if total == 0 {
            return;
        }

        // Screws may finish out of order; never move the bar backwards
        if shown.fetch_max(current, Ordering::Relaxed) > current {
            return;
        }

        let percent = (current * 100) / total;
        let bar_width = 30;
        let filled = (percent * bar_width) / 100;

        let bar = "=".repeat(filled);
        let space = " ".repeat(bar_width - filled);

        eprint!("\r[{}{}] {:3}% {}/{} {}\x1b[K", bar, space, percent, current, total, message);
        let _ = std::io::stderr().flush();

        if current >= total {
            eprintln!();
        }
    })
}

#[allow(clippy::too_many_arguments)]
fn cmd_check(
    medial: &Path,
    lateral: &Path,
    screws: &Path,
    options: &BatchOptions,
    format: OutputFormat,
    pretty: bool,
    output: Option<&Path>,
    show_progress: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let progress = if show_progress {
        create_progress()
    } else {
        Progress::none()
    };

    let start = Instant::now();
    let batch = process_batch_with_progress(medial, lateral, screws, options, &progress)?;
    let elapsed = start.elapsed();

    let summary = batch.summary();
    info!(
        screws = summary.total,
        breached = summary.breached(),
        elapsed = ?elapsed,
        "Breach analysis finished"
    );

    let rendered = match format {
        OutputFormat::Json => report::to_json(&batch, pretty)?,
        OutputFormat::Text => report::render_text(&batch),
    };

    match output {
        Some(path) => {
            std::fs::write(path, rendered.as_bytes())?;
            eprintln!("Saved: {} ({:.2?})", path.display(), elapsed);
        }
        None => {
            let stdout = std::io::stdout();
            let mut handle = stdout.lock();
            handle.write_all(rendered.as_bytes())?;
            if !rendered.ends_with('\n') {
                writeln!(handle)?;
            }
        }
    }

    Ok(())
}

fn cmd_info(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let mesh = io::load(input)?;
    let points = mesh.points();

    println!("File: {}", input.display());
    println!("Vertices: {}", mesh.num_vertices());
    println!("Faces: {}", mesh.num_faces());

    if let Some((min, max)) = points.bounding_box() {
        println!(
            "Bounding box: ({:.3}, {:.3}, {:.3}) to ({:.3}, {:.3}, {:.3})",
            min.x, min.y, min.z, max.x, max.y, max.z
        );
        let diag = max - min;
        println!("Dimensions: {:.3} x {:.3} x {:.3}", diag.x, diag.y, diag.z);
    }

    if let Some(c) = points.centroid() {
        println!("Centroid: ({:.3}, {:.3}, {:.3})", c.x, c.y, c.z);
        println!("Mean X: {:.2} mm", c.x);
    } else {
        println!("Mesh has no vertices");
    }

    Ok(())
}
