//! CLI for the fsum checksum verifier.

mod report;

use anyhow::{bail, Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::mpsc::channel;
use std::sync::Arc;

use fsum_core::config;
use fsum_core::coordinator::{Coordinator, PROGRESS_RESOLUTION};
use fsum_core::hasher;
use fsum_core::sumfile::SUMFILE_MAX_BYTES;

use report::{CliEvent, ConsoleListener};

/// Verify or compute checksums for files and directories.
///
/// Directories are processed recursively. A file with a sidecar checksum
/// (e.g. `file.sha256`) is verified against it; a single checksum-list
/// input verifies every file the list names.
#[derive(Debug, Parser)]
#[command(name = "fsum")]
#[command(about = "fsum: sidecar-aware checksum computation and verification", long_about = None)]
pub struct Cli {
    /// Files or directories to process.
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,

    /// Base directory for display names (defaults to the current directory).
    #[arg(long)]
    pub base: Option<PathBuf>,

    /// Restrict enabled hash algorithms (repeatable; default from config).
    #[arg(long, value_name = "NAME")]
    pub algo: Vec<String>,

    /// Do not print progress updates.
    #[arg(long)]
    pub no_progress: bool,
}

pub fn run_from_args() -> Result<bool> {
    run(Cli::parse())
}

/// Run one verification session. Returns whether every task succeeded
/// (matched, or computed with no expected hash).
pub fn run(cli: Cli) -> Result<bool> {
    let mut cfg = config::load_or_init()?;
    tracing::debug!("loaded config: {:?}", cfg);
    if !cli.algo.is_empty() {
        cfg.enabled_algorithms = cli.algo.clone();
    }
    let algorithms = hasher::registry(&cfg);
    if algorithms.iter().all(|a| !a.enabled) {
        bail!("no enabled hash algorithms (check --algo or the config file)");
    }

    let base = match cli.base {
        Some(base) => base,
        None => std::env::current_dir().context("determine current directory")?,
    };
    let sumfile_max_bytes = cfg.sumfile_max_bytes.unwrap_or(SUMFILE_MAX_BYTES);

    let coordinator = Arc::new(Coordinator::new(
        cli.paths,
        base,
        algorithms,
        sumfile_max_bytes,
    ));
    if coordinator.tasks().is_empty() {
        println!("nothing to do");
        return Ok(true);
    }

    let (tx, rx) = channel();
    coordinator.register_listener(Box::new(ConsoleListener::new(tx)));
    coordinator.start_all();

    let total = coordinator.tasks().len();
    let mut all_ok = true;
    for event in rx.iter() {
        match event {
            CliEvent::Progress(part) => {
                if !cli.no_progress {
                    eprint!(
                        "\r{:5.1}%",
                        part as f64 * 100.0 / PROGRESS_RESOLUTION as f64
                    );
                }
            }
            CliEvent::Finished { name, outcome } => {
                if !cli.no_progress {
                    eprint!("\r");
                }
                all_ok &= report::print_outcome(&name, outcome.as_ref());
            }
            CliEvent::AllFinished => break,
        }
    }
    coordinator.unregister_listener();

    tracing::info!(tasks = total, all_ok, "session finished");
    Ok(all_ok)
}
