//! Application orchestrator.
//! Loads/merges config, initializes logging, locks the source directory,
//! runs the selection and budgeted move, and maps the outcome to an exit code.

use anyhow::{bail, Context, Result};
use std::process::ExitCode;
use tracing::{debug, error, info, warn};

use move_upto::cli::Args;
use move_upto::fs_ops::{try_lock_dir, DirLock};
use move_upto::output as out;
use move_upto::{default_config_path, load_config, plan_and_move, Config, LocalStore, Outcome};

use crate::logging::init_tracing;

/// Run the CLI application.
pub fn run(args: Args) -> Result<ExitCode> {
    if args.print_config {
        print_config_location(&args);
        return Ok(ExitCode::SUCCESS);
    }

    // File config first, CLI flags on top.
    let mut cfg = load_config(args.config.as_deref())?;
    args.apply_overrides(&mut cfg);

    let _log_guard = init_tracing(&cfg.log_level, cfg.log_file.as_deref(), args.json)
        .inspect_err(|e| out::print_error(&format!("Failed to initialize logging: {e}")))?;

    debug!("Starting move_upto: {:?}", args);

    if cfg.amount_gib == 0 {
        out::print_warn(
            "Please supply a size to move with --amount (interpreted as gigabytes). Only empty files can be moved with a budget of 0.",
        );
    }

    cfg.validate()?;
    let _run_lock = lock_source(&cfg)?;

    let report = match plan_and_move(&LocalStore::new(), &cfg) {
        Ok(report) => report,
        Err(e) => {
            // Reported stop: nothing was moved, the process still exits normally.
            error!(kind = %e.kind(), error = %e, "Listing failed");
            out::print_error(&format!(
                "Error while trying to list the files in folder {}: {e}",
                cfg.source.display()
            ));
            return Ok(ExitCode::SUCCESS);
        }
    };

    for name in &report.leftovers {
        out::print_warn(&format!(
            "{name} was copied to {} but could not be removed from {}",
            cfg.target.display(),
            cfg.source.display()
        ));
    }

    let verb = if cfg.dry_run { "Would move" } else { "Moved" };
    match report.outcome {
        Outcome::Completed => {
            info!(files = report.moved.len(), bytes = report.consumed_bytes, "Run completed");
            out::print_success(&format!(
                "{verb} {} file(s), {} bytes.",
                report.moved.len(),
                report.consumed_bytes
            ));
            Ok(ExitCode::SUCCESS)
        }
        Outcome::StoppedOnBudget(name) => {
            info!(files = report.moved.len(), bytes = report.consumed_bytes, stopped_at = %name, "Budget reached");
            out::print_info(&format!(
                "Files have been moved in the order supplied. File {name:?} is too big to be moved within the specified space. Stopping here."
            ));
            out::print_success(&format!(
                "{verb} {} file(s), {} bytes.",
                report.moved.len(),
                report.consumed_bytes
            ));
            Ok(ExitCode::SUCCESS)
        }
        Outcome::Failed { name, cause } => {
            error!(file = %name, phase = %cause.phase, error = %cause, "Move failed");
            out::print_error(&format!(
                "Error while moving file {name:?}: {}. Stopping execution.",
                cause.describe()
            ));
            if !report.moved.is_empty() {
                out::print_info(&format!(
                    "{} file(s) moved before the failure remain in {}.",
                    report.moved.len(),
                    cfg.target.display()
                ));
            }
            Ok(ExitCode::FAILURE)
        }
    }
}

fn print_config_location(args: &Args) {
    if let Some(p) = &args.config {
        out::print_info(&format!("Using config from --config:\n  {}", p.display()));
        return;
    }
    match default_config_path() {
        Ok(p) => {
            out::print_info(&format!("move_upto config path:\n  {}", p.display()));
            if p.exists() {
                out::print_info("A config file exists at that location.");
            } else {
                out::print_info("No config file exists there; defaults and CLI flags are used.");
            }
        }
        Err(e) => out::print_error(&format!("Could not determine a config path: {e}")),
    }
}

/// Hold an exclusive lock on the source directory for the whole run.
/// A source that cannot be opened is left for the selector to report.
fn lock_source(cfg: &Config) -> Result<Option<DirLock>> {
    if cfg.disable_locks {
        debug!("directory locking disabled");
        return Ok(None);
    }
    if !cfg.source.is_dir() {
        return Ok(None);
    }
    match try_lock_dir(&cfg.source)
        .with_context(|| format!("lock source directory '{}'", cfg.source.display()))
    {
        Ok(Some(lock)) => Ok(Some(lock)),
        Ok(None) => bail!(
            "another run is already moving files out of '{}'",
            cfg.source.display()
        ),
        Err(e) => {
            warn!(error = %e, "Could not lock source directory; use --disable-locks to silence");
            Ok(None)
        }
    }
}
