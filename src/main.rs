//! Binary entry point for `patch-mdtools`.
//!
//! ## Usage
//!
//! ```bash
//! # Patch ../../MD-tools/mdtools/openmm/sim.py relative to this binary
//! patch-mdtools
//!
//! # Patch an explicit file, preview only
//! patch-mdtools --target ~/src/MD-tools/mdtools/openmm/sim.py --dry-run
//! ```

use std::io::{self, IsTerminal, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};

use mdtools_patch::error::PatchError;
use mdtools_patch::locate;
use mdtools_patch::output::{emit_response, targeting_line, ErrorResponse};
use mdtools_patch::{PatchOptions, PatchReport, Patcher};

// ============================================================================
// CLI Structure
// ============================================================================

/// Patch MD-tools' OpenMM simulation module for PowerPC.
///
/// Rewrites `value * u.unit` arguments in `mdtools/openmm/sim.py` into plain
/// floats and injects the `_strip_val` helper they rely on.
#[derive(Parser, Debug)]
#[command(name = "patch-mdtools", version, about)]
struct Cli {
    /// File to patch (default: ../../MD-tools/mdtools/openmm/sim.py next to this binary).
    #[arg(long)]
    target: Option<PathBuf>,

    /// Show the changes as a unified diff without writing them.
    #[arg(long)]
    dry_run: bool,

    /// Output format.
    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Log level for tracing output (overridden by RUST_LOG).
    #[arg(long, value_enum, default_value = "warn")]
    log_level: LogLevel,
}

/// Output format for the report.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Human-readable progress text (default).
    #[default]
    Text,
    /// Single JSON object.
    Json,
}

/// Log level for tracing output.
#[derive(Clone, Copy, Debug, ValueEnum)]
enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    fn to_tracing_level(self) -> tracing::Level {
        match self {
            LogLevel::Trace => tracing::Level::TRACE,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Error => tracing::Level::ERROR,
        }
    }
}

// ============================================================================
// Main Entry Point
// ============================================================================

fn main() -> ExitCode {
    let cli = Cli::parse();

    init_tracing(cli.log_level);

    let format = cli.format;
    match execute(cli) {
        Ok(report) => {
            let mut stdout = io::stdout();
            match format {
                OutputFormat::Text => {
                    let _ = stdout.write_all(report.render_text().as_bytes());
                }
                OutputFormat::Json => {
                    let _ = emit_response(&report, &mut stdout);
                }
            }
            let _ = stdout.flush();
            ExitCode::SUCCESS
        }
        Err(err) => {
            let mut stdout = io::stdout();
            match format {
                OutputFormat::Text => {
                    let _ = writeln!(stdout, "{}", err);
                }
                OutputFormat::Json => {
                    let _ = emit_response(&ErrorResponse::from_error(&err), &mut stdout);
                }
            }
            let _ = stdout.flush();
            ExitCode::from(err.exit_status().code())
        }
    }
}

/// Initialize tracing subscriber.
fn init_tracing(level: LogLevel) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.to_tracing_level().to_string()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(io::stderr().is_terminal())
        .with_writer(io::stderr)
        .init();
}

/// Resolve the target, announce it, and run the patcher.
fn execute(cli: Cli) -> Result<PatchReport, PatchError> {
    let target = match cli.target {
        Some(path) => path,
        None => locate::default_target()?,
    };

    if cli.format == OutputFormat::Text {
        println!("{}", targeting_line(&target));
    }

    let patcher = Patcher::builtin()?;
    patcher.patch(
        &target,
        PatchOptions {
            dry_run: cli.dry_run,
        },
    )
}
