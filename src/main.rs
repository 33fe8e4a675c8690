use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use log::LevelFilter;
use tracing_log::AsTrace;
use tracing_subscriber::EnvFilter;

use mount_chown::api::errors::exit_code_for_report;
use mount_chown::constants::DEFAULT_LOG_LEVEL;
use mount_chown::logging::{parse_log_level, LogSink};
use mount_chown::oci::{run_hook, HookOptions};
use mount_chown::types::ApplyMode;
use mount_chown::MountChown;

#[derive(Parser, Debug)]
#[command(name = "mount_chown", version)]
#[command(about = "Invoked as a createContainer OCI hook to chown specific mount points")]
struct Args {
    /// Log messages above specified level (trace, debug, info, warn, warning, error, fatal, panic)
    #[arg(long, default_value = DEFAULT_LOG_LEVEL, value_parser = level_arg)]
    log_level: LevelFilter,

    /// Host-visible container root; defaults to the root.path of the bundle config
    #[arg(long)]
    container_root: Option<PathBuf>,

    /// Apply requests whose path is not a declared mount destination too
    #[arg(long)]
    all_paths: bool,

    /// Report what would change without touching the filesystem
    #[arg(long)]
    dry_run: bool,

    /// Exit non-zero when any request did not fully succeed
    #[arg(long)]
    fail_on_error: bool,
}

fn level_arg(s: &str) -> std::result::Result<LevelFilter, String> {
    parse_log_level(s).map_err(|e| e.msg)
}

// Runtimes capture a hook's stderr; RUST_LOG, when set, overrides --log-level.
fn init_logging(level: LevelFilter) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::default().add_directive(level.as_trace().into()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!(e))
        .context("failed to initialize logging")
}

fn main() -> ExitCode {
    let args = Args::parse();
    if let Err(e) = init_logging(args.log_level) {
        eprintln!("{e:#}");
        return ExitCode::FAILURE;
    }
    log::info!("Run mount_chown {}", env!("CARGO_PKG_VERSION"));

    match run(&args) {
        Ok(code) => code,
        Err(e) => {
            log::error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<ExitCode> {
    let mode = if args.dry_run {
        ApplyMode::DryRun
    } else {
        ApplyMode::Commit
    };
    let api = MountChown::new(LogSink, LogSink).with_mode(mode);

    let container_root = args
        .container_root
        .as_deref()
        .map(std::path::absolute)
        .transpose()
        .context("failed to resolve --container-root")?;
    let options = HookOptions {
        container_root,
        all_paths: args.all_paths,
    };

    let report = run_hook(std::io::stdin().lock(), &options, &api)?;
    log::info!("Done");

    if args.fail_on_error {
        if let Some(code) = exit_code_for_report(&report) {
            return Ok(ExitCode::from(u8::try_from(code).unwrap_or(1)));
        }
    }
    Ok(ExitCode::SUCCESS)
}
