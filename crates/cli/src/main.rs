use clap::Parser;
use eyre::WrapErr;
use pagewarm::{exit, output::ReportPrinter, pipeline, ReportFormat};
use pagewarm_config::ConfigLoader;
use pagewarm_core::{RunSummary, StopReason};
use pagewarm_utils::{hibernate, install_cancel_handler, logging, CancellationToken};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "pagewarm")]
#[command(
    about = "Warm the page cache for a directory tree, reading files in physical disk order",
    long_about = None
)]
#[command(version)]
struct Cli {
    /// Directory whose files should be loaded into the page cache
    #[arg(short, long)]
    root: PathBuf,

    /// Stay alive after warming until SIGINT/SIGTERM (sidecar mode)
    #[arg(long)]
    enable_hibernate: bool,

    /// Number of worker threads (default: number of CPUs)
    #[arg(short = 'j', long)]
    workers: Option<usize>,

    /// Stop claiming files after this many seconds of warming
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,

    /// Abort on the first discovery or warming error
    #[arg(long)]
    fail_fast: bool,

    /// Print one JSON object per file instead of text lines
    #[arg(long, conflicts_with = "quiet")]
    json: bool,

    /// Do not print per-file lines
    #[arg(short, long)]
    quiet: bool,
}

impl Cli {
    fn format(&self) -> ReportFormat {
        if self.json {
            ReportFormat::Json
        } else if self.quiet {
            ReportFormat::Quiet
        } else {
            ReportFormat::Text
        }
    }

    fn loader(&self) -> ConfigLoader {
        let mut loader = ConfigLoader::new().root(&self.root);
        if let Some(workers) = self.workers {
            loader = loader.workers(workers);
        }
        if let Some(secs) = self.timeout {
            loader = loader.timeout(Duration::from_secs(secs));
        }
        // Flags can only switch these on; absent flags leave room for the env
        if self.fail_fast {
            loader = loader.fail_fast(true);
        }
        if self.enable_hibernate {
            loader = loader.hibernate(true);
        }
        loader
    }
}

fn main() -> eyre::Result<ExitCode> {
    color_eyre::install()?;
    let cli = Cli::parse();

    logging::init().map_err(|e| eyre::eyre!("failed to initialize logging: {e}"))?;

    let config = cli
        .loader()
        .with_env()
        .and_then(ConfigLoader::build)
        .wrap_err("invalid configuration")?;

    let cancel = CancellationToken::new();
    install_cancel_handler(cancel.clone())?;

    tracing::info!(
        root = %config.root.display(),
        workers = config.workers,
        fail_fast = config.fail_fast,
        hibernate = config.hibernate,
        "starting"
    );

    let printer = ReportPrinter::stdout(cli.format());
    let summary = pipeline::run(&config, &cancel, |outcome| printer.outcome(outcome))
        .wrap_err_with(|| format!("failed to warm {}", config.root.display()))?;
    printer.summary(&summary);
    log_summary(&summary);

    if config.hibernate && summary.stop_reason != Some(StopReason::Cancelled) {
        hibernate(&cancel);
    }

    Ok(exit::exit_code(&summary))
}

fn log_summary(summary: &RunSummary) {
    tracing::info!(
        discovered = summary.discovered,
        warmed = summary.warmed,
        failed = summary.failed(),
        skipped = summary.skipped,
        unclaimed = summary.unclaimed,
        bytes = summary.bytes_warmed,
        chunks = summary.chunks,
        elapsed_ms = summary.elapsed.as_millis() as u64,
        "run summary"
    );

    if let Some(reason) = summary.stop_reason {
        tracing::warn!(?reason, unclaimed = summary.unclaimed, "warming stopped early");
    }
}
