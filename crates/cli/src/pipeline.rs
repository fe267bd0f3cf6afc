//! Discovery → ordering → warming for one root

use pagewarm_config::WarmConfig;
use pagewarm_core::{Result, RunSummary, WarmOutcome};
use pagewarm_discovery::{build_order, default_mapper, Discovery, ExtentMapper};
use pagewarm_utils::CancellationToken;
use pagewarm_warmer::{default_loader, PageLoader, Warmer};
use std::time::Instant;

/// Run the full pipeline with the platform extent mapper and loader
pub fn run<F>(config: &WarmConfig, cancel: &CancellationToken, on_outcome: F) -> Result<RunSummary>
where
    F: Fn(&WarmOutcome) + Sync,
{
    run_with(
        config,
        cancel,
        default_mapper(),
        default_loader(config.max_chunk_bytes),
        on_outcome,
    )
}

/// Run the full pipeline with explicit extent mapper and page loader.
///
/// Only an unusable root (or any error in fail-fast discovery) is returned as
/// `Err`; per-file failures end up in the summary.
pub fn run_with<M, L, F>(
    config: &WarmConfig,
    cancel: &CancellationToken,
    mapper: M,
    loader: L,
    on_outcome: F,
) -> Result<RunSummary>
where
    M: ExtentMapper,
    L: PageLoader,
    F: Fn(&WarmOutcome) + Sync,
{
    let start = Instant::now();

    let discovered = Discovery::with_mapper(mapper)
        .fail_fast(config.fail_fast)
        .run(config.root())?;
    let skipped = discovered.skipped;
    let discovery_failures = discovered.failures;

    let ordered = build_order(discovered.entries);
    tracing::info!(
        files = ordered.len(),
        bytes = ordered.total_bytes(),
        "disk order built"
    );

    let mut summary = Warmer::with_loader(loader)
        .workers(config.workers)
        .timeout(config.timeout)
        .fail_fast(config.fail_fast)
        .cancellation(cancel.clone())
        .run(ordered, on_outcome);

    summary.skipped = skipped;
    summary.failures.splice(0..0, discovery_failures);
    summary.elapsed = start.elapsed();
    Ok(summary)
}
