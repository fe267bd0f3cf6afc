//! Fixed-size worker pool that warms files in disk order

use crate::loader::{default_loader, DefaultLoader, PageLoader};
use crate::queue::WorkQueue;
use pagewarm_core::constants::MAX_TRANSFER_CHUNK;
use pagewarm_core::{FileEntry, FileFailure, Phase, RunSummary, StopReason, WarmOutcome, WarmReport};
use pagewarm_discovery::OrderedFileList;
use pagewarm_utils::logging::warm_span;
use pagewarm_utils::CancellationToken;
use parking_lot::Mutex;
use std::thread;
use std::time::{Duration, Instant};

/// Drains an [`OrderedFileList`] with a fixed number of threads
///
/// Files are offered to workers in disk order; completion order is not
/// guaranteed. Every worker stops for good once the queue is empty, the
/// token is cancelled, the deadline passes, or (in fail-fast mode) any file
/// fails. A worker always finishes the file it is on before stopping.
pub struct Warmer<L = DefaultLoader> {
    loader: L,
    workers: usize,
    timeout: Option<Duration>,
    fail_fast: bool,
    cancel: CancellationToken,
}

struct Shared<'a> {
    queue: WorkQueue,
    deadline: Option<Instant>,
    summary: Mutex<RunSummary>,
    stop: Mutex<Option<StopReason>>,
    on_outcome: &'a (dyn Fn(&WarmOutcome) + Sync),
}

impl<'a> Shared<'a> {
    fn stop_with(&self, reason: StopReason) {
        let mut stop = self.stop.lock();
        if stop.is_none() {
            *stop = Some(reason);
        }
    }

    fn stopped(&self) -> bool {
        self.stop.lock().is_some()
    }
}

impl Warmer<DefaultLoader> {
    /// Warmer with the platform loader and one worker per CPU
    pub fn new() -> Self {
        Self::with_loader(default_loader(MAX_TRANSFER_CHUNK))
    }
}

impl Default for Warmer<DefaultLoader> {
    fn default() -> Self {
        Self::new()
    }
}

impl<L: PageLoader> Warmer<L> {
    pub fn with_loader(loader: L) -> Self {
        Self {
            loader,
            workers: num_workers(),
            timeout: None,
            fail_fast: false,
            cancel: CancellationToken::new(),
        }
    }

    pub fn workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }

    pub fn timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn fail_fast(mut self, enabled: bool) -> Self {
        self.fail_fast = enabled;
        self
    }

    pub fn cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    /// Warm every file in `files`, calling `on_outcome` as each one finishes.
    ///
    /// Returns after all workers have exited. Failures are collected in the
    /// summary, never propagated.
    pub fn run<F>(&self, files: OrderedFileList, on_outcome: F) -> RunSummary
    where
        F: Fn(&WarmOutcome) + Sync,
    {
        let start = Instant::now();
        let total = files.len();
        let worker_count = self.workers.min(total);

        let span = warm_span(total, worker_count);
        let _guard = span.enter();

        let shared = Shared {
            queue: WorkQueue::preload(files),
            deadline: self.timeout.map(|t| start + t),
            summary: Mutex::new(RunSummary {
                discovered: total,
                ..Default::default()
            }),
            stop: Mutex::new(None),
            on_outcome: &on_outcome,
        };

        thread::scope(|scope| {
            for id in 0..worker_count {
                let shared = &shared;
                let spawned = thread::Builder::new()
                    .name(format!("pagewarm-worker-{id}"))
                    .spawn_scoped(scope, move || self.work(id, shared));
                if let Err(err) = spawned {
                    tracing::error!(worker = id, error = %err, "failed to spawn worker");
                    break;
                }
            }
        });

        let Shared {
            queue,
            summary,
            stop,
            ..
        } = shared;
        let mut summary = summary.into_inner();
        summary.unclaimed = queue.remaining();
        summary.stop_reason = match stop.into_inner() {
            // An interrupt that landed after the last claim stopped nothing
            Some(StopReason::Cancelled | StopReason::TimedOut) if summary.unclaimed == 0 => None,
            // Only reachable when no worker could be spawned
            None if summary.unclaimed > 0 => Some(StopReason::Cancelled),
            reason => reason,
        };
        summary.elapsed = start.elapsed();

        tracing::info!(
            warmed = summary.warmed,
            failed = summary.failed(),
            unclaimed = summary.unclaimed,
            bytes = summary.bytes_warmed,
            elapsed_ms = summary.elapsed.as_millis() as u64,
            "warming finished"
        );
        summary
    }

    fn work(&self, id: usize, shared: &Shared<'_>) {
        let span = tracing::debug_span!("worker", worker = id);
        let _guard = span.enter();

        loop {
            if shared.stopped() {
                break;
            }
            if let Some(reason) = self.interrupted(shared) {
                shared.stop_with(reason);
                break;
            }
            let Some(entry) = shared.queue.claim() else {
                break;
            };

            let outcome = self.warm_one(&entry);
            if outcome.is_err() && self.fail_fast {
                shared.stop_with(StopReason::FailFast);
            }

            (shared.on_outcome)(&outcome);
            shared.summary.lock().record(outcome);
        }

        tracing::debug!("worker exiting");
    }

    fn interrupted(&self, shared: &Shared<'_>) -> Option<StopReason> {
        if self.cancel.is_cancelled() {
            return Some(StopReason::Cancelled);
        }
        match shared.deadline {
            Some(deadline) if Instant::now() >= deadline => Some(StopReason::TimedOut),
            _ => None,
        }
    }

    fn warm_one(&self, entry: &FileEntry) -> WarmOutcome {
        let started = Instant::now();
        match self.loader.load(entry) {
            Ok(transfer) => {
                tracing::debug!(
                    path = %entry.path().display(),
                    order_key = %entry.order_key(),
                    chunks = transfer.chunks,
                    bytes = transfer.bytes,
                    elapsed_us = started.elapsed().as_micros() as u64,
                    "warmed"
                );
                Ok(WarmReport::new(entry, transfer.chunks, transfer.bytes))
            }
            Err(err) => {
                tracing::error!(path = %entry.path().display(), error = %err, "warming failed");
                Err(FileFailure::new(Phase::Warm, entry.path(), &err))
            }
        }
    }
}

fn num_workers() -> usize {
    num_cpus::get().max(1)
}
