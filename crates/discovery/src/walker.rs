//! Tree traversal producing one entry per regular file

use crate::extent::{default_mapper, DefaultMapper, ExtentMapper};
use crate::resolver::resolve_entry;
use pagewarm_core::{Error, FileEntry, FileFailure, Phase, Result};
use std::path::Path;
use walkdir::WalkDir;

/// Entries and failures collected from one traversal
#[derive(Debug, Default)]
pub struct DiscoveryOutcome {
    pub entries: Vec<FileEntry>,
    pub failures: Vec<FileFailure>,
    /// Symlinks, FIFOs, sockets and device nodes that were not warmed
    pub skipped: usize,
}

/// Walks a root directory and resolves order keys
///
/// Symbolic links are never followed; links and special files are skipped
/// and counted. Directories are descended into but contribute no entry.
pub struct Discovery<M = DefaultMapper> {
    mapper: M,
    fail_fast: bool,
}

impl Discovery<DefaultMapper> {
    /// Discovery using the platform extent mapper
    pub fn new() -> Self {
        Self::with_mapper(default_mapper())
    }
}

impl Default for Discovery<DefaultMapper> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: ExtentMapper> Discovery<M> {
    pub fn with_mapper(mapper: M) -> Self {
        Self {
            mapper,
            fail_fast: false,
        }
    }

    /// Abort on the first per-file error instead of recording it
    pub fn fail_fast(mut self, enabled: bool) -> Self {
        self.fail_fast = enabled;
        self
    }

    /// Traverse `root` and resolve every regular file beneath it.
    ///
    /// Only an unusable root is fatal unless fail-fast is enabled; per-file
    /// errors are collected in [`DiscoveryOutcome::failures`].
    pub fn run(&self, root: &Path) -> Result<DiscoveryOutcome> {
        let span = tracing::info_span!("discover", root = %root.display());
        let _guard = span.enter();

        let metadata = std::fs::metadata(root)
            .map_err(|e| Error::invalid_root(root, e.to_string()))?;
        if !metadata.is_dir() {
            return Err(Error::invalid_root(root, "not a directory"));
        }

        let mut outcome = DiscoveryOutcome::default();

        for item in WalkDir::new(root).follow_links(false) {
            let entry = match item {
                Ok(entry) => entry,
                Err(err) => {
                    let path = err.path().map(Path::to_path_buf).unwrap_or_default();
                    self.record_failure(&mut outcome, &path, Error::from(err))?;
                    continue;
                }
            };

            let file_type = entry.file_type();
            if file_type.is_dir() {
                continue;
            }
            if !file_type.is_file() {
                tracing::debug!(
                    path = %entry.path().display(),
                    symlink = file_type.is_symlink(),
                    "skipping non-regular file"
                );
                outcome.skipped += 1;
                continue;
            }

            match resolve_entry(&self.mapper, entry.path()) {
                Ok(file) => outcome.entries.push(file),
                Err(err) => self.record_failure(&mut outcome, entry.path(), err)?,
            }
        }

        tracing::info!(
            files = outcome.entries.len(),
            skipped = outcome.skipped,
            failed = outcome.failures.len(),
            "discovery finished"
        );
        Ok(outcome)
    }

    fn record_failure(
        &self,
        outcome: &mut DiscoveryOutcome,
        path: &Path,
        err: Error,
    ) -> Result<()> {
        if self.fail_fast {
            return Err(err);
        }
        tracing::error!(path = %path.display(), error = %err, "discovery failed");
        outcome
            .failures
            .push(FileFailure::new(Phase::Discovery, path, &err));
        Ok(())
    }
}
