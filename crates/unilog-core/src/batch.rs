//! Batch execution.
//!
//! Batch forms (many bridge LUTs, many image pairs, a directory of LUTs
//! concatenated with one file) are lists of independent units. They run
//! on a bounded rayon pool, each unit's failure is recorded without
//! aborting the others, and a [`CancelToken`] stops scheduling new units.
//!
//! Directory modes share [`pair_by_name`] / [`list_files`], which know
//! nothing about the operation they feed.

use crate::{Classify, CoreError, CoreResult, ErrorKind};
use rayon::prelude::*;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, info, trace};

/// Cooperative cancellation flag shared between a caller and a batch.
///
/// Cancelling stops new units from starting; units already running
/// finish normally.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    /// Creates a token in the "not cancelled" state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    /// Returns true once [`cancel`](Self::cancel) has been called.
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Result of one batch unit.
#[derive(Debug, Clone, PartialEq)]
pub enum BatchOutcome<T> {
    /// The unit completed.
    Done(T),
    /// The unit failed.
    Failed {
        /// Rendered error message.
        message: String,
        /// Classified kind.
        kind: ErrorKind,
    },
    /// The unit was never started because the batch was cancelled.
    Cancelled,
}

/// One labelled unit in a [`BatchReport`].
#[derive(Debug, Clone, PartialEq)]
pub struct BatchItem<T> {
    /// Human-readable label (usually a file name).
    pub label: String,
    /// What happened.
    pub outcome: BatchOutcome<T>,
}

impl<T> BatchItem<T> {
    /// Returns the value when the unit succeeded.
    pub fn value(&self) -> Option<&T> {
        match &self.outcome {
            BatchOutcome::Done(v) => Some(v),
            _ => None,
        }
    }
}

/// Per-item results of a batch, in submission order.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchReport<T> {
    /// One entry per submitted unit.
    pub items: Vec<BatchItem<T>>,
}

impl<T> BatchReport<T> {
    /// Number of units that completed.
    pub fn succeeded(&self) -> usize {
        self.items
            .iter()
            .filter(|i| matches!(i.outcome, BatchOutcome::Done(_)))
            .count()
    }

    /// Number of units that failed.
    pub fn failed(&self) -> usize {
        self.items
            .iter()
            .filter(|i| matches!(i.outcome, BatchOutcome::Failed { .. }))
            .count()
    }

    /// Number of units skipped by cancellation.
    pub fn cancelled(&self) -> usize {
        self.items
            .iter()
            .filter(|i| matches!(i.outcome, BatchOutcome::Cancelled))
            .count()
    }

    /// True only if every unit completed.
    pub fn is_success(&self) -> bool {
        self.items
            .iter()
            .all(|i| matches!(i.outcome, BatchOutcome::Done(_)))
    }

    /// Iterates over completed values with their labels.
    pub fn values(&self) -> impl Iterator<Item = (&str, &T)> {
        self.items
            .iter()
            .filter_map(|i| i.value().map(|v| (i.label.as_str(), v)))
    }
}

/// Runs independent units on a bounded worker pool.
#[derive(Debug, Clone)]
pub struct BatchRunner {
    workers: usize,
    cancel: CancelToken,
}

impl BatchRunner {
    /// Creates a runner with `workers` threads (0 = all available cores).
    ///
    /// The count is capped at the number of available cores.
    pub fn new(workers: usize) -> Self {
        let cores = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1);
        let workers = match workers {
            0 => cores,
            n => n.min(cores),
        };
        Self {
            workers,
            cancel: CancelToken::new(),
        }
    }

    /// Attaches a cancellation token.
    pub fn with_cancel(mut self, token: CancelToken) -> Self {
        self.cancel = token;
        self
    }

    /// Resolved worker count.
    pub fn workers(&self) -> usize {
        self.workers
    }

    /// The token this runner checks before each unit.
    pub fn cancel_token(&self) -> &CancelToken {
        &self.cancel
    }

    /// Runs `op` over every `(label, input)` unit.
    ///
    /// Only pool construction can fail; unit failures are recorded in the
    /// report. Items come back in submission order.
    pub fn run<I, T, E, F>(&self, units: Vec<(String, I)>, op: F) -> CoreResult<BatchReport<T>>
    where
        I: Send,
        T: Send,
        E: std::fmt::Display + Classify,
        F: Fn(I) -> Result<T, E> + Sync + Send,
    {
        trace!(units = units.len(), workers = self.workers, "BatchRunner::run");

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.workers)
            .build()
            .map_err(|e| CoreError::ThreadPool(e.to_string()))?;

        let cancel = &self.cancel;
        let op = &op;
        let items: Vec<BatchItem<T>> = pool.install(|| {
            units
                .into_par_iter()
                .map(|(label, input)| {
                    if cancel.is_cancelled() {
                        debug!(%label, "skipped (cancelled)");
                        return BatchItem {
                            label,
                            outcome: BatchOutcome::Cancelled,
                        };
                    }
                    let outcome = match op(input) {
                        Ok(v) => BatchOutcome::Done(v),
                        Err(e) => {
                            debug!(%label, error = %e, "unit failed");
                            BatchOutcome::Failed {
                                message: e.to_string(),
                                kind: e.kind(),
                            }
                        }
                    };
                    BatchItem { label, outcome }
                })
                .collect()
        });

        let report = BatchReport { items };
        info!(
            success = report.succeeded(),
            failed = report.failed(),
            cancelled = report.cancelled(),
            "batch complete"
        );
        Ok(report)
    }
}

/// Lists files in `dir` whose extension matches one of `extensions`
/// (case-insensitive), sorted by path.
pub fn list_files(dir: &Path, extensions: &[&str]) -> CoreResult<Vec<PathBuf>> {
    if !dir.exists() {
        return Err(CoreError::FileNotFound(dir.to_path_buf()));
    }
    if !dir.is_dir() {
        return Err(CoreError::NotADirectory(dir.to_path_buf()));
    }

    let options = glob::MatchOptions {
        case_sensitive: false,
        ..Default::default()
    };
    let base = glob::Pattern::escape(&dir.to_string_lossy());

    let mut files = Vec::new();
    for ext in extensions {
        let pattern = format!("{base}/*.{ext}");
        let paths = glob::glob_with(&pattern, options)
            .map_err(|e| CoreError::Settings(format!("bad pattern {pattern}: {e}")))?;
        files.extend(paths.filter_map(|p| p.ok()).filter(|p| p.is_file()));
    }
    files.sort();
    files.dedup();
    Ok(files)
}

/// Files matched by name across two directories.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Pairing {
    /// `(file name, path in A, path in B)`, sorted by name.
    pub pairs: Vec<(String, PathBuf, PathBuf)>,
    /// Names present only in the first directory.
    pub only_in_a: Vec<String>,
    /// Names present only in the second directory.
    pub only_in_b: Vec<String>,
}

/// Pairs files with the same file name in `dir_a` and `dir_b`.
///
/// Only files with one of `extensions` take part.
pub fn pair_by_name(dir_a: &Path, dir_b: &Path, extensions: &[&str]) -> CoreResult<Pairing> {
    let index = |dir: &Path| -> CoreResult<BTreeMap<String, PathBuf>> {
        Ok(list_files(dir, extensions)?
            .into_iter()
            .filter_map(|p| {
                let name = p.file_name()?.to_string_lossy().into_owned();
                Some((name, p))
            })
            .collect())
    };

    let a = index(dir_a)?;
    let mut b = index(dir_b)?;

    let mut pairing = Pairing::default();
    for (name, path_a) in a {
        match b.remove(&name) {
            Some(path_b) => pairing.pairs.push((name, path_a, path_b)),
            None => pairing.only_in_a.push(name),
        }
    }
    pairing.only_in_b = b.into_keys().collect();

    debug!(
        pairs = pairing.pairs.len(),
        only_a = pairing.only_in_a.len(),
        only_b = pairing.only_in_b.len(),
        "paired directories"
    );
    Ok(pairing)
}
