//! Drives an [`Inspector`] over many repositories.
//!
//! Sequential mode inspects in input order on the calling thread. Parallel mode
//! queues one work item per repository on a bounded rayon pool and collects
//! results from a channel in completion order.

use std::path::PathBuf;

use anyhow::Context;
use crossbeam_channel as chan;
use rayon::prelude::*;

use super::inspect::Inspector;
use super::model::RepoStatus;

/// How repositories are scheduled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanMode {
    /// One repository at a time, output in input order
    Sequential,
    /// Up to `jobs` repositories at a time (`None` = one per CPU), output in completion order
    Parallel { jobs: Option<usize> },
}

/// Inspect every repository and return one record per path.
///
/// Only pool construction can fail; repository failures are carried in the records.
pub fn scan_repositories<I>(
    repos: &[PathBuf],
    mode: ScanMode,
    inspector: &I,
) -> anyhow::Result<Vec<RepoStatus>>
where
    I: Inspector + ?Sized,
{
    match mode {
        ScanMode::Sequential => Ok(repos.iter().map(|path| inspector.inspect(path)).collect()),
        ScanMode::Parallel { jobs } => scan_parallel(repos, jobs, inspector),
    }
}

fn scan_parallel<I>(
    repos: &[PathBuf],
    jobs: Option<usize>,
    inspector: &I,
) -> anyhow::Result<Vec<RepoStatus>>
where
    I: Inspector + ?Sized,
{
    // 0 lets rayon pick (RAYON_NUM_THREADS or the CPU count)
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(jobs.unwrap_or(0))
        .thread_name(|i| format!("gsw-scan-{i}"))
        .build()
        .context("Failed to start scan worker pool")?;
    log::debug!(
        "Scanning {} repositories on {} workers",
        repos.len(),
        pool.current_num_threads()
    );

    let (tx, rx) = chan::unbounded::<RepoStatus>();

    pool.install(|| {
        repos.par_iter().for_each(|path| {
            let status = inspector.inspect(path);
            // The receiver outlives the pool, so sending can't fail
            let _ = tx.send(status);
        });
    });

    // Drop the original sender so the receiver sees the end of the stream
    drop(tx);
    Ok(rx.into_iter().collect())
}
