//! Runtime configuration for pdffold.
//!
//! The configuration carries only behavioral switches; the paths being
//! operated on are explicit arguments to the merge operations. There is no
//! process-wide state.

use anyhow::{Result, bail};

/// Settings shared by every merge operation.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Suppress all non-error output.
    pub quiet: bool,

    /// Show per-file detail while merging.
    pub verbose: bool,

    /// Number of folder tasks to run concurrently (None = auto-detect).
    pub jobs: Option<usize>,

    /// Abort a tree merge at the first failing folder instead of
    /// continuing with siblings.
    pub fail_fast: bool,

    /// Emit a JSON summary of the completed tasks on stdout.
    pub json: bool,
}

impl Config {
    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if verbose and quiet are both enabled, or if a job
    /// count of zero was requested.
    pub fn validate(&self) -> Result<()> {
        if self.verbose && self.quiet {
            bail!("Cannot use both --verbose and --quiet");
        }

        if let Some(jobs) = self.jobs
            && jobs == 0
        {
            bail!("Number of jobs must be at least 1");
        }

        Ok(())
    }

    /// Effective number of concurrent folder tasks.
    ///
    /// Folder tasks write into disjoint directories, so running them in
    /// parallel does not change observable output.
    pub fn effective_jobs(&self) -> usize {
        self.jobs.unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1)
        })
    }
}
