//! CLI argument parsing for pdffold.
//!
//! Two subcommands cover the two entry points; running with no subcommand
//! drops into the interactive line-prompt menu handled by the binary.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::Config;
use crate::error::{PdfFoldError, Result};

/// Merge folders of PDF files into one combined document per folder.
///
/// Outputs are named `merge_<folder>.pdf` and written next to their
/// sources. Files whose names contain "merge" are never used as inputs, so
/// re-running over the same tree is safe.
#[derive(Parser, Debug)]
#[command(name = "pdffold")]
#[command(version)]
#[command(about = "Merge folders of PDF files into per-folder documents", long_about = None)]
pub struct Cli {
    /// What to merge; omit for the interactive menu.
    #[command(subcommand)]
    pub command: Option<MergeCommand>,

    /// Suppress all non-error output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Show per-file detail while merging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Number of folder tasks to run concurrently
    ///
    /// Folder tasks write into disjoint directories, so concurrency does
    /// not change the produced files. Default is the number of CPU cores;
    /// use 1 for strictly sequential processing.
    #[arg(short, long, global = true, value_name = "N")]
    pub jobs: Option<usize>,

    /// Stop at the first folder that fails to merge
    ///
    /// By default a failing folder is reported and its siblings are still
    /// processed, since each folder is an independent unit of work.
    #[arg(long, global = true)]
    pub fail_fast: bool,

    /// Print a JSON summary of the completed merges on stdout
    #[arg(long, global = true)]
    pub json: bool,
}

/// The merge operation to run.
#[derive(Subcommand, Debug)]
pub enum MergeCommand {
    /// Merge exactly two PDFs into one document
    ///
    /// Pages of FIRST precede pages of SECOND. The output is written next
    /// to FIRST as `merge_<parent-dir-name>.pdf`.
    Pair {
        /// First input PDF; its pages come first
        #[arg(value_name = "FIRST")]
        first: PathBuf,

        /// Second input PDF
        #[arg(value_name = "SECOND")]
        second: PathBuf,
    },

    /// Merge the PDFs in each folder directly under ROOT
    ///
    /// Every immediate subdirectory gets its own `merge_<name>.pdf`. A
    /// root without subdirectories is merged as a single folder itself.
    Tree {
        /// Root folder to walk
        #[arg(value_name = "ROOT")]
        root: PathBuf,
    },
}

impl Cli {
    /// Convert CLI flags into a validated [`Config`].
    ///
    /// # Errors
    ///
    /// Returns an error for conflicting or out-of-range flag values.
    pub fn to_config(&self) -> Result<Config> {
        let config = Config {
            quiet: self.quiet,
            verbose: self.verbose,
            jobs: self.jobs,
            fail_fast: self.fail_fast,
            json: self.json,
        };

        config
            .validate()
            .map_err(|e| PdfFoldError::invalid_config(e.to_string()))?;

        Ok(config)
    }
}
