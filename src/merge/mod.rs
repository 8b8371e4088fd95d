//! High-level merge operations.
//!
//! Three entry points built from the same primitives:
//! [`merge_folder`] consolidates one directory, [`merge_pair`] concatenates
//! exactly two named files, and [`merge_tree`] plans and runs one folder
//! task per immediate subdirectory of a root.

pub mod merger;

pub use merger::{MergeStatistics, Merger};

use futures::stream::{self, StreamExt};
use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::error::{PdfFoldError, Result};
use crate::io::{PdfReader, PdfWriter};
use crate::output::OutputFormatter;
use crate::scan::{self, FolderTask};
use crate::utils::{base_name, format_file_size};

/// What one merge invocation produced.
///
/// `output` is `None` when the folder held no qualifying PDFs; that case is
/// a benign no-op, not a failure.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MergeOutcome {
    /// Folder the sources came from.
    pub folder: PathBuf,

    /// Label used for the output name.
    pub label: String,

    /// Path of the written document, if anything was written.
    pub output: Option<PathBuf>,

    /// Number of source files folded in.
    pub files: usize,

    /// Total pages in the output.
    pub pages: usize,
}

impl MergeOutcome {
    fn skipped(task: &FolderTask) -> Self {
        Self {
            folder: task.dir.clone(),
            label: task.label.clone(),
            output: None,
            files: 0,
            pages: 0,
        }
    }
}

/// Merge every qualifying PDF directly inside `task.dir` into
/// `task.output_path()`.
///
/// Sources are loaded one at a time in sorted filename order and folded
/// into a single accumulator, which is written once at the end. A folder
/// with no qualifying PDFs is reported and skipped without writing.
///
/// # Errors
///
/// Returns an error if the directory cannot be scanned, any source fails to
/// load or parse, or the output cannot be written. Nothing is written in
/// any of those cases.
pub async fn merge_folder(task: &FolderTask, formatter: &OutputFormatter) -> Result<MergeOutcome> {
    let sources = scan::scan_folder(&task.dir).await?;

    if sources.is_empty() {
        formatter.info(&format!("No PDF files found in {}", task.dir.display()));
        return Ok(MergeOutcome::skipped(task));
    }

    formatter.info(&format!(
        "Merging {} PDF file(s) in {}",
        sources.len(),
        task.dir.display()
    ));
    for (idx, path) in sources.iter().enumerate() {
        formatter.debug(&format!("{}. {}", idx + 1, base_name(path)));
    }

    let loaded = PdfReader::new().load_sequential(&sources).await?;
    let (document, stats) = Merger::new().merge_documents(loaded)?;

    let output = task.output_path();
    let write_stats = PdfWriter::new().save(&document, &output).await?;

    formatter.success(&format!(
        "Created {} ({} pages, {})",
        output.display(),
        stats.total_pages,
        format_file_size(write_stats.file_size)
    ));

    Ok(MergeOutcome {
        folder: task.dir.clone(),
        label: task.label.clone(),
        output: Some(output),
        files: stats.files_merged,
        pages: stats.total_pages,
    })
}

/// Concatenate exactly two PDFs, first's pages before second's.
///
/// The output lands next to the first file, named after its parent
/// directory: `<parent>/merge_<parent-name>.pdf`.
///
/// # Errors
///
/// Both paths must resolve to existing regular files before anything is
/// read; otherwise the operation aborts with no output written. Parse
/// failures propagate the same way.
pub async fn merge_pair(
    first: &Path,
    second: &Path,
    formatter: &OutputFormatter,
) -> Result<MergeOutcome> {
    for path in [first, second] {
        if !path.exists() {
            return Err(PdfFoldError::file_not_found(path.to_path_buf()));
        }
        if !path.is_file() {
            return Err(PdfFoldError::not_a_file(path.to_path_buf()));
        }
    }

    let parent = match first.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };

    // Label with the resolved directory name so a relative first path still
    // yields a meaningful output name.
    let resolved = parent.canonicalize().unwrap_or_else(|_| parent.clone());
    let task = FolderTask::new(parent, base_name(&resolved));

    formatter.info(&format!(
        "Merging {} + {}",
        first.display(),
        second.display()
    ));

    let loaded = PdfReader::new()
        .load_sequential(&[first.to_path_buf(), second.to_path_buf()])
        .await?;
    let (document, stats) = Merger::new().merge_documents(loaded)?;

    let output = task.output_path();
    let write_stats = PdfWriter::new().save(&document, &output).await?;

    formatter.success(&format!(
        "Created {} ({} pages, {})",
        output.display(),
        stats.total_pages,
        format_file_size(write_stats.file_size)
    ));

    Ok(MergeOutcome {
        folder: task.dir.clone(),
        label: task.label.clone(),
        output: Some(output),
        files: stats.files_merged,
        pages: stats.total_pages,
    })
}

/// Merge each folder under `root` independently.
///
/// Folder tasks touch disjoint directories, so they run concurrently up to
/// `config.effective_jobs()`. A folder whose sources fail to load, parse or
/// merge is reported and skipped without stopping its siblings; errors
/// outside a single folder's sources, such as a failure to write output,
/// abort the run. `config.fail_fast` aborts on any failure.
///
/// # Errors
///
/// Returns an error if `root` is not an existing directory, if any task hit
/// a non-recoverable error, if all folder tasks failed, or (with
/// `fail_fast`) on the first task failure.
pub async fn merge_tree(
    root: &Path,
    config: &Config,
    formatter: &OutputFormatter,
) -> Result<Vec<MergeOutcome>> {
    let tasks = scan::plan_tasks(root).await?;

    if config.fail_fast {
        let mut outcomes = Vec::with_capacity(tasks.len());
        for task in &tasks {
            outcomes.push(merge_folder(task, formatter).await?);
        }
        return Ok(outcomes);
    }

    let jobs = config.effective_jobs().max(1);

    let mut results: Vec<(FolderTask, Result<MergeOutcome>)> =
        stream::iter(tasks.into_iter().map(|task| async move {
            let outcome = merge_folder(&task, formatter).await;
            (task, outcome)
        }))
        .buffer_unordered(jobs)
        .collect()
        .await;

    // buffer_unordered yields in completion order; report deterministically.
    results.sort_by(|a, b| a.0.dir.cmp(&b.0.dir));

    let total = results.len();
    let mut outcomes = Vec::new();
    let mut failed = 0;

    for (task, result) in results {
        match result {
            Ok(outcome) => outcomes.push(outcome),
            Err(err) if err.is_recoverable() => {
                failed += 1;
                formatter.error(&format!("Skipping {}: {err}", task.dir.display()));
            }
            Err(err) => return Err(err),
        }
    }

    if failed > 0 {
        if outcomes.is_empty() {
            return Err(PdfFoldError::TasksFailed { failed, total });
        }
        formatter.warning(&format!("{failed} of {total} folder(s) failed to merge"));
    }

    Ok(outcomes)
}
