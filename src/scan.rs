//! Folder scanning and merge planning.
//!
//! This module decides which files qualify as merge inputs, in what order
//! their pages are concatenated, and where each folder's output lands. A
//! file qualifies when it has a `.pdf` extension (case-insensitive) and its
//! name does not contain the output marker, so re-running pdffold over a
//! folder never folds a previous output back into a new merge.

use serde::Serialize;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::error::{PdfFoldError, Result};
use crate::utils::base_name;

/// Prefix given to every merged output file.
pub const OUTPUT_PREFIX: &str = "merge_";

/// Substring that disqualifies a filename from being a merge input.
const OUTPUT_MARKER: &str = "merge";

/// One unit of work: merge every qualifying PDF directly inside `dir`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FolderTask {
    /// Directory supplying the source documents.
    pub dir: PathBuf,

    /// Label used to name the output, normally the directory's base name.
    pub label: String,
}

impl FolderTask {
    /// Create a task with an explicit label.
    pub fn new(dir: PathBuf, label: impl Into<String>) -> Self {
        Self {
            dir,
            label: label.into(),
        }
    }

    /// Create a task labelled with the directory's own base name.
    pub fn for_dir(dir: &Path) -> Self {
        Self::new(dir.to_path_buf(), base_name(dir))
    }

    /// Where this task writes its merged document.
    ///
    /// Always inside the source directory, overwriting silently if present.
    pub fn output_path(&self) -> PathBuf {
        self.dir.join(format!("{OUTPUT_PREFIX}{}.pdf", self.label))
    }
}

/// Whether a filename qualifies as a merge input.
///
/// The marker check is case-insensitive, so `Merge_scans.pdf` left behind by
/// another tool is excluded along with our own outputs.
pub fn is_qualifying_name(name: &str) -> bool {
    let lower = name.to_ascii_lowercase();
    lower.ends_with(".pdf") && !lower.contains(OUTPUT_MARKER)
}

/// Collect the qualifying PDFs directly inside `dir`, sorted by filename.
///
/// Non-recursive. The sort is lexicographic on the raw filename, which fixes
/// the page order of the merged output. An empty result is not an error;
/// callers treat it as a benign no-op.
///
/// # Errors
///
/// Returns an error if `dir` does not exist, is not a directory, or cannot
/// be read.
pub async fn scan_folder(dir: &Path) -> Result<Vec<PathBuf>> {
    ensure_directory(dir).await?;

    let mut names: Vec<OsString> = Vec::new();
    let mut entries = tokio::fs::read_dir(dir).await?;

    while let Some(entry) = entries.next_entry().await? {
        let file_type = entry.file_type().await?;
        if !file_type.is_file() {
            continue;
        }

        let name = entry.file_name();
        if is_qualifying_name(&name.to_string_lossy()) {
            names.push(name);
        }
    }

    names.sort();

    Ok(names.into_iter().map(|name| dir.join(name)).collect())
}

/// Plan the folder tasks for a tree merge rooted at `root`.
///
/// Each immediate subdirectory becomes one task labelled with its base name.
/// A root without subdirectories is treated as a single mergeable folder
/// itself, so the tool works whether pointed at a container of subfolders or
/// directly at a folder of loose PDFs.
///
/// # Errors
///
/// Returns an error if `root` does not exist, is not a directory, or cannot
/// be enumerated.
pub async fn plan_tasks(root: &Path) -> Result<Vec<FolderTask>> {
    ensure_directory(root).await?;

    let mut subdirs: Vec<PathBuf> = Vec::new();
    let mut entries = tokio::fs::read_dir(root).await?;

    while let Some(entry) = entries.next_entry().await? {
        if entry.file_type().await?.is_dir() {
            subdirs.push(entry.path());
        }
    }

    if subdirs.is_empty() {
        return Ok(vec![FolderTask::for_dir(root)]);
    }

    // Deterministic task order; read_dir order is platform-dependent.
    subdirs.sort();

    Ok(subdirs.iter().map(|dir| FolderTask::for_dir(dir)).collect())
}

/// Verify that `path` exists and is a directory.
async fn ensure_directory(path: &Path) -> Result<()> {
    let metadata = match tokio::fs::metadata(path).await {
        Ok(metadata) => metadata,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Err(PdfFoldError::file_not_found(path.to_path_buf()));
        }
        Err(err) => return Err(err.into()),
    };

    if !metadata.is_dir() {
        return Err(PdfFoldError::not_a_directory(path.to_path_buf()));
    }

    Ok(())
}
