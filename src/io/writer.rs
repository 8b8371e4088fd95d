//! Saving of merged output documents.
//!
//! Writes are atomic: the document is serialized to a sibling temp file and
//! renamed into place, so a crash mid-write never leaves a truncated
//! `merge_*.pdf` behind. An existing file at the output path is replaced
//! silently.

use lopdf::Document;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tokio::task;

use crate::error::{PdfFoldError, Result};

/// Statistics about a completed write.
#[derive(Debug, Clone)]
pub struct WriteStatistics {
    /// Time taken to serialize and rename the file.
    pub write_time: Duration,

    /// Size of the written file in bytes.
    pub file_size: u64,

    /// Final output path.
    pub output_path: PathBuf,
}

/// Writer for merged documents.
#[derive(Debug, Clone)]
pub struct PdfWriter {
    buffer_size: usize,
}

impl PdfWriter {
    /// Create a writer with the default buffer size.
    pub fn new() -> Self {
        Self { buffer_size: 8192 }
    }

    /// Save a document to `path`, overwriting any existing file.
    ///
    /// # Errors
    ///
    /// Returns an error if the temp file cannot be created, serialization
    /// fails, or the rename into place fails.
    pub async fn save(&self, doc: &Document, path: &Path) -> Result<WriteStatistics> {
        let path_buf = path.to_path_buf();
        let buffer_size = self.buffer_size;

        // lopdf serialization is CPU-bound and mutates the document, so the
        // clone and the write both happen off the async runtime.
        let mut doc_clone = doc.clone();

        task::spawn_blocking(move || {
            let start = Instant::now();
            let tmp_path = path_buf.with_extension("pdf.tmp");

            let file = std::fs::File::create(&tmp_path).map_err(|e| {
                PdfFoldError::FailedToCreateOutput {
                    path: tmp_path.clone(),
                    source: e,
                }
            })?;

            let mut writer = std::io::BufWriter::with_capacity(buffer_size, file);

            doc_clone
                .save_to(&mut writer)
                .map_err(|e| PdfFoldError::FailedToWrite {
                    path: tmp_path.clone(),
                    source: std::io::Error::other(e),
                })?;

            writer.flush().map_err(|e| PdfFoldError::FailedToWrite {
                path: tmp_path.clone(),
                source: e,
            })?;

            std::fs::rename(&tmp_path, &path_buf).map_err(|e| PdfFoldError::FailedToWrite {
                path: path_buf.clone(),
                source: e,
            })?;

            let write_time = start.elapsed();
            let file_size = std::fs::metadata(&path_buf).map(|m| m.len()).unwrap_or(0);

            Ok(WriteStatistics {
                write_time,
                file_size,
                output_path: path_buf,
            })
        })
        .await
        .map_err(|e| PdfFoldError::other(format!("Write task failed: {e}")))?
    }
}

impl Default for PdfWriter {
    fn default() -> Self {
        Self::new()
    }
}
