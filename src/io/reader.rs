//! Loading of source PDF documents.

use lopdf::Document;
use std::path::{Path, PathBuf};
use tokio::task;

use crate::error::{PdfFoldError, Result};

/// A source document loaded into memory.
#[derive(Debug)]
pub struct LoadedPdf {
    /// The parsed PDF document.
    pub document: Document,

    /// Path the document was read from.
    pub path: PathBuf,

    /// Number of pages in the document.
    pub page_count: usize,
}

/// Reader for source PDFs.
///
/// Parsing happens on the blocking thread pool; the file handle is opened,
/// fully consumed, and released before the next load begins.
#[derive(Debug, Clone)]
pub struct PdfReader {
    /// Reject documents that parse but contain no pages.
    verify: bool,
}

impl PdfReader {
    /// Create a reader with page verification enabled.
    pub fn new() -> Self {
        Self { verify: true }
    }

    /// Create a reader that skips the empty-document check.
    pub fn without_verification() -> Self {
        Self { verify: false }
    }

    /// Load a single PDF.
    ///
    /// # Errors
    ///
    /// Returns an error if the path does not resolve to an existing regular
    /// file, the file is not a parseable PDF, the PDF is encrypted, or it
    /// contains no pages.
    pub async fn load(&self, path: &Path) -> Result<LoadedPdf> {
        if !path.exists() {
            return Err(PdfFoldError::file_not_found(path.to_path_buf()));
        }
        if !path.is_file() {
            return Err(PdfFoldError::not_a_file(path.to_path_buf()));
        }

        let path_buf = path.to_path_buf();
        let verify = self.verify;

        task::spawn_blocking(move || {
            let document = Document::load(&path_buf).map_err(|e| {
                let reason = e.to_string();
                if reason.contains("encrypt") || reason.contains("password") {
                    PdfFoldError::encrypted_pdf(path_buf.clone())
                } else {
                    PdfFoldError::failed_to_load_pdf(path_buf.clone(), reason)
                }
            })?;

            let page_count = document.get_pages().len();
            if verify && page_count == 0 {
                return Err(PdfFoldError::corrupted_pdf(path_buf, "PDF has no pages"));
            }

            Ok(LoadedPdf {
                document,
                path: path_buf,
                page_count,
            })
        })
        .await
        .map_err(|e| PdfFoldError::other(format!("Load task failed: {e}")))?
    }

    /// Load several PDFs in order, aborting on the first failure.
    ///
    /// The accumulating merge never partially flushes, so there is no value
    /// in loading past a broken source; the error propagates and the caller
    /// discards everything loaded so far.
    pub async fn load_sequential(&self, paths: &[PathBuf]) -> Result<Vec<LoadedPdf>> {
        let mut loaded = Vec::with_capacity(paths.len());

        for path in paths {
            loaded.push(self.load(path).await?);
        }

        Ok(loaded)
    }
}

impl Default for PdfReader {
    fn default() -> Self {
        Self::new()
    }
}
