//! Document-level page accumulation.
//!
//! The merger owns no I/O. It takes already-loaded documents and produces a
//! single document whose page order is the concatenation of each input's
//! pages in input order, using lopdf object surgery: renumber the incoming
//! document past the accumulator's `max_id`, move its objects across, and
//! splice its page references into the accumulator's page tree.

use lopdf::{Document, Object, ObjectId};
use std::time::{Duration, Instant};

use crate::error::{PdfFoldError, Result};
use crate::io::LoadedPdf;

/// Statistics about a completed merge.
#[derive(Debug, Clone)]
pub struct MergeStatistics {
    /// Number of source documents folded in.
    pub files_merged: usize,

    /// Total pages in the merged document.
    pub total_pages: usize,

    /// Time taken to assemble the document.
    pub merge_time: Duration,
}

/// Combines loaded documents into one accumulator document.
pub struct Merger;

impl Merger {
    /// Create a new merger.
    pub fn new() -> Self {
        Self
    }

    /// Merge `sources` into a single document.
    ///
    /// Pages appear in source order; within each source, in that document's
    /// own page order. The input vector is consumed because the first
    /// source becomes the accumulator.
    ///
    /// # Errors
    ///
    /// Returns an error if `sources` is empty or the page tree of the
    /// accumulator cannot be updated.
    pub fn merge_documents(
        &self,
        sources: Vec<LoadedPdf>,
    ) -> Result<(Document, MergeStatistics)> {
        let start = Instant::now();
        let files_merged = sources.len();

        let mut sources = sources.into_iter();
        let mut merged = sources
            .next()
            .ok_or_else(|| PdfFoldError::merge_failed("No source documents"))?
            .document;

        let mut max_id = merged.max_id;

        for source in sources {
            let mut doc = source.document;

            // Shift object IDs past the accumulator's to avoid collisions.
            doc.renumber_objects_with(max_id + 1);
            max_id = doc.max_id;

            // get_pages is keyed by page number, so values come out in
            // intra-file page order.
            let page_ids: Vec<ObjectId> = doc.get_pages().into_values().collect();

            merged.objects.extend(doc.objects);

            self.append_to_page_tree(&mut merged, &page_ids)?;
        }

        // Renumber for consistency and compress streams before writing.
        merged.renumber_objects();
        merged.compress();

        let statistics = MergeStatistics {
            files_merged,
            total_pages: merged.get_pages().len(),
            merge_time: start.elapsed(),
        };

        Ok((merged, statistics))
    }

    /// Append page references to the accumulator's page tree.
    fn append_to_page_tree(&self, merged: &mut Document, page_ids: &[ObjectId]) -> Result<()> {
        let catalog = merged
            .catalog_mut()
            .map_err(|e| PdfFoldError::merge_failed(format!("Failed to get catalog: {e}")))?;

        let pages_id = catalog
            .get(b"Pages")
            .and_then(|p| p.as_reference())
            .map_err(|e| {
                PdfFoldError::merge_failed(format!("Failed to get pages reference: {e}"))
            })?;

        let pages_obj = merged
            .get_object_mut(pages_id)
            .map_err(|e| PdfFoldError::merge_failed(format!("Failed to get pages object: {e}")))?;

        let Object::Dictionary(dict) = pages_obj else {
            return Err(PdfFoldError::merge_failed(
                "Pages object is not a dictionary",
            ));
        };

        match dict.get_mut(b"Kids") {
            Ok(Object::Array(kids)) => {
                for &page_id in page_ids {
                    kids.push(Object::Reference(page_id));
                }
            }
            _ => {
                return Err(PdfFoldError::merge_failed(
                    "Pages dictionary missing Kids array",
                ));
            }
        }

        let current_count = dict.get(b"Count").and_then(|c| c.as_i64()).unwrap_or(0);
        dict.set("Count", Object::Integer(current_count + page_ids.len() as i64));

        Ok(())
    }
}

impl Default for Merger {
    fn default() -> Self {
        Self::new()
    }
}
