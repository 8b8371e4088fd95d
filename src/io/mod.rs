//! PDF file I/O.
//!
//! Reading and writing are split: [`reader::PdfReader`] loads source
//! documents one at a time with a scoped file handle per read, and
//! [`writer::PdfWriter`] serializes the accumulated output exactly once,
//! atomically.

pub mod reader;
pub mod writer;

pub use reader::{LoadedPdf, PdfReader};
pub use writer::{PdfWriter, WriteStatistics};
