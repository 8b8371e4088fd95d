//! pdffold merges folders of PDF files into one combined document per
//! folder.
//!
//! Given a root directory, each immediate subdirectory becomes an
//! independent merge task: its PDFs are concatenated in sorted filename
//! order and written back into the folder as `merge_<folder>.pdf`. A pair
//! mode concatenates two explicitly named files instead.
//!
//! Previously produced outputs are recognised by name and never consumed as
//! inputs, so running over the same tree twice simply rewrites the same
//! documents.
//!
//! # Example
//!
//! ```no_run
//! use pdffold::config::Config;
//! use pdffold::merge;
//! use pdffold::output::OutputFormatter;
//!
//! # async fn run() -> pdffold::Result<()> {
//! let config = Config::default();
//! let formatter = OutputFormatter::from_config(&config);
//! let outcomes = merge::merge_tree("scans".as_ref(), &config, &formatter).await?;
//! println!("merged {} folder(s)", outcomes.len());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod cli;
pub mod config;
pub mod error;
pub mod io;
pub mod merge;
pub mod output;
pub mod scan;
pub mod utils;

pub use config::Config;
pub use error::{PdfFoldError, Result};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name.
pub const NAME: &str = env!("CARGO_PKG_NAME");
