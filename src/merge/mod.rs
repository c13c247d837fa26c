//! Merge assembly.
//!
//! Turns a validated page selection into a single output PDF.

pub mod assembler;

pub use assembler::{MergeStatistics, MergedDocument, PageAssembler};

/// Default filename for the assembled document.
pub const MERGED_FILENAME: &str = "final_merged.pdf";

/// MIME type of the assembled document.
pub const MERGED_MIME: &str = "application/pdf";
