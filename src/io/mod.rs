//! File writing operations.

pub mod writer;

pub use writer::{PdfWriter, WriteStatistics};
