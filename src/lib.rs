//! pagedeck - Merge uploaded PDFs, JPGs, and ZIPs of PDFs into a
//! single document.
//!
//! This library implements a four-stage pipeline over a batch of
//! uploaded files:
//!
//! - Intake: unpack ZIPs, pass PDFs through, convert JPGs to one-page
//!   PDFs
//! - Preview: render one thumbnail per page, each tagged with a stable
//!   page key
//! - Reorder: validate a user-supplied page order as a permutation of
//!   the preview set
//! - Merge: assemble the selected pages into one PDF, in exactly that
//!   order
//!
//! # Examples
//!
//! ```no_run
//! use pagedeck::intake::UploadedItem;
//! use pagedeck::pipeline::Pipeline;
//! use pagedeck::preview::PdfiumRasterizer;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let rasterizer = PdfiumRasterizer::new()?;
//! let mut pipeline = Pipeline::new(rasterizer, 4)?;
//!
//! let bytes = std::fs::read("scans.zip")?;
//! let outcome = pipeline.ingest(vec![UploadedItem::new("scans.zip", bytes)]).await?;
//! println!("{} pages previewed", outcome.previews.len());
//!
//! // Keep preview order
//! let merged = pipeline.merge(None).await?;
//! std::fs::write("final_merged.pdf", merged.into_bytes()?)?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod cli;
pub mod config;
pub mod error;
pub mod intake;
pub mod io;
pub mod merge;
pub mod output;
pub mod pipeline;
pub mod preview;
pub mod reorder;
pub mod utils;
pub mod workspace;

// Re-export commonly used types
pub use config::Config;
pub use error::{DeckError, Result};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name.
pub const NAME: &str = env!("CARGO_PKG_NAME");
