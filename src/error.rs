//! Error types for pagedeck.
//!
//! This module defines all error types that can occur while normalizing
//! uploads, rendering previews, resolving a reorder, and assembling the
//! merged document. Errors are designed to surface as plain, actionable
//! messages at the user-facing layer, never as raw internal traces.
//!
//! # Error Categories
//!
//! - **Intake Errors**: unusable uploads, broken archives, no content
//! - **Preview Errors**: rasterizer unavailable (per-page failures are
//!   warnings, not errors — see [`crate::preview::RenderWarning`])
//! - **Mapping Errors**: reorder result doesn't match the preview set
//! - **Merge Errors**: a page failed to append during assembly
//! - **I/O Errors**: workspace or output file problems

use std::io;
use std::path::PathBuf;

/// Result type alias for pagedeck operations.
pub type Result<T> = std::result::Result<T, DeckError>;

/// Main error type for pagedeck operations.
#[derive(Debug, thiserror::Error)]
pub enum DeckError {
    /// Normalization produced no page-bearing sources.
    ///
    /// Raised when no uploaded ZIP contained a PDF and no direct PDF or
    /// JPG was uploaded. The pipeline halts before the preview stage.
    #[error(
        "No PDF or JPG content found in the uploaded files\n  \
         Upload at least one PDF, one JPG, or a ZIP containing PDFs"
    )]
    NoContent,

    /// A PDF could not be loaded or parsed.
    #[error("Failed to load PDF: {path}\n  Reason: {reason}", path = .path.display())]
    FailedToLoadPdf {
        /// Path to the PDF file.
        path: PathBuf,
        /// Reason for the failure.
        reason: String,
    },

    /// A PDF loaded but its structure is unusable.
    #[error("Corrupted or invalid PDF: {path}\n  Details: {details}", path = .path.display())]
    CorruptedPdf {
        /// Path to the corrupted PDF.
        path: PathBuf,
        /// Details about the corruption.
        details: String,
    },

    /// An uploaded ZIP archive could not be opened.
    #[error("Failed to open ZIP archive: {name}\n  Reason: {reason}")]
    InvalidArchive {
        /// Declared filename of the upload.
        name: String,
        /// Reason for the failure.
        reason: String,
    },

    /// A ZIP entry is password-protected.
    #[error(
        "ZIP entry is encrypted and cannot be extracted: {entry}\n  \
         Re-create the archive without a password"
    )]
    EncryptedZipEntry {
        /// Entry name within the archive.
        entry: String,
    },

    /// An uploaded image could not be decoded.
    #[error("Failed to decode image: {name}\n  Reason: {reason}")]
    InvalidImage {
        /// Declared filename of the upload.
        name: String,
        /// Reason for the failure.
        reason: String,
    },

    /// The page rasterizer is unavailable.
    #[error("Preview rasterizer unavailable: {reason}")]
    RasterizerUnavailable {
        /// Reason the rasterizer could not be set up.
        reason: String,
    },

    /// The submitted reorder does not match the known preview set.
    ///
    /// Should not occur when the UI boundary is honored, but is checked
    /// defensively before any merge work starts.
    #[error("Reorder result does not match the preview set: {details}")]
    Mapping {
        /// What exactly is wrong with the submitted ordering.
        details: String,
    },

    /// A specific page failed to append during assembly.
    ///
    /// The merge is all-or-nothing: nothing partial is emitted.
    #[error("Failed to assemble page {page} of the merged document\n  Reason: {reason}")]
    MergeFailed {
        /// 1-based index of the output page that failed.
        page: usize,
        /// Description of what went wrong.
        reason: String,
    },

    /// Failed to create the output file.
    #[error("Failed to create output file: {path}\n  Reason: {source}", path = .path.display())]
    FailedToCreateOutput {
        /// Path where output should be created.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// Failed to write to the output file.
    #[error("Failed to write output file: {path}\n  Reason: {source}", path = .path.display())]
    FailedToWrite {
        /// Path being written to.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// Invalid configuration.
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// Description of what's wrong with the configuration.
        message: String,
    },

    /// Generic I/O error.
    #[error("I/O error: {source}")]
    Io {
        /// Underlying I/O error.
        #[from]
        source: io::Error,
    },

    /// Generic error with a custom message.
    #[error("{message}")]
    Other {
        /// Error message.
        message: String,
    },
}

impl From<lopdf::Error> for DeckError {
    fn from(err: lopdf::Error) -> Self {
        Self::other(err.to_string())
    }
}

impl From<anyhow::Error> for DeckError {
    fn from(err: anyhow::Error) -> Self {
        Self::other(err.to_string())
    }
}

impl DeckError {
    /// Create a FailedToLoadPdf error.
    pub fn failed_to_load_pdf(path: PathBuf, reason: impl Into<String>) -> Self {
        Self::FailedToLoadPdf {
            path,
            reason: reason.into(),
        }
    }

    /// Create a CorruptedPdf error.
    pub fn corrupted_pdf(path: PathBuf, details: impl Into<String>) -> Self {
        Self::CorruptedPdf {
            path,
            details: details.into(),
        }
    }

    /// Create an InvalidArchive error.
    pub fn invalid_archive(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidArchive {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Create an InvalidImage error.
    pub fn invalid_image(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidImage {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Create a Mapping error.
    pub fn mapping(details: impl Into<String>) -> Self {
        Self::Mapping {
            details: details.into(),
        }
    }

    /// Create a MergeFailed error for the given 1-based output page.
    pub fn merge_failed(page: usize, reason: impl Into<String>) -> Self {
        Self::MergeFailed {
            page,
            reason: reason.into(),
        }
    }

    /// Create an InvalidConfig error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create an Other error with a custom message.
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other {
            message: message.into(),
        }
    }

    /// Check if this error is recoverable (the pipeline can continue).
    ///
    /// Returns true for per-source failures the preview stage may skip.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::FailedToLoadPdf { .. } | Self::CorruptedPdf { .. } | Self::InvalidImage { .. }
        )
    }

    /// Check if this error should stop all processing immediately.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::NoContent
                | Self::Mapping { .. }
                | Self::MergeFailed { .. }
                | Self::FailedToCreateOutput { .. }
                | Self::FailedToWrite { .. }
        )
    }

    /// Get the process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::NoContent => 1,
            Self::FailedToLoadPdf { .. } => 3,
            Self::CorruptedPdf { .. } => 3,
            Self::InvalidArchive { .. } => 3,
            Self::EncryptedZipEntry { .. } => 3,
            Self::InvalidImage { .. } => 3,
            Self::RasterizerUnavailable { .. } => 4,
            Self::Mapping { .. } => 2,
            Self::MergeFailed { .. } => 6,
            Self::FailedToCreateOutput { .. } => 5,
            Self::FailedToWrite { .. } => 5,
            Self::InvalidConfig { .. } => 1,
            Self::Io { .. } => 5,
            Self::Other { .. } => 1,
        }
    }
}
