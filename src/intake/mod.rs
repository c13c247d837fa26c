//! Input normalization.
//!
//! The Input Normalizer turns a heterogeneous batch of uploads — ZIP
//! archives, PDFs, JPG images — into a flat, ordered list of page-bearing
//! [`PageSource`] files inside the request workspace:
//!
//! - ZIP: every `.pdf` entry (case-insensitive) becomes a source, in
//!   archive entry order
//! - PDF: written through as-is; may carry multiple pages
//! - JPEG: converted to a one-page PDF ([`jpeg::convert_to_pdf`])
//! - anything else: rejected with a per-file warning
//!
//! If the whole batch yields no sources, normalization fails with
//! [`DeckError::NoContent`] and the pipeline stops before the preview
//! stage.

pub mod jpeg;
pub mod zip;

use std::fmt;
use std::path::PathBuf;

use log::warn;
use serde::{Deserialize, Serialize};

use crate::error::{DeckError, Result};
use crate::workspace::Workspace;

/// Declared upload kind, sniffed from the filename extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadKind {
    /// ZIP archive, expanded for `.pdf` entries.
    Zip,
    /// PDF document, used directly.
    Pdf,
    /// JPEG image (`.jpg` or `.jpeg`), converted to a one-page PDF.
    Jpeg,
}

impl UploadKind {
    /// Sniff the kind from a filename extension, case-insensitively.
    ///
    /// Returns None for unsupported extensions; no content sniffing is
    /// performed beyond the extension.
    pub fn from_name(name: &str) -> Option<Self> {
        let ext = std::path::Path::new(name).extension()?;
        if ext.eq_ignore_ascii_case("zip") {
            Some(Self::Zip)
        } else if ext.eq_ignore_ascii_case("pdf") {
            Some(Self::Pdf)
        } else if ext.eq_ignore_ascii_case("jpg") || ext.eq_ignore_ascii_case("jpeg") {
            Some(Self::Jpeg)
        } else {
            None
        }
    }
}

/// One uploaded file: raw bytes plus the declared filename.
///
/// Ephemeral — consumed by [`Normalizer::normalize`] and discarded.
#[derive(Debug, Clone)]
pub struct UploadedItem {
    /// Declared filename, used for kind sniffing and display.
    pub filename: String,
    /// Raw file contents.
    pub bytes: Vec<u8>,
}

impl UploadedItem {
    /// Create an uploaded item from a filename and its contents.
    pub fn new(filename: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            filename: filename.into(),
            bytes,
        }
    }

    /// Sniffed kind of this upload, if supported.
    pub fn kind(&self) -> Option<UploadKind> {
        UploadKind::from_name(&self.filename)
    }
}

/// Stable identifier of one page source within a request.
///
/// Assigned sequentially during normalization; previews and the final
/// ordering refer to sources only through this id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SourceId(pub usize);

impl fmt::Display for SourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One page-bearing PDF file in the request workspace.
///
/// May itself carry multiple pages (a direct PDF upload) or exactly one
/// (an image-derived PDF). Owned by the workspace; lives for one request.
#[derive(Debug, Clone)]
pub struct PageSource {
    /// Stable identifier within this request.
    pub id: SourceId,
    /// Location of the PDF file inside the workspace.
    pub path: PathBuf,
    /// User-facing name: the upload filename, or `archive/entry` for
    /// sources pulled out of a ZIP.
    pub display_name: String,
}

/// An upload the normalizer rejected, with the reason.
#[derive(Debug, Clone, Serialize)]
pub struct SkippedUpload {
    /// Declared filename of the rejected upload.
    pub filename: String,
    /// Why it was skipped.
    pub reason: String,
}

/// Outcome of normalizing one upload batch.
#[derive(Debug)]
pub struct NormalizeReport {
    /// Ordered page sources, at least one.
    pub sources: Vec<PageSource>,
    /// Uploads that were rejected, for user-visible warnings.
    pub skipped: Vec<SkippedUpload>,
}

/// Normalizer expanding uploads into workspace-backed page sources.
#[derive(Debug, Default)]
pub struct Normalizer;

impl Normalizer {
    /// Create a new normalizer.
    pub fn new() -> Self {
        Self
    }

    /// Normalize an upload batch into ordered page sources.
    ///
    /// Sources come out in upload order; a ZIP fans out into its `.pdf`
    /// entries in archive entry order at the position of the archive.
    /// Unsupported extensions are skipped and reported, not fatal.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - a ZIP cannot be opened or an entry fails to extract
    /// - a JPEG cannot be decoded
    /// - no page source remains after the whole batch ([`DeckError::NoContent`])
    pub fn normalize(
        &self,
        items: Vec<UploadedItem>,
        workspace: &mut Workspace,
    ) -> Result<NormalizeReport> {
        let mut sources = Vec::new();
        let mut skipped = Vec::new();

        for item in items {
            match item.kind() {
                Some(UploadKind::Zip) => {
                    for entry in zip::extract_pdf_entries(&item.filename, &item.bytes)? {
                        let stem = entry_stem(&entry.name);
                        let path = workspace.store(stem, "pdf", &entry.bytes)?;
                        sources.push(PageSource {
                            id: SourceId(sources.len()),
                            path,
                            display_name: format!("{}/{}", item.filename, entry.name),
                        });
                    }
                }
                Some(UploadKind::Pdf) => {
                    let stem = entry_stem(&item.filename);
                    let path = workspace.store(stem, "pdf", &item.bytes)?;
                    sources.push(PageSource {
                        id: SourceId(sources.len()),
                        path,
                        display_name: item.filename,
                    });
                }
                Some(UploadKind::Jpeg) => {
                    let mut doc = jpeg::convert_to_pdf(&item.filename, &item.bytes)?;
                    let stem = entry_stem(&item.filename);
                    let path = workspace.alloc(stem, "pdf");
                    doc.save(&path)
                        .map_err(|e| DeckError::invalid_image(&item.filename, e.to_string()))?;
                    sources.push(PageSource {
                        id: SourceId(sources.len()),
                        path,
                        display_name: item.filename,
                    });
                }
                None => {
                    warn!("skipping unsupported upload: {}", item.filename);
                    skipped.push(SkippedUpload {
                        filename: item.filename,
                        reason: "unsupported file extension".to_string(),
                    });
                }
            }
        }

        if sources.is_empty() {
            return Err(DeckError::NoContent);
        }

        Ok(NormalizeReport { sources, skipped })
    }
}

/// Filename stem for workspace allocation, without the extension.
fn entry_stem(name: &str) -> &str {
    std::path::Path::new(name)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("upload")
}
