//! ZIP archive expansion.
//!
//! Uploaded ZIP archives are scanned for `.pdf` entries (case-insensitive)
//! which are decompressed into memory in archive entry order. Entry order
//! is whatever the archive stored — typically the directory-walk order of
//! whoever built it, not sorted. That nondeterminism is inherited from the
//! archive and deliberately not "fixed" here.

use std::io::{Cursor, Read};
use std::path::{Component, Path, PathBuf};

use log::warn;
use zip::ZipArchive;

use crate::error::{DeckError, Result};

/// A `.pdf` entry pulled out of an uploaded archive.
#[derive(Debug, Clone)]
pub struct ZipPdfEntry {
    /// Sanitized entry name within the archive.
    pub name: String,
    /// Decompressed entry contents.
    pub bytes: Vec<u8>,
}

/// Sanitize an archive entry path to prevent traversal (e.g. `../../etc/passwd`).
///
/// Strips parent references, current-dir references, root prefixes, and
/// drive letters. Returns None if nothing remains.
fn sanitize_entry_path(raw: &str) -> Option<PathBuf> {
    let path = Path::new(raw);
    let mut sanitized = PathBuf::new();

    for component in path.components() {
        if let Component::Normal(part) = component {
            sanitized.push(part);
        }
    }

    if sanitized.as_os_str().is_empty() {
        None
    } else {
        Some(sanitized)
    }
}

/// Check whether an entry name carries a `.pdf` extension, case-insensitively.
fn is_pdf_entry(name: &str) -> bool {
    Path::new(name)
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"))
}

/// Extract every `.pdf` entry from a ZIP archive, in archive entry order.
///
/// Directories and non-PDF entries are skipped silently; entries with
/// traversal-style names are skipped with a warning. An archive containing
/// no PDFs yields an empty vector — the caller decides whether that makes
/// the whole request empty.
///
/// # Errors
///
/// Returns an error if the archive itself cannot be opened, or if a PDF
/// entry is password-protected or fails to decompress.
pub fn extract_pdf_entries(archive_name: &str, bytes: &[u8]) -> Result<Vec<ZipPdfEntry>> {
    let mut archive = ZipArchive::new(Cursor::new(bytes))
        .map_err(|e| DeckError::invalid_archive(archive_name, e.to_string()))?;

    let mut entries = Vec::new();

    for i in 0..archive.len() {
        let mut zip_file = archive
            .by_index(i)
            .map_err(|e| DeckError::invalid_archive(archive_name, e.to_string()))?;

        if zip_file.is_dir() {
            continue;
        }

        let raw_name = zip_file.name().to_string();
        if !is_pdf_entry(&raw_name) {
            continue;
        }

        if zip_file.encrypted() {
            return Err(DeckError::EncryptedZipEntry { entry: raw_name });
        }

        let Some(sanitized) = sanitize_entry_path(&raw_name) else {
            warn!("skipping ZIP entry with invalid path: {raw_name}");
            continue;
        };
        let name = sanitized.to_string_lossy().to_string();

        let mut contents = Vec::with_capacity(zip_file.size() as usize);
        zip_file
            .read_to_end(&mut contents)
            .map_err(|e| DeckError::invalid_archive(archive_name, e.to_string()))?;

        entries.push(ZipPdfEntry {
            name,
            bytes: contents,
        });
    }

    Ok(entries)
}
