//! Output writing.
//!
//! Writes the assembled PDF to disk atomically: the bytes land in a
//! sibling temp file first and are renamed into place only after a
//! successful flush, so a failed write never leaves a truncated
//! `final_merged.pdf` behind.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tokio::task;

use crate::error::{DeckError, Result};
use crate::utils::format_file_size;

/// Statistics about a write operation.
#[derive(Debug, Clone)]
pub struct WriteStatistics {
    /// Time taken to write the file.
    pub write_time: Duration,

    /// Size of the written file in bytes.
    pub file_size: u64,

    /// Path where the file was written.
    pub output_path: PathBuf,
}

impl WriteStatistics {
    /// Format file size as human-readable string.
    pub fn format_file_size(&self) -> String {
        format_file_size(self.file_size)
    }
}

/// Writes assembled PDF bytes to their final destination.
pub struct PdfWriter {
    buffer_size: usize,
}

impl PdfWriter {
    /// Create a writer with the default buffer size.
    pub fn new() -> Self {
        Self { buffer_size: 8192 }
    }

    /// Write the document bytes to `path` and return statistics.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The temp file cannot be created
    /// - The write or flush fails
    /// - The rename into place fails
    pub async fn save_with_stats(&self, bytes: Vec<u8>, path: &Path) -> Result<WriteStatistics> {
        let path_buf = path.to_path_buf();
        let buffer_size = self.buffer_size;

        task::spawn_blocking(move || {
            let start = Instant::now();

            let tmp_path = path_buf.with_extension("tmp");

            let file =
                std::fs::File::create(&tmp_path).map_err(|e| DeckError::FailedToCreateOutput {
                    path: tmp_path.clone(),
                    source: e,
                })?;

            let mut writer = std::io::BufWriter::with_capacity(buffer_size, file);
            writer
                .write_all(&bytes)
                .and_then(|()| writer.flush())
                .map_err(|e| DeckError::FailedToWrite {
                    path: tmp_path.clone(),
                    source: e,
                })?;

            std::fs::rename(&tmp_path, &path_buf).map_err(|e| DeckError::FailedToWrite {
                path: path_buf.clone(),
                source: e,
            })?;

            Ok(WriteStatistics {
                write_time: start.elapsed(),
                file_size: bytes.len() as u64,
                output_path: path_buf,
            })
        })
        .await
        .map_err(|e| DeckError::other(format!("write task failed: {e}")))?
    }

    /// Pre-flight check that `path` can be written.
    ///
    /// # Errors
    ///
    /// Returns an error if the parent directory does not exist or is
    /// read-only.
    pub async fn can_write(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            if !parent.exists() {
                return Err(DeckError::invalid_config(format!(
                    "Output directory does not exist: {}",
                    parent.display()
                )));
            }

            let metadata = tokio::fs::metadata(parent).await.map_err(DeckError::from)?;
            if metadata.permissions().readonly() {
                return Err(DeckError::invalid_config(format!(
                    "Output directory is not writable: {}",
                    parent.display()
                )));
            }
        }

        Ok(())
    }

    /// Check if the output file already exists.
    pub async fn exists(&self, path: &Path) -> bool {
        tokio::fs::metadata(path).await.is_ok()
    }
}

impl Default for PdfWriter {
    fn default() -> Self {
        Self::new()
    }
}
