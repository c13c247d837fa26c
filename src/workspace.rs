//! Request-scoped temporary workspace.
//!
//! Every intermediate artifact of one merge request — decoded uploads,
//! extracted ZIP entries, image-derived PDFs — lives inside a single
//! [`Workspace`]. The directory is created per request and removed when
//! the workspace is dropped, on every exit path including early failure.
//! Nothing outlives the request and no ambient process-wide state is
//! involved.

use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::error::Result;

/// Temporary on-disk workspace owning all intermediate files of a request.
#[derive(Debug)]
pub struct Workspace {
    root: TempDir,
    counter: u64,
}

impl Workspace {
    /// Create a fresh workspace directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the temporary directory cannot be created.
    pub fn new() -> Result<Self> {
        let root = tempfile::Builder::new().prefix("pagedeck-").tempdir()?;
        Ok(Self { root, counter: 0 })
    }

    /// Path of the workspace root directory.
    pub fn root(&self) -> &Path {
        self.root.path()
    }

    /// Reserve a unique path inside the workspace.
    ///
    /// The `stem` is only a debugging hint; uniqueness comes from an
    /// internal counter, so colliding upload names never overwrite each
    /// other.
    pub fn alloc(&mut self, stem: &str, extension: &str) -> PathBuf {
        self.counter += 1;
        let safe_stem: String = stem
            .chars()
            .map(|c| if c.is_alphanumeric() { c } else { '_' })
            .take(40)
            .collect();
        self.root
            .path()
            .join(format!("{:04}-{safe_stem}.{extension}", self.counter))
    }

    /// Write bytes to a fresh file inside the workspace and return its path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn store(&mut self, stem: &str, extension: &str, bytes: &[u8]) -> Result<PathBuf> {
        let path = self.alloc(stem, extension);
        std::fs::write(&path, bytes)?;
        Ok(path)
    }
}
