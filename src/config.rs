//! Configuration module.
//!
//! Transforms CLI arguments into a validated configuration that drives
//! the upload-to-merge pipeline. It handles:
//! - Validation of argument combinations
//! - Application of defaults
//! - Parsing of the reorder token list

use anyhow::{Result, bail};
use std::path::PathBuf;

use crate::preview::PageKey;

/// Complete configuration for one pipeline run.
///
/// This structure contains all settings needed to go from uploaded
/// files to a written `final_merged.pdf`, derived and validated from
/// CLI arguments.
#[derive(Debug, Clone)]
pub struct Config {
    /// Uploaded file paths (ZIP, PDF, or JPG), in upload order.
    pub inputs: Vec<PathBuf>,

    /// Output PDF file path.
    pub output: PathBuf,

    /// Explicit page order. `None` keeps the preview order.
    pub order: Option<Vec<PageKey>>,

    /// Number of parallel render jobs (None = auto-detect).
    pub jobs: Option<usize>,

    /// Quiet mode, suppress non-warning output.
    pub quiet: bool,

    /// Verbose output mode.
    pub verbose: bool,

    /// Overwrite an existing output file without complaint.
    pub force: bool,

    /// Print the preview manifest as JSON and exit before merging.
    pub manifest: bool,
}

impl Config {
    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No input files are specified
    /// - Verbose and quiet modes are both enabled
    /// - Jobs count is zero
    /// - The output path collides with an input
    pub fn validate(&self) -> Result<()> {
        if self.inputs.is_empty() {
            bail!("No input files specified");
        }

        if self.verbose && self.quiet {
            bail!("Cannot use both --verbose and --quiet");
        }

        if let Some(jobs) = self.jobs
            && jobs == 0
        {
            bail!("Number of jobs must be at least 1");
        }

        for input in &self.inputs {
            if input == &self.output {
                bail!(
                    "Output file cannot be the same as an input file: {}",
                    self.output.display()
                );
            }
        }

        Ok(())
    }

    /// Get the effective number of parallel render jobs.
    ///
    /// Returns the configured job count, or the number of CPU cores if
    /// auto-detect.
    pub fn effective_jobs(&self) -> usize {
        self.jobs.unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1)
        })
    }

    /// Check if status output should be displayed.
    pub fn should_print(&self) -> bool {
        !self.quiet
    }
}
