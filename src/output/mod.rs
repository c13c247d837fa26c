//! User-facing output.
//!
//! This module handles console output for the pipeline:
//! - Formatted status messages
//! - Skip and render warnings
//! - Merge summaries
//! - Quiet and verbose modes

pub mod formatter;

pub use formatter::{MessageLevel, OutputFormatter};

use crate::config::Config;
use crate::intake::SkippedUpload;
use crate::io::WriteStatistics;
use crate::merge::MergeStatistics;
use crate::preview::{PreviewImage, RenderWarning};

/// Create an output formatter from configuration.
pub fn create_formatter(config: &Config) -> OutputFormatter {
    OutputFormatter::from_config(config)
}

/// Display the intake and preview outcome: what was accepted, what was
/// skipped, and how many pages are on the table.
pub fn display_ingest_summary(
    formatter: &OutputFormatter,
    skipped: &[SkippedUpload],
    previews: &[PreviewImage],
) {
    for skip in skipped {
        formatter.warning(&format!("Skipping '{}': {}", skip.filename, skip.reason));
    }

    formatter.info(&format!("Previewed {} page(s)", previews.len()));
    for preview in previews {
        formatter.detail(&format!("[{}] {}", preview.key, preview.display_name));
    }
}

/// Display preview warnings for pages that failed to render.
pub fn display_render_warnings(formatter: &OutputFormatter, warnings: &[RenderWarning]) {
    for warning in warnings {
        formatter.warning(&format!(
            "Preview unavailable for '{}': {}",
            warning.display_name, warning.reason
        ));
    }
}

/// Display the merge and write summary.
pub fn display_merge_summary(
    formatter: &OutputFormatter,
    merge: &MergeStatistics,
    write: &WriteStatistics,
) {
    formatter.success(&format!(
        "Merged {} page(s) from {} source(s) into {}",
        merge.total_pages,
        merge.sources_used,
        write.output_path.display()
    ));
    formatter.detail(&format!(
        "Assembly took {:.2}s, wrote {}",
        merge.merge_time.as_secs_f64(),
        write.format_file_size()
    ));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::merge::MERGED_FILENAME;
    use std::path::PathBuf;
    use std::time::Duration;

    fn test_config(quiet: bool, verbose: bool) -> Config {
        Config {
            inputs: vec![PathBuf::from("test.pdf")],
            output: PathBuf::from(MERGED_FILENAME),
            order: None,
            jobs: None,
            quiet,
            verbose,
            force: false,
            manifest: false,
        }
    }

    #[test]
    fn test_create_formatter() {
        let formatter = create_formatter(&test_config(false, false));
        assert!(!formatter.is_quiet());
    }

    #[test]
    fn test_create_formatter_quiet() {
        let formatter = create_formatter(&test_config(true, false));
        assert!(formatter.is_quiet());
    }

    #[test]
    fn test_display_merge_summary_does_not_panic() {
        let formatter = OutputFormatter::quiet();
        let merge = MergeStatistics {
            total_pages: 3,
            sources_used: 2,
            merge_time: Duration::from_millis(120),
        };
        let write = WriteStatistics {
            write_time: Duration::from_millis(5),
            file_size: 1024,
            output_path: PathBuf::from(MERGED_FILENAME),
        };
        display_merge_summary(&formatter, &merge, &write);
    }
}
