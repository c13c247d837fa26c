//! CLI argument parsing.
//!
//! This module defines the command-line interface structure using
//! `clap`. It handles argument parsing, validation, and help text
//! generation.

use clap::Parser;
use std::path::PathBuf;

use crate::config::Config;
use crate::error::{DeckError, Result};
use crate::merge::MERGED_FILENAME;
use crate::reorder;

/// Merge uploaded PDFs, JPGs, and ZIPs of PDFs into a single document.
///
/// pagedeck normalizes a batch of files into page sources, renders a
/// per-page preview set, and assembles the pages into one PDF in the
/// order you choose.
#[derive(Parser, Debug)]
#[command(name = "pagedeck")]
#[command(version)]
#[command(about = "Merge PDFs, JPGs, and ZIPs of PDFs into a single document", long_about = None)]
#[command(author)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// Input files (ZIP, PDF, or JPG), in upload order
    ///
    /// ZIP archives are unpacked and their PDF entries become
    /// individual sources, in archive order. Files of any other kind
    /// are skipped with a warning.
    #[arg(required = true, value_name = "FILE")]
    pub inputs: Vec<PathBuf>,

    /// Output PDF file path
    #[arg(short, long, value_name = "FILE", default_value = MERGED_FILENAME)]
    pub output: PathBuf,

    /// Page order for the merged document
    ///
    /// A comma-separated list of page keys as printed by --manifest,
    /// e.g. "1:1,0:2,0:1". Must name every previewed page exactly
    /// once. Without this flag pages keep their preview order.
    #[arg(long, value_name = "KEYS", value_delimiter = ',')]
    pub order: Option<Vec<String>>,

    /// Number of parallel jobs for rendering previews
    ///
    /// Default is number of CPU cores. Use 1 for sequential rendering.
    #[arg(short, long, value_name = "N")]
    pub jobs: Option<usize>,

    /// Suppress all non-warning output
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Verbose output - show per-source and per-page detail
    #[arg(short, long)]
    pub verbose: bool,

    /// Overwrite an existing output file without erroring
    #[arg(short, long)]
    pub force: bool,

    /// Print the preview manifest as JSON and exit without merging
    ///
    /// Use this to discover the page keys for --order.
    #[arg(long)]
    pub manifest: bool,
}

impl Cli {
    /// Convert CLI arguments into a validated Config.
    ///
    /// # Errors
    ///
    /// Returns an error if an order token is malformed or the resulting
    /// configuration fails validation.
    pub fn to_config(&self) -> Result<Config> {
        let order = match &self.order {
            Some(tokens) => Some(reorder::parse_order(tokens)?),
            None => None,
        };

        let config = Config {
            inputs: self.inputs.clone(),
            output: self.output.clone(),
            order,
            jobs: self.jobs,
            quiet: self.quiet,
            verbose: self.verbose,
            force: self.force,
            manifest: self.manifest,
        };

        config
            .validate()
            .map_err(|e| DeckError::invalid_config(e.to_string()))?;

        Ok(config)
    }

    /// Validate CLI arguments before processing.
    ///
    /// Performs early validation that doesn't require file I/O.
    ///
    /// # Errors
    ///
    /// Returns an error if any validation checks fail.
    pub fn validate(&self) -> Result<()> {
        if self.inputs.is_empty() {
            return Err(DeckError::invalid_config("No input files specified"));
        }

        if let Some(jobs) = self.jobs
            && jobs == 0
        {
            return Err(DeckError::invalid_config(
                "Number of jobs must be at least 1",
            ));
        }

        if let Some(tokens) = &self.order {
            reorder::parse_order(tokens)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intake::SourceId;
    use crate::preview::PageKey;

    fn create_test_cli(inputs: Vec<&str>) -> Cli {
        Cli {
            inputs: inputs.iter().map(PathBuf::from).collect(),
            output: PathBuf::from(MERGED_FILENAME),
            order: None,
            jobs: None,
            quiet: false,
            verbose: false,
            force: false,
            manifest: false,
        }
    }

    #[test]
    fn test_basic_cli_to_config() {
        let cli = create_test_cli(vec!["scans.zip", "cover.jpg"]);
        let config = cli.to_config().unwrap();

        assert_eq!(config.inputs.len(), 2);
        assert_eq!(config.output, PathBuf::from(MERGED_FILENAME));
        assert!(config.order.is_none());
    }

    #[test]
    fn test_cli_with_order() {
        let mut cli = create_test_cli(vec!["a.pdf"]);
        cli.order = Some(vec!["1:1".to_string(), "0:2".to_string()]);

        let config = cli.to_config().unwrap();
        assert_eq!(
            config.order,
            Some(vec![
                PageKey::new(SourceId(1), 1),
                PageKey::new(SourceId(0), 2)
            ])
        );
    }

    #[test]
    fn test_cli_with_malformed_order_token() {
        let mut cli = create_test_cli(vec!["a.pdf"]);
        cli.order = Some(vec!["not-a-key".to_string()]);

        assert!(cli.to_config().is_err());
        assert!(cli.validate().is_err());
    }

    #[test]
    fn test_cli_validate_no_inputs() {
        let mut cli = create_test_cli(vec!["a.pdf"]);
        cli.inputs.clear();

        assert!(cli.validate().is_err());
    }

    #[test]
    fn test_cli_validate_zero_jobs() {
        let mut cli = create_test_cli(vec!["a.pdf"]);
        cli.jobs = Some(0);

        assert!(cli.validate().is_err());
    }

    #[test]
    fn test_cli_parses_comma_separated_order() {
        let cli = Cli::parse_from([
            "pagedeck",
            "a.pdf",
            "--order",
            "0:1,0:2",
            "-o",
            "out.pdf",
        ]);
        assert_eq!(
            cli.order,
            Some(vec!["0:1".to_string(), "0:2".to_string()])
        );
    }
}
