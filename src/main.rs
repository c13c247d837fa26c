//! pagedeck - Merge PDFs, JPGs, and ZIPs of PDFs into a single document.

use clap::Parser;
use std::process;

use pagedeck::cli::Cli;
use pagedeck::error::DeckError;
use pagedeck::intake::UploadedItem;
use pagedeck::io::PdfWriter;
use pagedeck::output::{
    OutputFormatter, display_ingest_summary, display_merge_summary, display_render_warnings,
};
use pagedeck::pipeline::Pipeline;
use pagedeck::preview::{ManifestEntry, PdfiumRasterizer};

#[tokio::main]
async fn main() {
    env_logger::init();

    let cli = Cli::parse();

    if let Err(err) = run(cli).await {
        eprintln!("Error: {err}");
        process::exit(err.exit_code());
    }
}

/// Main application logic.
async fn run(cli: Cli) -> Result<(), DeckError> {
    cli.validate()?;
    let config = cli.to_config()?;

    let formatter = OutputFormatter::from_config(&config);

    if config.should_print() {
        formatter.section(&format!("{} v{}", pagedeck::NAME, pagedeck::VERSION));
        formatter.blank_line();
    }

    // Read the uploads into memory, the same shape a web upload would
    // arrive in.
    let mut items = Vec::with_capacity(config.inputs.len());
    for path in &config.inputs {
        let bytes = tokio::fs::read(path).await?;
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        items.push(UploadedItem::new(filename, bytes));
    }

    let rasterizer = PdfiumRasterizer::new()?;
    let mut pipeline = Pipeline::new(rasterizer, config.effective_jobs())?;

    formatter.info("Preparing page sources...");
    let outcome = pipeline.ingest(items).await?;

    display_ingest_summary(&formatter, &outcome.skipped, &outcome.previews);
    display_render_warnings(&formatter, &outcome.warnings);

    if config.manifest {
        let manifest = ManifestEntry::from_previews(&outcome.previews);
        let json = serde_json::to_string_pretty(&manifest)
            .map_err(|e| DeckError::other(format!("failed to encode manifest: {e}")))?;
        println!("{json}");
        return Ok(());
    }

    let writer = PdfWriter::new();
    writer.can_write(&config.output).await?;
    if !config.force && writer.exists(&config.output).await {
        return Err(DeckError::invalid_config(format!(
            "Output file already exists: {} (use --force to overwrite)",
            config.output.display()
        )));
    }

    formatter.info("Assembling document...");
    let merged = pipeline.merge(config.order.as_deref()).await?;
    let merge_stats = merged.statistics.clone();

    let write_stats = writer
        .save_with_stats(merged.into_bytes()?, &config.output)
        .await?;

    display_merge_summary(&formatter, &merge_stats, &write_stats);

    Ok(())
}
