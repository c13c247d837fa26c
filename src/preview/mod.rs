//! Preview rendering.
//!
//! The Preview Renderer walks the ordered page sources and produces one
//! low-resolution thumbnail per page, tagged with a synthetic [`PageKey`]
//! that identifies the page through the rest of the pipeline. Output
//! order is source order, then ascending page order within each source.
//!
//! Rendering of independent pages has no cross-dependencies, so pages are
//! rasterized on a bounded number of blocking workers and re-sorted by
//! index afterwards to preserve the contract order.
//!
//! A source that cannot be opened or a page that cannot be rasterized
//! becomes a [`RenderWarning`], not an error: a partial preview set (and
//! later a partial merge) is more useful than none.

pub mod key;
pub mod rasterizer;

pub use key::PageKey;
pub use rasterizer::{PREVIEW_TARGET_WIDTH, PageRasterizer, PdfiumRasterizer};

use std::path::PathBuf;
use std::sync::Arc;

use futures::stream::{self, StreamExt};
use image::codecs::jpeg::JpegEncoder;
use serde::Serialize;

use crate::error::{DeckError, Result};
use crate::intake::{PageSource, SourceId};

/// JPEG quality for preview thumbnails.
const PREVIEW_JPEG_QUALITY: u8 = 80;

/// A thumbnail of exactly one page of exactly one source.
#[derive(Debug, Clone)]
pub struct PreviewImage {
    /// Synthetic identifier carried through the reorder boundary.
    pub key: PageKey,
    /// User-facing name of the source this page belongs to.
    pub display_name: String,
    /// JPEG-encoded thumbnail bytes.
    pub bytes: Vec<u8>,
    /// Thumbnail width in pixels.
    pub width: u32,
    /// Thumbnail height in pixels.
    pub height: u32,
}

/// A page or source that failed to rasterize.
///
/// Recorded and surfaced to the user; the pipeline continues with the
/// remaining pages.
#[derive(Debug, Clone, Serialize)]
pub struct RenderWarning {
    /// The source that failed.
    pub source: SourceId,
    /// User-facing name of the source.
    pub display_name: String,
    /// What went wrong.
    pub reason: String,
}

/// One row of the preview manifest handed to the UI boundary.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ManifestEntry {
    /// Opaque reorder token (`"<source>:<page>"`).
    pub key: String,
    /// User-facing source name.
    pub source: String,
    /// 1-based page index within the source.
    pub page: u32,
    /// Thumbnail width in pixels.
    pub width: u32,
    /// Thumbnail height in pixels.
    pub height: u32,
}

impl ManifestEntry {
    /// Build the manifest rows for a preview set, in preview order.
    pub fn from_previews(previews: &[PreviewImage]) -> Vec<Self> {
        previews
            .iter()
            .map(|p| Self {
                key: p.key.to_string(),
                source: p.display_name.clone(),
                page: p.key.page,
                width: p.width,
                height: p.height,
            })
            .collect()
    }
}

/// Renders the preview set for a request.
pub struct PreviewRenderer<R: PageRasterizer + 'static> {
    rasterizer: Arc<R>,
    jobs: usize,
}

impl<R: PageRasterizer + 'static> PreviewRenderer<R> {
    /// Create a renderer with the given rasterizer and worker budget.
    pub fn new(rasterizer: R, jobs: usize) -> Self {
        Self {
            rasterizer: Arc::new(rasterizer),
            jobs: jobs.max(1),
        }
    }

    /// Render one thumbnail per page across all sources.
    ///
    /// Returns the previews in source order then page order, plus the
    /// warnings for anything that failed to rasterize. For every source
    /// that renders cleanly, the (source, page) → preview mapping is a
    /// bijection: one preview per existing page, no duplicates.
    pub async fn render_all(
        &self,
        sources: &[PageSource],
    ) -> (Vec<PreviewImage>, Vec<RenderWarning>) {
        let mut warnings = Vec::new();

        // Enumerate (source, page) units up front so output order is
        // fixed regardless of render completion order.
        let mut units: Vec<(PageSource, u32)> = Vec::new();
        for source in sources {
            match page_count(source.path.clone()).await {
                Ok(0) => warnings.push(RenderWarning {
                    source: source.id,
                    display_name: source.display_name.clone(),
                    reason: "PDF has no pages".to_string(),
                }),
                Ok(count) => units.extend((1..=count).map(|page| (source.clone(), page))),
                Err(e) => warnings.push(RenderWarning {
                    source: source.id,
                    display_name: source.display_name.clone(),
                    reason: e.to_string(),
                }),
            }
        }

        let tasks = units.into_iter().enumerate().map(|(idx, (source, page))| {
            let rasterizer = Arc::clone(&self.rasterizer);
            let meta = (source.id, source.display_name.clone());
            async move {
                let result = tokio::task::spawn_blocking(move || {
                    render_one(rasterizer.as_ref(), &source, page)
                })
                .await
                .unwrap_or_else(|e| Err(DeckError::other(format!("render task failed: {e}"))));
                (idx, meta, result)
            }
        });

        let mut indexed: Vec<_> = stream::iter(tasks)
            .buffer_unordered(self.jobs)
            .collect::<Vec<_>>()
            .await;

        // Restore contract order: source order, then ascending page
        indexed.sort_by_key(|(idx, _, _)| *idx);

        let mut previews = Vec::with_capacity(indexed.len());
        for (_, (source_id, display_name), result) in indexed {
            match result {
                Ok(preview) => previews.push(preview),
                Err(e) => warnings.push(RenderWarning {
                    source: source_id,
                    display_name,
                    reason: e.to_string(),
                }),
            }
        }

        (previews, warnings)
    }
}

/// Rasterize and JPEG-encode one page.
fn render_one<R: PageRasterizer + ?Sized>(
    rasterizer: &R,
    source: &PageSource,
    page: u32,
) -> Result<PreviewImage> {
    let img = rasterizer.rasterize(&source.path, page)?;

    let rgb = img.to_rgb8();
    let (width, height) = rgb.dimensions();

    let mut bytes = Vec::new();
    let mut encoder = JpegEncoder::new_with_quality(&mut bytes, PREVIEW_JPEG_QUALITY);
    encoder
        .encode_image(&rgb)
        .map_err(|e| DeckError::other(format!("preview encoding failed: {e}")))?;

    Ok(PreviewImage {
        key: PageKey::new(source.id, page),
        display_name: source.display_name.clone(),
        bytes,
        width,
        height,
    })
}

/// Count the pages of a PDF source without rendering it.
async fn page_count(path: PathBuf) -> Result<u32> {
    tokio::task::spawn_blocking(move || {
        let doc = lopdf::Document::load(&path)
            .map_err(|e| DeckError::failed_to_load_pdf(path.clone(), e.to_string()))?;
        Ok(doc.get_pages().len() as u32)
    })
    .await
    .unwrap_or_else(|e| Err(DeckError::other(format!("page count task failed: {e}"))))
}
