//! End-to-end pipeline orchestration.
//!
//! Drives the four stages in their fixed order: intake normalizes the
//! uploads into per-source PDFs, preview renders one thumbnail per page,
//! reorder validates the user's page selection, and merge assembles the
//! final document. State from each stage feeds the next; there are no
//! side channels.

use crate::error::Result;
use crate::intake::{Normalizer, PageSource, SkippedUpload, UploadedItem};
use crate::merge::{MergedDocument, PageAssembler};
use crate::preview::{PageKey, PageRasterizer, PreviewImage, PreviewRenderer, RenderWarning};
use crate::reorder;
use crate::workspace::Workspace;

/// What came out of intake and preview, ready to show the user.
#[derive(Debug)]
pub struct IngestOutcome {
    /// One thumbnail per page, in source order then page order.
    pub previews: Vec<PreviewImage>,
    /// Pages or sources that failed to render.
    pub warnings: Vec<RenderWarning>,
    /// Uploads that were rejected during intake.
    pub skipped: Vec<SkippedUpload>,
}

/// A pipeline run, from uploaded files to the assembled document.
///
/// Holds the scratch workspace and the normalized sources alive between
/// the preview and merge stages. The set of keys handed out at preview
/// time is the only currency the merge stage accepts.
pub struct Pipeline<R: PageRasterizer + 'static> {
    workspace: Workspace,
    sources: Vec<PageSource>,
    known_keys: Vec<PageKey>,
    renderer: PreviewRenderer<R>,
}

impl<R: PageRasterizer + 'static> Pipeline<R> {
    /// Create a pipeline with the given rasterizer and render worker
    /// budget.
    ///
    /// # Errors
    ///
    /// Returns an error if the scratch workspace cannot be created.
    pub fn new(rasterizer: R, jobs: usize) -> Result<Self> {
        Ok(Self {
            workspace: Workspace::new()?,
            sources: Vec::new(),
            known_keys: Vec::new(),
            renderer: PreviewRenderer::new(rasterizer, jobs),
        })
    }

    /// Normalize the uploads and render the preview set.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::DeckError::NoContent`] when nothing
    /// usable was uploaded. Individually rejected files and unrenderable
    /// pages are reported in the outcome, not raised.
    pub async fn ingest(&mut self, items: Vec<UploadedItem>) -> Result<IngestOutcome> {
        let report = Normalizer::new().normalize(items, &mut self.workspace)?;
        self.sources = report.sources;

        let (previews, warnings) = self.renderer.render_all(&self.sources).await;
        self.known_keys = previews.iter().map(|p| p.key).collect();

        Ok(IngestOutcome {
            previews,
            warnings,
            skipped: report.skipped,
        })
    }

    /// The page keys the merge stage will accept, in preview order.
    pub fn known_keys(&self) -> &[PageKey] {
        &self.known_keys
    }

    /// Assemble the final document.
    ///
    /// With `selection = None` the pages keep their preview order.
    /// An explicit selection must be a permutation of the preview set.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::DeckError::Mapping`] for a selection that
    /// is not a permutation of the preview set, and
    /// [`crate::error::DeckError::MergeFailed`] when assembly itself
    /// fails.
    pub async fn merge(&self, selection: Option<&[PageKey]>) -> Result<MergedDocument> {
        let order = match selection {
            Some(requested) => reorder::apply(&self.known_keys, requested)?,
            None => self.known_keys.clone(),
        };

        PageAssembler::new().assemble(&self.sources, &order).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DeckError;
    use crate::intake::SourceId;
    use image::codecs::jpeg::JpegEncoder;
    use image::{DynamicImage, RgbImage};
    use lopdf::{Document, dictionary};
    use std::path::Path;

    struct StubRasterizer;

    impl PageRasterizer for StubRasterizer {
        fn rasterize(&self, _path: &Path, page: u32) -> Result<DynamicImage> {
            let img = RgbImage::from_pixel(40 + page, 60, image::Rgb([0, 0, 0]));
            Ok(DynamicImage::ImageRgb8(img))
        }
    }

    fn pdf_bytes(pages: usize) -> Vec<u8> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let mut kids = Vec::new();
        for _ in 0..pages {
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
            });
            kids.push(page_id.into());
        }
        let pages_dict = dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => pages as i64,
        };
        doc.objects.insert(pages_id, pages_dict.into());
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut bytes = Vec::new();
        doc.save_to(&mut bytes).unwrap();
        bytes
    }

    fn jpeg_bytes() -> Vec<u8> {
        let img = RgbImage::from_pixel(10, 10, image::Rgb([200, 10, 10]));
        let mut bytes = Vec::new();
        let mut encoder = JpegEncoder::new_with_quality(&mut bytes, 90);
        encoder.encode_image(&img).unwrap();
        bytes
    }

    #[tokio::test]
    async fn test_ingest_then_default_merge() {
        let mut pipeline = Pipeline::new(StubRasterizer, 2).unwrap();

        let outcome = pipeline
            .ingest(vec![UploadedItem::new("doc.pdf", pdf_bytes(2))])
            .await
            .unwrap();

        assert_eq!(outcome.previews.len(), 2);
        assert!(outcome.warnings.is_empty());

        let merged = pipeline.merge(None).await.unwrap();
        assert_eq!(merged.statistics.total_pages, 2);
    }

    #[tokio::test]
    async fn test_jpeg_and_pdf_merge_in_reordered_sequence() {
        let mut pipeline = Pipeline::new(StubRasterizer, 2).unwrap();

        let outcome = pipeline
            .ingest(vec![
                UploadedItem::new("doc.pdf", pdf_bytes(2)),
                UploadedItem::new("photo.jpg", jpeg_bytes()),
            ])
            .await
            .unwrap();
        assert_eq!(outcome.previews.len(), 3);

        let selection = vec![
            PageKey::new(SourceId(1), 1),
            PageKey::new(SourceId(0), 2),
            PageKey::new(SourceId(0), 1),
        ];
        let merged = pipeline.merge(Some(&selection)).await.unwrap();
        assert_eq!(merged.statistics.total_pages, 3);
        assert_eq!(merged.statistics.sources_used, 2);
    }

    #[tokio::test]
    async fn test_merge_rejects_non_permutation() {
        let mut pipeline = Pipeline::new(StubRasterizer, 1).unwrap();
        pipeline
            .ingest(vec![UploadedItem::new("doc.pdf", pdf_bytes(2))])
            .await
            .unwrap();

        let selection = vec![PageKey::new(SourceId(0), 1)];
        let err = pipeline.merge(Some(&selection)).await.unwrap_err();
        assert!(matches!(err, DeckError::Mapping { .. }));
    }

    #[test]
    fn test_ingest_outcome_is_debug_printable() {
        let outcome = IngestOutcome {
            previews: Vec::new(),
            warnings: Vec::new(),
            skipped: Vec::new(),
        };
        assert!(format!("{outcome:?}").contains("IngestOutcome"));
    }

    #[tokio::test]
    async fn test_ingest_without_content_fails() {
        let mut pipeline = Pipeline::new(StubRasterizer, 1).unwrap();
        let err = pipeline.ingest(Vec::new()).await.unwrap_err();
        assert!(matches!(err, DeckError::NoContent));
    }
}
