//! End-to-end pipeline tests: uploads in, merged document out.

mod common;

use common::{StubRasterizer, jpeg_bytes, page_widths, pdf_with_page_widths, zip_bytes};

use lopdf::Document;

use pagedeck::DeckError;
use pagedeck::intake::{SourceId, UploadedItem};
use pagedeck::pipeline::Pipeline;
use pagedeck::preview::PageKey;

fn key(source: usize, page: u32) -> PageKey {
    PageKey::new(SourceId(source), page)
}

#[tokio::test]
async fn reordered_merge_of_pdf_and_jpeg() {
    let mut pipeline = Pipeline::new(StubRasterizer, 2).unwrap();

    let outcome = pipeline
        .ingest(vec![
            UploadedItem::new("doc.pdf", pdf_with_page_widths(&[101, 102])),
            UploadedItem::new("photo.jpg", jpeg_bytes(77, 50)),
        ])
        .await
        .unwrap();

    // One preview per page, sources in upload order.
    let keys: Vec<String> = outcome.previews.iter().map(|p| p.key.to_string()).collect();
    assert_eq!(keys, vec!["0:1", "0:2", "1:1"]);
    assert!(outcome.skipped.is_empty());
    assert!(outcome.warnings.is_empty());

    // Photo first, then the PDF's pages swapped.
    let order = vec![key(1, 1), key(0, 2), key(0, 1)];
    let merged = pipeline.merge(Some(&order)).await.unwrap();
    assert_eq!(merged.statistics.total_pages, 3);

    let reloaded = Document::load_mem(&merged.into_bytes().unwrap()).unwrap();
    assert_eq!(page_widths(&reloaded), vec![77, 102, 101]);
}

#[tokio::test]
async fn zip_entries_become_sources_in_archive_order() {
    let first = pdf_with_page_widths(&[201]);
    let second = pdf_with_page_widths(&[301, 302]);
    let archive = zip_bytes(&[
        ("b-first.pdf", &first),
        ("notes.txt", b"ignore me"),
        ("a-second.pdf", &second),
    ]);

    let mut pipeline = Pipeline::new(StubRasterizer, 2).unwrap();
    let outcome = pipeline
        .ingest(vec![UploadedItem::new("scans.zip", archive)])
        .await
        .unwrap();

    // Archive order wins over entry names, and the txt entry is ignored
    // without a skip report.
    assert_eq!(outcome.previews.len(), 3);
    assert_eq!(outcome.previews[0].display_name, "scans.zip/b-first.pdf");

    let merged = pipeline.merge(None).await.unwrap();
    let reloaded = Document::load_mem(&merged.into_bytes().unwrap()).unwrap();
    assert_eq!(page_widths(&reloaded), vec![201, 301, 302]);
}

#[tokio::test]
async fn zip_without_pdfs_halts_before_preview() {
    let archive = zip_bytes(&[("readme.txt", b"no pdfs here")]);

    let mut pipeline = Pipeline::new(StubRasterizer, 1).unwrap();
    let err = pipeline
        .ingest(vec![UploadedItem::new("empty.zip", archive)])
        .await
        .unwrap_err();

    assert!(matches!(err, DeckError::NoContent));
    assert!(pipeline.known_keys().is_empty());
}

#[tokio::test]
async fn unsupported_upload_is_reported_but_not_fatal() {
    let mut pipeline = Pipeline::new(StubRasterizer, 1).unwrap();

    let outcome = pipeline
        .ingest(vec![
            UploadedItem::new("doc.pdf", pdf_with_page_widths(&[101])),
            UploadedItem::new("slides.pptx", b"not supported".to_vec()),
        ])
        .await
        .unwrap();

    assert_eq!(outcome.previews.len(), 1);
    assert_eq!(outcome.skipped.len(), 1);
    assert_eq!(outcome.skipped[0].filename, "slides.pptx");
}

#[tokio::test]
async fn merge_rejects_incomplete_selection() {
    let mut pipeline = Pipeline::new(StubRasterizer, 1).unwrap();
    pipeline
        .ingest(vec![UploadedItem::new(
            "doc.pdf",
            pdf_with_page_widths(&[101, 102]),
        )])
        .await
        .unwrap();

    let err = pipeline.merge(Some(&[key(0, 1)])).await.unwrap_err();
    assert!(matches!(err, DeckError::Mapping { .. }));
}

#[tokio::test]
async fn merge_rejects_duplicate_and_unknown_keys() {
    let mut pipeline = Pipeline::new(StubRasterizer, 1).unwrap();
    pipeline
        .ingest(vec![UploadedItem::new(
            "doc.pdf",
            pdf_with_page_widths(&[101, 102]),
        )])
        .await
        .unwrap();

    let duplicate = vec![key(0, 1), key(0, 1)];
    assert!(matches!(
        pipeline.merge(Some(&duplicate)).await.unwrap_err(),
        DeckError::Mapping { .. }
    ));

    let unknown = vec![key(0, 1), key(9, 1)];
    assert!(matches!(
        pipeline.merge(Some(&unknown)).await.unwrap_err(),
        DeckError::Mapping { .. }
    ));
}

#[tokio::test]
async fn corrupt_pdf_in_batch_degrades_to_warning() {
    let mut pipeline = Pipeline::new(StubRasterizer, 2).unwrap();

    let outcome = pipeline
        .ingest(vec![
            UploadedItem::new("good.pdf", pdf_with_page_widths(&[101])),
            UploadedItem::new("broken.pdf", b"%PDF-garbage".to_vec()),
        ])
        .await
        .unwrap();

    assert_eq!(outcome.previews.len(), 1);
    assert_eq!(outcome.warnings.len(), 1);
    assert_eq!(outcome.warnings[0].display_name, "broken.pdf");

    // The merge only accepts the pages that previewed.
    let merged = pipeline.merge(None).await.unwrap();
    assert_eq!(merged.statistics.total_pages, 1);
}
