//! Shared helpers for integration tests.
//!
//! Builds PDF, JPEG, and ZIP fixtures in memory. PDF fixtures give
//! every page a distinct MediaBox width so page order stays observable
//! after a merge.

use std::io::{Cursor, Write};
use std::path::Path;

use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, RgbImage};
use lopdf::{Document, Object, dictionary};
use zip::write::{FileOptions, ZipWriter};

use pagedeck::Result;
use pagedeck::preview::PageRasterizer;

/// Rasterizer stand-in that never touches a PDF renderer.
pub struct StubRasterizer;

impl PageRasterizer for StubRasterizer {
    fn rasterize(&self, _path: &Path, page: u32) -> Result<DynamicImage> {
        let img = RgbImage::from_pixel(40 + page, 60, image::Rgb([30, 30, 30]));
        Ok(DynamicImage::ImageRgb8(img))
    }
}

/// Serialize a PDF whose pages carry the given MediaBox widths.
pub fn pdf_with_page_widths(widths: &[i64]) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");

    let pages_id = doc.new_object_id();
    let mut kids = Vec::new();
    for width in widths {
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![0.into(), 0.into(), (*width).into(), 792.into()],
        });
        kids.push(page_id.into());
    }

    let pages_dict = dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => widths.len() as i64,
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

/// Encode a solid JPEG of the given pixel dimensions.
pub fn jpeg_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = RgbImage::from_pixel(width, height, image::Rgb([180, 40, 40]));
    let mut bytes = Vec::new();
    let mut encoder = JpegEncoder::new_with_quality(&mut bytes, 90);
    encoder.encode_image(&img).unwrap();
    bytes
}

/// Build a ZIP archive from (name, bytes) entries, in the given order.
pub fn zip_bytes(entries: &[(&str, &[u8])]) -> Vec<u8> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    for (name, bytes) in entries {
        writer
            .start_file(*name, FileOptions::<()>::default())
            .unwrap();
        writer.write_all(bytes).unwrap();
    }
    writer.finish().unwrap().into_inner()
}

/// MediaBox widths of a document's pages, in page order.
pub fn page_widths(doc: &Document) -> Vec<i64> {
    doc.get_pages()
        .values()
        .map(|&page_id| {
            let dict = doc.get_dictionary(page_id).unwrap();
            let media_box = dict.get(b"MediaBox").unwrap().as_array().unwrap();
            match &media_box[2] {
                Object::Integer(i) => *i,
                Object::Real(r) => *r as i64,
                other => panic!("unexpected MediaBox entry: {other:?}"),
            }
        })
        .collect()
}
