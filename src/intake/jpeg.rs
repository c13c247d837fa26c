//! JPEG to single-page PDF conversion.
//!
//! An uploaded JPG becomes a one-page PDF whose page is exactly the image:
//! the picture is normalized to 3-channel RGB, re-encoded as baseline JPEG,
//! and embedded as a DCTDecode image XObject. The MediaBox uses the pixel
//! dimensions as points, so a 600x800 photo yields a 600x800 pt page.

use image::codecs::jpeg::JpegEncoder;
use lopdf::{Document, Object, Stream, dictionary};

use crate::error::{DeckError, Result};

/// JPEG re-encode quality for the embedded page image.
const EMBED_QUALITY: u8 = 92;

/// Convert JPEG bytes into a one-page PDF document.
///
/// The image is decoded and converted to RGB before embedding, so CMYK or
/// grayscale JPEGs come out as standard DeviceRGB pages.
///
/// # Arguments
///
/// * `name` - Declared upload filename, used in error messages
/// * `bytes` - Raw JPEG bytes
///
/// # Errors
///
/// Returns [`DeckError::InvalidImage`] if the bytes cannot be decoded or
/// re-encoded.
pub fn convert_to_pdf(name: &str, bytes: &[u8]) -> Result<Document> {
    let img = image::load_from_memory(bytes)
        .map_err(|e| DeckError::invalid_image(name, e.to_string()))?;

    // Normalize to 3-channel RGB, whatever the source color model was
    let rgb = img.to_rgb8();
    let (width, height) = rgb.dimensions();

    let mut jpeg = Vec::new();
    let mut encoder = JpegEncoder::new_with_quality(&mut jpeg, EMBED_QUALITY);
    encoder
        .encode_image(&rgb)
        .map_err(|e| DeckError::invalid_image(name, e.to_string()))?;

    Ok(build_image_page(jpeg, width, height))
}

/// Assemble a one-page document around an encoded JPEG.
fn build_image_page(jpeg: Vec<u8>, width: u32, height: u32) -> Document {
    let mut doc = Document::with_version("1.5");

    let pages_id = doc.new_object_id();

    let image_id = doc.add_object(Stream::new(
        dictionary! {
            "Type" => "XObject",
            "Subtype" => "Image",
            "Width" => width as i64,
            "Height" => height as i64,
            "ColorSpace" => "DeviceRGB",
            "BitsPerComponent" => 8,
            "Filter" => "DCTDecode",
        },
        jpeg,
    ));

    // Scale the unit image square up to the full page
    let content = format!("q\n{width} 0 0 {height} 0 0 cm\n/Im0 Do\nQ\n");
    let content_id = doc.add_object(Stream::new(dictionary! {}, content.into_bytes()));

    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "MediaBox" => vec![
            0.into(),
            0.into(),
            Object::Real(width as f32),
            Object::Real(height as f32),
        ],
        "Resources" => dictionary! {
            "XObject" => dictionary! { "Im0" => image_id },
        },
        "Contents" => content_id,
    });

    let pages = dictionary! {
        "Type" => "Pages",
        "Kids" => vec![page_id.into()],
        "Count" => 1,
    };
    doc.objects.insert(pages_id, pages.into());

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    doc
}
