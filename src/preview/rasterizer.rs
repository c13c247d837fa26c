//! The rasterization seam.
//!
//! Turning a PDF page into pixels is an external concern: the renderer
//! only needs "give me a bitmap of page N of this file". The
//! [`PageRasterizer`] trait is that contract; [`PdfiumRasterizer`] is the
//! production implementation on top of pdfium. Tests inject their own
//! deterministic implementation instead, so the suite never depends on
//! the native pdfium library.

use std::path::Path;

use image::DynamicImage;
use pdfium_render::prelude::*;

use crate::error::{DeckError, Result};

/// Longest-edge pixel target for preview thumbnails.
///
/// Previews are for visual identification only; capping pixels rather
/// than DPI keeps memory bounded for unusually large page sizes.
pub const PREVIEW_TARGET_WIDTH: i32 = 480;

/// Renders one page of a PDF file to a bitmap.
pub trait PageRasterizer: Send + Sync {
    /// Rasterize the given 1-based page of the PDF at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be opened or the page
    /// cannot be rendered.
    fn rasterize(&self, path: &Path, page: u32) -> Result<DynamicImage>;
}

/// pdfium-backed rasterizer used by the real pipeline.
pub struct PdfiumRasterizer {
    pdfium: Pdfium,
    config: PdfRenderConfig,
}

impl PdfiumRasterizer {
    /// Bind to the system pdfium library.
    ///
    /// # Errors
    ///
    /// Returns [`DeckError::RasterizerUnavailable`] when the native
    /// library cannot be located or bound.
    pub fn new() -> Result<Self> {
        let bindings = Pdfium::bind_to_system_library()
            .map_err(|e| DeckError::RasterizerUnavailable {
                reason: e.to_string(),
            })?;

        Ok(Self {
            pdfium: Pdfium::new(bindings),
            config: PdfRenderConfig::new()
                .set_target_width(PREVIEW_TARGET_WIDTH)
                .set_maximum_height(PREVIEW_TARGET_WIDTH),
        })
    }
}

impl PageRasterizer for PdfiumRasterizer {
    fn rasterize(&self, path: &Path, page: u32) -> Result<DynamicImage> {
        let document = self
            .pdfium
            .load_pdf_from_file(path, None)
            .map_err(|e| DeckError::corrupted_pdf(path.to_path_buf(), format!("{e:?}")))?;

        let index = page
            .checked_sub(1)
            .ok_or_else(|| DeckError::corrupted_pdf(path.to_path_buf(), "page index 0"))?;

        let page = document
            .pages()
            .get(index as u16)
            .map_err(|e| DeckError::corrupted_pdf(path.to_path_buf(), format!("{e:?}")))?;

        let bitmap = page
            .render_with_config(&self.config)
            .map_err(|e| DeckError::corrupted_pdf(path.to_path_buf(), format!("{e:?}")))?;

        Ok(bitmap.as_image())
    }
}
