//! Page images for vision models.
//!
//! Renders PDF pages to PNG at a target DPI and downscales images that
//! exceed configured bounds.

use std::io::Cursor;
use std::path::Path;

use anyhow::{Context, Result};
use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat};

/// PDF user space is 72 points per inch.
pub const PDF_POINTS_PER_INCH: f32 = 72.0;

/// Rendering and resize settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RasterOptions {
    pub dpi: u32,
    pub max_width: Option<u32>,
    pub max_height: Option<u32>,
}

impl Default for RasterOptions {
    fn default() -> Self {
        Self {
            dpi: 200,
            max_width: None,
            max_height: None,
        }
    }
}

impl RasterOptions {
    fn bounds(&self) -> Option<(u32, u32)> {
        match (self.max_width, self.max_height) {
            (None, None) => None,
            (w, h) => Some((w.unwrap_or(u32::MAX), h.unwrap_or(u32::MAX))),
        }
    }
}

/// A rendered page.
#[derive(Debug, Clone)]
pub struct PageImage {
    /// Page number (1-based).
    pub page_number: usize,
    pub width: u32,
    pub height: u32,
    pub png: Vec<u8>,
}

/// Downscale `image` to fit within `max_width` x `max_height`.
///
/// Aspect ratio is preserved; images already within bounds are returned
/// unchanged (never upscaled).
pub fn fit_within(image: DynamicImage, max_width: u32, max_height: u32) -> DynamicImage {
    if image.width() <= max_width && image.height() <= max_height {
        return image;
    }
    image.resize(max_width, max_height, FilterType::Lanczos3)
}

fn encode_png(image: &DynamicImage) -> Result<Vec<u8>> {
    let mut png = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
        .context("Failed to encode PNG")?;
    Ok(png)
}

/// Read an image file, fit it to the configured bounds and re-encode as PNG.
pub fn load_image_png(path: &Path, options: &RasterOptions) -> Result<Vec<u8>> {
    let image = image::open(path)
        .with_context(|| format!("{} is not a readable image", path.display()))?;
    let image = match options.bounds() {
        Some((w, h)) => fit_within(image, w, h),
        None => image,
    };
    encode_png(&image)
}

/// Validate a 1-based page number against the document's page count.
pub fn check_page_number(page_number: usize, total: usize) -> Result<()> {
    if page_number == 0 || page_number > total {
        anyhow::bail!("page {page_number} out of range (document has {total} pages)");
    }
    Ok(())
}

/// Render every page of a PDF to PNG.
#[cfg(feature = "pdf")]
pub fn render_pages(path: &Path, options: &RasterOptions) -> Result<Vec<PageImage>> {
    let pdfium = super::pdf::bind_pdfium()?;
    let document = pdfium
        .load_pdf_from_file(path, None)
        .with_context(|| format!("Failed to load PDF {}", path.display()))?;

    let mut pages = Vec::with_capacity(document.pages().len() as usize);
    for (i, page) in document.pages().iter().enumerate() {
        pages.push(render_one(&page, i + 1, options)?);
    }

    Ok(pages)
}

/// Render a single 1-based page of a PDF to PNG.
#[cfg(feature = "pdf")]
pub fn render_page(path: &Path, page_number: usize, options: &RasterOptions) -> Result<PageImage> {
    let pdfium = super::pdf::bind_pdfium()?;
    let document = pdfium
        .load_pdf_from_file(path, None)
        .with_context(|| format!("Failed to load PDF {}", path.display()))?;

    check_page_number(page_number, document.pages().len() as usize)?;

    let page = document
        .pages()
        .get((page_number - 1) as u16)
        .with_context(|| format!("Failed to load page {page_number}"))?;
    render_one(&page, page_number, options)
}

#[cfg(feature = "pdf")]
fn render_one(
    page: &pdfium_render::prelude::PdfPage<'_>,
    page_number: usize,
    options: &RasterOptions,
) -> Result<PageImage> {
    use pdfium_render::prelude::PdfRenderConfig;

    let scale = options.dpi as f32 / PDF_POINTS_PER_INCH;
    let render_config = PdfRenderConfig::new()
        .set_target_width((page.width().value * scale) as i32)
        .set_target_height((page.height().value * scale) as i32);

    let bitmap = page
        .render_with_config(&render_config)
        .with_context(|| format!("Failed to render page {page_number}"))?;

    let mut image = bitmap.as_image();
    if let Some((w, h)) = options.bounds() {
        image = fit_within(image, w, h);
    }

    tracing::debug!(
        page = page_number,
        width = image.width(),
        height = image.height(),
        "rendered page"
    );

    Ok(PageImage {
        page_number,
        width: image.width(),
        height: image.height(),
        png: encode_png(&image)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbImage;

    fn blank(w: u32, h: u32) -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::new(w, h))
    }

    #[test]
    fn fit_within_leaves_small_images() {
        let img = fit_within(blank(800, 600), 1260, 1260);
        assert_eq!((img.width(), img.height()), (800, 600));
    }

    #[test]
    fn fit_within_clamps_landscape_width() {
        let img = fit_within(blank(2520, 1260), 1260, 1260);
        assert_eq!((img.width(), img.height()), (1260, 630));
    }

    #[test]
    fn fit_within_clamps_portrait_height() {
        let img = fit_within(blank(1000, 2000), 1260, 1260);
        assert_eq!((img.width(), img.height()), (630, 1260));
    }

    #[test]
    fn load_image_png_reencodes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("page.jpg");
        blank(300, 100).save(&path).unwrap();

        let options = RasterOptions {
            max_width: Some(150),
            ..RasterOptions::default()
        };
        let png = load_image_png(&path, &options).unwrap();
        assert!(png.starts_with(b"\x89PNG"));

        let decoded = image::load_from_memory(&png).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (150, 50));
    }

    #[test]
    fn load_image_png_rejects_non_images() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, "not an image").unwrap();
        assert!(load_image_png(&path, &RasterOptions::default()).is_err());
    }

    #[test]
    fn page_number_is_one_based() {
        assert!(check_page_number(1, 3).is_ok());
        assert!(check_page_number(3, 3).is_ok());
        assert!(check_page_number(0, 3).is_err());

        let err = check_page_number(4, 3).unwrap_err();
        assert_eq!(err.to_string(), "page 4 out of range (document has 3 pages)");
    }
}
