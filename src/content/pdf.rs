//! pdfium-backed page source.
//!
//! Uses `pdfium-render` (Chromium's PDF library) to extract character
//! positions and the plain text layer of each page.
//!
//! pdfium reports rectangles in bottom-up page space; characters are
//! converted to top-down boxes (`top = page_height - rect.top`) so line
//! ordering reads naturally top to bottom.

use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use pdfium_render::prelude::*;
use tracing::{debug, info};

use super::assemble::{DocumentText, TableAwareTextAssembler};
use super::layout::LayoutOptions;
use super::table::TableFinder;
use super::types::{BBox, Character, FontInfo, Page};

/// Bind pdfium from the working directory, falling back to the system library.
pub(crate) fn bind_pdfium() -> Result<Pdfium> {
    let bindings = Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path("./"))
        .or_else(|_| Pdfium::bind_to_system_library())
        .context("Failed to load the pdfium library (looked in ./ and system paths)")?;
    Ok(Pdfium::new(bindings))
}

/// Reads PDF documents into [`Page`]s.
pub struct PdfSource {
    pdfium: Pdfium,
    finder: TableFinder,
}

impl PdfSource {
    pub fn new() -> Result<Self> {
        Ok(Self {
            pdfium: bind_pdfium()?,
            finder: TableFinder::default(),
        })
    }

    /// Parse every page: characters in stream order plus detected tables.
    #[allow(deprecated)] // PdfRect field access deprecated in 0.8.28, removed in 0.9.0
    pub fn load_pages(&self, path: &Path) -> Result<Vec<Page>> {
        let doc = self
            .pdfium
            .load_pdf_from_file(path, None)
            .with_context(|| format!("Failed to parse PDF {}", path.display()))?;

        let mut pages = Vec::with_capacity(doc.pages().len() as usize);

        for (page_idx, page) in doc.pages().iter().enumerate() {
            let page_height = page.height().value;
            let text = page
                .text()
                .with_context(|| format!("Failed to extract text from page {}", page_idx + 1))?;

            let mut chars = Vec::new();
            for ch in text.chars().iter() {
                let (Some(unicode_ch), Ok(rect)) = (ch.unicode_char(), ch.tight_bounds()) else {
                    continue;
                };
                if unicode_ch.is_whitespace() || unicode_ch.is_control() {
                    continue;
                }
                chars.push(Character {
                    text: unicode_ch.to_string(),
                    bbox: BBox::new(
                        rect.left.value,
                        page_height - rect.top.value,
                        rect.right.value,
                        page_height - rect.bottom.value,
                    ),
                    font: FontInfo {
                        name: Some(ch.font_name()).filter(|n| !n.is_empty()),
                        size: ch.scaled_font_size().value,
                    },
                });
            }

            let tables = self.finder.find(&chars);
            debug!(
                page = page_idx + 1,
                chars = chars.len(),
                tables = tables.len(),
                "parsed page"
            );

            pages.push(Page {
                number: page_idx + 1,
                chars,
                tables,
            });
        }

        Ok(pages)
    }

    /// Whole-document text with tables rendered as markdown.
    pub fn extract_text_with_tables(&self, path: &Path, layout: LayoutOptions) -> Result<DocumentText> {
        let start = Instant::now();
        let pages = self.load_pages(path)?;
        let doc = TableAwareTextAssembler::new(layout).assemble_document(&pages);

        info!(
            pages = doc.page_count,
            skipped = doc.skipped.len(),
            elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
            "assembled document text"
        );

        Ok(doc)
    }

    /// Plain text layer of each page as `(page_number, text)` pairs.
    ///
    /// Pages without text (scans) are omitted; the remaining pages keep
    /// their 1-based document numbers.
    pub fn read_page_texts(&self, path: &Path) -> Result<Vec<(usize, String)>> {
        let doc = self
            .pdfium
            .load_pdf_from_file(path, None)
            .with_context(|| format!("Failed to parse PDF {}", path.display()))?;

        let texts = doc
            .pages()
            .iter()
            .enumerate()
            .map(|(page_idx, page)| {
                page.text()
                    .map(|text| text.all())
                    .with_context(|| format!("Failed to extract text from page {}", page_idx + 1))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(number_text_pages(texts))
    }
}

/// Number pages from 1 and drop those with blank text.
fn number_text_pages(texts: Vec<String>) -> Vec<(usize, String)> {
    texts
        .into_iter()
        .enumerate()
        .map(|(i, text)| (i + 1, text))
        .filter(|(_, text)| !text.trim().is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_pages_keep_later_numbers() {
        let texts = vec!["Kontoauszug".to_string(), " \n".to_string(), "Saldo".to_string()];
        assert_eq!(
            number_text_pages(texts),
            vec![(1, "Kontoauszug".to_string()), (3, "Saldo".to_string())]
        );
    }
}
