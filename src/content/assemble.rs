//! Table-aware page text assembly.
//!
//! Produces one linear text block per page where detected tables appear as
//! markdown tables instead of scattered characters:
//!
//! ```text
//! Page → remove chars inside tables → TableBlock at each anchor → layout render
//! ```
//!
//! The anchor of a table is the first character, in the page's original
//! stream order, whose box overlaps the table's box. Its position decides
//! where the rendered table appears in the reading-order output.

use thiserror::Error;
use tracing::{debug, warn};

use super::layout::{render_layout, LayoutOptions};
use super::types::{Page, PageItem, TableBlock};

/// Page assembly errors. A failing page produces no output at all.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AssembleError {
    /// The table contains no character, so there is no position to anchor
    /// its markdown at (e.g. a ruled grid with empty cells).
    #[error("page {page}: table {table} has no character inside its bounding box")]
    MissingAnchor { page: usize, table: usize },

    #[error("page {page}: tables {first} and {second} have overlapping bounding boxes")]
    OverlappingTables {
        page: usize,
        first: usize,
        second: usize,
    },
}

/// Whole-document result: joined page text plus the pages that failed.
#[derive(Debug, Clone, Default)]
pub struct DocumentText {
    /// Text of every assembled page, joined with `"\n"`.
    pub text: String,
    /// Number of pages in the source document.
    pub page_count: usize,
    /// Pages skipped because they could not be assembled.
    pub skipped: Vec<(usize, AssembleError)>,
}

/// Splices markdown tables into layout-preserving page text.
#[derive(Debug, Clone, Default)]
pub struct TableAwareTextAssembler {
    layout: LayoutOptions,
}

impl TableAwareTextAssembler {
    pub fn new(layout: LayoutOptions) -> Self {
        Self { layout }
    }

    /// Assemble one page into text.
    pub fn assemble(&self, page: &Page) -> Result<String, AssembleError> {
        let items = self.page_items(page)?;
        Ok(render_layout(&items, &self.layout))
    }

    /// Build the renderable item sequence for a page: every character not
    /// covered by a table, plus one [`TableBlock`] per table.
    pub fn page_items(&self, page: &Page) -> Result<Vec<PageItem>, AssembleError> {
        check_disjoint(page)?;

        let mut covered = vec![false; page.chars.len()];
        let mut blocks = Vec::with_capacity(page.tables.len());

        for (idx, table) in page.tables.iter().enumerate() {
            let anchor = page
                .chars
                .iter()
                .find(|ch| ch.bbox.overlap(&table.bbox).is_some())
                .ok_or(AssembleError::MissingAnchor {
                    page: page.number,
                    table: idx,
                })?;

            let mut removed = 0usize;
            for (flag, ch) in covered.iter_mut().zip(&page.chars) {
                if ch.bbox.overlap(&table.bbox).is_some() {
                    *flag = true;
                    removed += 1;
                }
            }
            debug!(
                page = page.number,
                table = idx,
                removed,
                rows = table.rows.len(),
                "spliced table"
            );

            blocks.push(PageItem::Table(TableBlock {
                anchor: anchor.bbox,
                markdown: table.to_markdown(),
            }));
        }

        let mut items: Vec<PageItem> = page
            .chars
            .iter()
            .zip(&covered)
            .filter(|(_, covered)| !**covered)
            .map(|(ch, _)| PageItem::Text(ch.clone()))
            .collect();
        items.extend(blocks);

        Ok(items)
    }

    /// Assemble pages in order. Failing pages are skipped and reported.
    pub fn assemble_document(&self, pages: &[Page]) -> DocumentText {
        let mut texts = Vec::with_capacity(pages.len());
        let mut skipped = Vec::new();

        for page in pages {
            match self.assemble(page) {
                Ok(text) => texts.push(text),
                Err(e) => {
                    warn!(page = page.number, error = %e, "skipping page");
                    skipped.push((page.number, e));
                }
            }
        }

        DocumentText {
            text: texts.join("\n"),
            page_count: pages.len(),
            skipped,
        }
    }
}

/// Overlapping tables have no defined removal order.
fn check_disjoint(page: &Page) -> Result<(), AssembleError> {
    for (i, a) in page.tables.iter().enumerate() {
        for (j, b) in page.tables.iter().enumerate().skip(i + 1) {
            if a.bbox.overlap(&b.bbox).is_some() {
                return Err(AssembleError::OverlappingTables {
                    page: page.number,
                    first: i,
                    second: j,
                });
            }
        }
    }
    Ok(())
}
