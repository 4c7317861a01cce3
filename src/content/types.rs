//! Shared types for page content.
//!
//! Contains the positioned character, table and page types used across
//! PDF extraction, table detection and layout rendering. Extracted to avoid
//! tight coupling between `pdf.rs`, `table.rs` and `layout.rs`.
//!
//! All coordinates are in PDF points in **top-down** page space: `top` grows
//! toward the bottom of the page.

/// Axis-aligned rectangle on a page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BBox {
    pub x0: f32,
    pub top: f32,
    pub x1: f32,
    pub bottom: f32,
}

impl BBox {
    pub const fn new(x0: f32, top: f32, x1: f32, bottom: f32) -> Self {
        Self { x0, top, x1, bottom }
    }

    pub fn width(&self) -> f32 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    /// Intersection of two boxes, if they overlap.
    ///
    /// Boxes sharing an edge overlap (zero-area intersection along a line);
    /// boxes touching only at a corner do not.
    pub fn overlap(&self, other: &BBox) -> Option<BBox> {
        let x0 = self.x0.max(other.x0);
        let x1 = self.x1.min(other.x1);
        let top = self.top.max(other.top);
        let bottom = self.bottom.min(other.bottom);

        let width = x1 - x0;
        let height = bottom - top;
        if width >= 0.0 && height >= 0.0 && width + height > 0.0 {
            Some(BBox { x0, top, x1, bottom })
        } else {
            None
        }
    }

    /// Smallest box containing both.
    pub fn union(&self, other: &BBox) -> BBox {
        BBox {
            x0: self.x0.min(other.x0),
            top: self.top.min(other.top),
            x1: self.x1.max(other.x1),
            bottom: self.bottom.max(other.bottom),
        }
    }
}

/// Font metadata carried alongside a character. Not interpreted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FontInfo {
    pub name: Option<String>,
    /// Font size in points (approximated from glyph height when unknown).
    pub size: f32,
}

/// A single positioned glyph extracted from a PDF page.
#[derive(Debug, Clone, PartialEq)]
pub struct Character {
    pub text: String,
    pub bbox: BBox,
    pub font: FontInfo,
}

impl Character {
    pub fn new(text: impl Into<String>, bbox: BBox) -> Self {
        Self {
            text: text.into(),
            bbox,
            font: FontInfo {
                name: None,
                size: bbox.height(),
            },
        }
    }
}

/// A detected table region.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub bbox: BBox,
    /// Cell contents: `rows[row_idx][col_idx]`. Row 0 is the header.
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// The table's cell grid.
    pub fn extract(&self) -> &[Vec<String>] {
        &self.rows
    }
}

/// One physical page: characters in stream order plus detected tables.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    /// Page number (1-based).
    pub number: usize,
    pub chars: Vec<Character>,
    pub tables: Vec<Table>,
}

/// A rendered table positioned at its anchor character.
#[derive(Debug, Clone, PartialEq)]
pub struct TableBlock {
    /// Bounding box of the anchor character.
    pub anchor: BBox,
    pub markdown: String,
}

/// Renderable page content: a glyph or a whole table block.
#[derive(Debug, Clone, PartialEq)]
pub enum PageItem {
    Text(Character),
    Table(TableBlock),
}

impl PageItem {
    pub fn bbox(&self) -> &BBox {
        match self {
            PageItem::Text(ch) => &ch.bbox,
            PageItem::Table(block) => &block.anchor,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlap_of_nested_boxes_is_inner_box() {
        let outer = BBox::new(0.0, 0.0, 100.0, 20.0);
        let inner = BBox::new(10.0, 5.0, 16.0, 15.0);
        assert_eq!(outer.overlap(&inner), Some(inner));
    }

    #[test]
    fn disjoint_boxes_do_not_overlap() {
        let a = BBox::new(0.0, 0.0, 100.0, 20.0);
        let b = BBox::new(0.0, 30.0, 30.0, 42.0);
        assert!(a.overlap(&b).is_none());
    }

    #[test]
    fn shared_edge_counts_as_overlap() {
        let a = BBox::new(0.0, 0.0, 10.0, 10.0);
        let b = BBox::new(10.0, 0.0, 20.0, 10.0);
        assert!(a.overlap(&b).is_some());
    }

    #[test]
    fn shared_corner_is_not_overlap() {
        let a = BBox::new(0.0, 0.0, 10.0, 10.0);
        let b = BBox::new(10.0, 10.0, 20.0, 20.0);
        assert!(a.overlap(&b).is_none());
    }

    #[test]
    fn union_covers_both() {
        let a = BBox::new(0.0, 5.0, 10.0, 10.0);
        let b = BBox::new(-2.0, 7.0, 8.0, 30.0);
        assert_eq!(a.union(&b), BBox::new(-2.0, 5.0, 10.0, 30.0));
    }
}
