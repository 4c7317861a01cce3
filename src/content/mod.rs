//! PDF page content: characters, tables and layout-preserving text.
//!
//! # Pipeline
//!
//! ```text
//! PDF → pdfium char extraction → table detection → table-aware assembly → text
//! PDF → pdfium rendering → PNG page images (for vision models)
//! ```
//!
//! | Module | Purpose | Feature Flag |
//! |--------|---------|-------------|
//! | [`types`] | Boxes, characters, tables, pages | always |
//! | [`layout`] | Layout-preserving text rendering | always |
//! | [`table`] | Table detection and markdown rendering | always |
//! | [`assemble`] | Splice markdown tables into page text | always |
//! | [`raster`] | Page images and resizing | always (`render_pages` needs `pdf`) |
//! | [`pdf`] | pdfium-backed page source | `pdf` |
//!
//! # Example
//!
//! ```rust
//! use pdfsift::content::{BBox, Character, Page, Table, TableAwareTextAssembler};
//!
//! let page = Page {
//!     number: 1,
//!     chars: vec![
//!         Character::new("A", BBox::new(0.0, 5.0, 6.0, 15.0)),
//!         Character::new("Hello", BBox::new(0.0, 30.0, 30.0, 40.0)),
//!     ],
//!     tables: vec![Table {
//!         bbox: BBox::new(0.0, 0.0, 100.0, 20.0),
//!         rows: vec![vec!["A".into(), "B".into()], vec!["1".into(), "2".into()]],
//!     }],
//! };
//! let text = TableAwareTextAssembler::default().assemble(&page).unwrap();
//! assert!(text.contains("| A | B |"));
//! assert!(text.ends_with("Hello"));
//! ```

pub mod assemble;
pub mod layout;
#[cfg(feature = "pdf")]
pub mod pdf;
pub mod raster;
pub mod table;
pub mod types;

pub use assemble::{AssembleError, DocumentText, TableAwareTextAssembler};
pub use layout::{render_layout, LayoutOptions};
pub use table::TableFinder;
pub use types::{BBox, Character, FontInfo, Page, PageItem, Table, TableBlock};
