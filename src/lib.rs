//! `pdfsift` - PDF pages to LLM-ready text
//!
//! # Features
//!
//! - **Table-aware text**: pdfium character extraction, table detection, and
//!   markdown tables spliced into layout-preserving page text
//! - **Page images**: PDF pages rendered to PNG for vision models
//! - **Model calls**: Ollama chat client for page extraction and restoring
//!   OCR-damaged statement tables
//!
//! # Example
//!
//! ```rust,no_run
//! use std::path::Path;
//!
//! use pdfsift::content::pdf::PdfSource;
//! use pdfsift::content::LayoutOptions;
//!
//! fn main() -> anyhow::Result<()> {
//!     let source = PdfSource::new()?;
//!     let doc = source.extract_text_with_tables(Path::new("statement.pdf"), LayoutOptions::default())?;
//!     println!("{}", doc.text);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod content;
pub mod llm;

pub use config::Config;
pub use content::{AssembleError, DocumentText, Page, TableAwareTextAssembler};
pub use llm::{ExtractionPrompt, LlmError, OllamaClient};

/// Version of pdfsift
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
