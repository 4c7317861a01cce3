use std::path::{Path, PathBuf};

use anyhow::Result;

use pdfsift::config::Config;
use pdfsift::content::pdf::PdfSource;

use super::output::write_output;

pub fn cmd_text(pdf: &Path, config: &Config, output: Option<PathBuf>) -> Result<()> {
    eprintln!("📄 Extracting: {}", pdf.display());

    let source = PdfSource::new()?;
    let start = std::time::Instant::now();
    let doc = source.extract_text_with_tables(pdf, config.layout)?;

    for (page, err) in &doc.skipped {
        eprintln!("⚠️  Skipped page {page}: {err}");
    }
    eprintln!(
        "✅ {} of {} pages in {:.1}ms",
        doc.page_count - doc.skipped.len(),
        doc.page_count,
        start.elapsed().as_secs_f64() * 1000.0
    );

    write_output(&doc.text, output)
}
