use std::path::Path;

use anyhow::Result;

use pdfsift::content::pdf::PdfSource;

use super::output::select_pages;

pub fn cmd_pages(pdf: &Path, page: Option<usize>) -> Result<()> {
    let source = PdfSource::new()?;
    let texts = source.read_page_texts(pdf)?;

    if texts.is_empty() {
        eprintln!("⚠️  No text layer found. Try `pdfsift extract` for scanned documents.");
        return Ok(());
    }

    for (number, text) in select_pages(texts, page)? {
        println!("── Page {number} ──");
        println!("{text}");
    }

    Ok(())
}
