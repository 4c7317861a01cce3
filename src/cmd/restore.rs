use std::path::Path;

use anyhow::Result;

use pdfsift::config::Config;
use pdfsift::content::pdf::PdfSource;
use pdfsift::OllamaClient;

use super::output::select_pages;

pub async fn cmd_restore(pdf: &Path, page: Option<usize>, config: &Config) -> Result<()> {
    eprintln!("🧩 Restoring: {}", pdf.display());
    eprintln!("   Model: {} @ {}", config.restore_model, config.ollama_host);

    let texts = PdfSource::new()?.read_page_texts(pdf)?;
    let client = OllamaClient::new(&config.ollama_host)?;

    for (number, text) in select_pages(texts, page)? {
        let restored = client.restore_text(&text, &config.restore_model).await?;
        println!("## Page {number}\n");
        println!("{restored}\n");
    }

    Ok(())
}
