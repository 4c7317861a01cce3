use std::path::Path;

use anyhow::Result;

use pdfsift::config::Config;
use pdfsift::content::raster::{render_page, render_pages};
use pdfsift::{ExtractionPrompt, OllamaClient};

pub async fn cmd_extract(
    pdf: &Path,
    page: Option<usize>,
    prompt: ExtractionPrompt,
    config: &Config,
) -> Result<()> {
    eprintln!("🔍 Extracting: {}", pdf.display());
    eprintln!("   Model: {} @ {}", config.vision_model, config.ollama_host);

    let options = config.raster_options();
    let images = match page {
        Some(number) => vec![render_page(pdf, number, &options)?],
        None => render_pages(pdf, &options)?,
    };
    let client = OllamaClient::new(&config.ollama_host)?;

    for image in images {
        let number = image.page_number;
        let start = std::time::Instant::now();
        let content = client
            .extract_page(&image.png, &config.vision_model, config.temperature, prompt)
            .await?;
        eprintln!(
            "   Page {number}: {:.1}s",
            start.elapsed().as_secs_f64()
        );

        println!("## Page {number}\n");
        println!("{content}\n");
    }

    Ok(())
}
