use std::path::Path;

use anyhow::{Context, Result};

use pdfsift::config::Config;
use pdfsift::content::raster::render_pages;

pub fn cmd_images(pdf: &Path, out: &Path, config: &Config) -> Result<()> {
    std::fs::create_dir_all(out)
        .with_context(|| format!("failed to create {}", out.display()))?;

    let options = config.raster_options();
    eprintln!("🖼️  Rendering {} at {} dpi", pdf.display(), options.dpi);

    let pages = render_pages(pdf, &options)?;
    for page in &pages {
        let path = out.join(format!("page-{:03}.png", page.page_number));
        std::fs::write(&path, &page.png)
            .with_context(|| format!("failed to write {}", path.display()))?;
        println!("{} ({}x{})", path.display(), page.width, page.height);
    }

    eprintln!("✅ {} pages written", pages.len());
    Ok(())
}
