use std::path::{Path, PathBuf};

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use pdfsift::config::Config;
use pdfsift::content::raster::load_image_png;
use pdfsift::{ExtractionPrompt, OllamaClient};

/// What the user typed at the prompt.
#[derive(Debug, PartialEq)]
enum Input {
    Quit,
    Missing,
    Image(PathBuf),
}

fn parse_input(line: &str) -> Input {
    let trimmed = line.trim().trim_matches(['\'', '"']);
    if trimmed.eq_ignore_ascii_case("q") {
        return Input::Quit;
    }
    let path = Path::new(trimmed);
    if !trimmed.is_empty() && path.exists() {
        Input::Image(path.to_path_buf())
    } else {
        Input::Missing
    }
}

pub async fn cmd_interactive(prompt: ExtractionPrompt, config: &Config) -> Result<()> {
    let client = OllamaClient::new(&config.ollama_host)?;
    let options = config.interactive_raster_options();
    eprintln!("🤖 Model: {} @ {}", config.vision_model, config.ollama_host);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    loop {
        stdout
            .write_all(b"\nEnter the path to your image or 'q' to quit: ")
            .await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        let path = match parse_input(&line) {
            Input::Quit => break,
            Input::Missing => {
                println!("The file does not exist. Please try again.");
                continue;
            }
            Input::Image(path) => path,
        };

        // A bad image or a failed model call should not end the session
        let png = match load_image_png(&path, &options) {
            Ok(png) => png,
            Err(e) => {
                println!("Error: {e:#}");
                continue;
            }
        };
        match client
            .extract_page(&png, &config.vision_model, config.temperature, prompt)
            .await
        {
            Ok(content) => println!("\n{content}"),
            Err(e) => println!("Error: {e}"),
        }
    }

    println!("Goodbye!");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quit_is_case_insensitive() {
        assert_eq!(parse_input("Q\n"), Input::Quit);
        assert_eq!(parse_input("  q "), Input::Quit);
    }

    #[test]
    fn quotes_are_stripped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scan.png");
        std::fs::write(&path, b"x").unwrap();

        let quoted = format!("'{}'", path.display());
        assert_eq!(parse_input(&quoted), Input::Image(path));
    }

    #[test]
    fn missing_file_asks_again() {
        assert_eq!(parse_input("/no/such/file.png"), Input::Missing);
        assert_eq!(parse_input(""), Input::Missing);
    }
}
