//! `pdfsift` CLI - PDF pages to LLM-ready text

mod cmd;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use pdfsift::config::{normalize_host, Config};
use pdfsift::ExtractionPrompt;

#[derive(Parser)]
#[command(name = "pdfsift")]
#[command(about = "Extract LLM-ready text from PDF pages")]
#[command(version)]
struct Cli {
    /// Ollama host (overrides config and OLLAMA_HOST)
    #[arg(long, global = true)]
    host: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract text with tables rendered as markdown
    Text {
        /// PDF file
        pdf: PathBuf,

        /// Write to file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the plain text layer of each page
    Pages {
        /// PDF file
        pdf: PathBuf,

        /// Only this page (1-based)
        #[arg(short, long)]
        page: Option<usize>,
    },

    /// Render pages to PNG images
    Images {
        /// PDF file
        pdf: PathBuf,

        /// Output directory
        #[arg(short, long)]
        out: PathBuf,

        /// Render resolution (default from config: 200)
        #[arg(long)]
        dpi: Option<u32>,
    },

    /// Extract page content with a vision model
    Extract {
        /// PDF file
        pdf: PathBuf,

        /// Only this page (1-based)
        #[arg(short, long)]
        page: Option<usize>,

        /// Instructions sent with each page
        #[arg(long, value_enum, default_value = "general")]
        prompt: PromptArg,

        /// Vision model name
        #[arg(short, long)]
        model: Option<String>,

        /// Sampling temperature
        #[arg(short, long)]
        temperature: Option<f32>,
    },

    /// Restore OCR-damaged statement tables with a language model
    Restore {
        /// PDF file
        pdf: PathBuf,

        /// Only this page (1-based)
        #[arg(short, long)]
        page: Option<usize>,

        /// Model name
        #[arg(short, long)]
        model: Option<String>,
    },

    /// Prompt for image paths and extract their content
    Interactive {
        /// Vision model name
        #[arg(short, long)]
        model: Option<String>,

        /// Instructions sent with each image
        #[arg(long, value_enum, default_value = "general")]
        prompt: PromptArg,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum PromptArg {
    /// Main content, headings, tables and lists
    General,
    /// Every bank statement transaction as a bullet point
    Transactions,
}

impl From<PromptArg> for ExtractionPrompt {
    fn from(arg: PromptArg) -> Self {
        match arg {
            PromptArg::General => ExtractionPrompt::General,
            PromptArg::Transactions => ExtractionPrompt::Transactions,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging (stderr keeps stdout clean for extracted text)
    FmtSubscriber::builder()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let cli = Cli::parse();

    let mut config = Config::load()?;
    if let Some(host) = cli.host {
        config.ollama_host = normalize_host(&host);
    }

    match cli.command {
        Commands::Text { pdf, output } => {
            cmd::text::cmd_text(&pdf, &config, output)?;
        }
        Commands::Pages { pdf, page } => {
            cmd::pages::cmd_pages(&pdf, page)?;
        }
        Commands::Images { pdf, out, dpi } => {
            if let Some(dpi) = dpi {
                config.dpi = dpi;
            }
            cmd::images::cmd_images(&pdf, &out, &config)?;
        }
        Commands::Extract { pdf, page, prompt, model, temperature } => {
            if let Some(model) = model {
                config.vision_model = model;
            }
            if let Some(temperature) = temperature {
                config.temperature = temperature;
            }
            cmd::extract::cmd_extract(&pdf, page, prompt.into(), &config).await?;
        }
        Commands::Restore { pdf, page, model } => {
            if let Some(model) = model {
                config.restore_model = model;
            }
            cmd::restore::cmd_restore(&pdf, page, &config).await?;
        }
        Commands::Interactive { model, prompt } => {
            if let Some(model) = model {
                config.vision_model = model;
            }
            cmd::interactive::cmd_interactive(prompt.into(), &config).await?;
        }
    }

    Ok(())
}
