//! Configuration loaded from `~/.config/pdfsift/config.toml`.
//!
//! Every field is optional; a missing file yields defaults. The
//! `OLLAMA_HOST` environment variable overrides `ollama_host`.
//!
//! ```toml
//! ollama_host = "http://gpu-box:11434"
//! vision_model = "llava:13b"
//! restore_model = "llama3.2:latest"
//! temperature = 0.0
//! dpi = 200
//! max_image_width = 1260
//! max_image_height = 1260
//!
//! [layout]
//! x_tolerance = 3.0
//! y_tolerance = 3.0
//! y_density = 13.0
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::debug;

use crate::content::layout::LayoutOptions;
use crate::content::raster::RasterOptions;

pub const DEFAULT_OLLAMA_HOST: &str = "http://localhost:11434";
pub const DEFAULT_MODEL: &str = "llava:13b";
/// Image bound applied in interactive mode when none is configured.
pub const INTERACTIVE_IMAGE_BOUND: u32 = 1260;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub ollama_host: String,
    /// Model used for page images.
    pub vision_model: String,
    /// Model used to restore OCR-damaged text.
    pub restore_model: String,
    pub temperature: f32,
    /// Page rasterization resolution.
    pub dpi: u32,
    pub max_image_width: Option<u32>,
    pub max_image_height: Option<u32>,
    pub layout: LayoutOptions,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ollama_host: DEFAULT_OLLAMA_HOST.to_string(),
            vision_model: DEFAULT_MODEL.to_string(),
            restore_model: DEFAULT_MODEL.to_string(),
            temperature: 0.0,
            dpi: 200,
            max_image_width: None,
            max_image_height: None,
            layout: LayoutOptions::default(),
        }
    }
}

impl Config {
    /// Load from the default location, then apply environment overrides.
    pub fn load() -> Result<Self> {
        let mut config = Self::load_from(&config_path())?;
        config.apply_env(std::env::var("OLLAMA_HOST").ok());
        Ok(config)
    }

    /// Load from `path`. A missing file yields defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;

        toml::from_str(&content).with_context(|| format!("invalid TOML in {}", path.display()))
    }

    fn apply_env(&mut self, ollama_host: Option<String>) {
        if let Some(host) = ollama_host.filter(|h| !h.trim().is_empty()) {
            self.ollama_host = normalize_host(&host);
        }
    }

    pub fn raster_options(&self) -> RasterOptions {
        RasterOptions {
            dpi: self.dpi,
            max_width: self.max_image_width,
            max_height: self.max_image_height,
        }
    }

    /// Raster options for user-supplied images; unset bounds fall back to
    /// [`INTERACTIVE_IMAGE_BOUND`].
    pub fn interactive_raster_options(&self) -> RasterOptions {
        RasterOptions {
            max_width: Some(self.max_image_width.unwrap_or(INTERACTIVE_IMAGE_BOUND)),
            max_height: Some(self.max_image_height.unwrap_or(INTERACTIVE_IMAGE_BOUND)),
            ..self.raster_options()
        }
    }
}

/// Accept `host:port` as well as full URLs.
pub fn normalize_host(host: &str) -> String {
    let host = host.trim().trim_end_matches('/');
    if host.contains("://") {
        host.to_string()
    } else {
        format!("http://{host}")
    }
}

/// Return the path to the config file.
pub fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("pdfsift")
        .join("config.toml")
}
