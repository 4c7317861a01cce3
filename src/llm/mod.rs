//! Chat client for Ollama-compatible model servers.
//!
//! Sends page images (vision path) or extracted text (restoration path) to
//! a local model via `POST {host}/api/chat` with streaming disabled.
//!
//! # Example
//!
//! ```rust,no_run
//! use pdfsift::llm::{ExtractionPrompt, OllamaClient};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = OllamaClient::new("http://localhost:11434")?;
//!     let png = std::fs::read("page-001.png")?;
//!     let text = client
//!         .extract_page(&png, "llava:13b", 0.0, ExtractionPrompt::Transactions)
//!         .await?;
//!     println!("{text}");
//!     Ok(())
//! }
//! ```

pub mod prompts;

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, instrument};

pub use prompts::{page_extraction_request, restore_request, ExtractionPrompt};

/// Model call errors
#[derive(Error, Debug)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("model server returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("invalid chat response: {0}")]
    Decode(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, LlmError>;

/// One chat message. Images are base64-encoded PNG/JPEG payloads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<String>,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
            images: Vec::new(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
            images: Vec::new(),
        }
    }
}

/// Sampling options forwarded to the model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChatOptions {
    pub temperature: f32,
}

/// Body of `POST /api/chat`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub stream: bool,
    pub options: ChatOptions,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    message: ChatMessage,
}

/// Ollama chat API client
pub struct OllamaClient {
    client: Client,
    host: String,
}

impl OllamaClient {
    /// Create a client for `host` (e.g. `http://localhost:11434`).
    pub fn new(host: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            // Vision models on CPU can take minutes per page
            .timeout(Duration::from_secs(600))
            .build()?;

        Ok(Self {
            client,
            host: host.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    /// Send a chat request and return the assistant message content.
    #[instrument(skip(self, request), fields(model = %request.model, messages = request.messages.len()))]
    pub async fn chat(&self, request: &ChatRequest) -> Result<String> {
        let url = format!("{}/api/chat", self.host);
        debug!(%url, "sending chat request");

        let response = self.client.post(&url).json(request).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await?;
        let parsed: ChatResponse = serde_json::from_slice(&bytes)?;

        info!(chars = parsed.message.content.len(), "Response received");
        Ok(parsed.message.content)
    }

    /// Extract the content of one page image.
    pub async fn extract_page(
        &self,
        png: &[u8],
        model: &str,
        temperature: f32,
        prompt: ExtractionPrompt,
    ) -> Result<String> {
        self.chat(&page_extraction_request(png, model, temperature, prompt))
            .await
    }

    /// Reformat OCR-damaged statement text into clean tables.
    pub async fn restore_text(&self, text: &str, model: &str) -> Result<String> {
        self.chat(&restore_request(text, model)).await
    }
}
