//! Prompt texts and request builders.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

use super::{ChatMessage, ChatOptions, ChatRequest};

const GENERAL_SYSTEM: &str = "You are a document analysis assistant specialized in \
extracting structured information from scanned pages of documents. Focus on identifying \
text, headings, tables, and visual elements. When extracting content, preserve any \
structured elements such as bullet points, lists, and tables, and provide content in a \
clean, readable format for ease of understanding.";

const GENERAL_USER: &str = "Analyze this document page and extract the main content. \
Focus on text, headings, tables, and important visual elements. Provide a detailed \
summary that captures the key information while preserving any structured elements like \
lists or bullet points.";

const TRANSACTIONS_SYSTEM: &str = "You are a document analysis assistant specialized in \
extracting structured information from scanned pages of documents. You will be dealing \
with bank account statements, and it's necessary to extract the entire content from the \
PDF, which includes every single transaction with all the details. Focus on identifying \
text, headings, tables, and visual elements. When extracting content, preserve any \
structured elements such as bullet points, lists, and tables, and provide content in a \
clean, readable format for ease of understanding.";

const TRANSACTIONS_USER: &str = "Analyze this document page and extract every single \
transaction. List all of them in bullet points.";

const RESTORE_SYSTEM: &str = "You are a document restoration assistant tasked with \
restoring text from OCR-extracted financial tables. Each transaction should be structured \
in a table with the following columns: Buchung | Valuta | Vorgang | Soll | Haben.

Formatting guidelines:
- **Table Structure**: Interpret line breaks, spaces, and delimiters to recreate a clean, readable table structure.
- **Column Alignment**: Ensure consistent alignment within each column for dates, transaction details, and amounts.
- **Multi-line Cells**: Retain line breaks in 'Vorgang' when it contains multiple lines.
- **Special Characters**: Include symbols like '+', commas, and periods for monetary values.
- **Unclear Text**: Mark ambiguous OCR text with '[unclear]'.

Deliver output as plain text or Markdown, ensuring tables are clear and well-aligned.";

/// Which instructions accompany a page image.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExtractionPrompt {
    /// Main content, headings, tables and lists.
    #[default]
    General,
    /// Every bank statement transaction as a bullet point.
    Transactions,
}

impl ExtractionPrompt {
    pub fn system(self) -> &'static str {
        match self {
            Self::General => GENERAL_SYSTEM,
            Self::Transactions => TRANSACTIONS_SYSTEM,
        }
    }

    pub fn user(self) -> &'static str {
        match self {
            Self::General => GENERAL_USER,
            Self::Transactions => TRANSACTIONS_USER,
        }
    }
}

/// `[system, user + image]` request for one page image.
pub fn page_extraction_request(
    image: &[u8],
    model: &str,
    temperature: f32,
    prompt: ExtractionPrompt,
) -> ChatRequest {
    let mut user = ChatMessage::user(prompt.user());
    user.images.push(STANDARD.encode(image));

    ChatRequest {
        model: model.to_string(),
        messages: vec![ChatMessage::system(prompt.system()), user],
        stream: false,
        options: ChatOptions { temperature },
    }
}

/// `[system, user]` request asking the model to rebuild statement tables.
pub fn restore_request(text: &str, model: &str) -> ChatRequest {
    ChatRequest {
        model: model.to_string(),
        messages: vec![
            ChatMessage::system(RESTORE_SYSTEM),
            ChatMessage::user(format!(
                "Restore this OCR-extracted text, focusing on accurate tables and \
                 alignment. Extracted text: {text}"
            )),
        ],
        stream: false,
        options: ChatOptions { temperature: 0.0 },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_HEADER: &[u8] = b"\x89PNG\r\n\x1a\n\x00\x00\x00\rIHDR";

    #[test]
    fn extraction_request_carries_image_on_user_message() {
        let req = page_extraction_request(PNG_HEADER, "llava:13b", 0.0, ExtractionPrompt::General);
        assert_eq!(req.model, "llava:13b");
        assert_eq!(req.options.temperature, 0.0);
        assert!(!req.stream);
        assert_eq!(req.messages.len(), 2);
        assert_eq!(req.messages[0].role, "system");
        assert!(req.messages[0].images.is_empty());
        assert_eq!(req.messages[1].role, "user");
        assert_eq!(req.messages[1].images, vec![STANDARD.encode(PNG_HEADER)]);
    }

    #[test]
    fn transactions_prompt_asks_for_bullets() {
        let req = page_extraction_request(PNG_HEADER, "m", 0.2, ExtractionPrompt::Transactions);
        assert!(req.messages[0].content.contains("bank account statements"));
        assert!(req.messages[1].content.contains("bullet points"));
        assert_eq!(req.options.temperature, 0.2);
    }

    #[test]
    fn restore_request_embeds_text_with_zero_temperature() {
        let req = restore_request("01.05 Miete 850,00", "llama3.2:latest");
        assert_eq!(req.model, "llama3.2:latest");
        assert_eq!(req.options.temperature, 0.0);
        assert!(req.messages[0]
            .content
            .contains("Buchung | Valuta | Vorgang | Soll | Haben"));
        assert!(req.messages[1]
            .content
            .ends_with("Extracted text: 01.05 Miete 850,00"));
        assert!(req.messages.iter().all(|m| m.images.is_empty()));
    }

    #[test]
    fn request_serializes_to_ollama_shape() {
        let req = page_extraction_request(b"img", "llava:13b", 0.0, ExtractionPrompt::General);
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["stream"], false);
        assert_eq!(json["options"]["temperature"], 0.0);
        assert_eq!(json["messages"][1]["images"][0], "aW1n");
        assert!(json["messages"][0].get("images").is_none());
    }
}
