use std::path::Path;
use std::sync::Arc;

use crate::config::ProcessingConfig;
use crate::drive::{extract_drive_id, DriveResolver};
use crate::error::GlanceError;

use super::document::{DocumentInput, ExtractionResult, SourceType};
use super::extractors::{extract_docx_text, extract_pdf_text};
use super::web::WebExtractor;

pub const TRUNCATION_MARKER: &str = "\n\n[Content truncated due to length...]";

pub const NO_INPUT_ERROR: &str = "No document data provided. Please provide a file, URL, or text.";
pub const NO_CONTENT_ERROR: &str = "No content could be extracted from the document.";
pub const DRIVE_ACCESS_ERROR: &str =
    "Could not access Google Drive file. Please ensure the file is publicly accessible.";
pub const URL_ACCESS_ERROR: &str =
    "Could not extract content from URL. Please check if the URL is accessible.";

/// Turns a [`DocumentInput`] into a normalized [`ExtractionResult`].
///
/// Extraction never returns an error: every failure mode is folded into
/// [`ExtractionResult::Failure`] with a user-facing message.
#[derive(Clone)]
pub struct DocumentProcessor {
    web: WebExtractor,
    drive: Arc<dyn DriveResolver>,
    max_content_chars: usize,
}

impl DocumentProcessor {
    pub fn new(
        config: &ProcessingConfig,
        drive: Arc<dyn DriveResolver>,
    ) -> crate::error::Result<Self> {
        Ok(Self {
            web: WebExtractor::new(config)?,
            drive,
            max_content_chars: config.max_content_chars,
        })
    }

    /// Process an optional input; `None` yields the "no document data"
    /// failure.
    pub async fn process_optional(&self, input: Option<DocumentInput>) -> ExtractionResult {
        match input {
            Some(input) => self.process(input).await,
            None => ExtractionResult::failure(NO_INPUT_ERROR),
        }
    }

    pub async fn process(&self, input: DocumentInput) -> ExtractionResult {
        let extracted = match input {
            DocumentInput::File { filename, bytes } => self.extract_file(&filename, bytes).await,
            DocumentInput::Url(url) => self.extract_url(url.trim()).await,
            DocumentInput::Text(text) => Ok((text, SourceType::Text)),
        };

        let (content, source_type) = match extracted {
            Ok(extracted) => extracted,
            Err(error) => return ExtractionResult::failure(error),
        };

        if content.trim().is_empty() {
            tracing::debug!(source_type = %source_type, "Extracted content is empty");
            return ExtractionResult::failure(NO_CONTENT_ERROR);
        }

        let content = truncate_content(content, self.max_content_chars);
        ExtractionResult::success(content, source_type)
    }

    async fn extract_file(
        &self,
        filename: &str,
        bytes: Vec<u8>,
    ) -> Result<(String, SourceType), String> {
        let extension = file_extension(filename);
        let source_type = match extension.as_str() {
            ".pdf" => SourceType::Pdf,
            ".docx" | ".doc" => SourceType::Docx,
            _ => return Err(GlanceError::UnsupportedFileType(extension).to_string()),
        };

        tracing::debug!(filename = %filename, source_type = %source_type, size = bytes.len(), "Extracting uploaded file");

        let content = tokio::task::spawn_blocking(move || match source_type {
            SourceType::Pdf => extract_pdf_text(&bytes),
            _ => extract_docx_text(&bytes),
        })
        .await
        .unwrap_or_else(|e| {
            tracing::error!(filename = %filename, error = %e, "File extraction task failed");
            String::new()
        });

        Ok((content, source_type))
    }

    async fn extract_url(&self, url: &str) -> Result<(String, SourceType), String> {
        if let Some(file_id) = extract_drive_id(url) {
            if !self.drive.is_enabled() {
                tracing::warn!(file_id = %file_id, "Google Drive link received but Drive access is not configured");
            }

            return match self.drive.fetch_content(&file_id).await {
                Some(content) if !content.is_empty() => Ok((content, SourceType::GoogleDrive)),
                _ => Err(DRIVE_ACCESS_ERROR.to_string()),
            };
        }

        let content = self.web.extract(url).await;
        if content.is_empty() {
            return Err(URL_ACCESS_ERROR.to_string());
        }
        Ok((content, SourceType::Url))
    }
}

/// Lowercased extension of `filename` including the leading dot, or an
/// empty string when there is none.
fn file_extension(filename: &str) -> String {
    Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| format!(".{}", ext.to_lowercase()))
        .unwrap_or_default()
}

/// Cut `content` to `max_chars` characters and append [`TRUNCATION_MARKER`]
/// when it is longer than that.
pub fn truncate_content(content: String, max_chars: usize) -> String {
    match content.char_indices().nth(max_chars) {
        Some((byte_offset, _)) => {
            let mut truncated = content;
            truncated.truncate(byte_offset);
            truncated.push_str(TRUNCATION_MARKER);
            truncated
        }
        None => content,
    }
}
