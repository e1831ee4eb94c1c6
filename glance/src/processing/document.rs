use serde::{Serialize, Serializer};

/// Source material handed to the [`DocumentProcessor`](super::DocumentProcessor).
///
/// Exactly one variant is present per request. Building one from loosely
/// typed request parts goes through [`DocumentInput::from_parts`], which
/// fixes the priority order file → url → text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentInput {
    File { filename: String, bytes: Vec<u8> },
    Url(String),
    Text(String),
}

impl DocumentInput {
    pub fn from_parts(
        file: Option<(String, Vec<u8>)>,
        url: Option<String>,
        text: Option<String>,
    ) -> Option<Self> {
        match (file, url, text) {
            (Some((filename, bytes)), _, _) => Some(DocumentInput::File { filename, bytes }),
            (None, Some(url), _) => Some(DocumentInput::Url(url)),
            (None, None, Some(text)) => Some(DocumentInput::Text(text)),
            (None, None, None) => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceType {
    Pdf,
    Docx,
    Url,
    GoogleDrive,
    Text,
}

impl SourceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceType::Pdf => "PDF",
            SourceType::Docx => "DOCX",
            SourceType::Url => "URL",
            SourceType::GoogleDrive => "Google Drive",
            SourceType::Text => "Text",
        }
    }
}

impl std::fmt::Display for SourceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for SourceType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Normalized outcome of document extraction.
///
/// Serialized as `{"success": true, "content", "source_type", "content_length"}`
/// or `{"success": false, "error"}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractionResult {
    Success {
        content: String,
        source_type: SourceType,
        /// Length of `content` in characters.
        content_length: usize,
    },
    Failure {
        error: String,
    },
}

impl ExtractionResult {
    pub fn success(content: String, source_type: SourceType) -> Self {
        let content_length = content.chars().count();
        ExtractionResult::Success {
            content,
            source_type,
            content_length,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        ExtractionResult::Failure {
            error: error.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ExtractionResult::Success { .. })
    }

    pub fn content(&self) -> Option<&str> {
        match self {
            ExtractionResult::Success { content, .. } => Some(content),
            ExtractionResult::Failure { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            ExtractionResult::Success { .. } => None,
            ExtractionResult::Failure { error } => Some(error),
        }
    }
}

impl Serialize for ExtractionResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;

        match self {
            ExtractionResult::Success {
                content,
                source_type,
                content_length,
            } => {
                let mut map = serializer.serialize_map(Some(4))?;
                map.serialize_entry("success", &true)?;
                map.serialize_entry("content", content)?;
                map.serialize_entry("source_type", source_type)?;
                map.serialize_entry("content_length", content_length)?;
                map.end()
            }
            ExtractionResult::Failure { error } => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("success", &false)?;
                map.serialize_entry("error", error)?;
                map.end()
            }
        }
    }
}
