//! Google Drive support.
//!
//! Drive links are recognized by [`extract_drive_id`] and resolved through a
//! [`DriveResolver`]. The production resolver is [`DriveClient`], which talks
//! to the Drive v3 REST API with a pre-provisioned OAuth token. Without a
//! usable token the client stays disabled and every lookup returns `None`.

mod client;
mod token;

use std::sync::OnceLock;

use async_trait::async_trait;
use regex::Regex;

pub use client::DriveClient;
pub use token::DriveToken;

/// Resolves a Drive file id into plain text.
#[async_trait]
pub trait DriveResolver: Send + Sync {
    /// Whether credentials are loaded. A disabled resolver returns `None`
    /// from every lookup.
    fn is_enabled(&self) -> bool;

    async fn fetch_content(&self, file_id: &str) -> Option<String>;
}

/// A Drive file id together with the mime type reported by the metadata API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriveFileRef {
    pub file_id: String,
    pub mime_type: String,
}

fn id_patterns() -> &'static [Regex] {
    static PATTERNS: OnceLock<Vec<Regex>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        [
            r"/file/d/([a-zA-Z0-9_-]+)",
            r"[?&]id=([a-zA-Z0-9_-]+)",
            r"/document/d/([a-zA-Z0-9_-]+)",
            r"/spreadsheets/d/([a-zA-Z0-9_-]+)",
        ]
        .iter()
        .filter_map(|pattern| Regex::new(pattern).ok())
        .collect()
    })
}

/// Extract the file id from a Drive URL.
///
/// Only URLs containing `drive.google.com` are considered. Handles formats:
/// - https://drive.google.com/file/d/FILE_ID/view
/// - https://drive.google.com/open?id=FILE_ID
/// - .../document/d/FILE_ID/edit
/// - .../spreadsheets/d/FILE_ID/edit
pub fn extract_drive_id(url: &str) -> Option<String> {
    if !url.contains("drive.google.com") {
        return None;
    }

    id_patterns()
        .iter()
        .find_map(|re| re.captures(url))
        .map(|c| c[1].to_string())
}
