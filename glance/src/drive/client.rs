use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use serde::Deserialize;
use tokio::sync::RwLock;

use super::{DriveFileRef, DriveResolver, DriveToken};
use crate::config::DriveConfig;
use crate::error::{GlanceError, Result};
use crate::processing::extractors::{extract_docx_text, extract_pdf_text};

const GOOGLE_DOCUMENT: &str = "google-apps.document";
const GOOGLE_SPREADSHEET: &str = "google-apps.spreadsheet";
const PDF: &str = "application/pdf";
const DOCX: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FileMetadata {
    #[serde(default)]
    mime_type: String,
}

/// Drive v3 REST client authenticated with a stored OAuth token.
///
/// The token is shared between clones and refreshed in place whenever a
/// request finds it expired.
#[derive(Clone)]
pub struct DriveClient {
    http: reqwest::Client,
    api_base: String,
    token_url: String,
    /// Where refreshed tokens are written back; `None` keeps them in memory.
    token_path: Option<PathBuf>,
    token: Option<Arc<RwLock<DriveToken>>>,
}

impl DriveClient {
    /// Load credentials from `config.token_path`, refreshing a token that is
    /// already expired. Any failure leaves the client disabled.
    pub async fn from_config(config: &DriveConfig) -> Self {
        let mut client = Self::disabled_with(reqwest::Client::new(), config);
        let path = Path::new(&config.token_path);

        if !path.exists() {
            tracing::warn!(
                token_path = %config.token_path,
                "Google Drive credentials not available. Google Drive links will not work."
            );
            return client;
        }

        let token = match DriveToken::load(path) {
            Ok(token) => token,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to set up Google Drive API");
                return client;
            }
        };

        client.token_path = Some(path.to_path_buf());
        client.token = Some(Arc::new(RwLock::new(token)));

        match client.access_token().await {
            Ok(_) => {
                tracing::info!("Google Drive API client initialized successfully");
                client
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to set up Google Drive API");
                client.token = None;
                client
            }
        }
    }

    /// Client using `token` as is. Refreshed tokens are not persisted.
    pub fn with_token(api_base: &str, token_url: &str, token: DriveToken) -> Self {
        let config = DriveConfig {
            api_base: api_base.to_string(),
            token_url: token_url.to_string(),
            ..DriveConfig::default()
        };
        let mut client = Self::disabled_with(reqwest::Client::new(), &config);
        client.token = Some(Arc::new(RwLock::new(token)));
        client
    }

    /// Client with a non-expiring access token.
    pub fn new(api_base: &str, access_token: impl Into<String>) -> Self {
        let token = DriveToken {
            access_token: access_token.into(),
            refresh_token: None,
            client_id: None,
            client_secret: None,
            expires_at: None,
        };
        Self::with_token(api_base, &DriveConfig::default().token_url, token)
    }

    pub fn disabled() -> Self {
        Self::disabled_with(reqwest::Client::new(), &DriveConfig::default())
    }

    fn disabled_with(http: reqwest::Client, config: &DriveConfig) -> Self {
        Self {
            http,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            token_url: config.token_url.clone(),
            token_path: None,
            token: None,
        }
    }

    /// Current access token, refreshed first when it has expired.
    async fn access_token(&self) -> Result<String> {
        let token = self
            .token
            .as_ref()
            .ok_or_else(|| GlanceError::Drive("Drive credentials are not loaded".to_string()))?;

        {
            let current = token.read().await;
            if !current.is_expired(Utc::now()) {
                return Ok(current.access_token.clone());
            }
        }

        let mut current = token.write().await;
        // Another request may have refreshed while we waited for the lock.
        if !current.is_expired(Utc::now()) {
            return Ok(current.access_token.clone());
        }

        if !current.can_refresh() {
            return Err(GlanceError::Drive(
                "Stored token is expired and cannot be refreshed".to_string(),
            ));
        }

        let refreshed = current.refresh(&self.http, &self.token_url).await?;
        tracing::info!("Refreshed Google Drive access token");
        if let Some(path) = &self.token_path {
            if let Err(e) = refreshed.save(path) {
                tracing::warn!(error = %e, "Failed to persist refreshed Drive token");
            }
        }

        *current = refreshed;
        Ok(current.access_token.clone())
    }

    async fn resolve(&self, file_id: &str, access_token: &str) -> Result<Option<String>> {
        let file = self.metadata(file_id, access_token).await?;
        tracing::debug!(file_id = %file.file_id, mime_type = %file.mime_type, "Resolved Drive file");

        let mime_type = file.mime_type.as_str();
        if mime_type.contains(GOOGLE_DOCUMENT) {
            let bytes = self.export(file_id, "text/plain", access_token).await?;
            return decode_utf8(bytes).map(Some);
        }
        if mime_type.contains(GOOGLE_SPREADSHEET) {
            let bytes = self.export(file_id, "text/csv", access_token).await?;
            return decode_utf8(bytes).map(Some);
        }
        if mime_type.contains(PDF) {
            let bytes = self.download(file_id, access_token).await?;
            return Ok(Some(extract_pdf_text(&bytes)));
        }
        if mime_type.contains(DOCX) {
            let bytes = self.download(file_id, access_token).await?;
            return Ok(Some(extract_docx_text(&bytes)));
        }

        match self.export(file_id, "text/plain", access_token).await {
            Ok(bytes) => decode_utf8(bytes).map(Some),
            Err(e) => {
                tracing::debug!(file_id = %file_id, mime_type = %mime_type, error = %e, "Plain-text export not supported");
                Ok(None)
            }
        }
    }

    async fn metadata(&self, file_id: &str, access_token: &str) -> Result<DriveFileRef> {
        let url = format!("{}/files/{}", self.api_base, file_id);
        let response = self
            .http
            .get(url)
            .bearer_auth(access_token)
            .query(&[("fields", "name,mimeType")])
            .send()
            .await?
            .error_for_status()?;

        let metadata: FileMetadata = response.json().await?;
        Ok(DriveFileRef {
            file_id: file_id.to_string(),
            mime_type: metadata.mime_type,
        })
    }

    async fn export(&self, file_id: &str, mime_type: &str, access_token: &str) -> Result<Vec<u8>> {
        let url = format!("{}/files/{}/export", self.api_base, file_id);
        let response = self
            .http
            .get(url)
            .bearer_auth(access_token)
            .query(&[("mimeType", mime_type)])
            .send()
            .await?
            .error_for_status()?;

        Ok(response.bytes().await?.to_vec())
    }

    async fn download(&self, file_id: &str, access_token: &str) -> Result<Vec<u8>> {
        let url = format!("{}/files/{}", self.api_base, file_id);
        let response = self
            .http
            .get(url)
            .bearer_auth(access_token)
            .query(&[("alt", "media")])
            .send()
            .await?
            .error_for_status()?;

        Ok(response.bytes().await?.to_vec())
    }
}

fn decode_utf8(bytes: Vec<u8>) -> Result<String> {
    String::from_utf8(bytes)
        .map_err(|e| GlanceError::Drive(format!("Exported content is not valid UTF-8: {e}")))
}

#[async_trait]
impl DriveResolver for DriveClient {
    fn is_enabled(&self) -> bool {
        self.token.is_some()
    }

    async fn fetch_content(&self, file_id: &str) -> Option<String> {
        if !self.is_enabled() {
            return None;
        }

        let access_token = match self.access_token().await {
            Ok(access_token) => access_token,
            Err(e) => {
                tracing::error!(
                    file_id = %file_id,
                    error = %e,
                    "Google Drive credentials unusable"
                );
                return None;
            }
        };

        match self.resolve(file_id, &access_token).await {
            Ok(content) => content,
            Err(e) => {
                tracing::error!(file_id = %file_id, error = %e, "Error getting Google Drive content");
                None
            }
        }
    }
}
