use std::sync::Arc;

use crate::auth::{CredentialVerifier, SessionStore};
use crate::config::Config;
use crate::drive::DriveResolver;
use crate::error::Result;
use crate::llm::{ContentAnalyzer, LlmBackend};
use crate::processing::DocumentProcessor;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub analyzer: Arc<dyn ContentAnalyzer>,
    /// Backend reported by the health endpoint; `None` for injected analyzers.
    pub llm_backend: Option<LlmBackend>,
    pub processor: DocumentProcessor,
    pub drive: Arc<dyn DriveResolver>,
    pub credentials: Arc<dyn CredentialVerifier>,
    pub sessions: SessionStore,
}

impl AppState {
    pub fn new(
        config: Config,
        analyzer: Arc<dyn ContentAnalyzer>,
        drive: Arc<dyn DriveResolver>,
        credentials: Arc<dyn CredentialVerifier>,
    ) -> Result<Self> {
        let config = Arc::new(config);
        let processor = DocumentProcessor::new(&config.processing, drive.clone())?;
        let sessions = SessionStore::new(config.server.session_ttl_secs);

        Ok(Self {
            config,
            analyzer,
            llm_backend: None,
            processor,
            drive,
            credentials,
            sessions,
        })
    }

    pub fn with_llm_backend(mut self, backend: LlmBackend) -> Self {
        self.llm_backend = Some(backend);
        self
    }
}
