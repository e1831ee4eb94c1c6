use async_trait::async_trait;

use crate::config::{parse_llm_provider_model, LlmConfig};
use crate::error::{GlanceError, Result};
use crate::llm::api::LlmApiClient;

use super::{ContentAnalyzer, PreparedImage};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LlmBackend {
    Gemini,
    OpenAI,
    OpenRouter,
    Ollama,
    LmStudio,
    OpenAICompatible { base_url: String },
    Unavailable { reason: String },
}

impl LlmBackend {
    pub fn as_str(&self) -> &'static str {
        match self {
            LlmBackend::Gemini => "gemini",
            LlmBackend::OpenAI => "openai",
            LlmBackend::OpenRouter => "openrouter",
            LlmBackend::Ollama => "ollama",
            LlmBackend::LmStudio => "lmstudio",
            LlmBackend::OpenAICompatible { .. } => "openai-compatible",
            LlmBackend::Unavailable { .. } => "unavailable",
        }
    }
}

/// The hosted model behind the analysis endpoints.
///
/// Built once at startup from [`LlmConfig`]. Without configuration, or when
/// the client cannot be constructed, the provider is `Unavailable` and every
/// call fails with [`GlanceError::AnalysisUnavailable`].
#[derive(Clone)]
pub struct LlmProvider {
    backend: LlmBackend,
    model: String,
    client: Option<LlmApiClient>,
}

impl LlmProvider {
    pub fn new(config: Option<&LlmConfig>) -> Self {
        let Some(config) = config else {
            return Self::unavailable("No LLM configuration provided");
        };

        let (provider, _model) = parse_llm_provider_model(&config.model);

        let backend = match provider.to_lowercase().as_str() {
            "gemini" => LlmBackend::Gemini,
            "openai" => LlmBackend::OpenAI,
            "openrouter" => LlmBackend::OpenRouter,
            "ollama" => LlmBackend::Ollama,
            "lmstudio" => LlmBackend::LmStudio,
            _ => {
                if let Some(base_url) = &config.base_url {
                    LlmBackend::OpenAICompatible {
                        base_url: base_url.clone(),
                    }
                } else {
                    return Self::unavailable(&format!(
                        "Unknown provider in model: {}",
                        config.model
                    ));
                }
            }
        };

        match LlmApiClient::new(config) {
            Ok(client) => Self {
                backend,
                model: client.model().to_string(),
                client: Some(client),
            },
            Err(e) => {
                tracing::warn!(model = %config.model, error = %e, "LLM client unavailable");
                Self::unavailable(&e.to_string())
            }
        }
    }

    pub fn unavailable(reason: &str) -> Self {
        Self {
            backend: LlmBackend::Unavailable {
                reason: reason.to_string(),
            },
            model: "unavailable".to_string(),
            client: None,
        }
    }

    pub fn backend(&self) -> &LlmBackend {
        &self.backend
    }

    fn client(&self) -> Result<&LlmApiClient> {
        match (&self.backend, &self.client) {
            (LlmBackend::Unavailable { reason }, _) => {
                Err(GlanceError::AnalysisUnavailable(reason.clone()))
            }
            (_, Some(client)) => Ok(client),
            (_, None) => Err(GlanceError::AnalysisUnavailable(
                "No LLM client available".to_string(),
            )),
        }
    }
}

#[async_trait]
impl ContentAnalyzer for LlmProvider {
    fn model_name(&self) -> &str {
        &self.model
    }

    fn is_available(&self) -> bool {
        !matches!(self.backend, LlmBackend::Unavailable { .. })
    }

    async fn analyze_text(&self, prompt: &str) -> Result<String> {
        self.client()?.complete(prompt).await
    }

    async fn analyze_image(&self, prompt: &str, image: &PreparedImage) -> Result<String> {
        self.client()?.complete_with_image(prompt, image).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn llm_config(model: &str, api_key: Option<&str>, base_url: Option<&str>) -> LlmConfig {
        LlmConfig {
            model: model.to_string(),
            api_key: api_key.map(str::to_string),
            base_url: base_url.map(str::to_string),
            timeout_secs: 30,
            max_tokens: None,
        }
    }

    #[test]
    fn missing_config_is_unavailable() {
        let provider = LlmProvider::new(None);
        assert!(!provider.is_available());
        assert_eq!(provider.backend().as_str(), "unavailable");
    }

    #[test]
    fn gemini_model_selects_gemini_backend() {
        let provider =
            LlmProvider::new(Some(&llm_config("gemini/gemini-2.0-flash-exp", Some("k"), None)));
        assert_eq!(provider.backend(), &LlmBackend::Gemini);
        assert_eq!(provider.model_name(), "gemini-2.0-flash-exp");
    }

    #[test]
    fn unknown_provider_needs_base_url() {
        let provider = LlmProvider::new(Some(&llm_config("mystery-model", None, None)));
        assert!(!provider.is_available());

        let provider = LlmProvider::new(Some(&llm_config(
            "mystery-model",
            None,
            Some("http://localhost:9000/v1"),
        )));
        assert!(matches!(
            provider.backend(),
            LlmBackend::OpenAICompatible { base_url } if base_url == "http://localhost:9000/v1"
        ));
    }

    #[test]
    fn hosted_provider_without_key_is_unavailable() {
        let provider = LlmProvider::new(Some(&llm_config("openai/gpt-4o", None, None)));
        assert!(!provider.is_available());
    }

    #[tokio::test]
    async fn unavailable_provider_rejects_calls() {
        let provider = LlmProvider::unavailable("not configured");
        let err = provider.analyze_text("hello").await.unwrap_err();
        assert!(matches!(err, GlanceError::AnalysisUnavailable(reason) if reason == "not configured"));
    }
}
