use std::time::Duration;

use async_openai::{
    config::OpenAIConfig,
    error::OpenAIError,
    types::{
        ChatCompletionRequestMessage, ChatCompletionRequestMessageContentPartImageArgs,
        ChatCompletionRequestMessageContentPartTextArgs, ChatCompletionRequestUserMessageArgs,
        CreateChatCompletionRequest, CreateChatCompletionRequestArgs,
        CreateChatCompletionResponse, ImageDetail, ImageUrlArgs,
    },
    Client,
};

use crate::{
    config::{parse_llm_provider_model, LlmConfig},
    error::{GlanceError, Result},
};

use super::PreparedImage;

pub(crate) const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/openai";
const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
const OPENROUTER_BASE_URL: &str = "https://openrouter.ai/api/v1";
const OLLAMA_BASE_URL: &str = "http://localhost:11434/v1";
const LMSTUDIO_BASE_URL: &str = "http://localhost:1234/v1";

#[derive(Debug, Clone)]
struct ApiConfig {
    base_url: String,
    api_key: Option<String>,
    model: String,
    timeout_secs: u64,
    max_tokens: Option<u32>,
}

/// Chat-completions client for any OpenAI-compatible endpoint.
///
/// Each call is attempted exactly once. async-openai's internal backoff is
/// capped at zero elapsed time so transient 5xx responses surface as errors
/// instead of being retried.
#[derive(Clone)]
pub struct LlmApiClient {
    client: Client<OpenAIConfig>,
    config: ApiConfig,
}

impl LlmApiClient {
    pub fn new(config: &LlmConfig) -> Result<Self> {
        let api_config = ApiConfig::from_llm_config(config);

        let (provider, _) = parse_llm_provider_model(&config.model);
        let needs_api_key = !matches!(
            provider.to_lowercase().as_str(),
            "ollama" | "local" | "lmstudio"
        );

        if needs_api_key && api_config.api_key.is_none() {
            return Err(GlanceError::AnalysisUnavailable(
                "API key required for this provider".to_string(),
            ));
        }

        let openai_config = OpenAIConfig::new()
            .with_api_base(api_config.base_url.clone())
            .with_api_key(api_config.api_key.clone().unwrap_or_default());

        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(api_config.timeout_secs))
            .build()
            .map_err(|error| {
                GlanceError::Internal(format!("Failed to create LLM HTTP client: {error}"))
            })?;

        let backoff = backoff::ExponentialBackoff {
            max_elapsed_time: Some(Duration::ZERO),
            ..Default::default()
        };

        let client = Client::with_config(openai_config)
            .with_http_client(http_client)
            .with_backoff(backoff);

        Ok(Self {
            client,
            config: api_config,
        })
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    pub async fn complete(&self, prompt: &str) -> Result<String> {
        if prompt.trim().is_empty() {
            return Err(GlanceError::Validation("Prompt cannot be empty".to_string()));
        }

        let message = ChatCompletionRequestUserMessageArgs::default()
            .content(prompt)
            .build()
            .map_err(|error| GlanceError::Validation(format!("Invalid user prompt: {error}")))?
            .into();

        self.send(self.build_request(vec![message])?).await
    }

    /// Send `prompt` together with `image` as a single multi-part user
    /// message.
    pub async fn complete_with_image(&self, prompt: &str, image: &PreparedImage) -> Result<String> {
        let image_url = ImageUrlArgs::default()
            .url(image.to_data_url())
            .detail(ImageDetail::Auto)
            .build()
            .map_err(|error| GlanceError::Validation(format!("Invalid image part: {error}")))?;

        let message = ChatCompletionRequestUserMessageArgs::default()
            .content(vec![
                ChatCompletionRequestMessageContentPartTextArgs::default()
                    .text(prompt)
                    .build()
                    .map_err(|error| {
                        GlanceError::Validation(format!("Invalid user prompt: {error}"))
                    })?
                    .into(),
                ChatCompletionRequestMessageContentPartImageArgs::default()
                    .image_url(image_url)
                    .build()
                    .map_err(|error| {
                        GlanceError::Validation(format!("Invalid image part: {error}"))
                    })?
                    .into(),
            ])
            .build()
            .map_err(|error| GlanceError::Validation(format!("Invalid user message: {error}")))?
            .into();

        self.send(self.build_request(vec![message])?).await
    }

    fn build_request(
        &self,
        messages: Vec<ChatCompletionRequestMessage>,
    ) -> Result<CreateChatCompletionRequest> {
        let mut request = CreateChatCompletionRequestArgs::default();
        request.model(self.config.model.clone()).messages(messages);

        if let Some(max_tokens) = self.config.max_tokens {
            request.max_tokens(max_tokens);
        }

        request.build().map_err(|error| {
            GlanceError::Validation(format!("Invalid LLM completion request: {error}"))
        })
    }

    async fn send(&self, request: CreateChatCompletionRequest) -> Result<String> {
        let started = std::time::Instant::now();
        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(Self::map_openai_error)?;

        tracing::debug!(
            model = %self.config.model,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "LLM completion received"
        );

        Self::extract_content(response)
    }

    fn extract_content(response: CreateChatCompletionResponse) -> Result<String> {
        let message = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| GlanceError::Analysis("LLM response contained no choices".to_string()))?
            .message
            .content
            .unwrap_or_default();

        if message.trim().is_empty() {
            return Err(GlanceError::Analysis(
                "LLM response contained empty content".to_string(),
            ));
        }

        Ok(message)
    }

    fn map_openai_error(error: OpenAIError) -> GlanceError {
        match error {
            OpenAIError::Reqwest(reqwest_error) => {
                GlanceError::Analysis(format!("LLM request failed: {reqwest_error}"))
            }
            OpenAIError::ApiError(api_error) => {
                GlanceError::Analysis(format!("LLM API error: {api_error}"))
            }
            OpenAIError::JSONDeserialize(err) => {
                GlanceError::Analysis(format!("Failed to parse LLM response: {err}"))
            }
            OpenAIError::InvalidArgument(message) => GlanceError::Validation(message),
            other => GlanceError::Analysis(other.to_string()),
        }
    }
}

impl ApiConfig {
    fn from_llm_config(config: &LlmConfig) -> Self {
        let (provider, model) = parse_llm_provider_model(&config.model);

        let base_url = config
            .base_url
            .clone()
            .unwrap_or_else(|| default_base_url(provider).to_string());

        let normalized_model = if provider.eq_ignore_ascii_case("local") {
            config.model.clone()
        } else {
            model.to_string()
        };

        Self {
            base_url,
            api_key: config.api_key.clone(),
            model: normalized_model,
            timeout_secs: config.timeout_secs,
            max_tokens: config.max_tokens,
        }
    }
}

fn default_base_url(provider: &str) -> &'static str {
    match provider.to_lowercase().as_str() {
        "gemini" => GEMINI_BASE_URL,
        "openai" => OPENAI_BASE_URL,
        "openrouter" => OPENROUTER_BASE_URL,
        "ollama" => OLLAMA_BASE_URL,
        "lmstudio" => LMSTUDIO_BASE_URL,
        _ => OPENAI_BASE_URL,
    }
}
