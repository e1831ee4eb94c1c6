use serde::Deserialize;
use std::env;

pub(crate) const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

pub(crate) const DEFAULT_LLM_MODEL: &str = "gemini/gemini-2.0-flash-exp";

fn parse_env_or<T: std::str::FromStr>(var: &str, default: T) -> T
where
    T::Err: std::fmt::Display,
{
    match env::var(var) {
        Ok(val) => match val.parse() {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::warn!("Invalid value '{}' for {}: {}. Using default.", val, var, e);
                default
            }
        },
        Err(_) => default,
    }
}

fn parse_env_opt<T: std::str::FromStr>(var: &str) -> Option<T>
where
    T::Err: std::fmt::Display,
{
    match env::var(var) {
        Ok(val) => match val.parse() {
            Ok(parsed) => Some(parsed),
            Err(e) => {
                tracing::warn!("Invalid value '{}' for {}: {}. Ignoring.", val, var, e);
                None
            }
        },
        Err(_) => None,
    }
}

/// Parse `GLANCE_USERS`.
/// Format: comma-separated `username:role:sha256hex` entries, e.g. `admin:admin:ef92b7...`
fn parse_users(raw: &str) -> Vec<UserEntry> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .filter_map(|entry| {
            let mut parts = entry.splitn(3, ':');
            let username = parts.next()?.trim();
            let role = parts.next()?.trim();
            let password_sha256 = parts.next()?.trim();

            let valid_digest = password_sha256.len() == 64
                && password_sha256.chars().all(|c| c.is_ascii_hexdigit());

            if username.is_empty() || role.is_empty() || !valid_digest {
                tracing::warn!(
                    "Invalid user entry for '{}' in GLANCE_USERS, skipping",
                    username
                );
                None
            } else {
                Some(UserEntry {
                    username: username.to_string(),
                    role: role.to_string(),
                    password_sha256: password_sha256.to_lowercase(),
                })
            }
        })
        .collect()
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub llm: Option<LlmConfig>,
    pub processing: ProcessingConfig,
    pub drive: DriveConfig,
    pub auth: AuthConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub max_upload_bytes: usize,
    pub session_ttl_secs: u64,
    pub session_cookie_secure: bool,
}

/// Hosted model used for image and document analysis
#[derive(Debug, Clone, Deserialize)]
pub struct LlmConfig {
    pub model: String,
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub timeout_secs: u64,
    pub max_tokens: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProcessingConfig {
    /// Extracted content longer than this many characters is truncated.
    pub max_content_chars: usize,
    pub url_fetch_timeout_secs: u64,
    pub user_agent: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DriveConfig {
    pub token_path: String,
    pub api_base: String,
    pub token_url: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthConfig {
    pub users: Vec<UserEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserEntry {
    pub username: String,
    pub role: String,
    /// Lowercase hex SHA-256 digest of the password.
    pub password_sha256: String,
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        Self {
            max_content_chars: 30_000,
            url_fetch_timeout_secs: 30,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl Default for DriveConfig {
    fn default() -> Self {
        Self {
            token_path: "drive_token.json".to_string(),
            api_base: "https://www.googleapis.com/drive/v3".to_string(),
            token_url: "https://oauth2.googleapis.com/token".to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        let api_key = env::var("LLM_API_KEY")
            .or_else(|_| env::var("GOOGLE_API_KEY"))
            .ok();
        let model = env::var("LLM_MODEL").ok();

        Self {
            server: ServerConfig {
                host: env::var("GLANCE_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: parse_env_or("GLANCE_PORT", 5001),
                max_upload_bytes: parse_env_or("MAX_UPLOAD_BYTES", 25 * 1024 * 1024),
                session_ttl_secs: parse_env_or("SESSION_TTL_SECS", 86400),
                session_cookie_secure: parse_env_or("SESSION_COOKIE_SECURE", false),
            },
            llm: if model.is_some() || api_key.is_some() {
                Some(LlmConfig {
                    model: model.unwrap_or_else(|| DEFAULT_LLM_MODEL.to_string()),
                    api_key,
                    base_url: env::var("LLM_BASE_URL").ok(),
                    timeout_secs: parse_env_or("LLM_TIMEOUT", 120),
                    max_tokens: parse_env_opt("LLM_MAX_TOKENS"),
                })
            } else {
                None
            },
            processing: ProcessingConfig {
                max_content_chars: parse_env_or("MAX_CONTENT_CHARS", 30_000),
                url_fetch_timeout_secs: parse_env_or("URL_FETCH_TIMEOUT", 30),
                user_agent: env::var("URL_FETCH_USER_AGENT")
                    .unwrap_or_else(|_| DEFAULT_USER_AGENT.to_string()),
            },
            drive: {
                let defaults = DriveConfig::default();
                DriveConfig {
                    token_path: env::var("GOOGLE_DRIVE_TOKEN_PATH")
                        .unwrap_or(defaults.token_path),
                    api_base: env::var("GOOGLE_DRIVE_API_BASE").unwrap_or(defaults.api_base),
                    token_url: env::var("GOOGLE_OAUTH_TOKEN_URL").unwrap_or(defaults.token_url),
                }
            },
            auth: AuthConfig {
                users: env::var("GLANCE_USERS")
                    .map(|raw| parse_users(&raw))
                    .unwrap_or_default(),
            },
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::default()
    }
}

/// Known LLM providers that expose OpenAI-compatible chat endpoints.
pub const KNOWN_LLM_PROVIDERS: &[&str] = &["gemini", "openai", "openrouter", "ollama", "lmstudio"];

/// Parse an LLM model name into (provider, model) tuple.
pub fn parse_llm_provider_model(model: &str) -> (&str, &str) {
    if let Some((prefix, rest)) = model.split_once('/') {
        let prefix_lower = prefix.to_lowercase();
        if KNOWN_LLM_PROVIDERS.contains(&prefix_lower.as_str()) {
            return (prefix, rest);
        }
    }
    // Default to treating the whole string as a local model
    ("local", model)
}
