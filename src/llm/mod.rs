mod gemini;
mod openai;

use async_trait::async_trait;
use std::time::Duration;

pub use gemini::GeminiProvider;
pub use openai::OpenAiProvider;

/// Result type for LLM operations
pub type LlmResult<T> = Result<T, LlmError>;

/// Errors that can occur during LLM operations
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("API request failed: {0}")]
    ApiError(String),

    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    #[error("Response parsing failed: {0}")]
    ParseError(String),
}

/// Request to generate text from a model
#[derive(Debug, Clone)]
pub struct GenerateRequest {
    /// The user prompt
    pub prompt: String,
    /// Optional system instruction
    pub system: Option<String>,
    /// Sampling temperature (provider default when unset)
    pub temperature: Option<f32>,
    /// Maximum response length in tokens (provider-dependent)
    pub max_tokens: Option<u32>,
    /// Timeout for the request
    pub timeout: Duration,
    /// Ask the provider for a JSON object response where supported
    pub json_response: bool,
}

/// Response from an LLM provider
#[derive(Debug, Clone)]
pub struct GenerateResponse {
    /// The generated text
    pub text: String,
    /// Provider-specific metadata (model used, latency, etc.)
    pub metadata: ResponseMetadata,
}

/// Metadata about the LLM response
#[derive(Debug, Clone)]
pub struct ResponseMetadata {
    /// Name of the provider (e.g., "gemini", "openai")
    pub provider: String,
    /// Model name used
    pub model: String,
    /// Latency in milliseconds
    pub latency_ms: u64,
}

/// Trait that all LLM providers must implement
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Generate text for the given request
    async fn generate(&self, request: GenerateRequest) -> LlmResult<GenerateResponse>;

    /// Get the name of this provider
    fn name(&self) -> &str;
}

/// Manager holding the configured providers in preference order
pub struct LlmManager {
    providers: Vec<Box<dyn LlmProvider>>,
    pub default_timeout: Duration,
    pub default_max_tokens: u32,
}

impl LlmManager {
    pub fn new(
        providers: Vec<Box<dyn LlmProvider>>,
        default_timeout: Duration,
        default_max_tokens: u32,
    ) -> Self {
        Self {
            providers,
            default_timeout,
            default_max_tokens,
        }
    }

    /// Try providers in configured order and return the first success.
    /// Failures are logged and skipped; the last error is returned when all fail.
    pub async fn generate(&self, request: GenerateRequest) -> LlmResult<GenerateResponse> {
        let mut last_error = LlmError::ConfigError("no LLM providers configured".to_string());

        for provider in &self.providers {
            match provider.generate(request.clone()).await {
                Ok(response) => {
                    tracing::debug!(
                        provider = provider.name(),
                        model = %response.metadata.model,
                        latency_ms = response.metadata.latency_ms,
                        "generation succeeded"
                    );
                    return Ok(response);
                }
                Err(e) => {
                    tracing::warn!("provider {} failed: {}", provider.name(), e);
                    last_error = e;
                }
            }
        }

        Err(last_error)
    }

    /// A request pre-filled with the configured defaults
    pub fn request(&self, prompt: String) -> GenerateRequest {
        GenerateRequest {
            prompt,
            system: None,
            temperature: None,
            max_tokens: Some(self.default_max_tokens),
            timeout: self.default_timeout,
            json_response: false,
        }
    }
}

/// Configuration for LLM providers
#[derive(Debug, Clone)]
pub struct LlmConfig {
    /// Gemini API key
    pub gemini_api_key: Option<String>,
    /// Gemini model to use
    pub gemini_model: String,
    /// Gemini API base URL
    pub gemini_base_url: String,
    /// OpenAI API key
    pub openai_api_key: Option<String>,
    /// OpenAI model to use
    pub openai_model: String,
    /// Default timeout for LLM requests
    pub default_timeout: Duration,
    /// Default max tokens for responses
    pub default_max_tokens: u32,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            gemini_api_key: None,
            gemini_model: "gemini-2.5-flash".to_string(),
            gemini_base_url: "https://generativelanguage.googleapis.com".to_string(),
            openai_api_key: None,
            openai_model: "gpt-4o-mini".to_string(),
            default_timeout: Duration::from_secs(30),
            default_max_tokens: 1024,
        }
    }
}

fn env_nonempty(key: &str) -> Option<String> {
    std::env::var(key).ok().and_then(|value| {
        let trimmed = value.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    })
}

impl LlmConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            gemini_api_key: env_nonempty("GEMINI_API_KEY"),
            gemini_model: env_nonempty("GEMINI_MODEL").unwrap_or(defaults.gemini_model),
            gemini_base_url: env_nonempty("GEMINI_BASE_URL").unwrap_or(defaults.gemini_base_url),
            openai_api_key: env_nonempty("OPENAI_API_KEY"),
            openai_model: env_nonempty("OPENAI_MODEL").unwrap_or(defaults.openai_model),
            default_timeout: env_nonempty("LLM_TIMEOUT")
                .and_then(|s| s.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.default_timeout),
            default_max_tokens: env_nonempty("LLM_MAX_TOKENS")
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.default_max_tokens),
        }
    }

    /// Build an LlmManager with all configured providers, Gemini first
    pub fn build_manager(&self) -> LlmResult<LlmManager> {
        let mut providers: Vec<Box<dyn LlmProvider>> = Vec::new();

        if let Some(api_key) = &self.gemini_api_key {
            providers.push(Box::new(GeminiProvider::new(
                self.gemini_base_url.clone(),
                api_key.clone(),
                self.gemini_model.clone(),
            )));
        }

        if let Some(api_key) = &self.openai_api_key {
            providers.push(Box::new(OpenAiProvider::new(
                api_key.clone(),
                self.openai_model.clone(),
            )));
        }

        if providers.is_empty() {
            return Err(LlmError::ConfigError(
                "No LLM providers configured. Set GEMINI_API_KEY or OPENAI_API_KEY".to_string(),
            ));
        }

        Ok(LlmManager::new(
            providers,
            self.default_timeout,
            self.default_max_tokens,
        ))
    }
}
