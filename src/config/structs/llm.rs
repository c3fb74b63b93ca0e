//! Provider and generation-default configuration structures.

use serde::{Deserialize, Serialize};

use crate::constants;
use crate::error::{Result, ShellmateError};

/// Provider backend style.
///
/// Selects which provider implementation to instantiate.
/// If [`ProviderConfig::api_style`] is `None`, the style is inferred from the provider name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiStyle {
    /// OpenAI chat completions (and OpenAI-compatible APIs).
    #[serde(rename = "openai")]
    OpenAI,
    /// Anthropic (no backend yet).
    Anthropic,
    /// Google Gemini (no backend yet).
    Gemini,
    /// Ollama local models (no backend yet).
    Ollama,
}

impl std::fmt::Display for ApiStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiStyle::OpenAI => write!(f, "openai"),
            ApiStyle::Anthropic => write!(f, "anthropic"),
            ApiStyle::Gemini => write!(f, "gemini"),
            ApiStyle::Ollama => write!(f, "ollama"),
        }
    }
}

impl std::str::FromStr for ApiStyle {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "openai" => Ok(ApiStyle::OpenAI),
            "anthropic" => Ok(ApiStyle::Anthropic),
            "gemini" => Ok(ApiStyle::Gemini),
            "ollama" => Ok(ApiStyle::Ollama),
            _ => Err(format!("Unknown API style: '{}'", s)),
        }
    }
}

impl ApiStyle {
    /// Whether an HTTP backend exists for this style.
    pub fn is_implemented(&self) -> bool {
        matches!(self, ApiStyle::OpenAI)
    }
}

/// Generation parameters shared by every provider (`defaults` in the JSON file).
///
/// # Example
/// ```json
/// { "defaults": { "temperature": 0.2, "maxTokens": 512, "timeoutMs": 30000, "retries": 2 } }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ModelDefaults {
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
    pub timeout_ms: Option<u64>,
    pub retries: Option<u32>,
    /// Base delay of the linear retry backoff.
    pub retry_delay_ms: Option<u64>,
}

/// Provider configuration.
///
/// Settings for one entry under `providers.<name>`.
///
/// # Fields
/// - `apiStyle`: backend style (see [`ApiStyle`]); inferred from the name when omitted
/// - `apiKey`: API key, or `ENV:<VAR>` to read it from the environment
/// - `baseUrl`: API base URL (optional)
/// - `model`: model name (optional)
/// - `temperature`, `maxTokens`, `timeoutMs`, `retries`, `retryDelayMs`: per-provider overrides
///
/// # Example
/// ```json
/// {
///   "providers": {
///     "openai": { "apiKey": "ENV:OPENAI_API_KEY", "model": "gpt-4.1-mini" },
///     "deepseek": { "apiStyle": "openai", "baseUrl": "https://api.deepseek.com/v1", "apiKey": "sk-..." }
///   }
/// }
/// ```
#[derive(Clone, Default, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProviderConfig {
    pub api_style: Option<ApiStyle>,

    #[serde(skip_serializing)]
    pub api_key: Option<String>,

    pub base_url: Option<String>,

    pub model: Option<String>,

    pub temperature: Option<f32>,

    pub max_tokens: Option<u32>,

    pub timeout_ms: Option<u64>,

    pub retries: Option<u32>,

    pub retry_delay_ms: Option<u64>,
}

impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use crate::llm::provider::utils::mask_api_key;
        let masked_key = self.api_key.as_deref().map(mask_api_key);
        f.debug_struct("ProviderConfig")
            .field("api_style", &self.api_style)
            .field("api_key", &masked_key)
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .field("timeout_ms", &self.timeout_ms)
            .field("retries", &self.retries)
            .field("retry_delay_ms", &self.retry_delay_ms)
            .finish()
    }
}

impl ProviderConfig {
    /// Validates provider configuration.
    pub fn validate(&self, name: &str) -> Result<()> {
        if let Some(ref key) = self.api_key
            && key.trim().is_empty()
        {
            return Err(ShellmateError::Config(format!(
                "Provider '{}': apiKey is empty",
                name
            )));
        }
        let scope = format!("Provider '{}'", name);
        validate_generation_params(
            &scope,
            self.temperature,
            self.max_tokens,
            self.timeout_ms,
            self.retries,
        )
    }
}

impl ModelDefaults {
    /// Validates global generation defaults.
    pub fn validate(&self) -> Result<()> {
        validate_generation_params(
            "defaults",
            self.temperature,
            self.max_tokens,
            self.timeout_ms,
            self.retries,
        )
    }
}

/// Range checks shared by `defaults`, provider entries and CLI overrides.
pub(crate) fn validate_generation_params(
    scope: &str,
    temperature: Option<f32>,
    max_tokens: Option<u32>,
    timeout_ms: Option<u64>,
    retries: Option<u32>,
) -> Result<()> {
    if let Some(temp) = temperature
        && !constants::llm::TEMPERATURE_RANGE.contains(&temp)
    {
        return Err(ShellmateError::Config(format!(
            "{}: temperature {} out of range [0.0, 2.0]",
            scope, temp
        )));
    }
    if max_tokens == Some(0) {
        return Err(ShellmateError::Config(format!(
            "{}: maxTokens must be greater than 0",
            scope
        )));
    }
    if timeout_ms == Some(0) {
        return Err(ShellmateError::Config(format!(
            "{}: timeoutMs must be greater than 0",
            scope
        )));
    }
    if let Some(retries) = retries
        && retries > constants::network::MAX_RETRIES
    {
        return Err(ShellmateError::Config(format!(
            "{}: retries {} exceeds maximum {}",
            scope,
            retries,
            constants::network::MAX_RETRIES
        )));
    }
    Ok(())
}
