//! Top-level application configuration and option resolution.

use std::collections::HashMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::constants;
use crate::error::Result;
use crate::llm::{ModelOptions, ModelOverrides};

use super::llm::{ApiStyle, ModelDefaults, ProviderConfig};
use super::safety::{SafetyConfig, UiConfig};

/// Application configuration.
///
/// Deserialized from a camelCase JSON file; every field is optional and a
/// missing file is equivalent to `AppConfig::default()`.
///
/// # Configuration File Location
/// - `--config <path>` or `SHELLMATE_CONFIG`
/// - otherwise `~/.shellmate/config.json`
///
/// # Example
/// ```json
/// {
///   "defaultProvider": "openai",
///   "defaultModel": "gpt-4.1",
///   "defaults": { "temperature": 0.2, "retries": 2 },
///   "providers": { "openai": { "apiKey": "ENV:OPENAI_API_KEY" } },
///   "safety": { "warnOnDangerousCommands": true, "blockOnVeryDangerous": true }
/// }
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AppConfig {
    /// Provider used when `--provider` is not given.
    pub default_provider: Option<String>,

    /// Model used when neither `--model` nor the provider entry names one.
    pub default_model: Option<String>,

    /// Generation defaults shared by all providers.
    pub defaults: ModelDefaults,

    /// Provider settings keyed by provider name.
    pub providers: HashMap<String, ProviderConfig>,

    /// Dangerous-command handling.
    pub safety: SafetyConfig,

    /// Directory of user-supplied prompt templates (`<dir>/<id>.md`).
    pub prompts_dir: Option<PathBuf>,

    /// Terminal UI behavior.
    pub ui: UiConfig,
}

impl AppConfig {
    /// Validates configuration consistency.
    pub fn validate(&self) -> Result<()> {
        self.defaults.validate()?;
        for (name, provider) in &self.providers {
            provider.validate(name)?;
        }
        Ok(())
    }

    /// Provider name: explicit override > `defaultProvider` > `openai`.
    pub fn provider_name(&self, explicit: Option<&str>) -> String {
        explicit
            .or(self.default_provider.as_deref())
            .unwrap_or(constants::provider::DEFAULT_PROVIDER)
            .to_string()
    }

    /// Backend style of a provider: its `apiStyle`, else inferred from the name.
    pub fn api_style_for(&self, name: &str) -> Option<ApiStyle> {
        self.providers
            .get(name)
            .and_then(|p| p.api_style)
            .or_else(|| name.parse().ok())
    }

    /// Model name: explicit override > provider model > `defaultModel` > `gpt-4.1`.
    pub fn model_for(&self, provider: &str, explicit: Option<&str>) -> String {
        explicit
            .map(str::to_string)
            .or_else(|| self.providers.get(provider).and_then(|p| p.model.clone()))
            .or_else(|| self.default_model.clone())
            .unwrap_or_else(|| constants::provider::DEFAULT_MODEL.to_string())
    }

    /// Resolved API key for a provider.
    ///
    /// OpenAI-style providers without a configured key fall back to `OPENAI_API_KEY`.
    pub fn api_key_for(&self, name: &str) -> Option<String> {
        let configured = self
            .providers
            .get(name)
            .and_then(|p| p.api_key.clone())
            .filter(|k| !k.trim().is_empty());

        configured.or_else(|| {
            if self.api_style_for(name) != Some(ApiStyle::OpenAI) {
                return None;
            }
            std::env::var(constants::provider::OPENAI_API_KEY_ENV)
                .ok()
                .filter(|k| !k.trim().is_empty())
        })
    }

    /// Base URL for a provider (defaults to the OpenAI API).
    pub fn base_url_for(&self, name: &str) -> String {
        self.providers
            .get(name)
            .and_then(|p| p.base_url.clone())
            .unwrap_or_else(|| constants::provider::DEFAULT_OPENAI_BASE.to_string())
    }

    /// Merges call-site overrides, provider config and global defaults, in that order.
    pub fn model_options(&self, provider: &str, overrides: &ModelOverrides) -> ModelOptions {
        let entry = self.providers.get(provider);
        let defaults = &self.defaults;

        ModelOptions {
            model: self.model_for(provider, overrides.model.as_deref()),
            temperature: overrides
                .temperature
                .or_else(|| entry.and_then(|p| p.temperature))
                .or(defaults.temperature),
            max_tokens: overrides
                .max_tokens
                .or_else(|| entry.and_then(|p| p.max_tokens))
                .or(defaults.max_tokens),
            timeout_ms: overrides
                .timeout_ms
                .or_else(|| entry.and_then(|p| p.timeout_ms))
                .or(defaults.timeout_ms),
            retries: overrides
                .retries
                .or_else(|| entry.and_then(|p| p.retries))
                .or(defaults.retries),
            retry_delay_ms: entry
                .and_then(|p| p.retry_delay_ms)
                .or(defaults.retry_delay_ms),
        }
    }
}
