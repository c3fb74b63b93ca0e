//! LLM abstractions, shared types, and the provider trait.
//!
//! The executor only talks to [`LlmProvider`]; concrete backends live in
//! [`provider`], prompt construction in [`prompt`].

/// Prompt templates and the read-through template cache.
pub mod prompt;
/// Built-in provider implementations and factory helpers.
pub mod provider;

use std::time::Duration;

use async_trait::async_trait;

use crate::constants;
use crate::error::Result;

/// Progress reporting interface for LLM operations.
///
/// The LLM layer reports status changes (retries) through this trait
/// instead of depending on a concrete UI implementation.
pub trait ProgressReporter: Send + Sync {
    /// Appends an informative suffix to a progress message.
    fn append_suffix(&self, suffix: &str);
}

/// A system/user prompt pair, built once per invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub system: String,
    pub user: String,
}

/// Generation parameters after merging call-site overrides and config.
///
/// `None` fields fall back to the constants in [`constants`].
#[derive(Debug, Clone, PartialEq)]
pub struct ModelOptions {
    pub model: String,
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
    pub timeout_ms: Option<u64>,
    pub retries: Option<u32>,
    pub retry_delay_ms: Option<u64>,
}

impl ModelOptions {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            temperature: None,
            max_tokens: None,
            timeout_ms: None,
            retries: None,
            retry_delay_ms: None,
        }
    }

    pub fn temperature(&self) -> f32 {
        self.temperature
            .unwrap_or(constants::llm::DEFAULT_TEMPERATURE)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(
            self.timeout_ms
                .unwrap_or(constants::network::DEFAULT_TIMEOUT_MS),
        )
    }

    pub fn retries(&self) -> u32 {
        self.retries
            .unwrap_or(constants::network::DEFAULT_RETRIES)
            .min(constants::network::MAX_RETRIES)
    }

    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(
            self.retry_delay_ms
                .unwrap_or(constants::network::DEFAULT_RETRY_DELAY_MS),
        )
    }
}

/// Call-site (CLI) overrides; highest precedence when resolving [`ModelOptions`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModelOverrides {
    pub model: Option<String>,
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
    pub timeout_ms: Option<u64>,
    pub retries: Option<u32>,
}

/// Text completion returned by a provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LlmResponse {
    pub text: String,
}

/// Unified interface implemented by all LLM backends.
///
/// # Implementer Notes
/// 1. Implement `Send + Sync` (required in async contexts).
/// 2. Handle timeouts, retries and rate limits inside `generate`.
/// 3. Every failure must surface as a classified
///    [`ProviderError`](crate::error::ProviderError), or as
///    [`NotImplemented`](crate::error::ShellmateError::NotImplemented) for
///    backends that are not wired in yet.
///
/// # Built-In Implementations
/// - [`OpenAiProvider`](provider::openai::OpenAiProvider) - OpenAI/compatible chat completions
/// - [`PlaceholderProvider`](provider::placeholder::PlaceholderProvider) - selectable, always fails
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Provider name (used for logs, verbose output and error messages).
    fn name(&self) -> &str;

    /// Sends the prompt pair and returns the trimmed completion text.
    async fn generate(
        &self,
        prompt: &Prompt,
        options: &ModelOptions,
        progress: Option<&dyn ProgressReporter>,
    ) -> Result<LlmResponse>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_options_defaults() {
        let options = ModelOptions::new("gpt-4.1");
        assert_eq!(options.timeout(), Duration::from_millis(30_000));
        assert_eq!(options.retries(), 2);
        assert_eq!(options.retry_delay(), Duration::from_millis(500));
        assert!((options.temperature() - 0.2).abs() < f32::EPSILON);
    }

    #[test]
    fn test_model_options_retries_capped() {
        let options = ModelOptions {
            retries: Some(99),
            ..ModelOptions::new("m")
        };
        assert_eq!(options.retries(), constants::network::MAX_RETRIES);
    }
}
