use async_trait::async_trait;

use crate::error::{Result, ShellmateError};
use crate::llm::{LlmProvider, LlmResponse, ModelOptions, ProgressReporter, Prompt};

/// Selectable provider without a backend.
///
/// Lets `anthropic`, `gemini` and `ollama` be named in config and on the
/// command line; every call fails with [`ShellmateError::NotImplemented`].
#[derive(Debug, Clone)]
pub struct PlaceholderProvider {
    name: String,
}

impl PlaceholderProvider {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[async_trait]
impl LlmProvider for PlaceholderProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn generate(
        &self,
        _prompt: &Prompt,
        _options: &ModelOptions,
        _progress: Option<&dyn ProgressReporter>,
    ) -> Result<LlmResponse> {
        tracing::debug!("Provider '{}' has no backend", self.name);
        Err(ShellmateError::NotImplemented {
            provider: self.name.clone(),
        })
    }
}
