use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::retry::{JsonRequest, RetryPolicy, send_llm_request};
use super::utils::complete_endpoint;
use crate::config::AppConfig;
use crate::constants;
use crate::error::{ProviderErrorKind, Result, ShellmateError};
use crate::llm::{LlmProvider, LlmResponse, ModelOptions, ProgressReporter, Prompt};

/// OpenAI API provider
///
/// Sends the system/user prompt pair to a chat completions endpoint.
/// Works with the OpenAI API and OpenAI-compatible services (DeepSeek,
/// OpenRouter, local gateways) via `baseUrl` + `apiStyle: "openai"`.
///
/// # Configuration example
/// ```json
/// {
///   "providers": {
///     "openai": { "apiKey": "ENV:OPENAI_API_KEY", "model": "gpt-4.1" },
///     "deepseek": { "apiStyle": "openai", "baseUrl": "https://api.deepseek.com/v1", "apiKey": "sk-..." }
///   }
/// }
/// ```
///
/// # Features
/// - Per-request timeout (`timeoutMs`, default 30000)
/// - Linear-backoff retries on 429, 5xx and transport errors (`retries`, default 2)
/// - Typed failures: `auth`, `rate_limit`, `network`, `invalid_response`, `unknown`
///
/// # Example
/// ```ignore
/// use shellmate::llm::{LlmProvider, ModelOptions, Prompt};
/// use shellmate::llm::provider::openai::OpenAiProvider;
///
/// # async fn example() -> shellmate::error::Result<()> {
/// let provider = OpenAiProvider::new("openai", "https://api.openai.com/v1", Some("sk-...".into()))?;
/// let prompt = Prompt { system: "You are Shellmate".into(), user: "list files".into() };
/// let response = provider.generate(&prompt, &ModelOptions::new("gpt-4.1"), None).await?;
/// println!("{}", response.text);
/// # Ok(())
/// # }
/// ```
pub struct OpenAiProvider {
    name: String,
    client: Client,
    api_key: Option<String>,
    endpoint: String,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [MessagePayload<'a>; 2],
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

#[derive(Serialize)]
struct MessagePayload<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: MessageContent,
}

#[derive(Deserialize)]
struct MessageContent {
    #[serde(default)]
    content: Option<String>,
}

impl OpenAiProvider {
    /// Builds a provider for `<base_url>/chat/completions`.
    pub fn new(name: &str, base_url: &str, api_key: Option<String>) -> Result<Self> {
        Ok(Self {
            name: name.to_string(),
            client: super::create_http_client()?,
            api_key,
            endpoint: complete_endpoint(base_url, constants::provider::CHAT_COMPLETIONS_SUFFIX),
        })
    }

    /// Builds a provider from the config entry `providers.<name>`.
    pub fn from_config(config: &AppConfig, name: &str) -> Result<Self> {
        Self::new(name, &config.base_url_for(name), config.api_key_for(name))
    }
}

#[async_trait]
impl LlmProvider for OpenAiProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn generate(
        &self,
        prompt: &Prompt,
        options: &ModelOptions,
        progress: Option<&dyn ProgressReporter>,
    ) -> Result<LlmResponse> {
        // 缺失凭据时不发起任何网络请求
        let Some(api_key) = self.api_key.as_deref() else {
            return Err(ShellmateError::provider(
                ProviderErrorKind::Auth,
                rust_i18n::t!("provider.api_key_missing", provider = self.name.as_str())
                    .to_string(),
            ));
        };

        let request = ChatRequest {
            model: &options.model,
            messages: [
                MessagePayload {
                    role: "system",
                    content: &prompt.system,
                },
                MessagePayload {
                    role: "user",
                    content: &prompt.user,
                },
            ],
            temperature: options.temperature(),
            max_tokens: options.max_tokens,
        };

        tracing::debug!(
            "OpenAI API request: model={}, temperature={}, max_tokens={:?}, system_len={}, user_len={}",
            options.model,
            request.temperature,
            request.max_tokens,
            prompt.system.len(),
            prompt.user.len()
        );

        let auth_header = format!("Bearer {}", api_key);
        let headers = [("Authorization", auth_header.as_str())];
        let response: ChatResponse = send_llm_request(
            &self.client,
            &JsonRequest {
                endpoint: &self.endpoint,
                headers: &headers,
                body: &request,
                timeout: options.timeout(),
            },
            "OpenAI",
            RetryPolicy::new(options.retries(), options.retry_delay()),
            progress,
        )
        .await?;

        response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(|content| content.trim().to_string())
            .filter(|content| !content.is_empty())
            .map(|text| LlmResponse { text })
            .ok_or_else(|| {
                ShellmateError::provider(
                    ProviderErrorKind::InvalidResponse,
                    rust_i18n::t!("provider.openai_no_content").to_string(),
                )
            })
    }
}
