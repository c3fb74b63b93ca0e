pub mod openai;
pub mod placeholder;
pub mod retry;
pub mod utils;

#[cfg(test)]
pub mod test_utils;

use std::sync::{Arc, OnceLock};
use std::time::Duration;

use reqwest::Client;

use crate::config::{ApiStyle, AppConfig};
use crate::constants;
use crate::error::{Result, ShellmateError};
use crate::llm::LlmProvider;

/// 全局 HTTP 客户端（共享连接池）
static HTTP_CLIENT: OnceLock<Client> = OnceLock::new();

/// 全局 HTTP 客户端初始化错误信息
///
/// 如果第一次创建失败，保存错误字符串以避免后续重复创建与潜在 panic。
static HTTP_CLIENT_ERROR: OnceLock<String> = OnceLock::new();

/// 获取或创建全局 HTTP 客户端
///
/// 使用 OnceLock 确保只创建一次。请求超时按请求单独设置（见 `ModelOptions::timeout`），
/// 客户端只配置连接超时。
pub(crate) fn create_http_client() -> Result<Client> {
    if let Some(client) = HTTP_CLIENT.get() {
        return Ok(client.clone());
    }

    if let Some(err_msg) = HTTP_CLIENT_ERROR.get() {
        return Err(ShellmateError::Other(
            rust_i18n::t!("provider.http_client_init_failed", error = err_msg.as_str()).to_string(),
        ));
    }

    let user_agent = format!(
        "{}/{} ({})",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        std::env::consts::OS
    );

    match Client::builder()
        .user_agent(user_agent)
        .connect_timeout(Duration::from_secs(
            constants::network::CONNECT_TIMEOUT_SECS,
        ))
        .build()
    {
        Ok(client) => {
            let _ = HTTP_CLIENT.set(client.clone());
            Ok(client)
        }
        Err(e) => {
            let err_msg = e.to_string();
            let _ = HTTP_CLIENT_ERROR.set(err_msg.clone());
            Err(ShellmateError::Other(
                rust_i18n::t!(
                    "provider.http_client_create_failed",
                    error = err_msg.as_str()
                )
                .to_string(),
            ))
        }
    }
}

/// 根据配置创建 LLM Provider
///
/// - `openai`（或任何 `apiStyle: "openai"` 的条目）-> HTTP 后端
/// - `anthropic` / `gemini` / `ollama` -> 占位 provider，调用时返回 NotImplemented
/// - 其他名称 -> "Unsupported provider" 配置错误
pub fn create_provider(config: &AppConfig, name: &str) -> Result<Arc<dyn LlmProvider>> {
    match config.api_style_for(name) {
        Some(ApiStyle::OpenAI) => Ok(Arc::new(openai::OpenAiProvider::from_config(
            config, name,
        )?)),
        Some(style) => {
            tracing::debug!("Provider '{}' uses style '{}' without a backend", name, style);
            Ok(Arc::new(placeholder::PlaceholderProvider::new(name)))
        }
        None => Err(ShellmateError::Config(format!(
            "Unsupported provider: {}",
            name
        ))),
    }
}
