//! HTTP 请求发送与重试逻辑
//!
//! 重试决策是纯函数 [`RetryPolicy::decide`]：可重试的失败（429、5xx、传输层错误）
//! 在预算内按线性退避（`base * (attempt + 1)`）重试，其余失败立即分类返回。

use std::time::Duration;

use reqwest::Client;
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::utils::preview_body;
use crate::constants;
use crate::error::{ProviderError, ProviderErrorKind, Result, ShellmateError};
use crate::llm::ProgressReporter;

/// 单次请求的失败原因（尚未分类）
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptFailure {
    /// 非 2xx 状态码
    Status { status: u16, body: String },
    /// 连接失败、超时等传输层错误
    Transport { message: String },
    /// 2xx 但响应体无法解析
    InvalidBody { message: String },
}

impl AttemptFailure {
    fn is_retryable(&self) -> bool {
        match self {
            Self::Status { status, .. } => *status == 429 || *status >= 500,
            Self::Transport { .. } => true,
            Self::InvalidBody { .. } => false,
        }
    }

    /// 失败分类
    ///
    /// - 401/403 -> auth
    /// - 429 -> rate_limit
    /// - 其他非 2xx、传输层错误 -> network
    /// - 响应体无效 -> invalid_response
    pub fn classify(self, provider: &str) -> ProviderError {
        match self {
            Self::Status { status, body } => {
                let kind = match status {
                    401 | 403 => ProviderErrorKind::Auth,
                    429 => ProviderErrorKind::RateLimit,
                    _ => ProviderErrorKind::Network,
                };
                ProviderError::new(
                    kind,
                    format!(
                        "{} API error ({}): {}",
                        provider,
                        status,
                        preview_body(&body, constants::output::ERROR_PREVIEW_LENGTH)
                    ),
                )
            }
            Self::Transport { message } => ProviderError::new(ProviderErrorKind::Network, message),
            Self::InvalidBody { message } => {
                ProviderError::new(ProviderErrorKind::InvalidResponse, message)
            }
        }
    }
}

/// 重试决策
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RetryDecision {
    /// 等待给定时长后重试
    RetryAfter(Duration),
    /// 放弃并返回分类后的错误
    GiveUp(ProviderError),
}

/// 线性退避重试策略
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// 首次请求之外的最大重试次数
    pub retries: u32,
    /// 退避基础延迟
    pub base_delay: Duration,
}

impl RetryPolicy {
    pub fn new(retries: u32, base_delay: Duration) -> Self {
        Self {
            retries,
            base_delay,
        }
    }

    /// 第 `attempt` 次（从 0 开始）失败后的等待时长
    pub fn delay_for(&self, attempt: u32) -> Duration {
        self.base_delay.saturating_mul(attempt.saturating_add(1))
    }

    /// 决定第 `attempt` 次失败后是否重试
    pub fn decide(&self, attempt: u32, failure: AttemptFailure, provider: &str) -> RetryDecision {
        if failure.is_retryable() && attempt < self.retries {
            RetryDecision::RetryAfter(self.delay_for(attempt))
        } else {
            RetryDecision::GiveUp(failure.classify(provider))
        }
    }
}

/// 一次 JSON POST 请求的描述
pub struct JsonRequest<'a, Req: Serialize> {
    pub endpoint: &'a str,
    pub headers: &'a [(&'a str, &'a str)],
    pub body: &'a Req,
    pub timeout: Duration,
}

/// 尝试发送一次请求，成功时返回解析后的响应体
async fn try_send_request<Req, Resp>(
    client: &Client,
    request: &JsonRequest<'_, Req>,
    provider_name: &str,
) -> std::result::Result<Resp, AttemptFailure>
where
    Req: Serialize,
    Resp: DeserializeOwned,
{
    let mut req = client
        .post(request.endpoint)
        .header("Content-Type", "application/json")
        .timeout(request.timeout);

    for (key, value) in request.headers {
        req = req.header(*key, *value);
    }

    tracing::debug!("Sending request to: {}", request.endpoint);

    let response = req
        .json(request.body)
        .send()
        .await
        .map_err(|e| transport_failure(e, provider_name, request.timeout))?;

    let status = response.status();
    let response_text = response
        .text()
        .await
        .map_err(|e| transport_failure(e, provider_name, request.timeout))?;

    tracing::debug!("{} API response status: {}", provider_name, status);
    tracing::debug!("{} API response body: {}", provider_name, response_text);

    if !status.is_success() {
        return Err(AttemptFailure::Status {
            status: status.as_u16(),
            body: response_text,
        });
    }

    serde_json::from_str(&response_text).map_err(|e| AttemptFailure::InvalidBody {
        message: rust_i18n::t!(
            "provider.parse_response_failed",
            provider = provider_name,
            error = e.to_string(),
            response = preview_body(&response_text, constants::output::ERROR_PREVIEW_LENGTH)
        )
        .to_string(),
    })
}

fn transport_failure(e: reqwest::Error, provider_name: &str, timeout: Duration) -> AttemptFailure {
    let message = if e.is_timeout() {
        format!(
            "{} API request timed out after {}ms",
            provider_name,
            timeout.as_millis()
        )
    } else if e.is_connect() {
        format!("{} API connection failed: {}", provider_name, e)
    } else {
        format!("{} API request failed: {}", provider_name, e)
    };
    tracing::debug!("{}", message);
    AttemptFailure::Transport { message }
}

/// 发送 LLM API 请求的通用函数（带重试机制）
///
/// 共发起至多 `retries + 1` 次请求；所有失败都以 [`ProviderError`] 返回。
pub async fn send_llm_request<Req, Resp>(
    client: &Client,
    request: &JsonRequest<'_, Req>,
    provider_name: &str,
    policy: RetryPolicy,
    progress: Option<&dyn ProgressReporter>,
) -> Result<Resp>
where
    Req: Serialize,
    Resp: DeserializeOwned,
{
    for attempt in 0..=policy.retries {
        let failure = match try_send_request(client, request, provider_name).await {
            Ok(resp) => {
                if attempt > 0 {
                    tracing::debug!(
                        "{} API request succeeded after {} attempts",
                        provider_name,
                        attempt + 1
                    );
                }
                return Ok(resp);
            }
            Err(failure) => failure,
        };

        match policy.decide(attempt, failure, provider_name) {
            RetryDecision::RetryAfter(delay) => {
                if let Some(p) = progress {
                    p.append_suffix(&rust_i18n::t!(
                        "provider.retrying_suffix",
                        attempt = attempt + 1,
                        max = policy.retries
                    ));
                }
                tracing::debug!(
                    "{} API attempt {}/{} failed. Retrying in {:.1}s...",
                    provider_name,
                    attempt + 1,
                    policy.retries + 1,
                    delay.as_secs_f64()
                );
                tokio::time::sleep(delay).await;
            }
            RetryDecision::GiveUp(err) => return Err(err.into()),
        }
    }

    Err(ShellmateError::provider(
        ProviderErrorKind::Unknown,
        rust_i18n::t!("provider.retries_exhausted", provider = provider_name).to_string(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn policy(retries: u32) -> RetryPolicy {
        RetryPolicy::new(retries, Duration::from_millis(500))
    }

    fn status(code: u16) -> AttemptFailure {
        AttemptFailure::Status {
            status: code,
            body: "body".to_string(),
        }
    }

    fn gave_up_with(decision: RetryDecision) -> ProviderErrorKind {
        match decision {
            RetryDecision::GiveUp(e) => e.kind,
            other => panic!("Expected GiveUp, got {:?}", other),
        }
    }

    #[test]
    fn test_linear_backoff() {
        let p = policy(3);
        assert_eq!(p.delay_for(0), Duration::from_millis(500));
        assert_eq!(p.delay_for(1), Duration::from_millis(1000));
        assert_eq!(p.delay_for(2), Duration::from_millis(1500));
    }

    #[test]
    fn test_rate_limit_retried_within_budget() {
        assert_eq!(
            policy(2).decide(0, status(429), "OpenAI"),
            RetryDecision::RetryAfter(Duration::from_millis(500))
        );
        assert_eq!(
            policy(2).decide(1, status(429), "OpenAI"),
            RetryDecision::RetryAfter(Duration::from_millis(1000))
        );
    }

    #[test]
    fn test_rate_limit_exhausted() {
        assert_eq!(
            gave_up_with(policy(2).decide(2, status(429), "OpenAI")),
            ProviderErrorKind::RateLimit
        );
    }

    #[test]
    fn test_server_error_retried_then_network() {
        assert!(matches!(
            policy(1).decide(0, status(503), "OpenAI"),
            RetryDecision::RetryAfter(_)
        ));
        assert_eq!(
            gave_up_with(policy(1).decide(1, status(503), "OpenAI")),
            ProviderErrorKind::Network
        );
    }

    #[test]
    fn test_auth_never_retried() {
        assert_eq!(
            gave_up_with(policy(5).decide(0, status(401), "OpenAI")),
            ProviderErrorKind::Auth
        );
        assert_eq!(
            gave_up_with(policy(5).decide(0, status(403), "OpenAI")),
            ProviderErrorKind::Auth
        );
    }

    #[test]
    fn test_other_client_errors_not_retried() {
        assert_eq!(
            gave_up_with(policy(5).decide(0, status(400), "OpenAI")),
            ProviderErrorKind::Network
        );
    }

    #[test]
    fn test_invalid_body_not_retried() {
        let failure = AttemptFailure::InvalidBody {
            message: "bad json".to_string(),
        };
        assert_eq!(
            gave_up_with(policy(5).decide(0, failure, "OpenAI")),
            ProviderErrorKind::InvalidResponse
        );
    }

    #[test]
    fn test_transport_retried_then_network() {
        let failure = || AttemptFailure::Transport {
            message: "OpenAI API request timed out after 10ms".to_string(),
        };
        assert!(matches!(
            policy(1).decide(0, failure(), "OpenAI"),
            RetryDecision::RetryAfter(_)
        ));
        match policy(1).decide(1, failure(), "OpenAI") {
            RetryDecision::GiveUp(e) => {
                assert_eq!(e.kind, ProviderErrorKind::Network);
                assert!(e.message.contains("timed out"));
            }
            other => panic!("Expected GiveUp, got {:?}", other),
        }
    }

    #[test]
    fn test_zero_retries_gives_up_immediately() {
        assert_eq!(
            gave_up_with(policy(0).decide(0, status(500), "OpenAI")),
            ProviderErrorKind::Network
        );
    }

    #[test]
    fn test_status_message_includes_preview() {
        let err = status(418).classify("OpenAI");
        assert_eq!(err.message, "OpenAI API error (418): body");
    }
}
