use serde::Serialize;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ShellmateError>;

/// Provider 失败分类
///
/// 每个 [`ProviderError`] 恰好携带其中一种，调用方据此决定提示与退出码。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderErrorKind {
    /// 缺失或无效的凭据（从不重试）
    Auth,
    /// 配额耗尽（重试预算用完后失败）
    RateLimit,
    /// 传输层错误、超时或 5xx
    Network,
    /// 响应体无法解析或缺少文本
    InvalidResponse,
    /// 兜底分类
    Unknown,
}

impl ProviderErrorKind {
    /// 稳定的错误码（用于 JSON 输出和日志）
    pub fn code(&self) -> &'static str {
        match self {
            Self::Auth => "auth",
            Self::RateLimit => "rate_limit",
            Self::Network => "network",
            Self::InvalidResponse => "invalid_response",
            Self::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for ProviderErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// 带分类的 provider 错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("[{kind}] {message}")]
pub struct ProviderError {
    pub kind: ProviderErrorKind,
    pub message: String,
}

impl ProviderError {
    pub fn new(kind: ProviderErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Error, Debug)]
pub enum ShellmateError {
    #[error("Provider error {0}")]
    Provider(#[from] ProviderError),

    #[error("Provider '{provider}' is not implemented yet")]
    NotImplemented { provider: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Prompt template error: {0}")]
    Template(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// 通用错误类型，用于不适合其他分类的错误
    #[error("{0}")]
    Other(String),
}

impl ShellmateError {
    /// provider 错误的快捷构造
    pub fn provider(kind: ProviderErrorKind, message: impl Into<String>) -> Self {
        Self::Provider(ProviderError::new(kind, message))
    }

    /// 若为 provider 错误，返回其分类
    pub fn provider_kind(&self) -> Option<ProviderErrorKind> {
        match self {
            Self::Provider(e) => Some(e.kind),
            _ => None,
        }
    }

    /// 本地化的错误消息
    pub fn localized_message(&self) -> String {
        match self {
            Self::Provider(e) => rust_i18n::t!(
                "error.provider",
                kind = e.kind.code(),
                message = e.message.as_str()
            )
            .to_string(),
            Self::NotImplemented { provider } => {
                rust_i18n::t!("error.not_implemented", provider = provider.as_str()).to_string()
            }
            Self::Config(msg) => rust_i18n::t!("error.config", message = msg.as_str()).to_string(),
            Self::Template(msg) => {
                rust_i18n::t!("error.template", message = msg.as_str()).to_string()
            }
            Self::InvalidInput(msg) => {
                rust_i18n::t!("error.invalid_input", message = msg.as_str()).to_string()
            }
            _ => self.to_string(),
        }
    }

    /// 获取错误的解决建议
    pub fn suggestion(&self) -> Option<String> {
        let hint = match self {
            Self::Provider(e) => match e.kind {
                ProviderErrorKind::Auth => rust_i18n::t!("suggestion.auth"),
                ProviderErrorKind::RateLimit => rust_i18n::t!("suggestion.rate_limit"),
                ProviderErrorKind::Network if e.message.contains("timed out") => {
                    rust_i18n::t!("suggestion.timeout")
                }
                ProviderErrorKind::Network => rust_i18n::t!("suggestion.network"),
                ProviderErrorKind::InvalidResponse => rust_i18n::t!("suggestion.invalid_response"),
                ProviderErrorKind::Unknown => return None,
            },
            Self::NotImplemented { .. } => rust_i18n::t!("suggestion.not_implemented"),
            Self::Config(msg) if msg.contains("Unsupported provider") => {
                rust_i18n::t!("suggestion.unsupported_provider")
            }
            Self::Config(msg) if msg.contains("Invalid config file") => {
                rust_i18n::t!("suggestion.invalid_config")
            }
            Self::Template(_) => rust_i18n::t!("suggestion.template"),
            _ => return None,
        };
        Some(hint.to_string())
    }
}
