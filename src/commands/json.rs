use serde::Serialize;

use crate::error::{Result, ShellmateError};

/// JSON 错误输出结构（统一）
#[derive(Debug, Serialize)]
pub struct ErrorJson {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl ErrorJson {
    /// 从 ShellmateError 创建 ErrorJson
    pub fn from_error(err: &ShellmateError) -> Self {
        Self {
            code: error_to_code(err),
            message: err.localized_message(),
            suggestion: err.suggestion(),
        }
    }
}

/// 通用的 JSON 输出结构
#[derive(Debug, Serialize)]
pub struct JsonOutput<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorJson>,
}

/// 渲染 JSON 错误文档
pub fn render_json_error(err: &ShellmateError) -> Result<String> {
    let output = JsonOutput::<()> {
        success: false,
        data: None,
        error: Some(ErrorJson::from_error(err)),
    };
    Ok(serde_json::to_string_pretty(&output)?)
}

/// 输出 JSON 格式的错误到 stdout
///
/// # 示例
/// ```no_run
/// use shellmate::commands::json;
/// use shellmate::error::ShellmateError;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// json::output_json_error(&ShellmateError::InvalidInput("No input provided.".into()))?;
/// # Ok(())
/// # }
/// ```
pub fn output_json_error(err: &ShellmateError) -> Result<()> {
    println!("{}", render_json_error(err)?);
    Ok(())
}

/// 将错误类型映射为 code 字符串
///
/// provider 错误使用其分类码（`auth`、`rate_limit` ...），其余按错误类别。
pub fn error_to_code(err: &ShellmateError) -> String {
    if let Some(kind) = err.provider_kind() {
        return kind.code().to_string();
    }
    match err {
        ShellmateError::NotImplemented { .. } => "not_implemented",
        ShellmateError::Config(_) => "config",
        ShellmateError::Template(_) => "template",
        ShellmateError::InvalidInput(_) => "invalid_input",
        ShellmateError::Io(_) => "io",
        ShellmateError::Serde(_) => "serde",
        _ => "unknown",
    }
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProviderErrorKind;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_error_codes() {
        assert_eq!(
            error_to_code(&ShellmateError::provider(ProviderErrorKind::RateLimit, "x")),
            "rate_limit"
        );
        assert_eq!(
            error_to_code(&ShellmateError::NotImplemented {
                provider: "gemini".into()
            }),
            "not_implemented"
        );
        assert_eq!(error_to_code(&ShellmateError::Config("x".into())), "config");
        assert_eq!(error_to_code(&ShellmateError::Other("x".into())), "unknown");
    }

    #[test]
    fn test_render_json_error_shape() {
        let err = ShellmateError::provider(ProviderErrorKind::Auth, "openai: 401");
        let json: serde_json::Value =
            serde_json::from_str(&render_json_error(&err).unwrap()).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["error"]["code"], "auth");
        assert!(json["error"]["suggestion"].is_string());
        assert!(json.get("data").is_none());
    }
}
