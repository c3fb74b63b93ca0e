//! 全局常量定义

/// Provider 相关常量
pub mod provider {
    /// 未配置时使用的 provider
    pub const DEFAULT_PROVIDER: &str = "openai";

    /// 未配置时使用的模型
    pub const DEFAULT_MODEL: &str = "gpt-4.1";

    /// OpenAI 默认 base URL
    pub const DEFAULT_OPENAI_BASE: &str = "https://api.openai.com/v1";

    /// Chat completions 路径后缀
    pub const CHAT_COMPLETIONS_SUFFIX: &str = "/chat/completions";

    /// 模型列表路径后缀（doctor 连通性检查）
    pub const MODELS_SUFFIX: &str = "/models";

    /// OpenAI 风格 provider 的 API key 环境变量
    pub const OPENAI_API_KEY_ENV: &str = "OPENAI_API_KEY";

    /// 占位 provider（可选择但尚无后端）
    pub const PLACEHOLDER_PROVIDERS: &[&str] = &["anthropic", "gemini", "ollama"];
}

/// 网络相关常量
pub mod network {
    /// 默认请求超时（毫秒）
    pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

    /// doctor 连通性检查的默认超时（毫秒）
    pub const DOCTOR_TIMEOUT_MS: u64 = 8_000;

    /// 连接超时（秒）
    pub const CONNECT_TIMEOUT_SECS: u64 = 10;

    /// 默认重试次数
    pub const DEFAULT_RETRIES: u32 = 2;

    /// 允许配置的最大重试次数
    pub const MAX_RETRIES: u32 = 10;

    /// 线性退避的基础延迟（毫秒）
    pub const DEFAULT_RETRY_DELAY_MS: u64 = 500;
}

/// 生成参数相关常量
pub mod llm {
    /// 默认 temperature
    pub const DEFAULT_TEMPERATURE: f32 = 0.2;

    /// temperature 合法范围
    pub const TEMPERATURE_RANGE: std::ops::RangeInclusive<f32> = 0.0..=2.0;
}

/// 输出相关常量
pub mod output {
    /// 命中高风险规则且开启拦截时替换的内容
    pub const BLOCKED_MESSAGE: &str = "Output blocked due to high-risk command detection.";

    /// 错误预览最大长度
    pub const ERROR_PREVIEW_LENGTH: usize = 500;
}
