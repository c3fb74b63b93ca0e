//! # shellmate
//!
//! 命令行 AI 助手：把自然语言意图、shell 命令或错误输出交给 LLM，
//! 返回命令建议、解释或修复方案。
//!
//! ## 功能
//! - **自动模式**：根据输入判断 generate / explain / fix
//! - **安全扫描**：对危险命令给出警告，可选直接拦截
//! - **结构化输出**：文本、仅命令（`--quiet`）或 JSON
//! - **可靠请求**：超时、线性退避重试与错误分类
//! - **国际化**：支持中英文
//!
//! ## 快速开始
//!
//! ### 作为 CLI 使用
//! ```bash
//! shellmate find pdf files modified this week
//! shellmate explain tar -xzvf archive.tar.gz
//! make 2>&1 | shellmate fix --stdin
//! shellmate --quiet gen compress the logs directory
//! shellmate config doctor
//! ```
//!
//! ### 作为库使用
//! ```no_run
//! use shellmate::commands::{OutputFormat, RunOptions, execute};
//! use shellmate::config::AppConfig;
//! use shellmate::llm::ModelOverrides;
//! use shellmate::llm::prompt::PromptBuilder;
//! use shellmate::mode::ModeSelection;
//!
//! # async fn example() -> shellmate::error::Result<()> {
//! let config = AppConfig::default();
//! let prompts = PromptBuilder::builtin();
//! let options = RunOptions {
//!     input: "find recent pdf files",
//!     from_stdin: false,
//!     mode: ModeSelection::Auto,
//!     detail: false,
//!     provider_override: None,
//!     overrides: ModelOverrides::default(),
//!     format: OutputFormat::Quiet,
//!     verbose: false,
//!     copy: false,
//! };
//! let result = execute(&config, &prompts, &options, None).await?;
//! println!("{}", result.output);
//! # Ok(())
//! # }
//! ```
//!
//! ## 核心模块
//! - [`mode`] - 自动模式判定
//! - [`safety`] - 危险命令扫描
//! - [`llm`] - Prompt 构建与 provider 实现
//! - [`output`] - 响应解析与渲染
//! - [`commands`] - CLI 命令实现
//! - [`config`] - 配置管理
//! - [`error`] - 统一错误类型
//! - [`ui`] - 用户界面工具
//!
//! ## 配置
//! 配置文件位置：`~/.shellmate/config.json`（可用 `--config` 或
//! `SHELLMATE_CONFIG` 覆盖）。
//!
//! 示例配置：
//! ```json
//! {
//!   "defaultProvider": "openai",
//!   "defaultModel": "gpt-4.1",
//!   "providers": { "openai": { "apiKey": "ENV:OPENAI_API_KEY" } },
//!   "safety": { "warnOnDangerousCommands": true, "blockOnVeryDangerous": true }
//! }
//! ```

#[macro_use]
extern crate rust_i18n;

pub mod cli;
pub mod commands;
pub mod config;
pub mod constants;
pub mod error;
pub mod llm;
pub mod mode;
pub mod output;
pub mod safety;
pub mod ui;

// Initialize i18n for library modules
i18n!("locales", fallback = "en");
