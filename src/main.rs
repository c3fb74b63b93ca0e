#[macro_use]
extern crate rust_i18n;

// Re-export all library modules
use shellmate::*;

use std::io::IsTerminal;

use anyhow::Result;
use clap::{CommandFactory, FromArgMatches};
use cli::Cli;
use commands::OutputFormat;
use commands::input::resolve_input;
use error::ShellmateError;
use mode::{Mode, ModeSelection};
use tokio::runtime::Runtime;

// Initialize i18n for binary crate
// This ensures translations are available in main.rs context
i18n!("locales", fallback = "en");

fn main() -> Result<()> {
    human_panic::setup_panic!();

    // reqwest 使用 rustls-no-provider，需要在任何请求前安装 crypto provider
    let _ = rustls::crypto::ring::default_provider().install_default();

    // 在解析 CLI 之前初始化语言（支持多语言 help text）
    init_locale_early();

    // 解析 CLI 参数并注入国际化 help text
    let cli = parse_cli_localized()?;

    // 默认只输出 WARN 以上，保持 stdout 可管道；--verbose 提升到 DEBUG
    let log_level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(log_level.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let format = cli.output_format();
    let colored = format.effective_colored(std::io::stderr().is_terminal());

    let rt = Runtime::new()?;
    rt.block_on(async {
        if let Err(e) = dispatch(&cli, colored).await {
            report_error(&e, format, colored);
            std::process::exit(1);
        }
        Ok(())
    })
}

/// 根据子命令路由
async fn dispatch(cli: &Cli, colored: bool) -> error::Result<()> {
    let Some(request) = cli.input_request() else {
        let options = commands::DoctorOptions::from_cli(cli);
        return commands::doctor::run(&options, colored).await;
    };

    let mode = match request.mode {
        Some(mode) => ModeSelection::Forced(mode),
        None => cli
            .mode
            .as_deref()
            .map(str::parse::<ModeSelection>)
            .transpose()?
            .unwrap_or_default(),
    };

    let config = config::load_config(cli.config.as_deref())?;

    if request.paste && std::io::stdin().is_terminal() {
        eprintln!("{}", rust_i18n::t!("input.paste_prompt"));
    }
    let input = resolve_input(request.words, request.force_stdin).await?;
    if input.is_empty() {
        ui::error(&missing_input_message(request.mode, request.force_stdin), colored);
        std::process::exit(1);
    }

    let options = commands::RunOptions::from_cli(cli, mode, &input);
    commands::run::run(&options, &config).await
}

fn missing_input_message(mode: Option<Mode>, from_stdin: bool) -> String {
    match mode {
        Some(Mode::Fix) if from_stdin => rust_i18n::t!("input.no_stdin"),
        Some(Mode::Fix) => rust_i18n::t!("input.no_error_context"),
        Some(Mode::Explain | Mode::Refactor) => rust_i18n::t!("input.no_command"),
        Some(Mode::Suggest) => rust_i18n::t!("input.no_context"),
        Some(Mode::Generate) | None => rust_i18n::t!("input.none"),
    }
    .to_string()
}

/// 错误输出：JSON 模式输出 JSON 文档，否则在 stderr 输出一行错误和可选建议
fn report_error(e: &ShellmateError, format: OutputFormat, colored: bool) {
    if format.is_json() && commands::json::output_json_error(e).is_ok() {
        return;
    }
    ui::error(&e.localized_message(), colored);
    if let Some(suggestion) = e.suggestion() {
        eprintln!("{}", ui::info(&suggestion, colored));
    }
}

/// Parse CLI arguments with localized help text
///
/// Uses clap's derive + runtime override pattern:
/// 1. Get Command from derive macro (type-safe parsing)
/// 2. Override help text at runtime with rust_i18n::t!()
/// 3. Parse and reconstruct the Cli struct
fn parse_cli_localized() -> Result<Cli> {
    let cmd = Cli::command()
        .about(rust_i18n::t!("cli.about").to_string())
        .mut_arg("input", |arg| arg.help(rust_i18n::t!("cli.input").to_string()))
        .mut_arg("model", |arg| arg.help(rust_i18n::t!("cli.model").to_string()))
        .mut_arg("provider", |arg| {
            arg.help(rust_i18n::t!("cli.provider").to_string())
        })
        .mut_arg("config", |arg| {
            arg.help(rust_i18n::t!("cli.config_path").to_string())
        })
        .mut_arg("mode", |arg| arg.help(rust_i18n::t!("cli.mode").to_string()))
        .mut_arg("temperature", |arg| {
            arg.help(rust_i18n::t!("cli.temperature").to_string())
        })
        .mut_arg("max_tokens", |arg| {
            arg.help(rust_i18n::t!("cli.max_tokens").to_string())
        })
        .mut_arg("timeout_ms", |arg| {
            arg.help(rust_i18n::t!("cli.timeout_ms").to_string())
        })
        .mut_arg("retries", |arg| {
            arg.help(rust_i18n::t!("cli.retries").to_string())
        })
        .mut_arg("detail", |arg| arg.help(rust_i18n::t!("cli.detail").to_string()))
        .mut_arg("json", |arg| arg.help(rust_i18n::t!("cli.json").to_string()))
        .mut_arg("quiet", |arg| arg.help(rust_i18n::t!("cli.quiet").to_string()))
        .mut_arg("copy", |arg| arg.help(rust_i18n::t!("cli.copy").to_string()))
        .mut_arg("verbose", |arg| {
            arg.help(rust_i18n::t!("cli.verbose").to_string())
        })
        .mut_subcommand("gen", |cmd| {
            cmd.about(rust_i18n::t!("cli.gen").to_string())
                .mut_arg("intent", |arg| {
                    arg.help(rust_i18n::t!("cli.gen.intent").to_string())
                })
        })
        .mut_subcommand("explain", |cmd| {
            cmd.about(rust_i18n::t!("cli.explain").to_string())
                .mut_arg("command", |arg| {
                    arg.help(rust_i18n::t!("cli.explain.command").to_string())
                })
        })
        .mut_subcommand("fix", |cmd| {
            cmd.about(rust_i18n::t!("cli.fix").to_string())
                .mut_arg("stdin", |arg| {
                    arg.help(rust_i18n::t!("cli.fix.stdin").to_string())
                })
                .mut_arg("paste", |arg| {
                    arg.help(rust_i18n::t!("cli.fix.paste").to_string())
                })
                .mut_arg("context", |arg| {
                    arg.help(rust_i18n::t!("cli.fix.context").to_string())
                })
        })
        .mut_subcommand("refactor", |cmd| {
            cmd.about(rust_i18n::t!("cli.refactor").to_string())
                .mut_arg("command", |arg| {
                    arg.help(rust_i18n::t!("cli.refactor.command").to_string())
                })
        })
        .mut_subcommand("suggest", |cmd| {
            cmd.about(rust_i18n::t!("cli.suggest").to_string())
                .mut_arg("context", |arg| {
                    arg.help(rust_i18n::t!("cli.suggest.context").to_string())
                })
        })
        .mut_subcommand("config", |cmd| {
            cmd.about(rust_i18n::t!("cli.config").to_string())
                .mut_subcommand("doctor", |s| {
                    s.about(rust_i18n::t!("cli.config.doctor").to_string())
                })
        });

    let matches = cmd.get_matches();
    Cli::from_arg_matches(&matches)
        .map_err(|e| anyhow::anyhow!("Failed to parse CLI arguments: {}", e))
}

/// Initialize locale early in the startup process
///
/// Priority order:
/// 1. Environment variable SHELLMATE_LANG (highest priority)
/// 2. System locale detection
/// 3. Fallback to English
fn init_locale_early() {
    let locale = std::env::var("SHELLMATE_LANG")
        .ok()
        .filter(|l| !l.trim().is_empty())
        .or_else(detect_system_locale)
        .unwrap_or_else(|| "en".to_string());

    rust_i18n::set_locale(&locale);
}

/// Detect system locale using sys-locale crate
///
/// Returns locale in BCP 47 format (e.g., "en", "zh-CN", "ja-JP")
fn detect_system_locale() -> Option<String> {
    sys_locale::get_locale().map(|locale| {
        // Normalize locale format: "zh_CN" -> "zh-CN"
        locale.replace('_', "-")
    })
}
