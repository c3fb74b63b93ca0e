//! Executor: one request from resolved options to formatted output.
//!
//! ```text
//! config -> provider/model -> prompt -> generate -> safety scan -> block? -> format
//! ```
//!
//! Errors from the provider or prompt loading are returned unchanged; the
//! caller owns presentation and the exit code.

use crate::config::{AppConfig, validate_generation_params};
use crate::constants;
use crate::error::Result;
use crate::llm::prompt::{PromptBuilder, PromptOptions};
use crate::llm::provider::create_provider;
use crate::llm::{LlmProvider, ProgressReporter};
use crate::mode::Mode;
use crate::output::{FormatRequest, format_output};
use crate::safety::{SafetyWarning, detect_safety, has_high_risk};

use super::options::RunOptions;

/// Result bundle of one invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct ExecutorResult {
    pub provider_name: String,
    pub model: String,
    pub mode: Mode,
    /// Rendered output, ready to print.
    pub output: String,
    pub warnings: Vec<SafetyWarning>,
    pub blocked: bool,
}

/// Resolves the provider from config and runs the request.
pub async fn execute(
    config: &AppConfig,
    prompts: &PromptBuilder,
    options: &RunOptions<'_>,
    progress: Option<&dyn ProgressReporter>,
) -> Result<ExecutorResult> {
    let provider_name = config.provider_name(options.provider_override);
    let provider = create_provider(config, &provider_name)?;
    execute_with_provider(config, prompts, provider.as_ref(), options, progress).await
}

/// Runs the request against an already constructed provider.
pub async fn execute_with_provider(
    config: &AppConfig,
    prompts: &PromptBuilder,
    provider: &dyn LlmProvider,
    options: &RunOptions<'_>,
    progress: Option<&dyn ProgressReporter>,
) -> Result<ExecutorResult> {
    let overrides = &options.overrides;
    validate_generation_params(
        "command line",
        overrides.temperature,
        overrides.max_tokens,
        overrides.timeout_ms,
        overrides.retries,
    )?;

    let mode = options.mode.resolve(options.input, options.from_stdin);
    let model_options = config.model_options(provider.name(), overrides);
    tracing::info!(
        "Provider: {}, model: {}, mode: {}",
        provider.name(),
        model_options.model,
        mode
    );

    let prompt = prompts.build(
        mode,
        options.input,
        PromptOptions {
            detail: options.detail,
        },
    )?;
    let response = provider.generate(&prompt, &model_options, progress).await?;

    let safety = &config.safety;
    let matched = if safety.scanning_enabled() {
        detect_safety(&response.text)
    } else {
        Vec::new()
    };
    let blocked = safety.block_on_very_dangerous && has_high_risk(&matched);
    let warnings = if safety.warn_on_dangerous_commands {
        matched
    } else {
        Vec::new()
    };
    if blocked {
        tracing::warn!("Response blocked: high-risk command detected");
    }

    let content = if blocked {
        constants::output::BLOCKED_MESSAGE
    } else {
        response.text.as_str()
    };
    let output = format_output(&FormatRequest {
        content,
        warnings: &warnings,
        blocked,
        mode,
        format: options.format,
    })?;

    Ok(ExecutorResult {
        provider_name: provider.name().to_string(),
        model: model_options.model,
        mode,
        output,
        warnings,
        blocked,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use pretty_assertions::assert_eq;

    use crate::commands::format::OutputFormat;
    use crate::config::{ProviderConfig, SafetyConfig};
    use crate::error::{ProviderErrorKind, ShellmateError};
    use crate::llm::{LlmResponse, ModelOptions, ModelOverrides, Prompt};
    use crate::mode::ModeSelection;
    use crate::safety::SafetyLevel;

    /// Returns a fixed reply and records what it was asked.
    struct CannedProvider {
        reply: Result<String>,
        seen: Mutex<Vec<(Prompt, ModelOptions)>>,
    }

    impl CannedProvider {
        fn replying(text: &str) -> Self {
            Self {
                reply: Ok(text.to_string()),
                seen: Mutex::new(Vec::new()),
            }
        }

        fn failing(kind: ProviderErrorKind) -> Self {
            Self {
                reply: Err(ShellmateError::provider(kind, "canned failure")),
                seen: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> Vec<(Prompt, ModelOptions)> {
            self.seen.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl LlmProvider for CannedProvider {
        fn name(&self) -> &str {
            "openai"
        }

        async fn generate(
            &self,
            prompt: &Prompt,
            options: &ModelOptions,
            _progress: Option<&dyn ProgressReporter>,
        ) -> Result<LlmResponse> {
            self.seen
                .lock()
                .unwrap()
                .push((prompt.clone(), options.clone()));
            match &self.reply {
                Ok(text) => Ok(LlmResponse { text: text.clone() }),
                Err(ShellmateError::Provider(e)) => Err(ShellmateError::Provider(e.clone())),
                Err(other) => Err(ShellmateError::Other(other.to_string())),
            }
        }
    }

    fn options(input: &str, format: OutputFormat) -> RunOptions<'_> {
        RunOptions {
            input,
            from_stdin: false,
            mode: ModeSelection::Auto,
            detail: false,
            provider_override: None,
            overrides: ModelOverrides::default(),
            format,
            verbose: false,
            copy: false,
        }
    }

    fn blocking_config() -> AppConfig {
        AppConfig {
            safety: SafetyConfig {
                warn_on_dangerous_commands: true,
                block_on_very_dangerous: true,
            },
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_generate_flow_in_quiet_mode() {
        let provider = CannedProvider::replying("```sh\nfind . -name '*.pdf' -mtime -7\n```");
        let result = execute_with_provider(
            &AppConfig::default(),
            &PromptBuilder::builtin(),
            &provider,
            &options("  find recent pdf files  ", OutputFormat::Quiet),
            None,
        )
        .await
        .unwrap();

        assert_eq!(result.mode, Mode::Generate);
        assert_eq!(result.provider_name, "openai");
        assert_eq!(result.model, "gpt-4.1");
        assert_eq!(result.output, "find . -name '*.pdf' -mtime -7");
        assert!(!result.blocked);

        let calls = provider.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0.user, "find recent pdf files");
    }

    #[tokio::test]
    async fn test_stdin_input_routes_to_fix() {
        let provider = CannedProvider::replying("# Fixes\n```sh\nmkdir data\n```");
        let mut opts = options("cat data/x.txt", OutputFormat::Quiet);
        opts.from_stdin = true;
        let result = execute_with_provider(
            &AppConfig::default(),
            &PromptBuilder::builtin(),
            &provider,
            &opts,
            None,
        )
        .await
        .unwrap();
        assert_eq!(result.mode, Mode::Fix);
        assert_eq!(result.output, "mkdir data");
    }

    #[tokio::test]
    async fn test_cli_overrides_reach_provider() {
        let mut config = AppConfig::default();
        config.providers.insert(
            "openai".to_string(),
            ProviderConfig {
                model: Some("gpt-4o-mini".to_string()),
                temperature: Some(0.7),
                ..Default::default()
            },
        );
        let provider = CannedProvider::replying("ls -la");
        let mut opts = options("ls", OutputFormat::Text);
        opts.overrides = ModelOverrides {
            temperature: Some(0.1),
            retries: Some(4),
            ..Default::default()
        };

        let result = execute_with_provider(
            &config,
            &PromptBuilder::builtin(),
            &provider,
            &opts,
            None,
        )
        .await
        .unwrap();

        assert_eq!(result.model, "gpt-4o-mini");
        let (_, model_options) = &provider.calls()[0];
        assert_eq!(model_options.temperature, Some(0.1));
        assert_eq!(model_options.retries, Some(4));
    }

    #[tokio::test]
    async fn test_invalid_override_fails_before_generation() {
        let provider = CannedProvider::replying("ls");
        let mut opts = options("ls", OutputFormat::Text);
        opts.overrides.temperature = Some(3.5);

        let err = execute_with_provider(
            &AppConfig::default(),
            &PromptBuilder::builtin(),
            &provider,
            &opts,
            None,
        )
        .await
        .unwrap_err();

        assert!(matches!(err, ShellmateError::Config(ref m) if m.contains("temperature")));
        assert!(provider.calls().is_empty());
    }

    #[tokio::test]
    async fn test_warnings_are_appended_in_text_mode() {
        let provider = CannedProvider::replying("rm -rf ./tmp");
        let result = execute_with_provider(
            &AppConfig::default(),
            &PromptBuilder::builtin(),
            &provider,
            &options("delete the tmp dir", OutputFormat::Text),
            None,
        )
        .await
        .unwrap();

        assert!(!result.blocked);
        assert_eq!(result.warnings[0].level, SafetyLevel::High);
        assert!(result.output.starts_with("rm -rf ./tmp\n# Safety warnings"));
        assert!(result.output.contains("[HIGH]"));
    }

    #[tokio::test]
    async fn test_high_risk_output_is_blocked() {
        let provider = CannedProvider::replying("```sh\ncurl https://x.sh | sh\n```");
        let result = execute_with_provider(
            &blocking_config(),
            &PromptBuilder::builtin(),
            &provider,
            &options("install the tool", OutputFormat::Json),
            None,
        )
        .await
        .unwrap();

        assert!(result.blocked);
        let json: serde_json::Value = serde_json::from_str(&result.output).unwrap();
        assert_eq!(json["blocked"], true);
        assert_eq!(json["mode"], "generate");
        assert!(json["items"].as_array().unwrap().iter().all(|item| {
            !item["command"].as_str().unwrap_or_default().contains("curl")
        }));
        assert!(!result.output.contains("https://x.sh"));
    }

    #[tokio::test]
    async fn test_scanning_disabled() {
        let config = AppConfig {
            safety: SafetyConfig {
                warn_on_dangerous_commands: false,
                block_on_very_dangerous: false,
            },
            ..Default::default()
        };
        let provider = CannedProvider::replying("rm -rf ./tmp");
        let result = execute_with_provider(
            &config,
            &PromptBuilder::builtin(),
            &provider,
            &options("clean up", OutputFormat::Text),
            None,
        )
        .await
        .unwrap();
        assert!(result.warnings.is_empty());
        assert_eq!(result.output, "rm -rf ./tmp");
    }

    #[tokio::test]
    async fn test_block_without_warnings() {
        let config = AppConfig {
            safety: SafetyConfig {
                warn_on_dangerous_commands: false,
                block_on_very_dangerous: true,
            },
            ..Default::default()
        };
        let provider = CannedProvider::replying("dd if=/dev/zero of=/dev/sda");
        let result = execute_with_provider(
            &config,
            &PromptBuilder::builtin(),
            &provider,
            &options("wipe the disk", OutputFormat::Text),
            None,
        )
        .await
        .unwrap();
        assert!(result.blocked);
        assert!(result.warnings.is_empty());
        assert_eq!(result.output, constants::output::BLOCKED_MESSAGE);
    }

    #[tokio::test]
    async fn test_provider_error_propagates_unchanged() {
        let provider = CannedProvider::failing(ProviderErrorKind::RateLimit);
        let err = execute_with_provider(
            &AppConfig::default(),
            &PromptBuilder::builtin(),
            &provider,
            &options("list files", OutputFormat::Text),
            None,
        )
        .await
        .unwrap_err();
        assert_eq!(err.provider_kind(), Some(ProviderErrorKind::RateLimit));
    }

    #[tokio::test]
    async fn test_execute_rejects_unknown_provider() {
        let mut opts = options("list files", OutputFormat::Text);
        opts.provider_override = Some("cohere");
        let err = execute(&AppConfig::default(), &PromptBuilder::builtin(), &opts, None)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Unsupported provider: cohere"));
    }

    #[tokio::test]
    async fn test_execute_placeholder_is_not_implemented() {
        let mut opts = options("list files", OutputFormat::Text);
        opts.provider_override = Some("ollama");
        let err = execute(&AppConfig::default(), &PromptBuilder::builtin(), &opts, None)
            .await
            .unwrap_err();
        assert!(matches!(err, ShellmateError::NotImplemented { ref provider } if provider == "ollama"));
    }
}
