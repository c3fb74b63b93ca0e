//! `config doctor`: configuration and connectivity checks.
//!
//! One line per check, `<Label>: OK|FAIL (<detail>)`.

use std::fmt;
use std::path::Path;
use std::time::Duration;

use crate::config::{self, ApiStyle, AppConfig};
use crate::constants;
use crate::error::Result;
use crate::llm::provider::create_http_client;
use crate::llm::provider::utils::complete_endpoint;
use crate::ui;

use super::options::DoctorOptions;

/// Result of one check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DoctorCheck {
    pub label: &'static str,
    pub ok: bool,
    pub detail: Option<String>,
}

impl DoctorCheck {
    fn new(label: &'static str, ok: bool, detail: impl Into<String>) -> Self {
        Self {
            label,
            ok,
            detail: Some(detail.into()),
        }
    }

    /// Line with a colored status word.
    pub fn render(&self, colored: bool) -> String {
        let status = ui::status(self.ok, colored);
        match &self.detail {
            Some(detail) => format!("{}: {} ({})", self.label, status, detail),
            None => format!("{}: {}", self.label, status),
        }
    }
}

impl fmt::Display for DoctorCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(false))
    }
}

/// All checks, in a fixed order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DoctorReport {
    pub checks: Vec<DoctorCheck>,
}

impl DoctorReport {
    pub fn all_ok(&self) -> bool {
        self.checks.iter().all(|c| c.ok)
    }

    pub fn render(&self, colored: bool) -> String {
        self.checks
            .iter()
            .map(|c| c.render(colored))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl fmt::Display for DoctorReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(false))
    }
}

/// Loads the config and runs every check.
pub async fn run_doctor(options: &DoctorOptions<'_>) -> Result<DoctorReport> {
    let config_path = config::resolve_config_path(options.config_path);
    let config = config::load_config(options.config_path)?;
    Ok(diagnose(&config, config_path.as_deref(), options).await)
}

/// CLI entry: prints the report to stdout.
pub async fn run(options: &DoctorOptions<'_>, colored: bool) -> Result<()> {
    let report = run_doctor(options).await?;
    println!("{}", report.render(colored));
    if !report.all_ok() {
        tracing::debug!("Doctor found failing checks");
    }
    Ok(())
}

/// Runs the checks against an already loaded config.
pub async fn diagnose(
    config: &AppConfig,
    config_path: Option<&Path>,
    options: &DoctorOptions<'_>,
) -> DoctorReport {
    let provider = config.provider_name(options.provider_override);
    let timeout = Duration::from_millis(
        options
            .timeout_ms
            .unwrap_or(constants::network::DOCTOR_TIMEOUT_MS),
    );

    let checks = vec![
        check_config_file(config_path),
        check_provider(config, &provider),
        check_api_key(config, &provider),
        check_model(config, &provider, options.model_override),
        check_network(config, &provider, timeout).await,
    ];
    DoctorReport { checks }
}

fn check_config_file(path: Option<&Path>) -> DoctorCheck {
    match path {
        Some(path) => DoctorCheck::new("Config file", path.is_file(), path.display().to_string()),
        None => DoctorCheck::new("Config file", false, "home directory not found"),
    }
}

fn check_provider(config: &AppConfig, provider: &str) -> DoctorCheck {
    DoctorCheck::new("Provider", config.providers.contains_key(provider), provider)
}

fn check_api_key(config: &AppConfig, provider: &str) -> DoctorCheck {
    DoctorCheck::new("API key", config.api_key_for(provider).is_some(), provider)
}

fn check_model(config: &AppConfig, provider: &str, explicit: Option<&str>) -> DoctorCheck {
    let model = config.model_for(provider, explicit);
    DoctorCheck::new("Model", !model.trim().is_empty(), model)
}

async fn check_network(config: &AppConfig, provider: &str, timeout: Duration) -> DoctorCheck {
    if config.api_style_for(provider) != Some(ApiStyle::OpenAI) {
        return DoctorCheck::new("Network", true, format!("skipped for {}", provider));
    }
    let Some(api_key) = config.api_key_for(provider) else {
        return DoctorCheck::new("Network", false, "missing API key");
    };

    let base_url = config.base_url_for(provider);
    let endpoint = complete_endpoint(&base_url, constants::provider::MODELS_SUFFIX);
    let client = match create_http_client() {
        Ok(client) => client,
        Err(e) => return DoctorCheck::new("Network", false, e.to_string()),
    };

    tracing::debug!("Doctor network check: GET {}", endpoint);
    let response = client
        .get(&endpoint)
        .bearer_auth(api_key)
        .timeout(timeout)
        .send()
        .await;

    match response {
        Ok(resp) if resp.status().is_success() => DoctorCheck::new("Network", true, base_url),
        Ok(resp) => DoctorCheck::new("Network", false, format!("HTTP {}", resp.status().as_u16())),
        Err(e) if e.is_timeout() => DoctorCheck::new(
            "Network",
            false,
            format!("timed out after {}ms", timeout.as_millis()),
        ),
        Err(e) => DoctorCheck::new("Network", false, e.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ProviderConfig;
    use crate::llm::provider::test_utils::ensure_crypto_provider;
    use pretty_assertions::assert_eq;

    fn config_with(name: &str, entry: ProviderConfig) -> AppConfig {
        let mut config = AppConfig::default();
        config.providers.insert(name.to_string(), entry);
        config
    }

    #[test]
    fn test_check_line_format() {
        let ok = DoctorCheck::new("Model", true, "gpt-4.1");
        assert_eq!(ok.to_string(), "Model: OK (gpt-4.1)");
        let bare = DoctorCheck {
            label: "Provider",
            ok: false,
            detail: None,
        };
        assert_eq!(bare.to_string(), "Provider: FAIL");
    }

    #[test]
    fn test_missing_config_file_fails() {
        let check = check_config_file(Some(Path::new("/nonexistent/shellmate/config.json")));
        assert_eq!(
            check.to_string(),
            "Config file: FAIL (/nonexistent/shellmate/config.json)"
        );
    }

    #[test]
    fn test_model_check_uses_precedence() {
        let config = config_with(
            "openai",
            ProviderConfig {
                model: Some("gpt-4o-mini".to_string()),
                ..Default::default()
            },
        );
        assert_eq!(
            check_model(&config, "openai", None).to_string(),
            "Model: OK (gpt-4o-mini)"
        );
        assert_eq!(
            check_model(&config, "openai", Some("o3")).to_string(),
            "Model: OK (o3)"
        );
    }

    #[tokio::test]
    async fn test_network_skipped_for_placeholder() {
        let check = check_network(&AppConfig::default(), "gemini", Duration::from_secs(1)).await;
        assert_eq!(check.to_string(), "Network: OK (skipped for gemini)");
    }

    #[tokio::test]
    async fn test_network_ok_against_mock_server() {
        ensure_crypto_provider();
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/v1/models")
            .match_header("authorization", "Bearer sk-doctor")
            .with_status(200)
            .with_body(r#"{"data":[]}"#)
            .create_async()
            .await;

        let base = format!("{}/v1", server.url());
        let config = config_with(
            "openai",
            ProviderConfig {
                api_key: Some("sk-doctor".to_string()),
                base_url: Some(base.clone()),
                ..Default::default()
            },
        );
        let check = check_network(&config, "openai", Duration::from_secs(5)).await;
        assert_eq!(check.to_string(), format!("Network: OK ({})", base));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_network_reports_http_status() {
        ensure_crypto_provider();
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/v1/models")
            .with_status(401)
            .create_async()
            .await;

        let config = config_with(
            "openai",
            ProviderConfig {
                api_key: Some("sk-bad".to_string()),
                base_url: Some(format!("{}/v1", server.url())),
                ..Default::default()
            },
        );
        let check = check_network(&config, "openai", Duration::from_secs(5)).await;
        assert_eq!(check.to_string(), "Network: FAIL (HTTP 401)");
    }
}
