//! Test utilities for provider tests
//!
//! Provides common builders to reduce duplication across provider test suites.

use std::sync::Mutex;

use crate::llm::{ModelOptions, ProgressReporter, Prompt};

/// 在测试中安装 rustls crypto provider
///
/// reqwest 0.13 + rustls-no-provider 需要手动安装 crypto provider，
/// 生产代码在 main.rs 中完成，测试需要单独调用。
/// 多次调用是安全的（install_default 失败时忽略即可）。
pub fn ensure_crypto_provider() {
    let _ = rustls::crypto::ring::default_provider().install_default();
}

/// `ModelOptions` with the given retry budget and a 1ms backoff base.
pub fn test_model_options(retries: u32) -> ModelOptions {
    ModelOptions {
        retries: Some(retries),
        retry_delay_ms: Some(1),
        timeout_ms: Some(5_000),
        ..ModelOptions::new("gpt-4.1")
    }
}

pub fn test_prompt() -> Prompt {
    Prompt {
        system: "system prompt".to_string(),
        user: "list files".to_string(),
    }
}

/// Records every suffix appended during a request.
#[derive(Default)]
pub struct RecordingProgress {
    suffixes: Mutex<Vec<String>>,
}

impl RecordingProgress {
    pub fn suffixes(&self) -> Vec<String> {
        self.suffixes
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

impl ProgressReporter for RecordingProgress {
    fn append_suffix(&self, suffix: &str) {
        self.suffixes
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(suffix.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_options_has_fast_backoff() {
        let options = test_model_options(0);
        assert_eq!(options.retries(), 0);
        assert_eq!(options.retry_delay().as_millis(), 1);
    }

    #[test]
    fn test_recording_progress() {
        let progress = RecordingProgress::default();
        progress.append_suffix("(retry 1/2)");
        assert_eq!(progress.suffixes(), vec!["(retry 1/2)".to_string()]);
    }
}
