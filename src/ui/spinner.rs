use indicatif::{ProgressBar, ProgressStyle};

use crate::llm::ProgressReporter;

/// 进度指示器（旋转动画，绘制在 stderr）
pub struct Spinner {
    pb: ProgressBar,
    base_message: String,
}

impl Spinner {
    /// 创建新的 spinner
    pub fn new(message: &str) -> Self {
        let pb = ProgressBar::new_spinner();
        let style = ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner());
        pb.set_style(style);
        pb.set_message(message.to_string());
        pb.enable_steady_tick(std::time::Duration::from_millis(80));
        Self {
            pb,
            base_message: message.to_string(),
        }
    }

    /// 在基础消息后追加后缀
    pub fn append_suffix(&self, suffix: &str) {
        let full_message = format!("{} {}", self.base_message, suffix);
        self.pb.set_message(full_message);
    }

    /// 完成并清除
    pub fn finish_and_clear(&self) {
        self.pb.finish_and_clear();
    }
}

impl ProgressReporter for Spinner {
    fn append_suffix(&self, suffix: &str) {
        Spinner::append_suffix(self, suffix);
    }
}

impl Drop for Spinner {
    fn drop(&mut self) {
        self.pb.finish_and_clear();
    }
}
