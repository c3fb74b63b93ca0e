use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

use crate::error::{Result, ShellmateError};
use crate::llm::Prompt;
use crate::mode::Mode;

const CORE_TEMPLATE: &str = include_str!("../../prompts/core.md");
const GENERATE_TEMPLATE: &str = include_str!("../../prompts/generate.md");
const EXPLAIN_TEMPLATE: &str = include_str!("../../prompts/explain.md");
const EXPLAIN_DETAIL_TEMPLATE: &str = include_str!("../../prompts/explain_detail.md");
const FIX_TEMPLATE: &str = include_str!("../../prompts/fix.md");
const REFACTOR_TEMPLATE: &str = include_str!("../../prompts/refactor.md");
const SUGGEST_TEMPLATE: &str = include_str!("../../prompts/suggest.md");

/// Template identifier (also the file stem under a prompts directory)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemplateId {
    /// 所有模式共享的核心指令
    Core,
    /// 模式专属模板
    Mode(Mode),
    /// explain 模式的 `--detail` 追加片段
    ExplainDetail,
}

impl TemplateId {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Core => "core",
            Self::Mode(mode) => mode.as_str(),
            Self::ExplainDetail => "explain_detail",
        }
    }
}

/// 模板来源
///
/// 缓存由 [`PromptBuilder`] 负责，来源本身每次调用都重新读取。
#[cfg_attr(any(test, feature = "test-utils"), automock)]
pub trait TemplateSource: Send + Sync {
    /// 读取模板原文；找不到时必须返回 [`ShellmateError::Template`]
    fn load(&self, name: &str) -> Result<String>;
}

/// 编译进二进制的内置模板
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinTemplates;

impl TemplateSource for BuiltinTemplates {
    fn load(&self, name: &str) -> Result<String> {
        let text = match name {
            "core" => CORE_TEMPLATE,
            "generate" => GENERATE_TEMPLATE,
            "explain" => EXPLAIN_TEMPLATE,
            "explain_detail" => EXPLAIN_DETAIL_TEMPLATE,
            "fix" => FIX_TEMPLATE,
            "refactor" => REFACTOR_TEMPLATE,
            "suggest" => SUGGEST_TEMPLATE,
            _ => {
                return Err(ShellmateError::Template(
                    rust_i18n::t!("prompt.builtin_not_found", name = name).to_string(),
                ));
            }
        };
        Ok(text.to_string())
    }
}

/// 从目录读取 `<dir>/<name>.md`
#[derive(Debug, Clone)]
pub struct DirectoryTemplates {
    root: PathBuf,
}

impl DirectoryTemplates {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl TemplateSource for DirectoryTemplates {
    fn load(&self, name: &str) -> Result<String> {
        let path = self.root.join(format!("{}.md", name));
        if !path.is_file() {
            return Err(ShellmateError::Template(
                rust_i18n::t!(
                    "prompt.file_not_found",
                    name = name,
                    path = path.display().to_string()
                )
                .to_string(),
            ));
        }
        std::fs::read_to_string(&path).map_err(|e| {
            ShellmateError::Template(
                rust_i18n::t!(
                    "prompt.read_failed",
                    path = path.display().to_string(),
                    error = e.to_string()
                )
                .to_string(),
            )
        })
    }
}

/// Prompt 构建选项
#[derive(Debug, Clone, Copy, Default)]
pub struct PromptOptions {
    /// explain 模式追加 "gotchas" 等扩展说明
    pub detail: bool,
}

/// 组装 system/user prompt，并对模板做进程级 read-through 缓存
///
/// 缓存只追加不淘汰；同一模板在进程内只从来源读取一次。
pub struct PromptBuilder {
    source: Box<dyn TemplateSource>,
    cache: Mutex<HashMap<&'static str, Arc<str>>>,
}

impl PromptBuilder {
    pub fn new(source: impl TemplateSource + 'static) -> Self {
        Self {
            source: Box::new(source),
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// 使用内置模板
    pub fn builtin() -> Self {
        Self::new(BuiltinTemplates)
    }

    /// 配置了 `promptsDir` 时从该目录读取，否则使用内置模板
    pub fn from_prompts_dir(dir: Option<&Path>) -> Self {
        match dir {
            Some(dir) => {
                tracing::debug!("Loading prompt templates from {}", dir.display());
                Self::new(DirectoryTemplates::new(dir))
            }
            None => Self::builtin(),
        }
    }

    /// 读取模板（命中缓存时不访问来源）
    pub fn template(&self, id: TemplateId) -> Result<Arc<str>> {
        let key = id.name();
        let mut cache = self.cache.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(cached) = cache.get(key) {
            tracing::debug!("Prompt template cache hit: {}", key);
            return Ok(Arc::clone(cached));
        }

        let content: Arc<str> = Arc::from(self.source.load(key)?.trim());
        cache.insert(key, Arc::clone(&content));
        Ok(content)
    }

    /// 构建 prompt
    ///
    /// - system: core 模板 + 空行 + 模式模板（explain + detail 时再追加 detail 片段）
    /// - user: 去除首尾空白的原始输入
    pub fn build(&self, mode: Mode, input: &str, options: PromptOptions) -> Result<Prompt> {
        let core = self.template(TemplateId::Core)?;
        let mode_template = self.template(TemplateId::Mode(mode))?;

        let mut system = format!("{}\n\n{}", core, mode_template);
        if options.detail && mode == Mode::Explain {
            let detail = self.template(TemplateId::ExplainDetail)?;
            system.push_str("\n\n");
            system.push_str(&detail);
        }

        tracing::debug!(
            "Prompt built - mode={}, system ({} chars), user ({} chars)",
            mode,
            system.len(),
            input.trim().len()
        );

        Ok(Prompt {
            system: system.trim().to_string(),
            user: input.trim().to_string(),
        })
    }
}

impl Default for PromptBuilder {
    fn default() -> Self {
        Self::builtin()
    }
}
