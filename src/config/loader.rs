// 配置加载逻辑
//
// 此文件负责定位配置文件、解析 JSON、校验并解析 ENV: 形式的 API key。

use directories::BaseDirs;
use std::path::{Path, PathBuf};

use super::structs::AppConfig;
use crate::error::{Result, ShellmateError};

/// 覆盖配置文件路径的环境变量
pub const CONFIG_PATH_ENV: &str = "SHELLMATE_CONFIG";

/// API key 间接引用环境变量的前缀（`ENV:<VAR>`）
pub const ENV_SENTINEL_PREFIX: &str = "ENV:";

/// 加载应用配置
///
/// 路径优先级（从高到低）：
/// 1. `--config <path>`
/// 2. `SHELLMATE_CONFIG`
/// 3. `~/.shellmate/config.json`
///
/// 文件不存在时返回默认配置；文件无法读取、JSON 无效或校验失败时返回
/// "Invalid config file" 配置错误。
pub fn load_config(explicit: Option<&Path>) -> Result<AppConfig> {
    match resolve_config_path(explicit) {
        Some(path) => load_config_from_path(&path),
        None => {
            tracing::debug!("No config path could be resolved, using defaults");
            Ok(AppConfig::default())
        }
    }
}

/// 从指定路径加载配置
pub fn load_config_from_path(path: &Path) -> Result<AppConfig> {
    if !path.exists() {
        tracing::debug!("Config file {} not found, using defaults", path.display());
        return Ok(AppConfig::default());
    }

    let raw = std::fs::read_to_string(path).map_err(|e| invalid_config(path, e.to_string()))?;
    let mut config: AppConfig =
        serde_json::from_str(&raw).map_err(|e| invalid_config(path, e.to_string()))?;

    config.validate().map_err(|e| match e {
        ShellmateError::Config(msg) => invalid_config(path, msg),
        other => invalid_config(path, other.to_string()),
    })?;

    resolve_api_keys(&mut config);

    tracing::debug!(
        "Loaded config from {} ({} provider entries)",
        path.display(),
        config.providers.len()
    );
    Ok(config)
}

/// 解析实际使用的配置文件路径
pub fn resolve_config_path(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    if let Ok(path) = std::env::var(CONFIG_PATH_ENV)
        && !path.trim().is_empty()
    {
        return Some(PathBuf::from(path));
    }
    default_config_path()
}

/// 默认配置文件路径：`~/.shellmate/config.json`
pub fn default_config_path() -> Option<PathBuf> {
    BaseDirs::new().map(|dirs| dirs.home_dir().join(".shellmate").join("config.json"))
}

/// 解析 `ENV:<VAR>` 形式的值
///
/// - 非 sentinel 值原样返回
/// - sentinel 指向的环境变量不存在或为空时返回 `None`
pub fn resolve_env_value(raw: &str) -> Option<String> {
    match raw.strip_prefix(ENV_SENTINEL_PREFIX) {
        Some(var) => std::env::var(var.trim())
            .ok()
            .filter(|v| !v.trim().is_empty()),
        None => Some(raw.to_string()),
    }
}

fn resolve_api_keys(config: &mut AppConfig) {
    for (name, provider) in config.providers.iter_mut() {
        if let Some(raw) = provider.api_key.take() {
            provider.api_key = resolve_env_value(&raw);
            if provider.api_key.is_none() {
                tracing::debug!("Provider '{}': {} did not resolve to a value", name, raw);
            }
        }
    }
}

fn invalid_config(path: &Path, detail: String) -> ShellmateError {
    ShellmateError::Config(format!(
        "Invalid config file {}: {}",
        path.display(),
        detail
    ))
}
