//! Configuration loading and management.
//!
//! Loads the camelCase JSON config file and resolves provider, model and
//! generation options with precedence: CLI override > provider entry >
//! global defaults > built-in constants.

mod loader;
mod structs;

pub use loader::{
    CONFIG_PATH_ENV, ENV_SENTINEL_PREFIX, default_config_path, load_config, load_config_from_path,
    resolve_config_path, resolve_env_value,
};
pub(crate) use structs::validate_generation_params;
pub use structs::{ApiStyle, AppConfig, ModelDefaults, ProviderConfig, SafetyConfig, UiConfig};
