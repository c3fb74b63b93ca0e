mod app;
mod llm;
mod safety;

pub use app::AppConfig;
pub(crate) use llm::validate_generation_params;
pub use llm::{ApiStyle, ModelDefaults, ProviderConfig};
pub use safety::{SafetyConfig, UiConfig};
