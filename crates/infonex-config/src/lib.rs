//! Infonex configuration system.
//!
//! Provides TOML-based configuration with full validation. All config
//! sections use sensible defaults so partial configs work out of the box,
//! and API keys can be supplied through environment variables instead of
//! the file.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! let config = infonex_config::load_config().expect("failed to load config");
//! println!("{}", config.openai.chat_model);
//! ```

pub mod schema;
pub mod toml_loader;
pub mod validation;

// Re-export core types for convenience
pub use schema::{InfonexConfig, CONFIG_SCHEMA_VERSION};
pub use toml_loader::{default_config_path, load_from_path};

use infonex_common::ConfigError;

/// Convenience function to load config from the platform default path.
///
/// Loads `config.toml` from the OS config directory, creates a default
/// if none exists, applies environment overrides for API keys, and
/// validates the result.
pub fn load_config() -> Result<InfonexConfig, ConfigError> {
    let mut config = toml_loader::load_default()?;
    apply_env_overrides(&mut config);
    validation::validate(&config)?;
    Ok(config)
}

/// Load config from an explicit path, then apply environment overrides.
pub fn load_config_from(path: &std::path::Path) -> Result<InfonexConfig, ConfigError> {
    let mut config = toml_loader::load_from_path(path)?;
    apply_env_overrides(&mut config);
    validation::validate(&config)?;
    Ok(config)
}

/// Override API keys from the process environment. Environment always
/// wins over the file so keys can stay out of dotfiles.
pub fn apply_env_overrides(config: &mut InfonexConfig) {
    apply_overrides_from(config, |name| std::env::var(name).ok());
}

fn apply_overrides_from<F>(config: &mut InfonexConfig, get: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(key) = get("OPENAI_API_KEY").filter(|k| !k.is_empty()) {
        config.openai.api_key = key;
    }
    if let Some(key) = get("OPENROUTER_API_KEY").filter(|k| !k.is_empty()) {
        config.openrouter.api_key = key;
    }
    if let Some(key) = get("SERPER_API_KEY").filter(|k| !k.is_empty()) {
        config.search.api_key = key;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_overrides_replace_file_keys() {
        let mut config = InfonexConfig::default();
        config.openai.api_key = "file-key".into();

        apply_overrides_from(&mut config, |name| match name {
            "OPENAI_API_KEY" => Some("env-key".into()),
            "SERPER_API_KEY" => Some("serper-key".into()),
            _ => None,
        });

        assert_eq!(config.openai.api_key, "env-key");
        assert_eq!(config.search.api_key, "serper-key");
        assert!(config.openrouter.api_key.is_empty());
    }

    #[test]
    fn empty_env_values_are_ignored() {
        let mut config = InfonexConfig::default();
        config.openai.api_key = "file-key".into();

        apply_overrides_from(&mut config, |_| Some(String::new()));

        assert_eq!(config.openai.api_key, "file-key");
    }

    #[test]
    fn missing_env_leaves_config_untouched() {
        let mut config = InfonexConfig::default();
        config.openrouter.api_key = "kept".into();

        apply_overrides_from(&mut config, |_| None);

        assert_eq!(config.openrouter.api_key, "kept");
    }

    #[test]
    fn config_schema_version_is_1() {
        assert_eq!(CONFIG_SCHEMA_VERSION, 1);
    }
}
