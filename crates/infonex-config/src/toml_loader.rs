//! TOML config file loading and creation.

use crate::schema::InfonexConfig;
use crate::validation;
use infonex_common::ConfigError;
use std::path::Path;
use tracing::{info, warn};

/// Load config from a specific TOML file path.
///
/// Deserializes the file using serde defaults for any missing fields.
/// After loading, the config is validated; if validation fails, a warning
/// is logged and the default config is returned.
pub fn load_from_path(path: &Path) -> Result<InfonexConfig, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path)
        .map_err(|e| ConfigError::ParseError(format!("failed to read {}: {e}", path.display())))?;

    let config: InfonexConfig = toml::from_str(&content)
        .map_err(|e| ConfigError::ParseError(format!("failed to parse TOML: {e}")))?;

    // Validate and warn on errors, but still return a usable config
    if let Err(e) = validation::validate(&config) {
        warn!("config validation warning: {e}");
        warn!("falling back to default config");
        return Ok(InfonexConfig::default());
    }

    info!("loaded config from {}", path.display());
    Ok(config)
}

/// Load config from the platform-specific default path.
///
/// On macOS: `~/Library/Application Support/infonex/config.toml`
/// On Linux: `~/.config/infonex/config.toml`
///
/// If the file does not exist, creates a default config file and returns defaults.
pub fn load_default() -> Result<InfonexConfig, ConfigError> {
    let path = default_config_path()?;

    if !path.exists() {
        info!("no config found at {}, creating default", path.display());
        create_default_config(&path)?;
        return Ok(InfonexConfig::default());
    }

    load_from_path(&path)
}

/// Get the platform-specific default config file path.
pub fn default_config_path() -> Result<std::path::PathBuf, ConfigError> {
    let config_dir = dirs::config_dir()
        .ok_or_else(|| ConfigError::ParseError("could not determine config directory".into()))?;
    Ok(config_dir.join("infonex").join("config.toml"))
}

/// Create a default TOML config file with documentation comments.
pub fn create_default_config(path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            ConfigError::ParseError(format!(
                "failed to create config directory {}: {e}",
                parent.display()
            ))
        })?;
    }

    let content = default_config_toml();

    std::fs::write(path, content).map_err(|e| {
        ConfigError::ParseError(format!(
            "failed to write default config to {}: {e}",
            path.display()
        ))
    })?;

    info!("created default config at {}", path.display());
    Ok(())
}

/// Generate the default TOML config content with comments.
fn default_config_toml() -> String {
    r#"# Infonex Configuration
# Schema version 1
# Only override what you want to change -- missing fields use defaults.
# API keys are better supplied via environment variables:
#   OPENAI_API_KEY, OPENROUTER_API_KEY, SERPER_API_KEY

[openai]
# api_key = ""
# base_url = "https://api.openai.com/v1"
# chat_model = "gpt-4o"
# refine_model = "gpt-4o-mini"
# image_model = "dall-e-3"
# max_tokens = 4096       # 256-16384
# temperature = 0.7       # 0.0-2.0

[openrouter]
# api_key = ""
# base_url = "https://openrouter.ai/api/v1"
# reasoning_model = "deepseek/deepseek-r1"

[search]
# api_key = ""
# endpoint = "https://google.serper.dev"
# max_results = 5         # 1-10

[artifacts]
# pdf_service_url = ""    # empty disables generate_pdf
# image_size = "1024x1024"

[chat]
# default_model = "gpt-4o"
# max_tool_rounds = 3     # 1-8
# tools_enabled = true
# system_prompt = "You are Infonex, a helpful assistant."

[logging]
# filter = "infonex=info" # tracing EnvFilter directive
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_from_nonexistent_returns_file_not_found() {
        let result = load_from_path(Path::new("/tmp/nonexistent_infonex_config.toml"));
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound(_)));
    }

    #[test]
    fn load_valid_partial_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
[openai]
chat_model = "gpt-5"

[chat]
max_tool_rounds = 2
"#,
        )
        .unwrap();

        let config = load_from_path(&path).unwrap();
        assert_eq!(config.openai.chat_model, "gpt-5");
        assert_eq!(config.chat.max_tool_rounds, 2);
        // Defaults preserved
        assert_eq!(config.openai.refine_model, "gpt-4o-mini");
        assert_eq!(config.search.endpoint, "https://google.serper.dev");
    }

    #[test]
    fn load_invalid_toml_returns_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "this is not valid toml {{{").unwrap();

        let result = load_from_path(&path);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn load_config_with_invalid_values_falls_back_to_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
[chat]
max_tool_rounds = 100
"#,
        )
        .unwrap();

        let config = load_from_path(&path).unwrap();
        // Should fall back to default since validation fails
        assert_eq!(config.chat.max_tool_rounds, 3);
    }

    #[test]
    fn create_and_load_default_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("infonex").join("config.toml");

        create_default_config(&path).unwrap();
        assert!(path.exists());

        let config = load_from_path(&path).unwrap();
        assert_eq!(config.openai.chat_model, "gpt-4o");
        assert_eq!(config.chat.max_tool_rounds, 3);
    }

    #[test]
    fn default_config_toml_is_valid() {
        let content = default_config_toml();
        let config: InfonexConfig = toml::from_str(&content).unwrap();
        assert_eq!(config.openai.chat_model, "gpt-4o");
    }

    #[test]
    fn default_config_path_is_reasonable() {
        // This may not work in all CI environments, but should work locally
        if let Ok(path) = default_config_path() {
            let path_str = path.to_string_lossy();
            assert!(path_str.contains("infonex"));
            assert!(path_str.ends_with("config.toml"));
        }
    }
}
