//! Full configuration validation.
//!
//! Validates numeric ranges, endpoint URL formats, and model names.

use crate::schema::InfonexConfig;
use infonex_common::ConfigError;
use regex::Regex;
use std::sync::LazyLock;

static URL_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^https?://\S+$").unwrap());

static SIZE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d{3,4}x\d{3,4}$").unwrap());

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &InfonexConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    // Endpoint formats
    validate_url(&mut errors, "openai.base_url", &config.openai.base_url);
    validate_url(&mut errors, "openrouter.base_url", &config.openrouter.base_url);
    validate_url(&mut errors, "search.endpoint", &config.search.endpoint);
    if !config.artifacts.pdf_service_url.is_empty() {
        validate_url(
            &mut errors,
            "artifacts.pdf_service_url",
            &config.artifacts.pdf_service_url,
        );
    }

    // Model names
    validate_nonempty(&mut errors, "openai.chat_model", &config.openai.chat_model);
    validate_nonempty(&mut errors, "openai.refine_model", &config.openai.refine_model);
    validate_nonempty(&mut errors, "openai.image_model", &config.openai.image_model);
    validate_nonempty(
        &mut errors,
        "openrouter.reasoning_model",
        &config.openrouter.reasoning_model,
    );
    validate_nonempty(&mut errors, "chat.default_model", &config.chat.default_model);

    // OpenAI constraints
    validate_range(&mut errors, "openai.max_tokens", config.openai.max_tokens, 256, 16384);
    validate_range_f64(&mut errors, "openai.temperature", config.openai.temperature, 0.0, 2.0);

    // Search constraints
    validate_range(&mut errors, "search.max_results", config.search.max_results, 1, 10);

    // Artifacts constraints
    if !SIZE_RE.is_match(&config.artifacts.image_size) {
        errors.push(format!(
            "artifacts.image_size = {:?} is not WIDTHxHEIGHT",
            config.artifacts.image_size
        ));
    }

    // Chat constraints
    validate_range(&mut errors, "chat.max_tool_rounds", config.chat.max_tool_rounds, 1, 8);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}

fn validate_url(errors: &mut Vec<String>, name: &str, value: &str) {
    if !URL_RE.is_match(value) {
        errors.push(format!("{name} = {value:?} is not an http(s) URL"));
    }
}

fn validate_nonempty(errors: &mut Vec<String>, name: &str, value: &str) {
    if value.trim().is_empty() {
        errors.push(format!("{name} must not be empty"));
    }
}

fn validate_range(errors: &mut Vec<String>, name: &str, value: u32, min: u32, max: u32) {
    if value < min || value > max {
        errors.push(format!("{name} = {value} is out of range [{min}, {max}]"));
    }
}

fn validate_range_f64(errors: &mut Vec<String>, name: &str, value: f64, min: f64, max: f64) {
    if value < min || value > max {
        errors.push(format!("{name} = {value} is out of range [{min}, {max}]"));
    }
}
