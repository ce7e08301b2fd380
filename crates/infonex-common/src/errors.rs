use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("config parse error: {0}")]
    ParseError(String),

    #[error("config validation error: {0}")]
    ValidationError(String),
}

/// Top-level error for binaries. Library crates keep their own error
/// types; this is what a driver maps them into at the edge.
#[derive(Debug, thiserror::Error)]
pub enum InfonexError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("chat error: {0}")]
    Chat(String),

    #[error("store error: {0}")]
    Store(String),

    #[error("{0}")]
    Other(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_display() {
        let err = ConfigError::FileNotFound(PathBuf::from("/tmp/missing.toml"));
        assert_eq!(err.to_string(), "config file not found: /tmp/missing.toml");

        let err = ConfigError::ParseError("unexpected token".into());
        assert_eq!(err.to_string(), "config parse error: unexpected token");

        let err = ConfigError::ValidationError("missing field 'model'".into());
        assert_eq!(
            err.to_string(),
            "config validation error: missing field 'model'"
        );
    }

    #[test]
    fn infonex_error_from_config() {
        let config_err = ConfigError::ParseError("bad toml".into());
        let err: InfonexError = config_err.into();
        assert!(matches!(err, InfonexError::Config(_)));
        assert!(err.to_string().contains("bad toml"));
    }

    #[test]
    fn infonex_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err: InfonexError = io_err.into();
        assert!(matches!(err, InfonexError::Io(_)));
        assert!(err.to_string().contains("file missing"));
    }

    #[test]
    fn infonex_error_other_variants() {
        let err = InfonexError::Chat("model unavailable".into());
        assert_eq!(err.to_string(), "chat error: model unavailable");

        let err = InfonexError::Store("session not found".into());
        assert_eq!(err.to_string(), "store error: session not found");

        let err = InfonexError::Other("something went wrong".into());
        assert_eq!(err.to_string(), "something went wrong");
    }
}
