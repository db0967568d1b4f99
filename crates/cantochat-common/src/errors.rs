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

#[derive(Debug, thiserror::Error)]
pub enum CantochatError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("session error: {0}")]
    Session(String),

    #[error("scenario error: {0}")]
    Scenario(String),
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

        let err = ConfigError::ValidationError("backend.init_timeout_secs = 0".into());
        assert_eq!(
            err.to_string(),
            "config validation error: backend.init_timeout_secs = 0"
        );
    }

    #[test]
    fn cantochat_error_from_config() {
        let config_err = ConfigError::ParseError("bad toml".into());
        let err: CantochatError = config_err.into();
        assert!(matches!(err, CantochatError::Config(_)));
        assert!(err.to_string().contains("bad toml"));
    }

    #[test]
    fn cantochat_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "stdout closed");
        let err: CantochatError = io_err.into();
        assert!(matches!(err, CantochatError::Io(_)));
        assert!(err.to_string().contains("stdout closed"));
    }

    #[test]
    fn cantochat_error_other_variants() {
        let err = CantochatError::Session("initialization failed".into());
        assert_eq!(err.to_string(), "session error: initialization failed");

        let err = CantochatError::Scenario("unknown scenario 'airport'".into());
        assert_eq!(err.to_string(), "scenario error: unknown scenario 'airport'");
    }
}
