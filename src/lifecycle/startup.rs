//! Startup: configuration first, then logging.

use std::path::Path;

use crate::config::{load_config, ConfigError, GatewayConfig, ObservabilityConfig};
use crate::observability::logging::init_logging;

/// Load the config file (or the defaults) and install logging.
///
/// A bad config file still gets logged: logging falls back to the default
/// observability settings before the error is returned.
pub fn load_config_and_init_logging(path: Option<&Path>) -> Result<GatewayConfig, ConfigError> {
    let loaded = match path {
        Some(path) => load_config(path),
        None => Ok(GatewayConfig::default()),
    };

    match loaded {
        Ok(config) => {
            if init_logging(&config.observability).is_err() {
                tracing::debug!("Tracing subscriber already installed");
            }
            Ok(config)
        }
        Err(e) => {
            let _ = init_logging(&ObservabilityConfig::default());
            tracing::error!(
                path = ?path,
                error = %e,
                "Failed to load configuration"
            );
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn no_path_yields_defaults() {
        let config = load_config_and_init_logging(None).unwrap();
        assert_eq!(config.optimizer.endpoint(), "http://localhost:8000/optimize");
    }

    #[test]
    fn invalid_file_is_returned_after_logging() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[optimizer]\nbase_url = \"https://solver\"").unwrap();

        let err = load_config_and_init_logging(Some(file.path())).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));

        // Logging is already up; a second failure must not panic.
        let err = load_config_and_init_logging(Some(file.path())).unwrap_err();
        assert!(err.to_string().contains("unsupported scheme 'https'"));
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gateway.toml");
        let err = load_config_and_init_logging(Some(path.as_path())).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
