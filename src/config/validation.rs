//! Configuration validation.
//!
//! Serde handles syntax; this module checks values: addresses parse, the
//! optimizer URL is plain HTTP with a host, limits and deadlines are
//! non-zero. Every problem is reported, not just the first.

use std::net::SocketAddr;
use thiserror::Error;
use url::Url;

use crate::config::schema::GatewayConfig;

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("invalid {field} '{value}': not a socket address")]
    InvalidAddress { field: &'static str, value: String },

    #[error("invalid optimizer.base_url '{value}': {reason}")]
    InvalidBaseUrl { value: String, reason: String },

    #[error("optimizer.path must not be empty")]
    EmptyPath,

    #[error("{field} must be greater than zero")]
    Zero { field: &'static str },
}

/// Validate a parsed configuration.
pub fn validate_config(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field: "listener.bind_address",
            value: config.listener.bind_address.clone(),
        });
    }
    if config.listener.max_body_size == 0 {
        errors.push(ValidationError::Zero { field: "listener.max_body_size" });
    }

    if let Err(reason) = check_base_url(&config.optimizer.base_url) {
        errors.push(ValidationError::InvalidBaseUrl {
            value: config.optimizer.base_url.clone(),
            reason,
        });
    }
    if config.optimizer.path.trim_matches('/').is_empty() {
        errors.push(ValidationError::EmptyPath);
    }
    if config.optimizer.timeout_secs == Some(0) {
        errors.push(ValidationError::Zero { field: "optimizer.timeout_secs" });
    }
    if config.optimizer.max_response_size == 0 {
        errors.push(ValidationError::Zero { field: "optimizer.max_response_size" });
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidAddress {
            field: "observability.metrics_address",
            value: config.observability.metrics_address.clone(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

// The outbound connector speaks plain HTTP only.
fn check_base_url(raw: &str) -> Result<(), String> {
    let url = Url::parse(raw).map_err(|e| e.to_string())?;
    if url.scheme() != "http" {
        return Err(format!("unsupported scheme '{}'", url.scheme()));
    }
    if url.host_str().is_none() {
        return Err("missing host".to_string());
    }
    Ok(())
}
