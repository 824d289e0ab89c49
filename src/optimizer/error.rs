//! Failures of the outbound optimizer call.

use axum::http::{StatusCode, Uri};
use std::error::Error as StdError;
use std::time::Duration;
use thiserror::Error;

/// Why a forwarded request did not produce a relayable response.
#[derive(Debug, Error)]
pub enum OptimizerError {
    /// Optimizer answered 4xx.
    #[error("Client error from optimizer: {0}")]
    ClientError(String),

    /// Optimizer answered 5xx.
    #[error("Server error from optimizer: {0}")]
    ServerError(String),

    /// Optimizer answered 4xx or 5xx with an empty body.
    #[error("{status} from POST {endpoint}")]
    Status { status: StatusCode, endpoint: Uri },

    /// Connection refused, DNS failure, reset mid-exchange.
    #[error(transparent)]
    Transport(#[from] hyper_util::client::legacy::Error),

    #[error("optimizer did not respond within {}s", .0.as_secs())]
    Timeout(Duration),

    #[error("failed to read optimizer response: {0}")]
    Body(#[source] axum::Error),

    #[error("invalid optimizer endpoint '{0}'")]
    InvalidEndpoint(String),

    #[error(transparent)]
    Request(#[from] axum::http::Error),
}

impl OptimizerError {
    /// Failure message including every underlying cause.
    pub fn detail(&self) -> String {
        let mut detail = self.to_string();
        let mut source = self.source();
        while let Some(cause) = source {
            let text = cause.to_string();
            if !text.is_empty() && !detail.ends_with(&text) {
                detail.push_str(": ");
                detail.push_str(&text);
            }
            source = cause.source();
        }
        detail
    }

    /// Short label for logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            OptimizerError::ClientError(_) => "client_error",
            OptimizerError::ServerError(_) => "server_error",
            OptimizerError::Status { status, .. } if status.is_client_error() => "client_error",
            OptimizerError::Status { .. } => "server_error",
            OptimizerError::Transport(_) => "transport",
            OptimizerError::Timeout(_) => "timeout",
            OptimizerError::Body(_) => "body",
            OptimizerError::InvalidEndpoint(_) | OptimizerError::Request(_) => "request",
        }
    }
}
