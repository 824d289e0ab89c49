//! Top-level error mapping.
//!
//! Every handler and extractor returns [`AppError`]; its `IntoResponse`
//! implementation is the only place failures become status codes:
//!
//! ```text
//! AppError::Optimizer  → 503 "Could not connect to optimizer service. Details: ..."
//! AppError::Unhandled  → 500 "Something went wrong: ..."
//! handler panic        → 500 "Something went wrong: <panic message>"
//! no route / method    → 500 "Something went wrong: ..."
//! ```

use axum::{
    http::{Method, StatusCode, Uri},
    response::{IntoResponse, Response},
};
use std::any::Any;
use thiserror::Error;

use crate::observability::metrics;
use crate::optimizer::OptimizerError;

pub const UNAVAILABLE_MESSAGE: &str = "Could not connect to optimizer service.";
pub const UNHANDLED_PREFIX: &str = "Something went wrong: ";

#[derive(Debug, Error)]
pub enum AppError {
    /// The optimizer call failed or the optimizer answered with an error status.
    #[error(transparent)]
    Optimizer(#[from] OptimizerError),

    /// Anything else that escaped request handling.
    #[error("{0}")]
    Unhandled(String),
}

impl AppError {
    pub fn unhandled(message: impl Into<String>) -> Self {
        AppError::Unhandled(message.into())
    }
}

/// Compose the 503 body, omitting the details when there are none.
pub fn unavailable_message(detail: Option<&str>) -> String {
    match detail.filter(|d| !d.is_empty()) {
        Some(detail) => format!("{} Details: {}", UNAVAILABLE_MESSAGE, detail),
        None => UNAVAILABLE_MESSAGE.to_string(),
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Optimizer(err) => {
                let detail = err.detail();
                tracing::warn!(kind = err.kind(), error = %detail, "Optimizer request failed");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    unavailable_message(Some(&detail)),
                )
                    .into_response()
            }
            AppError::Unhandled(message) => {
                tracing::error!("Something went wrong: {}", message);
                metrics::record_unhandled();
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("{}{}", UNHANDLED_PREFIX, message),
                )
                    .into_response()
            }
        }
    }
}

/// Router fallback for paths with no route.
pub async fn no_route(method: Method, uri: Uri) -> AppError {
    AppError::Unhandled(format!("No resource found for {} {}", method, uri.path()))
}

/// Router fallback for known paths hit with the wrong method.
pub async fn method_not_allowed(method: Method) -> AppError {
    AppError::Unhandled(format!("Request method '{}' is not supported", method))
}

/// Panic handler for `CatchPanicLayer`.
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let message = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "request handler panicked".to_string()
    };
    AppError::Unhandled(message).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_text(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[test]
    fn unavailable_message_omits_empty_detail() {
        assert_eq!(unavailable_message(None), "Could not connect to optimizer service.");
        assert_eq!(unavailable_message(Some("")), "Could not connect to optimizer service.");
        assert_eq!(
            unavailable_message(Some("refused")),
            "Could not connect to optimizer service. Details: refused"
        );
    }

    #[tokio::test]
    async fn optimizer_errors_map_to_503() {
        let response =
            AppError::from(OptimizerError::ServerError("boom".into())).into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(
            body_text(response).await,
            "Could not connect to optimizer service. Details: Server error from optimizer: boom"
        );
    }

    #[tokio::test]
    async fn unhandled_errors_map_to_500() {
        let response = AppError::unhandled("disk on fire").into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_text(response).await, "Something went wrong: disk on fire");
    }

    #[tokio::test]
    async fn panic_payloads_become_messages() {
        let response = handle_panic(Box::new("static message"));
        assert_eq!(body_text(response).await, "Something went wrong: static message");

        let response = handle_panic(Box::new(String::from("owned message")));
        assert_eq!(body_text(response).await, "Something went wrong: owned message");

        let response = handle_panic(Box::new(42u8));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
