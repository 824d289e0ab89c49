//! JSON payload extraction.
//!
//! The body must be a JSON object sent as `application/json`. It is parsed
//! only to validate it; the raw bytes are what gets forwarded.

use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
    http::{header::CONTENT_TYPE, HeaderMap},
};
use serde_json::{Map, Value};

use crate::http::error::AppError;

/// Raw bytes of a request body known to hold a JSON object.
#[derive(Debug, Clone)]
pub struct JsonPayload(pub Bytes);

impl<S> FromRequest<S> for JsonPayload
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if !has_json_content_type(req.headers()) {
            let found = req
                .headers()
                .get(CONTENT_TYPE)
                .and_then(|v| v.to_str().ok())
                .unwrap_or("none")
                .to_string();
            return Err(AppError::unhandled(format!(
                "Content-Type '{}' is not supported, expected 'application/json'",
                found
            )));
        }

        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|rejection| AppError::unhandled(rejection.body_text()))?;

        serde_json::from_slice::<Map<String, Value>>(&bytes)
            .map_err(|e| AppError::unhandled(format!("JSON parse error: {}", e)))?;

        Ok(Self(bytes))
    }
}

fn has_json_content_type(headers: &HeaderMap) -> bool {
    let Some(content_type) = headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok()) else {
        return false;
    };
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    essence == "application/json"
        || (essence.starts_with("application/") && essence.ends_with("+json"))
}
