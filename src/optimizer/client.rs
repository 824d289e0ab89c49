//! Outbound client for the optimizer service.
//!
//! One POST per call, no retries. The payload bytes are sent as received and
//! the response status is classified before anything is relayed.

use axum::body::{Body, Bytes};
use axum::http::{header, uri::Scheme, HeaderValue, Method, Request, StatusCode, Uri};
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};
use std::time::Duration;
use tokio::time;

use crate::config::OptimizerConfig;
use crate::http::request::X_REQUEST_ID;
use crate::optimizer::error::OptimizerError;

/// A successful optimizer answer, ready to relay.
#[derive(Debug, Clone)]
pub struct OptimizerResponse {
    pub status: StatusCode,
    pub content_type: Option<HeaderValue>,
    pub body: Bytes,
}

/// Reusable handle to the optimizer. Cheap to clone; holds no per-request state.
#[derive(Clone)]
pub struct OptimizerClient {
    client: Client<HttpConnector, Body>,
    endpoint: Uri,
    timeout: Option<Duration>,
    max_response_size: usize,
}

impl OptimizerClient {
    pub fn new(config: &OptimizerConfig) -> Result<Self, OptimizerError> {
        let raw = config.endpoint();
        let endpoint: Uri = raw
            .parse()
            .map_err(|_| OptimizerError::InvalidEndpoint(raw.clone()))?;
        if endpoint.scheme() != Some(&Scheme::HTTP) || endpoint.authority().is_none() {
            return Err(OptimizerError::InvalidEndpoint(raw));
        }

        let client = Client::builder(TokioExecutor::new()).build(HttpConnector::new());

        Ok(Self {
            client,
            endpoint,
            timeout: config.timeout(),
            max_response_size: config.max_response_size,
        })
    }

    pub fn endpoint(&self) -> &Uri {
        &self.endpoint
    }

    /// Forward a JSON payload and classify the optimizer's answer.
    ///
    /// 4xx and 5xx answers become [`OptimizerError::ClientError`] and
    /// [`OptimizerError::ServerError`] carrying the response body, or
    /// [`OptimizerError::Status`] when the body is empty; any other status
    /// is returned for relaying.
    pub async fn forward(
        &self,
        payload: Bytes,
        request_id: &str,
    ) -> Result<OptimizerResponse, OptimizerError> {
        let request = Request::builder()
            .method(Method::POST)
            .uri(self.endpoint.clone())
            .header(header::CONTENT_TYPE, "application/json")
            .header(X_REQUEST_ID, request_id)
            .body(Body::from(payload))?;

        match self.timeout {
            Some(limit) => time::timeout(limit, self.exchange(request))
                .await
                .map_err(|_| OptimizerError::Timeout(limit))?,
            None => self.exchange(request).await,
        }
    }

    async fn exchange(&self, request: Request<Body>) -> Result<OptimizerResponse, OptimizerError> {
        let response = self.client.request(request).await?;
        let status = response.status();
        let content_type = response.headers().get(header::CONTENT_TYPE).cloned();

        let body = axum::body::to_bytes(Body::new(response.into_body()), self.max_response_size)
            .await
            .map_err(OptimizerError::Body)?;

        if (status.is_client_error() || status.is_server_error()) && body.is_empty() {
            return Err(OptimizerError::Status {
                status,
                endpoint: self.endpoint.clone(),
            });
        }
        if status.is_client_error() {
            return Err(OptimizerError::ClientError(lossy(&body)));
        }
        if status.is_server_error() {
            return Err(OptimizerError::ServerError(lossy(&body)));
        }

        Ok(OptimizerResponse {
            status,
            content_type,
            body,
        })
    }
}

fn lossy(body: &Bytes) -> String {
    String::from_utf8_lossy(body).into_owned()
}
