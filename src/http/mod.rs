//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware)
//!     → request.rs (assign request ID)
//!     → payload.rs (content type + JSON object check, raw bytes kept)
//!     → optimize.rs (forward to optimizer, relay answer)
//!     → error.rs (map any failure to 503 / 500)
//!     → Send to client
//! ```

pub mod error;
pub mod optimize;
pub mod payload;
pub mod request;
pub mod server;

pub use error::AppError;
pub use request::{RequestIdExt, X_REQUEST_ID};
pub use server::{AppState, HttpServer};
