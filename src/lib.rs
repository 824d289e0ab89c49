//! Optimizer gateway library.
//!
//! Accepts `POST /routes/optimize`, forwards the JSON body to the route
//! optimizer service and relays its answer. Optimizer failures surface as
//! 503, anything else that escapes a handler as 500.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod optimizer;

pub use config::schema::GatewayConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
