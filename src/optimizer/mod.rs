//! Downstream optimizer subsystem.
//!
//! # Data Flow
//! ```text
//! validated JSON bytes
//!     → client.rs (POST <base_url><path>, optional deadline)
//!     → status classification (4xx / 5xx become errors)
//!     → OptimizerResponse | OptimizerError
//! ```

pub mod client;
pub mod error;

pub use client::{OptimizerClient, OptimizerResponse};
pub use error::OptimizerError;
