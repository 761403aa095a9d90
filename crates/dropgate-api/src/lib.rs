//! dropgate HTTP gateway
//!
//! Serves dropdown data from configured warehouse queries behind an
//! authentication gate, a per-client rate limiter and a response cache.

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod pipeline;
pub mod request;
pub mod routes;
pub mod server;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use pipeline::RequestPipeline;
pub use server::ApiServer;
pub use state::AppState;
