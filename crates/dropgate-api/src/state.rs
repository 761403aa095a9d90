//! Application state for the API server

use std::sync::Arc;
use std::time::Instant;

use dropgate_config::GatewayConfig;

use crate::pipeline::RequestPipeline;

/// Application state shared across all API handlers
#[derive(Clone)]
pub struct AppState {
    /// Admission, cache and data-source composition
    pub pipeline: Arc<RequestPipeline>,
    /// Loaded configuration document
    pub config: Arc<GatewayConfig>,
    /// Server start time for uptime calculation
    pub start_time: Instant,
}

impl AppState {
    pub fn new(pipeline: RequestPipeline, config: GatewayConfig) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
            config: Arc::new(config),
            start_time: Instant::now(),
        }
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}
