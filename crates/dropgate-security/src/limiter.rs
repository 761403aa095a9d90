//! Per-client sliding-window rate limiting

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::time::Instant;

use crate::error::{Denial, Result};

/// Length of the trailing window
pub const WINDOW: Duration = Duration::from_secs(60);

/// Admits at most `limit` requests per client within any trailing 60 seconds.
///
/// Each client keeps the timestamps of its admitted requests. Denied attempts
/// are not recorded. The prune-count-append sequence runs under one lock.
#[derive(Clone)]
pub struct RateLimiter {
    limit: usize,
    window: Duration,
    clients: Arc<Mutex<HashMap<String, VecDeque<Instant>>>>,
}

impl RateLimiter {
    pub fn new(requests_per_minute: u32) -> Self {
        Self::with_window(requests_per_minute, WINDOW)
    }

    pub fn with_window(limit: u32, window: Duration) -> Self {
        Self {
            limit: limit as usize,
            window,
            clients: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Admit or deny one request from `client`
    pub fn admit(&self, client: &str) -> Result<()> {
        let now = Instant::now();
        let mut clients = self.clients.lock();
        let window = clients.entry(client.to_string()).or_default();

        while window
            .front()
            .is_some_and(|t| now.duration_since(*t) >= self.window)
        {
            window.pop_front();
        }

        if window.len() >= self.limit {
            let retry_after = window
                .front()
                .map(|oldest| self.window.saturating_sub(now.duration_since(*oldest)))
                .unwrap_or(self.window);
            return Err(Denial::RateLimited { retry_after });
        }

        window.push_back(now);
        Ok(())
    }

    /// Drop clients with no request inside the window. Returns how many were removed.
    pub fn evict_idle(&self) -> usize {
        let now = Instant::now();
        let mut clients = self.clients.lock();
        let before = clients.len();
        clients.retain(|_, window| {
            window
                .back()
                .is_some_and(|last| now.duration_since(*last) < self.window)
        });
        before - clients.len()
    }

    /// Number of tracked clients
    pub fn tracked_clients(&self) -> usize {
        self.clients.lock().len()
    }
}

impl std::fmt::Debug for RateLimiter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RateLimiter")
            .field("limit", &self.limit)
            .field("window", &self.window)
            .field("clients", &self.tracked_clients())
            .finish()
    }
}
