//! # dropgate cache
//!
//! Single-instance, in-memory response cache:
//!
//! - **TTL expiry**: entries expire a configurable duration after they are stored
//! - **Lazy removal**: an expired entry is dropped the next time it is read
//! - **Background sweep**: one periodic task per cache removes entries nobody re-reads
//! - **Metrics**: hit, miss, expiry and sweep counters

pub mod cache;
pub mod entry;
pub mod metrics;

pub use cache::{ResponseCache, DEFAULT_SWEEP_INTERVAL, DEFAULT_TTL};
pub use entry::{CacheEntry, CacheKey};
pub use metrics::{CacheMetrics, CacheStats};
