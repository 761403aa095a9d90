//! Request pipeline: admission, cache, catalog lookup, query execution

use std::sync::Arc;
use std::time::Duration;

use dropgate_cache::{CacheKey, CacheStats, ResponseCache};
use dropgate_config::{CacheSettings, DataTypeCatalog, DataTypeDefinition, SearchSettings};
use dropgate_security::{client_address, AuthGate, InboundRequest, RateLimiter, HEALTH_PATH};
use dropgate_warehouse::{DataSource, QueryBuilder, QueryResult, WarehouseError, WarehouseQuery};
use tokio_util::sync::CancellationToken;

use crate::error::{ApiError, ApiResult};
use crate::models::{DropdownResponse, DynamicSearchRequest};

/// Longest accepted search term, in characters
pub const MAX_TERM_LENGTH: usize = 100;

const DEFAULT_QUERY_TIMEOUT: Duration = Duration::from_secs(30);

/// Composes the gate, the limiter and the cache around data-source calls.
///
/// Built once at startup and shared by every request.
pub struct RequestPipeline {
    gate: AuthGate,
    limiter: Option<RateLimiter>,
    catalog: DataTypeCatalog,
    cache: Option<ResponseCache<CacheKey, DropdownResponse>>,
    max_results: u32,
    source: Arc<dyn DataSource>,
    query_timeout: Duration,
    shutdown: CancellationToken,
}

impl RequestPipeline {
    /// Pipeline with an open gate, no rate limit and a default cache
    pub fn new(catalog: DataTypeCatalog, source: Arc<dyn DataSource>) -> Self {
        Self {
            gate: AuthGate::open(),
            limiter: None,
            catalog,
            cache: Some(ResponseCache::new()),
            max_results: SearchSettings::default().max_results,
            source,
            query_timeout: DEFAULT_QUERY_TIMEOUT,
            shutdown: CancellationToken::new(),
        }
    }

    pub fn with_gate(mut self, gate: AuthGate) -> Self {
        self.gate = gate;
        self
    }

    /// Limit each client to `requests_per_minute`; 0 disables limiting
    pub fn with_rate_limit(mut self, requests_per_minute: u32) -> Self {
        self.limiter = (requests_per_minute > 0).then(|| RateLimiter::new(requests_per_minute));
        self
    }

    /// Apply `cacheSettings`: disable the cache or set its TTL
    pub fn with_cache_settings(mut self, settings: &CacheSettings) -> Self {
        if !settings.enabled {
            self.cache = None;
            return self;
        }
        let cache = self.cache.take().unwrap_or_default();
        if let Some(ttl) = settings.ttl() {
            cache.set_ttl(ttl);
        }
        self.cache = Some(cache);
        self
    }

    pub fn with_cache(mut self, cache: ResponseCache<CacheKey, DropdownResponse>) -> Self {
        self.cache = Some(cache);
        self
    }

    pub fn with_max_results(mut self, max_results: u32) -> Self {
        self.max_results = max_results;
        self
    }

    pub fn with_query_timeout(mut self, timeout: Duration) -> Self {
        self.query_timeout = timeout;
        self
    }

    /// Token whose cancellation aborts in-flight data-source calls
    pub fn with_shutdown(mut self, token: CancellationToken) -> Self {
        self.shutdown = token;
        self
    }

    pub fn catalog(&self) -> &DataTypeCatalog {
        &self.catalog
    }

    pub fn limiter(&self) -> Option<&RateLimiter> {
        self.limiter.as_ref()
    }

    pub fn cache_stats(&self) -> Option<CacheStats> {
        self.cache.as_ref().map(ResponseCache::stats)
    }

    /// Gate first, then the limiter. The health path skips both.
    pub fn admit(&self, request: &dyn InboundRequest) -> ApiResult<()> {
        if request.path() == HEALTH_PATH {
            return Ok(());
        }

        if let Err(denial) = self.gate.authorize(request) {
            tracing::warn!(path = request.path(), reason = denial.kind(), "Request denied");
            return Err(denial.into());
        }

        if let Some(limiter) = &self.limiter {
            let client = client_address(request);
            if let Err(denial) = limiter.admit(&client) {
                tracing::warn!(client = %client, "Rate limit exceeded");
                return Err(denial.into());
            }
        }

        Ok(())
    }

    /// Catalog-driven search for `data_type`, served from cache when possible
    pub async fn search(&self, data_type: &str, term: &str) -> ApiResult<DropdownResponse> {
        if data_type.trim().is_empty() {
            return Err(ApiError::Validation("data type is required".to_string()));
        }
        if term.chars().count() > MAX_TERM_LENGTH {
            return Err(ApiError::Validation(format!(
                "search term must be at most {} characters",
                MAX_TERM_LENGTH
            )));
        }

        let key = CacheKey::search(data_type, term);
        if let Some(cache) = &self.cache {
            if let Some(mut hit) = cache.get(&key) {
                tracing::debug!(data_type = %data_type, "Serving search from cache");
                hit.metadata.cached = true;
                return Ok(hit);
            }
        }

        let definition = self.catalog.lookup(data_type)?;
        let query = QueryBuilder::build(definition, term, self.limit_for(definition));
        let result = self
            .execute(&query)
            .await
            .map_err(|e| ApiError::upstream("search failed", &e))?;

        let response = DropdownResponse::fetched(result.rows, result.source);
        tracing::debug!(
            data_type = %data_type,
            rows = response.metadata.row_count,
            "Search completed"
        );

        if let Some(cache) = &self.cache {
            cache.set(key, response.clone());
        }
        Ok(response)
    }

    /// Run caller-supplied query text behind a SELECT prefix check.
    ///
    /// The check only looks at the first keyword; it is not a sandbox.
    pub async fn dynamic_search(&self, request: DynamicSearchRequest) -> ApiResult<DropdownResponse> {
        if !is_select(&request.query) {
            tracing::warn!("Rejected non-SELECT dynamic query");
            return Err(ApiError::Forbidden(
                "only SELECT queries are allowed".to_string(),
            ));
        }

        let query = WarehouseQuery::dynamic(request.query, request.parameters, request.data_type);
        let result = self
            .execute(&query)
            .await
            .map_err(|e| ApiError::upstream("query execution failed", &e))?;
        Ok(DropdownResponse::fetched(result.rows, result.source))
    }

    fn limit_for(&self, definition: &DataTypeDefinition) -> Option<u32> {
        (definition.takes_limit() && self.max_results > 0).then_some(self.max_results)
    }

    /// Bounded by the query timeout and the shutdown token
    async fn execute(&self, query: &WarehouseQuery) -> Result<QueryResult, WarehouseError> {
        let fetch = tokio::time::timeout(self.query_timeout, self.source.fetch(query));
        tokio::select! {
            _ = self.shutdown.cancelled() => Err(WarehouseError::Cancelled),
            outcome = fetch => match outcome {
                Ok(result) => result,
                Err(_) => Err(WarehouseError::Timeout(self.query_timeout.as_secs())),
            },
        }
    }
}

fn is_select(query: &str) -> bool {
    query.trim().to_uppercase().starts_with("SELECT")
}
