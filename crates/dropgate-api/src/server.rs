//! HTTP server bootstrap

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use dropgate_config::{AuthMode, LoadedConfig, RateLimitSettings, ServerSettings};
use dropgate_security::{AuthGate, RateLimiter};
use dropgate_warehouse::DataSource;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;

use crate::{pipeline::RequestPipeline, routes, state::AppState};

/// The gateway server: shared state, router and shutdown token
pub struct ApiServer {
    state: AppState,
    port: u16,
    cors_origins: Vec<String>,
    shutdown: CancellationToken,
}

impl ApiServer {
    /// Wire the pipeline from loaded configuration and environment policy
    pub fn new(
        settings: &ServerSettings,
        loaded: LoadedConfig,
        auth: AuthMode,
        rate_limit: RateLimitSettings,
        source: Arc<dyn DataSource>,
    ) -> Self {
        let shutdown = CancellationToken::new();
        let LoadedConfig { config, catalog } = loaded;

        tracing::info!(
            auth = auth.label(),
            rate_limit = rate_limit.requests_per_minute,
            cache = config.cache_settings.enabled,
            data_source = source.name(),
            "Configuring request pipeline"
        );

        let pipeline = RequestPipeline::new(catalog, source)
            .with_gate(AuthGate::new(auth))
            .with_rate_limit(rate_limit.requests_per_minute)
            .with_cache_settings(&config.cache_settings)
            .with_max_results(config.search_settings.max_results)
            .with_query_timeout(settings.query_timeout)
            .with_shutdown(shutdown.clone());

        Self {
            state: AppState::new(pipeline, config),
            port: settings.port,
            cors_origins: settings.cors_origins.clone(),
            shutdown,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Token cancelled on shutdown
    pub fn shutdown_token(&self) -> CancellationToken {
        self.shutdown.clone()
    }

    pub fn router(&self) -> Router {
        routes::app(self.state.clone(), self.cors_origins.clone())
    }

    /// Serve until a shutdown signal arrives, then drain in-flight requests
    pub async fn serve(self) -> std::io::Result<()> {
        let listener = TcpListener::bind(SocketAddr::from(([0, 0, 0, 0], self.port))).await?;
        tracing::info!(addr = %listener.local_addr()?, "Server listening");
        self.serve_on(listener).await
    }

    pub async fn serve_on(self, listener: TcpListener) -> std::io::Result<()> {
        if let Some(limiter) = self.state.pipeline.limiter() {
            spawn_idle_eviction(limiter.clone(), self.shutdown.clone());
        }
        spawn_signal_listener(self.shutdown.clone());

        let app = self.router();
        axum::serve(
            listener,
            app.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .with_graceful_shutdown(self.shutdown.clone().cancelled_owned())
        .await?;

        tracing::info!("Server stopped");
        Ok(())
    }
}

/// Drop idle rate-limit clients once per window until shutdown
fn spawn_idle_eviction(limiter: RateLimiter, shutdown: CancellationToken) {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(limiter.window());
        ticker.tick().await;
        loop {
            tokio::select! {
                _ = shutdown.cancelled() => break,
                _ = ticker.tick() => {
                    let removed = limiter.evict_idle();
                    if removed > 0 {
                        tracing::debug!(removed, "Evicted idle rate-limit clients");
                    }
                }
            }
        }
    });
}

fn spawn_signal_listener(shutdown: CancellationToken) {
    tokio::spawn(async move {
        tokio::select! {
            _ = shutdown.cancelled() => {}
            _ = wait_for_signal() => {
                tracing::info!("Shutdown signal received");
                shutdown.cancel();
            }
        }
    });
}

async fn wait_for_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
}
