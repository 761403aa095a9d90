use std::sync::Arc;

use anyhow::Context;
use dropgate_api::ApiServer;
use dropgate_config::{AuthMode, ConfigManager, ProcessEnv, RateLimitSettings, ServerSettings};
use dropgate_warehouse::{DataSource, MockDataSource, UnavailableDataSource};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    ProcessEnv::load_dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,dropgate=debug")),
        )
        .init();

    let env = ProcessEnv;
    let settings = ServerSettings::from_env(&env).context("invalid server settings")?;
    let auth = AuthMode::from_env(&env).context("invalid security settings")?;
    let rate_limit = RateLimitSettings::from_env(&env).context("invalid rate limit")?;
    let loaded = ConfigManager::with_path(&settings.config_file)
        .load_config()
        .with_context(|| format!("failed to load {}", settings.config_file.display()))?;

    let source: Arc<dyn DataSource> = if settings.test_mode {
        tracing::info!("TEST_MODE enabled, serving mock data");
        Arc::new(MockDataSource::new())
    } else {
        tracing::warn!("No warehouse driver configured, data requests will fail until one is");
        Arc::new(UnavailableDataSource::new("no warehouse connection"))
    };

    ApiServer::new(&settings, loaded, auth, rate_limit, source)
        .serve()
        .await
        .context("server error")
}
