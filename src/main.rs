use std::sync::Arc;

use cf_companion::config::Config;
use cf_companion::db::{create_redis_client, Cache};
use cf_companion::routes::{create_router, AppState};
use cf_companion::services::providers::codeforces::CodeforcesClient;
use cf_companion::services::providers::CodeforcesProvider;
use cf_companion::services::recommendation::DEFAULT_PER_TIER;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cf_companion=debug,tower_http=debug".into()),
        )
        .init();

    let config = Config::from_env()?;

    let redis_client = create_redis_client(&config.redis_url)?;
    let (cache, _cache_writer) = Cache::new(redis_client).await;

    let provider: Arc<dyn CodeforcesProvider> =
        Arc::new(CodeforcesClient::new(cache, config.codeforces_api_url.clone()));

    tracing::info!(provider = provider.name(), "Data provider initialized");

    let state = Arc::new(AppState {
        provider,
        per_tier: DEFAULT_PER_TIER,
    });

    let app = create_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(addr = %addr, "Server listening");
    axum::serve(listener, app).await?;

    Ok(())
}
