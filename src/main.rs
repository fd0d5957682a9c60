use std::sync::Arc;

use nearby_recs::{
    config::Config,
    db::{create_pool, DatasetStore},
    routes::{create_router, AppState},
    services::sources::{JsonFileSource, MemorySource, PostgresSource, TransactionSource},
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = Config::from_env()?;

    let source: Arc<dyn TransactionSource> = match (&config.dataset_path, &config.database_url) {
        (Some(path), _) => Arc::new(JsonFileSource::new(path)),
        (None, Some(url)) => Arc::new(PostgresSource::new(create_pool(url).await?)),
        (None, None) => {
            tracing::warn!("Neither DATASET_PATH nor DATABASE_URL is set, serving an empty dataset");
            Arc::new(MemorySource::default())
        }
    };

    // Initial load; a bad dataset aborts startup
    let store = DatasetStore::default();
    store
        .reload(source.as_ref(), &config.excluded_product_lines)
        .await?;

    let address = config.bind_address();
    let app = create_router(AppState::new(store, source, config));

    let listener = tokio::net::TcpListener::bind(&address).await?;
    tracing::info!(address = %address, "Server running");
    axum::serve(listener, app).await?;

    Ok(())
}
