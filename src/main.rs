use skincare_recs::api::{create_router, AppState};
use skincare_recs::config::Config;
use skincare_recs::services::Catalog;
use skincare_recs::shutdown::shutdown_signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "skincare_recs=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    // Loaded once; every request reads the same table
    let catalog = Catalog::load_cached(&config.dataset_path)?;

    let address = config.bind_address();
    let state = AppState::new(catalog, config);
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(&address).await?;
    tracing::info!("Server running on http://{}", address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}
