use std::net::SocketAddr;
use std::sync::Arc;
use storefront_catalog::config::Config;
use storefront_catalog::router::create_app_router;
use storefront_catalog::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = Config::load()?;
    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;

    // Load the catalog once; it is never refetched.
    let state = Arc::new(AppState::load(&config)?);
    let app = create_app_router(state);

    tracing::info!("Server running on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
