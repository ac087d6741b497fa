use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use news_crawler::{
    config::Config,
    api::routes::create_router,
    AppState,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,news_crawler=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::load()?;
    let server_addr = config.server_addr;
    tracing::info!(front_page = %config.front_page_url, top = config.top_articles, "configuration loaded");

    // Build the router with routes
    let app = create_router(AppState::from_config(&config));

    // Create the listener
    let listener = TcpListener::bind(server_addr).await?;

    // Start the server
    tracing::info!("Listening on {}", server_addr);
    axum::serve(listener, app).await?;

    Ok(())
}
