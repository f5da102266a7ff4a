use billbook_api::config::AppConfig;
use billbook_api::{app_router, AppState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    #[cfg(debug_assertions)]
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("billbook_api=info".parse()?),
        )
        .init();

    let config = AppConfig::from_env()?;
    tracing::info!("Starting billbook-api with config: {:?}", config);

    let router = app_router(AppState::default());
    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!("billbook-api listening on {}", config.bind_addr);
    axum::serve(listener, router).await?;
    Ok(())
}
