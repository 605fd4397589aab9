use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use formrule_core::i18n::{I18n, MessageCatalog};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use formrule_api::config::ServerConfig;
use formrule_api::router::build_app_router;
use formrule_api::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "formrule_api=debug,formrule_core=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env()?;
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Messages ---
    let i18n = load_i18n(&config)?;

    let addr = SocketAddr::new(
        config.host.parse().context("HOST must be an IP address")?,
        config.port,
    );
    let state = AppState { i18n };
    let app = build_app_router(state, &config);

    tracing::info!("Starting server on {addr}");
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}

/// Build the message formatter, loading the translation catalog if configured.
fn load_i18n(config: &ServerConfig) -> anyhow::Result<I18n> {
    let Some(path) = &config.message_catalog_path else {
        return Ok(I18n::default().with_language(config.default_language.clone()));
    };

    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read message catalog {}", path.display()))?;
    let catalog = MessageCatalog::from_json(&raw)?;
    tracing::info!(
        path = %path.display(),
        locales = catalog.locale_count(),
        "Loaded message catalog"
    );

    Ok(I18n::new(Arc::new(catalog), config.default_language.clone()))
}
