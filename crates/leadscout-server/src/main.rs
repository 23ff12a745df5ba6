mod api;
mod middleware;

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use leadscout_bot::TelegramClient;
use leadscout_scraper::EmailScraper;
use leadscout_serp::SerpClient;

use crate::api::{build_app, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = leadscout_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    if config.serpapi_api_key.is_none() {
        tracing::warn!("SERPAPI_API_KEY not set; every search will fail upstream");
    }

    let serp = Arc::new(SerpClient::new(
        config.serpapi_api_key.as_deref().unwrap_or_default(),
        &config.user_agent,
    )?);
    let scraper = Arc::new(EmailScraper::new(
        config.scrape_timeout_secs,
        &config.user_agent,
    )?);

    let telegram = match &config.telegram_bot_token {
        Some(token) => Some(Arc::new(TelegramClient::new(token)?)),
        None => {
            tracing::warn!("TELEGRAM_BOT_TOKEN not set; webhook chat delivery disabled");
            None
        }
    };

    let app = build_app(AppState {
        serp,
        scraper,
        telegram,
        webhook_secret: config.telegram_webhook_secret.clone(),
    });

    tracing::info!(bind_addr = %config.bind_addr, env = %config.env, "starting server");
    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to listen for ctrl-c");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, starting graceful shutdown");
}
