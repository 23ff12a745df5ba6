use leadscout_bot::{run_polling, TelegramClient};
use leadscout_scraper::EmailScraper;
use leadscout_serp::SerpClient;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = leadscout_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let token = config
        .telegram_bot_token
        .clone()
        .ok_or_else(|| anyhow::anyhow!("TELEGRAM_BOT_TOKEN is required to run the bot"))?;

    if config.serpapi_api_key.is_none() {
        tracing::warn!("SERPAPI_API_KEY not set; every search will fail upstream");
    }

    let serp = SerpClient::new(
        config.serpapi_api_key.as_deref().unwrap_or_default(),
        &config.user_agent,
    )?;
    let scraper = EmailScraper::new(config.scrape_timeout_secs, &config.user_agent)?;
    let telegram = TelegramClient::new(&token)?;

    tracing::info!(poll_timeout_secs = config.poll_timeout_secs, "starting long-poll loop");
    run_polling(&telegram, &serp, &scraper, config.poll_timeout_secs).await;

    Ok(())
}
