//! Long-poll transport binding.

use leadscout_scraper::EmailScraper;
use leadscout_serp::SerpClient;

use crate::client::TelegramClient;
use crate::handler::handle_message;

/// Seconds to back off after a failed `getUpdates` before polling again.
const POLL_RETRY_DELAY_SECS: u64 = 5;

/// Runs the long-poll loop until the process is stopped.
///
/// Every per-update failure — a failed send, a dropped poll — is logged and
/// skipped so that one bad request can never take the loop down.
pub async fn run_polling(
    telegram: &TelegramClient,
    serp: &SerpClient,
    scraper: &EmailScraper,
    poll_timeout_secs: u64,
) {
    let mut offset: Option<i64> = None;

    loop {
        let updates = match telegram.get_updates(offset, poll_timeout_secs).await {
            Ok(updates) => updates,
            Err(e) => {
                tracing::warn!(error = %e, "getUpdates failed, retrying");
                tokio::time::sleep(std::time::Duration::from_secs(POLL_RETRY_DELAY_SECS)).await;
                continue;
            }
        };

        for update in updates {
            offset = Some(update.update_id + 1);

            let Some(message) = update.message else {
                continue;
            };
            let Some(text) = message.text.as_deref() else {
                continue;
            };

            let replies = handle_message(serp, scraper, text).await;
            for reply in replies {
                if let Err(e) = telegram.send_message(message.chat.id, &reply).await {
                    tracing::warn!(chat_id = message.chat.id, error = %e, "sendMessage failed");
                }
            }
        }
    }
}
