//! Transport-agnostic command handling.
//!
//! Both chat bindings — the long-poll loop and the server webhook — feed
//! message text through [`handle_message`] and send whatever replies come
//! back. The handler never fails: parse errors become error replies and
//! upstream failures collapse to the "no results" reply.

use leadscout_core::{parse_command, COMMAND_SIGIL};
use leadscout_scraper::EmailScraper;
use leadscout_serp::{normalize_listing, SerpClient};

use crate::format::{
    escape_markdown, format_record, no_results_message, usage_message, MAX_CHAT_RESULTS,
};

/// Handles one inbound chat message and returns the replies to send, in
/// order. Non-command chatter gets a usage hint; a well-formed command gets
/// at most [`MAX_CHAT_RESULTS`] record messages.
pub async fn handle_message(
    serp: &SerpClient,
    scraper: &EmailScraper,
    text: &str,
) -> Vec<String> {
    let trimmed = text.trim();
    if matches!(trimmed, "/start" | "/help") || !trimmed.starts_with(COMMAND_SIGIL) {
        return vec![usage_message()];
    }

    let request = match parse_command(trimmed) {
        Ok(request) => request,
        Err(e) => return vec![escape_markdown(&e.to_string())],
    };

    tracing::info!(
        keyword = %request.keyword,
        city = %request.city,
        country = %request.country,
        engine = %request.engine,
        "chat search"
    );

    let listings = serp.search_or_empty(&request).await;
    if listings.is_empty() {
        return vec![no_results_message()];
    }

    let mut replies = Vec::new();
    // Records are enriched one at a time; each website fetch is bounded by
    // the scraper's timeout, so the cap also bounds total latency.
    for listing in listings.iter().take(MAX_CHAT_RESULTS) {
        let mut record = normalize_listing(listing);
        if record.has_website() {
            record.emails = Some(scraper.extract_emails(&record.website).await);
        }
        replies.push(format_record(&record));
    }
    replies
}
