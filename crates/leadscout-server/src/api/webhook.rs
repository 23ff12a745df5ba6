//! Telegram webhook binding.
//!
//! The push counterpart of the bot's long-poll loop: Telegram POSTs update
//! envelopes to a secret-bearing path, and the same transport-agnostic
//! handler produces the replies.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};

use leadscout_bot::{handle_message, Update};

use crate::api::{ApiError, AppState};
use crate::middleware::RequestId;

/// Receives one update envelope. A wrong secret is `404` with no detail;
/// processing failures never propagate to Telegram — the route answers
/// `200 OK` once the update has been handled so the platform does not
/// redeliver it.
pub async fn telegram_webhook(
    State(state): State<AppState>,
    Path(secret): Path<String>,
    Extension(req_id): Extension<RequestId>,
    Json(update): Json<Update>,
) -> Result<StatusCode, ApiError> {
    let (Some(telegram), Some(expected)) = (&state.telegram, &state.webhook_secret) else {
        return Err(ApiError::new(
            req_id.0,
            "service_unavailable",
            "chat delivery is not configured",
        ));
    };

    if secret != *expected {
        return Err(ApiError::new(req_id.0, "not_found", "not found"));
    }

    let Some(message) = update.message else {
        return Ok(StatusCode::OK);
    };
    let Some(text) = message.text.as_deref() else {
        return Ok(StatusCode::OK);
    };

    let replies = handle_message(&state.serp, &state.scraper, text).await;
    for reply in replies {
        if let Err(e) = telegram.send_message(message.chat.id, &reply).await {
            tracing::warn!(chat_id = message.chat.id, error = %e, "sendMessage failed");
        }
    }

    Ok(StatusCode::OK)
}
