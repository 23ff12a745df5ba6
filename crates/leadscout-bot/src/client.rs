//! HTTP client for the Telegram Bot API.
//!
//! Wraps `reqwest` with token management and the Bot API response envelope:
//! every call checks `"ok"` and surfaces `"description"` as
//! [`BotError::Api`] on failure. The client carries no overall request
//! timeout so that `getUpdates` long polls are not cut short.

use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::BotError;
use crate::types::{Message, Update};

const DEFAULT_BASE_URL: &str = "https://api.telegram.org";

#[derive(serde::Deserialize)]
struct ApiEnvelope<T> {
    ok: bool,
    #[serde(default)]
    description: Option<String>,
    result: Option<T>,
}

/// Client for the Telegram Bot API.
///
/// Use [`TelegramClient::new`] for production or
/// [`TelegramClient::with_base_url`] to point at a mock server in tests.
pub struct TelegramClient {
    client: Client,
    token: String,
    base_url: Url,
}

impl TelegramClient {
    /// Creates a new client pointed at the production Bot API.
    ///
    /// # Errors
    ///
    /// Returns [`BotError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(token: &str) -> Result<Self, BotError> {
        Self::with_base_url(token, DEFAULT_BASE_URL)
    }

    /// Creates a new client with a custom base URL (for testing with
    /// wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`BotError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`BotError::Api`] if `base_url` is not a
    /// valid URL.
    pub fn with_base_url(token: &str, base_url: &str) -> Result<Self, BotError> {
        let client = Client::builder()
            .connect_timeout(std::time::Duration::from_secs(10))
            .build()?;

        let base_url = Url::parse(base_url)
            .map_err(|e| BotError::Api(format!("invalid base URL '{base_url}': {e}")))?;

        Ok(Self {
            client,
            token: token.to_owned(),
            base_url,
        })
    }

    /// Long-polls for new updates.
    ///
    /// `offset` should be one past the highest `update_id` already
    /// processed; `timeout_secs` is the server-side hold time of the poll.
    ///
    /// # Errors
    ///
    /// - [`BotError::Api`] if the Bot API reports `"ok": false`.
    /// - [`BotError::Http`] on network failure or non-2xx HTTP status.
    /// - [`BotError::Deserialize`] if the response does not match the
    ///   expected shape.
    pub async fn get_updates(
        &self,
        offset: Option<i64>,
        timeout_secs: u64,
    ) -> Result<Vec<Update>, BotError> {
        let mut params = serde_json::Map::new();
        params.insert("timeout".into(), Value::from(timeout_secs));
        params.insert(
            "allowed_updates".into(),
            Value::from(vec![Value::from("message")]),
        );
        if let Some(offset) = offset {
            params.insert("offset".into(), Value::from(offset));
        }

        self.call("getUpdates", &Value::Object(params)).await
    }

    /// Sends one MarkdownV2 message to a chat. Callers are responsible for
    /// escaping reserved characters (see [`crate::format::escape_markdown`]).
    ///
    /// # Errors
    ///
    /// Same taxonomy as [`TelegramClient::get_updates`].
    pub async fn send_message(&self, chat_id: i64, text: &str) -> Result<Message, BotError> {
        let params = serde_json::json!({
            "chat_id": chat_id,
            "text": text,
            "parse_mode": "MarkdownV2",
        });

        self.call("sendMessage", &params).await
    }

    /// POSTs one Bot API method and unwraps the response envelope.
    async fn call<T: DeserializeOwned>(&self, api_method: &str, params: &Value) -> Result<T, BotError> {
        let url = self.method_url(api_method);
        let response = self.client.post(url).json(params).send().await?;
        let body = response.text().await?;

        let envelope: ApiEnvelope<T> =
            serde_json::from_str(&body).map_err(|e| BotError::Deserialize {
                context: api_method.to_string(),
                source: e,
            })?;

        if !envelope.ok {
            return Err(BotError::Api(
                envelope
                    .description
                    .unwrap_or_else(|| "unknown error".to_string()),
            ));
        }

        envelope.result.ok_or_else(|| BotError::Api(format!(
            "{api_method}: ok response carried no result"
        )))
    }

    /// `https://api.telegram.org/bot<token>/<method>`, with the token kept
    /// in the path as the Bot API requires.
    fn method_url(&self, api_method: &str) -> Url {
        let mut url = self.base_url.clone();
        url.set_path(&format!("/bot{}/{}", self.token, api_method));
        url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn method_url_embeds_token_in_path() {
        let client =
            TelegramClient::with_base_url("123:abc", "https://api.telegram.org").expect("client");
        let url = client.method_url("getUpdates");
        assert_eq!(url.as_str(), "https://api.telegram.org/bot123:abc/getUpdates");
    }

    #[test]
    fn method_url_respects_custom_base() {
        let client =
            TelegramClient::with_base_url("123:abc", "http://127.0.0.1:9009").expect("client");
        let url = client.method_url("sendMessage");
        assert_eq!(url.as_str(), "http://127.0.0.1:9009/bot123:abc/sendMessage");
    }
}
