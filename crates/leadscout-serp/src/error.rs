use thiserror::Error;

/// Errors returned by the search-aggregation API client.
#[derive(Debug, Error)]
pub enum SerpError {
    /// No API key configured; every search fails upstream until one is set.
    #[error("search API key is not configured")]
    MissingApiKey,

    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered 2xx but carried a top-level `"error"` message.
    #[error("search API error: {0}")]
    Api(String),

    /// The response body could not be parsed as JSON.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },
}
