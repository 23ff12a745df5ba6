//! Best-effort contact email extraction from business websites.
//!
//! This is a heuristic scraper, not an HTML-aware parser: the whole response
//! body — markup, scripts, hidden content — is scanned for email-shaped
//! substrings. Fetch failures of any kind collapse to an empty set; a lead
//! without scrapeable emails is still a lead.

use std::collections::HashSet;
use std::time::Duration;

use regex::Regex;

/// Local part allows letters, digits, and `._%+-`; the TLD must be at least
/// two letters. Case-insensitive.
const EMAIL_PATTERN: &str = r"(?i)\b[A-Z0-9._%+-]+@[A-Z0-9.-]+\.[A-Z]{2,}\b";

/// Scans text for email-shaped substrings, deduplicating by exact string
/// equality. Order is unspecified.
#[must_use]
pub fn find_emails(text: &str) -> HashSet<String> {
    let re = Regex::new(EMAIL_PATTERN).expect("valid regex");
    re.find_iter(text).map(|m| m.as_str().to_string()).collect()
}

/// Fetches business websites and extracts contact emails.
pub struct EmailScraper {
    client: reqwest::Client,
}

impl EmailScraper {
    /// Creates a scraper whose page fetches are capped at `timeout_secs`.
    ///
    /// # Errors
    ///
    /// Returns the underlying `reqwest` error if the client cannot be
    /// constructed.
    pub fn new(timeout_secs: u64, user_agent: &str) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .user_agent(user_agent.to_owned())
            .build()?;
        Ok(Self { client })
    }

    /// Fetches `url` and returns every unique email-shaped substring in the
    /// response body. Any fetch error — timeout, DNS, non-2xx, body read —
    /// is logged and yields an empty set; this method never fails.
    pub async fn extract_emails(&self, url: &str) -> HashSet<String> {
        match self.fetch_text(url).await {
            Ok(body) => find_emails(&body),
            Err(e) => {
                tracing::warn!(url, error = %e, "email scrape failed, returning empty set");
                HashSet::new()
            }
        }
    }

    async fn fetch_text(&self, url: &str) -> Result<String, reqwest::Error> {
        let response = self.client.get(url).send().await?.error_for_status()?;
        response.text().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_plain_email() {
        let emails = find_emails("reach us at info@example.com for quotes");
        assert_eq!(emails.len(), 1);
        assert!(emails.contains("info@example.com"));
    }

    #[test]
    fn accepts_subaddress_and_multi_label_domain() {
        let emails = find_emails("contact me at a.b+c@example.co.uk or spam@x");
        assert_eq!(
            emails,
            HashSet::from(["a.b+c@example.co.uk".to_string()]),
            "fragment without a valid TLD must not match"
        );
    }

    #[test]
    fn rejects_single_letter_tld() {
        assert!(find_emails("broken@host.c").is_empty());
    }

    #[test]
    fn matching_is_case_insensitive() {
        let emails = find_emails("SALES@EXAMPLE.COM");
        assert!(emails.contains("SALES@EXAMPLE.COM"));
    }

    #[test]
    fn duplicates_collapse_to_one() {
        let text = "a@example.com a@example.com a@example.com";
        assert_eq!(find_emails(text).len(), 1);
    }

    #[test]
    fn scans_markup_and_scripts() {
        let html = r#"
            <a href="mailto:hello@example.com">Email us</a>
            <script>var support = "support@example.com";</script>
        "#;
        let emails = find_emails(html);
        assert!(emails.contains("hello@example.com"));
        assert!(emails.contains("support@example.com"));
    }

    #[test]
    fn empty_input_yields_empty_set() {
        assert!(find_emails("").is_empty());
    }
}
