//! End-to-end handler tests: mocked search API in, chat replies out.

use leadscout_bot::{handle_message, MAX_CHAT_RESULTS};
use leadscout_scraper::EmailScraper;
use leadscout_serp::SerpClient;
use wiremock::matchers::{method, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn serp_client(base_url: &str) -> SerpClient {
    SerpClient::with_base_url("test-key", "leadscout-test/0.1", base_url)
        .expect("client construction should not fail")
}

fn scraper() -> EmailScraper {
    EmailScraper::new(8, "leadscout-test/0.1").expect("scraper construction should not fail")
}

#[tokio::test]
async fn at_most_ten_record_messages_per_search() {
    let server = MockServer::start().await;

    // 25 upstream listings, none with a website (no secondary fetches).
    let listings: Vec<serde_json::Value> = (0..25)
        .map(|i| serde_json::json!({"title": format!("Business {i}")}))
        .collect();
    let body = serde_json::json!({"local_results": listings});

    Mock::given(method("GET"))
        .and(query_param("engine", "google_maps"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let replies = handle_message(&serp_client(&server.uri()), &scraper(), "/seo,usa").await;

    assert_eq!(
        replies.len(),
        MAX_CHAT_RESULTS,
        "record messages must be capped at {MAX_CHAT_RESULTS}"
    );
    assert!(replies[0].contains("Business 0"));
}

#[tokio::test]
async fn upstream_failure_reads_as_no_results() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let replies = handle_message(&serp_client(&server.uri()), &scraper(), "/seo,usa").await;

    assert_eq!(replies.len(), 1);
    assert!(
        replies[0].contains("No results"),
        "upstream failure must be indistinguishable from an empty result: {}",
        replies[0]
    );
}

#[tokio::test]
async fn bad_command_gets_error_reply_without_searching() {
    let server = MockServer::start().await;
    // No mock mounted: a request would 404 and the test would still pass,
    // but the reply must be the parse error, not "no results".

    let replies = handle_message(&serp_client(&server.uri()), &scraper(), "/seo").await;

    assert_eq!(replies.len(), 1);
    assert!(
        replies[0].contains("bad format"),
        "expected parse error reply, got: {}",
        replies[0]
    );
}

#[tokio::test]
async fn start_command_gets_usage_reply() {
    let server = MockServer::start().await;

    let replies = handle_message(&serp_client(&server.uri()), &scraper(), "/start").await;

    assert_eq!(replies.len(), 1);
    assert!(replies[0].contains("/keyword,country"), "usage reply expected");
}

#[tokio::test]
async fn records_with_websites_are_enriched_with_emails() {
    let serp_server = MockServer::start().await;
    let site_server = MockServer::start().await;

    let body = serde_json::json!({
        "local_results": [
            {"title": "Acme Plumbing", "website": format!("{}/home", site_server.uri())}
        ]
    });

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&serp_server)
        .await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string("Call us or mail office@acme.test today"),
        )
        .mount(&site_server)
        .await;

    let replies =
        handle_message(&serp_client(&serp_server.uri()), &scraper(), "/plumber,usa").await;

    assert_eq!(replies.len(), 1);
    assert!(
        replies[0].contains("office@acme\\.test"),
        "scraped email expected in reply: {}",
        replies[0]
    );
}
