//! Integration tests for the Wikipedia summary tool against a mock API.

use research_tools::tools::AGENT_USER_AGENT;
use research_tools::Wikipedia;
use serde_json::{json, Value};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SUMMARY_PATH: &str = "/api/rest_v1/page/summary";

fn tool(server: &MockServer) -> Wikipedia {
    Wikipedia::new().with_endpoint(format!("{}{}", server.uri(), SUMMARY_PATH))
}

fn parse(output: &str) -> Value {
    serde_json::from_str(output).expect("tool output is JSON")
}

fn ada_lovelace() -> Value {
    json!({
        "type": "standard",
        "title": "Ada Lovelace",
        "extract": "Ada Lovelace was a mathematician. She worked on the Analytical Engine! \
                    Was she the first programmer? Many say so. She died in 1852.",
        "content_urls": {
            "desktop": { "page": "https://en.wikipedia.org/wiki/Ada_Lovelace" },
            "mobile": { "page": "https://en.m.wikipedia.org/wiki/Ada_Lovelace" }
        },
        "thumbnail": {
            "source": "https://upload.wikimedia.org/ada.jpg",
            "width": 320,
            "height": 400
        }
    })
}

#[tokio::test]
async fn test_summary_keeps_requested_sentences() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("{}/Ada%20Lovelace", SUMMARY_PATH)))
        .and(header("user-agent", AGENT_USER_AGENT))
        .respond_with(ResponseTemplate::new(200).set_body_json(ada_lovelace()))
        .expect(1)
        .mount(&server)
        .await;

    let value = parse(&tool(&server).summarize("Ada Lovelace", 2).await);

    assert_eq!(
        value,
        json!({
            "title": "Ada Lovelace",
            "summary": "Ada Lovelace was a mathematician. She worked on the Analytical Engine!",
            "url": "https://en.wikipedia.org/wiki/Ada_Lovelace",
            "thumbnail": "https://upload.wikimedia.org/ada.jpg"
        })
    );
}

#[tokio::test]
async fn test_sentences_are_clamped() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ada_lovelace()))
        .mount(&server)
        .await;

    let wiki = tool(&server);

    let one = parse(&wiki.summarize("Ada Lovelace", 0).await);
    assert_eq!(one["summary"], "Ada Lovelace was a mathematician.");

    let all = parse(&wiki.summarize("Ada Lovelace", 500).await);
    assert!(all["summary"].as_str().unwrap().ends_with("She died in 1852."));
}

#[tokio::test]
async fn test_sparse_response_uses_defaults() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "extract": "" })))
        .mount(&server)
        .await;

    let value = parse(&tool(&server).summarize("Obscure topic", 3).await);

    assert_eq!(
        value,
        json!({
            "title": "Obscure topic",
            "summary": "",
            "url": "",
            "thumbnail": null
        })
    );
}

#[tokio::test]
async fn test_thumbnail_without_source_is_empty() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "title": "Ada Lovelace",
            "extract": "Ada Lovelace was a mathematician.",
            "thumbnail": { "width": 1 }
        })))
        .mount(&server)
        .await;

    let value = parse(&tool(&server).summarize("Ada Lovelace", 3).await);
    assert_eq!(value["thumbnail"], "");
    assert_eq!(value["summary"], "Ada Lovelace was a mathematician.");
}

#[tokio::test]
async fn test_not_found_message() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "type": "not_found" })))
        .mount(&server)
        .await;

    let value = parse(&tool(&server).summarize("No Such Page", 3).await);
    assert_eq!(
        value,
        json!({ "error": "Wikipedia article not found for topic: No Such Page" })
    );
}

#[tokio::test]
async fn test_other_status_is_api_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let value = parse(&tool(&server).summarize("Ada Lovelace", 3).await);
    let message = value["error"].as_str().unwrap();
    assert!(message.starts_with("Wikipedia API error: "), "{}", message);
}

#[tokio::test]
async fn test_malformed_body_is_fetch_failure() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{ truncated"))
        .mount(&server)
        .await;

    let value = parse(&tool(&server).summarize("Ada Lovelace", 3).await);
    let message = value["error"].as_str().unwrap();
    assert!(
        message.starts_with("Failed to fetch Wikipedia summary: "),
        "{}",
        message
    );
}
