//! Integration tests for the page fetch tool against a mock site.

use research_tools::FetchUrl;
use serde_json::{json, Value};
use wiremock::matchers::{header_exists, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn parse(output: &str) -> Value {
    serde_json::from_str(output).expect("tool output is JSON")
}

async fn serve(server: &MockServer, route: &str, template: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path(route))
        .and(header_exists("user-agent"))
        .respond_with(template)
        .mount(server)
        .await;
}

fn html(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(body.as_bytes().to_vec(), "text/html; charset=utf-8")
}

#[tokio::test]
async fn test_fetch_strips_scripts() {
    let server = MockServer::start().await;
    serve(
        &server,
        "/article",
        html(
            "<html><head><script>alert(1)</script><style>p{}</style></head>\
             <body><h1>Title</h1><p>Body text.</p><noscript>no js</noscript></body></html>",
        ),
    )
    .await;

    let url = format!("{}/article", server.uri());
    let value = parse(&FetchUrl::new().fetch(&url, 8000).await);

    assert_eq!(value, json!({ "url": url, "content": "Title\nBody text." }));

    let content = value["content"].as_str().unwrap();
    assert!(!content.contains("alert"));
    assert!(!content.contains("<script"));
    assert!(!content.contains("no js"));
}

#[tokio::test]
async fn test_fetch_truncates_to_budget() {
    let server = MockServer::start().await;
    let long = "x".repeat(10_000);
    serve(&server, "/long", html(&format!("<p>{}</p>", long))).await;

    let url = format!("{}/long", server.uri());
    let value = parse(&FetchUrl::new().fetch(&url, 8000).await);
    let content = value["content"].as_str().unwrap();

    assert_eq!(content.chars().count(), 8000 + 4);
    assert!(content.ends_with("\n..."));
    assert!(content.ends_with("..."));
}

#[tokio::test]
async fn test_fetch_short_page_is_not_truncated() {
    let server = MockServer::start().await;
    serve(&server, "/short", html("<p>tiny</p>")).await;

    let url = format!("{}/short", server.uri());
    let value = parse(&FetchUrl::new().fetch(&url, 8000).await);
    assert_eq!(value["content"], "tiny");
}

#[tokio::test]
async fn test_http_error_is_request_failure() {
    let server = MockServer::start().await;
    serve(&server, "/missing", ResponseTemplate::new(404)).await;

    let url = format!("{}/missing", server.uri());
    let value = parse(&FetchUrl::new().fetch(&url, 8000).await);
    let message = value["error"].as_str().unwrap();

    assert!(message.starts_with("Request failed: "), "{}", message);
    assert!(message.contains("404"), "{}", message);
}

#[tokio::test]
async fn test_binary_body_is_parse_failure() {
    let server = MockServer::start().await;
    serve(
        &server,
        "/image.png",
        ResponseTemplate::new(200).set_body_raw(vec![0x89, b'P', b'N', b'G'], "image/png"),
    )
    .await;

    let url = format!("{}/image.png", server.uri());
    let value = parse(&FetchUrl::new().fetch(&url, 8000).await);

    assert_eq!(
        value,
        json!({ "error": "Parse failed: unsupported content type: image/png" })
    );
}

#[tokio::test]
async fn test_declared_charset_is_honoured() {
    let server = MockServer::start().await;
    serve(
        &server,
        "/menu",
        ResponseTemplate::new(200).set_body_raw(
            b"<p>Caf\xE9 cr\xE8me</p>".to_vec(),
            "text/html; charset=iso-8859-1",
        ),
    )
    .await;

    let url = format!("{}/menu", server.uri());
    let value = parse(&FetchUrl::new().fetch(&url, 8000).await);
    assert_eq!(value["content"], "Café crème");
}

#[tokio::test]
async fn test_generic_binary_type_is_still_extracted() {
    let server = MockServer::start().await;
    serve(
        &server,
        "/bucket/index.html",
        ResponseTemplate::new(200).set_body_raw(
            b"<html><body><p>Hello world</p></body></html>".to_vec(),
            "application/octet-stream",
        ),
    )
    .await;

    let url = format!("{}/bucket/index.html", server.uri());
    let value = parse(&FetchUrl::new().fetch(&url, 8000).await);
    assert_eq!(value, json!({ "url": url, "content": "Hello world" }));
}

#[tokio::test]
async fn test_plain_text_body_is_accepted() {
    let server = MockServer::start().await;
    serve(
        &server,
        "/notes.txt",
        ResponseTemplate::new(200).set_body_string("line one\n\n   line two  \n"),
    )
    .await;

    let url = format!("{}/notes.txt", server.uri());
    let value = parse(&FetchUrl::new().fetch(&url, 8000).await);
    assert_eq!(value["content"], "line one\nline two");
}
