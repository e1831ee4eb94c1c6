use std::time::Duration;

use pretty_assertions::assert_eq;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use glance::config::ProcessingConfig;
use glance::processing::WebExtractor;

const PAGE: &str = r#"<!DOCTYPE html>
<html>
  <head>
    <title>Release Notes</title>
    <style>.hidden { display: none; }</style>
  </head>
  <body>
    <nav>Home  |  Docs</nav>
    <main>
      <p>Version 2 ships faster parsing.</p>
      <script>trackPageView();</script>
    </main>
  </body>
</html>"#;

async fn serve_page(server: &MockServer, route: &str, status: u16, body: &str) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(status).set_body_raw(body, "text/html"))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_extracts_visible_text() {
    let server = MockServer::start().await;
    serve_page(&server, "/notes", 200, PAGE).await;

    let extractor = WebExtractor::new(&ProcessingConfig::default()).unwrap();
    let text = extractor.extract(&format!("{}/notes", server.uri())).await;

    assert_eq!(
        text,
        "Release Notes Home | Docs Version 2 ships faster parsing."
    );
}

#[tokio::test]
async fn test_sends_configured_user_agent() {
    let server = MockServer::start().await;
    let config = ProcessingConfig {
        user_agent: "glance-test-agent/1.0".to_string(),
        ..ProcessingConfig::default()
    };

    Mock::given(method("GET"))
        .and(path("/ua"))
        .and(header("user-agent", "glance-test-agent/1.0"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("<p>ok</p>", "text/html"))
        .expect(1)
        .mount(&server)
        .await;

    let text = WebExtractor::new(&config)
        .unwrap()
        .extract(&format!("{}/ua", server.uri()))
        .await;
    assert_eq!(text, "ok");
}

#[test]
fn test_default_user_agent_looks_like_a_browser() {
    assert!(ProcessingConfig::default()
        .user_agent
        .starts_with("Mozilla/5.0"));
}

#[tokio::test]
async fn test_error_status_yields_empty_string() {
    let server = MockServer::start().await;
    serve_page(&server, "/gone", 404, "<p>Not found</p>").await;
    serve_page(&server, "/broken", 500, "<p>Server error</p>").await;

    let extractor = WebExtractor::new(&ProcessingConfig::default()).unwrap();
    assert_eq!(extractor.extract(&format!("{}/gone", server.uri())).await, "");
    assert_eq!(extractor.extract(&format!("{}/broken", server.uri())).await, "");
}

#[tokio::test]
async fn test_timeout_yields_empty_string() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw("<p>late</p>", "text/html")
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let config = ProcessingConfig {
        url_fetch_timeout_secs: 1,
        ..ProcessingConfig::default()
    };
    let text = WebExtractor::new(&config)
        .unwrap()
        .extract(&format!("{}/slow", server.uri()))
        .await;
    assert_eq!(text, "");
}

#[tokio::test]
async fn test_invalid_url_yields_empty_string() {
    let extractor = WebExtractor::new(&ProcessingConfig::default()).unwrap();
    assert_eq!(extractor.extract("not a url").await, "");
}

#[tokio::test]
async fn test_extraction_is_repeatable() {
    let server = MockServer::start().await;
    serve_page(&server, "/stable", 200, PAGE).await;

    let extractor = WebExtractor::new(&ProcessingConfig::default()).unwrap();
    let url = format!("{}/stable", server.uri());
    let first = extractor.extract(&url).await;
    let second = extractor.extract(&url).await;
    assert_eq!(first, second);
}

#[test]
fn test_invalid_user_agent_is_reported() {
    let config = ProcessingConfig {
        user_agent: "glance\nbot".to_string(),
        ..ProcessingConfig::default()
    };

    let err = match WebExtractor::new(&config) {
        Ok(_) => panic!("a header-breaking user agent should be rejected"),
        Err(err) => err,
    };
    assert!(err.to_string().contains("URL fetch client"));
}
