//! Integration tests for NewsFetcher using wiremock
//!
//! These tests validate the HTTP fetcher's behavior with mock servers.

use ecoscrape::config::CrawlerConfig;
use ecoscrape::crawler::{ArticleFetch, NewsFetcher};
use ecoscrape::utils::error::FetchError;
use serde::Deserialize;
use wiremock::matchers::{header_exists, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn fetcher() -> NewsFetcher {
    let config = ecoscrape::config::Config::default();
    NewsFetcher::new(&CrawlerConfig {
        request_timeout_secs: 5,
        ..config.crawler
    })
    .unwrap()
}

/// Test successful listing fetch from mock server
#[tokio::test]
async fn test_fetch_listing_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/services/20220424/more.html"))
        .and(header_exists("user-agent"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<div class=\"list-item\">Лента</div>"))
        .mount(&mock_server)
        .await;

    let url = format!("{}/services/20220424/more.html", mock_server.uri());
    let body = fetcher().fetch_listing(&url).await.unwrap();
    assert!(body.contains("Лента"));
}

/// Test that a 404 listing carries the not-found message
#[tokio::test]
async fn test_fetch_listing_not_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&mock_server)
        .await;

    let err = fetcher()
        .fetch_listing(&format!("{}/missing", mock_server.uri()))
        .await
        .unwrap_err();

    match err {
        FetchError::Status { code, message } => {
            assert_eq!(code, 404);
            assert!(message.contains("404"));
            assert!(message.contains("wasn't found"));
        }
        other => panic!("expected a status error, got {other:?}"),
    }
}

/// Test that a 500 listing is not retried and carries the server message
#[tokio::test]
async fn test_fetch_listing_server_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&mock_server)
        .await;

    let err = fetcher()
        .fetch_listing(&format!("{}/broken", mock_server.uri()))
        .await
        .unwrap_err();

    assert!(matches!(err, FetchError::Status { code: 500, .. }));
    assert!(err.to_string().contains("internal error"));
}

#[derive(Debug, Deserialize)]
struct Payload {
    result: Vec<u64>,
}

#[tokio::test]
async fn test_fetch_json_decodes_payload() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/tbp/api/v1/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"result": [1, 2, 3]})))
        .mount(&mock_server)
        .await;

    let payload: Payload = fetcher()
        .fetch_json(&format!("{}/tbp/api/v1/search", mock_server.uri()))
        .await
        .unwrap();
    assert_eq!(payload.result, vec![1, 2, 3]);
}

#[tokio::test]
async fn test_fetch_json_rejects_html() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>captcha</html>"))
        .mount(&mock_server)
        .await;

    let result: Result<Payload, _> = fetcher()
        .fetch_json(&format!("{}/tbp/api/v1/search", mock_server.uri()))
        .await;
    assert!(matches!(result, Err(FetchError::Json(_))));
}

/// A single redirect hop is followed
#[tokio::test]
async fn test_article_single_redirect_is_followed() {
    let mock_server = MockServer::start().await;
    let uri = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/old"))
        .respond_with(ResponseTemplate::new(301).insert_header("Location", format!("{uri}/new").as_str()))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/new"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<article>Текст</article>"))
        .mount(&mock_server)
        .await;

    let fetched = fetcher().fetch_article(&format!("{uri}/old")).await.unwrap();
    match fetched {
        ArticleFetch::Body(body) => assert!(body.contains("Текст")),
        other => panic!("expected a body, got {other:?}"),
    }
}

/// A second hop exceeds the article redirect limit
#[tokio::test]
async fn test_article_redirect_chain_is_skipped() {
    let mock_server = MockServer::start().await;
    let uri = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/first"))
        .respond_with(ResponseTemplate::new(302).insert_header("Location", format!("{uri}/second").as_str()))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/second"))
        .respond_with(ResponseTemplate::new(302).insert_header("Location", format!("{uri}/third").as_str()))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/third"))
        .respond_with(ResponseTemplate::new(200).set_body_string("paywall"))
        .expect(0)
        .mount(&mock_server)
        .await;

    let fetched = fetcher().fetch_article(&format!("{uri}/first")).await.unwrap();
    assert_eq!(fetched, ArticleFetch::TooManyRedirects);
}

/// Non-success article responses are still handed to the parser
#[tokio::test]
async fn test_article_error_status_keeps_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404).set_body_string("<html>not here</html>"))
        .mount(&mock_server)
        .await;

    let fetched = fetcher()
        .fetch_article(&format!("{}/gone", mock_server.uri()))
        .await
        .unwrap();
    assert!(matches!(fetched, ArticleFetch::Body(body) if body.contains("not here")));
}

#[tokio::test]
async fn test_windows_1251_body_is_decoded() {
    let mock_server = MockServer::start().await;
    let (bytes, _, _) = encoding_rs::WINDOWS_1251.encode("Экология и природа");

    Mock::given(method("GET"))
        .and(path("/declared"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(bytes.to_vec(), "text/html; charset=windows-1251"))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/undeclared"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(bytes.to_vec(), "text/html"))
        .mount(&mock_server)
        .await;

    let fetcher = fetcher();
    for route in ["declared", "undeclared"] {
        let body = fetcher
            .fetch_listing(&format!("{}/{route}", mock_server.uri()))
            .await
            .unwrap();
        assert_eq!(body, "Экология и природа");
    }
}
