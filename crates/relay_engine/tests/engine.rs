use std::sync::Arc;
use std::time::Duration;

use relay_engine::{EngineConfig, EngineEvent, EngineHandle, ScrapeError};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_config(server: &MockServer) -> EngineConfig {
    let mut config = EngineConfig::default_with_endpoint(format!("{}/collect", server.uri()));
    config.settle_delay = Duration::from_millis(10);
    config.now_utc = Arc::new(|| "2024-05-01T12:00:00Z".to_string());
    config
}

async fn wait_for_completion(engine: &EngineHandle) -> EngineEvent {
    for _ in 0..500 {
        if let Some(event) = engine.try_recv() {
            if matches!(event, EngineEvent::Completed { .. }) {
                return event;
            }
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("engine never completed");
}

#[tokio::test]
async fn scrape_and_send_round_trip() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/page"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            "<html><head><title>T</title></head><body><p>body text</p></body></html>",
            "text/html",
        ))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/collect"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let engine = EngineHandle::new(test_config(&server)).expect("engine");
    let url = format!("{}/page", server.uri());
    engine.scrape(1, url.as_str());

    match wait_for_completion(&engine).await {
        EngineEvent::Completed { request_id, result } => {
            assert_eq!(request_id, 1);
            let outcome = result.expect("sent");
            assert_eq!(outcome.url, url);
            assert_eq!(outcome.content_chars, "body text".chars().count());
        }
        other => panic!("unexpected event {other:?}"),
    }
}

#[tokio::test]
async fn page_without_visible_text_reports_empty_content() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/blank"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            "<html><body><script>var x = 1;</script></body></html>",
            "text/html",
        ))
        .mount(&server)
        .await;

    let engine = EngineHandle::new(test_config(&server)).expect("engine");
    engine.scrape(2, format!("{}/blank", server.uri()));

    match wait_for_completion(&engine).await {
        EngineEvent::Completed { result, .. } => {
            assert_eq!(result.unwrap_err(), ScrapeError::EmptyContent);
        }
        other => panic!("unexpected event {other:?}"),
    }
}

#[tokio::test]
async fn collection_endpoint_failure_reaches_the_caller() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/page"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw("<html><body>x</body></html>", "text/html"),
        )
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/collect"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let engine = EngineHandle::new(test_config(&server)).expect("engine");
    engine.scrape(3, format!("{}/page", server.uri()));

    match wait_for_completion(&engine).await {
        EngineEvent::Completed { result, .. } => {
            let err = result.unwrap_err();
            assert_eq!(err, ScrapeError::HttpStatus(500));
            assert!(err.to_string().contains("500"));
        }
        other => panic!("unexpected event {other:?}"),
    }
}

#[tokio::test]
async fn started_event_precedes_completion() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/page"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw("<html><body>x</body></html>", "text/html"),
        )
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/collect"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let engine = EngineHandle::new(test_config(&server)).expect("engine");
    engine.scrape(4, format!("{}/page", server.uri()));

    let mut events = Vec::new();
    for _ in 0..500 {
        if let Some(event) = engine.try_recv() {
            let done = matches!(event, EngineEvent::Completed { .. });
            events.push(event);
            if done {
                break;
            }
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }

    assert!(matches!(events.first(), Some(EngineEvent::Started { request_id: 4, .. })));
    assert!(matches!(events.last(), Some(EngineEvent::Completed { .. })));
}
