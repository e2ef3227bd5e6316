use relay_core::{handle_request, update, AppState, Msg, Reply, Request, Response, ScrapeResult};

#[test]
fn get_status_reports_the_flag_without_effects() {
    let (state, effects, reply) = handle_request(AppState::new(), Request::GetStatus);
    assert!(effects.is_empty());
    assert_eq!(
        reply,
        Reply::Now(Response::Status {
            is_auto_scraping: false,
        })
    );

    let (state, _) = update(state, Msg::AutoScrapeSet { enabled: true });
    let (_, _, reply) = handle_request(state, Request::GetStatus);
    assert_eq!(
        reply,
        Reply::Now(Response::Status {
            is_auto_scraping: true,
        })
    );
}

#[test]
fn toggle_answers_with_the_new_flag_and_persists() {
    let (state, effects, reply) =
        handle_request(AppState::new(), Request::ToggleAutoScrape { enabled: true });

    assert!(state.auto_scrape());
    assert_eq!(effects.len(), 1);
    assert_eq!(
        reply,
        Reply::Now(Response::Status {
            is_auto_scraping: true,
        })
    );
}

#[test]
fn scrape_request_that_starts_answers_after_the_scrape() {
    let (state, effects, reply) = handle_request(
        AppState::new(),
        Request::ScrapeCurrentPage {
            url: Some("https://example.com".to_string()),
        },
    );

    assert!(state.is_scraping());
    assert_eq!(effects.len(), 1);
    assert_eq!(reply, Reply::AfterScrape);
}

#[test]
fn scrape_request_rejected_preflight_answers_immediately() {
    let (state, effects, reply) =
        handle_request(AppState::new(), Request::ScrapeCurrentPage { url: None });

    assert!(!state.is_scraping());
    assert!(effects.is_empty());
    assert_eq!(
        reply,
        Reply::Now(Response::Scrape {
            success: false,
            error: Some("No active tab found".to_string()),
        })
    );
}

#[test]
fn scrape_request_on_restricted_page_answers_immediately() {
    let (_, _, reply) = handle_request(
        AppState::new(),
        Request::ScrapeCurrentPage {
            url: Some("about:blank".to_string()),
        },
    );

    match reply {
        Reply::Now(Response::Scrape {
            success: false,
            error: Some(reason),
        }) => assert!(reason.contains("restricted")),
        other => panic!("expected immediate failure, got {other:?}"),
    }
}

#[test]
fn scrape_request_while_busy_is_rejected_immediately() {
    let (state, _, _) = handle_request(
        AppState::new(),
        Request::ScrapeCurrentPage {
            url: Some("https://example.com/a".to_string()),
        },
    );

    let (state, effects, reply) = handle_request(
        state,
        Request::ScrapeCurrentPage {
            url: Some("https://example.com/b".to_string()),
        },
    );

    assert!(state.is_scraping());
    assert!(effects.is_empty());
    assert_eq!(
        reply,
        Reply::Now(Response::Scrape {
            success: false,
            error: Some("A scrape is already in progress".to_string()),
        })
    );
}

#[test]
fn finished_scrape_outcome_backs_the_deferred_response() {
    let (state, _, reply) = handle_request(
        AppState::new(),
        Request::ScrapeCurrentPage {
            url: Some("https://example.com".to_string()),
        },
    );
    assert_eq!(reply, Reply::AfterScrape);

    let (state, _) = update(
        state,
        Msg::ScrapeFinished {
            result: ScrapeResult::Sent {
                url: "https://example.com".to_string(),
            },
        },
    );
    assert_eq!(
        state.last_result(),
        Some(&ScrapeResult::Sent {
            url: "https://example.com".to_string(),
        })
    );
}
