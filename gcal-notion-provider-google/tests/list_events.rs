use chrono::{TimeZone, Utc};
use gcal_notion_core::ports::{CalendarSource, EventQuery};
use gcal_notion_core::{EventStatus, GcalNotionError};
use gcal_notion_provider_google::GoogleCalendar;
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn window_query() -> EventQuery {
    EventQuery::window(
        "primary",
        Utc.with_ymd_and_hms(2025, 3, 20, 12, 0, 0).unwrap(),
        Utc.with_ymd_and_hms(2025, 3, 27, 12, 0, 0).unwrap(),
        100,
    )
}

#[tokio::test]
async fn lists_events_with_bearer_token_and_window_params() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/calendars/primary/events"))
        .and(header("authorization", "Bearer test-token"))
        .and(query_param("timeMin", "2025-03-20T12:00:00.000Z"))
        .and(query_param("timeMax", "2025-03-27T12:00:00.000Z"))
        .and(query_param("singleEvents", "true"))
        .and(query_param("orderBy", "startTime"))
        .and(query_param("maxResults", "100"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [
                {
                    "id": "evt-1",
                    "summary": "Planning",
                    "status": "confirmed",
                    "start": {"dateTime": "2025-03-21T10:00:00Z"},
                    "end": {"dateTime": "2025-03-21T11:00:00Z"},
                    "conferenceData": {
                        "entryPoints": [
                            {"entryPointType": "video", "uri": "https://zoom.us/j/111"}
                        ]
                    }
                },
                {"id": "evt-2", "status": "cancelled"}
            ],
            "nextPageToken": "page-2"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = GoogleCalendar::with_base_url(&server.uri(), "test-token").unwrap();
    let page = client.list_events(&window_query()).await.unwrap();

    assert_eq!(page.events.len(), 2);
    assert_eq!(page.events[0].summary.as_deref(), Some("Planning"));
    assert_eq!(
        page.events[0].conference.as_ref().unwrap().entry_points[0].uri,
        "https://zoom.us/j/111"
    );
    assert_eq!(page.events[1].status, Some(EventStatus::Cancelled));
    assert_eq!(page.next_page_token.as_deref(), Some("page-2"));
}

#[tokio::test]
async fn sends_watermark_deleted_flag_and_page_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/calendars/primary/events"))
        .and(query_param("updatedMin", "2025-03-20T11:00:00.000Z"))
        .and(query_param("showDeleted", "true"))
        .and(query_param("pageToken", "page-2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "items": [] })))
        .expect(1)
        .mount(&server)
        .await;

    let mut query = window_query();
    query.updated_min = Some(Utc.with_ymd_and_hms(2025, 3, 20, 11, 0, 0).unwrap());
    query.show_deleted = true;
    query.page_token = Some("page-2".into());

    let client = GoogleCalendar::with_base_url(&server.uri(), "test-token").unwrap();
    let page = client.list_events(&query).await.unwrap();

    assert!(page.events.is_empty());
    assert!(page.next_page_token.is_none());
}

#[tokio::test]
async fn missing_items_means_empty_page() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let client = GoogleCalendar::with_base_url(&server.uri(), "test-token").unwrap();
    let page = client.list_events(&window_query()).await.unwrap();

    assert!(page.events.is_empty());
}

#[tokio::test]
async fn non_success_status_is_an_api_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Invalid Credentials"))
        .expect(1)
        .mount(&server)
        .await;

    let client = GoogleCalendar::with_base_url(&server.uri(), "expired").unwrap();
    let err = client.list_events(&window_query()).await.unwrap_err();

    match err {
        GcalNotionError::SourceApi { status, body } => {
            assert_eq!(status, 401);
            assert_eq!(body, "Invalid Credentials");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn malformed_body_is_a_source_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
        .mount(&server)
        .await;

    let client = GoogleCalendar::with_base_url(&server.uri(), "test-token").unwrap();
    let err = client.list_events(&window_query()).await.unwrap_err();

    assert!(matches!(err, GcalNotionError::Source(_)));
}
