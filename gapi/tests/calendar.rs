use chrono::{TimeZone, Utc};
use gapi::{calendar, Client};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn window() -> (chrono::DateTime<Utc>, chrono::DateTime<Utc>) {
    (
        Utc.with_ymd_and_hms(2026, 3, 2, 0, 0, 0).unwrap(),
        Utc.with_ymd_and_hms(2026, 3, 9, 0, 0, 0).unwrap(),
    )
}

#[tokio::test]
async fn list_follows_pagination() {
    let server = MockServer::start().await;
    let (time_min, time_max) = window();

    Mock::given(method("GET"))
        .and(path("/calendars/primary/events"))
        .and(query_param("singleEvents", "true"))
        .and(query_param("orderBy", "startTime"))
        .and(query_param("pageToken", "page-2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [{
                "id": "evt-2",
                "summary": "Ben Lee and Tutor Bob - session",
                "start": { "dateTime": "2026-03-04T15:00:00-06:00" },
                "end": { "dateTime": "2026-03-04T16:00:00-06:00" }
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/calendars/primary/events"))
        .and(query_param("singleEvents", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [{
                "id": "evt-1",
                "summary": "Jane Doe and Danny - session",
                "location": "Zoom",
                "start": { "dateTime": "2026-03-03T10:00:00-05:00" },
                "end": { "dateTime": "2026-03-03T11:00:00-05:00" }
            }],
            "nextPageToken": "page-2"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = Client::new("test-token")
        .expect("client")
        .with_calendar_endpoint(&server.uri());

    let events = calendar::list(&client, "primary", time_min, time_max)
        .await
        .expect("events");

    assert_eq!(events.len(), 2);
    assert_eq!(events[0].id, "evt-1");
    assert_eq!(events[0].location.as_deref(), Some("Zoom"));
    assert_eq!(events[1].id, "evt-2");
}

#[tokio::test]
async fn list_all_unions_calendars() {
    let server = MockServer::start().await;
    let (time_min, time_max) = window();

    for calendar_id in ["primary", "tutoring"] {
        Mock::given(method("GET"))
            .and(path(format!("/calendars/{calendar_id}/events")))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "items": [{
                    "id": format!("evt-{calendar_id}"),
                    "summary": "session",
                    "start": { "dateTime": "2026-03-03T10:00:00-05:00" },
                    "end": { "dateTime": "2026-03-03T11:00:00-05:00" }
                }]
            })))
            .expect(1)
            .mount(&server)
            .await;
    }

    let client = Client::new("test-token")
        .expect("client")
        .with_calendar_endpoint(&server.uri());

    let calendars = vec!["primary".to_string(), "tutoring".to_string()];
    let events = calendar::list_all(&client, &calendars, time_min, time_max)
        .await
        .expect("events");

    assert_eq!(events.len(), 2);
}

#[tokio::test]
async fn api_errors_surface_code_and_message() {
    let server = MockServer::start().await;
    let (time_min, time_max) = window();

    Mock::given(method("GET"))
        .and(path("/calendars/primary/events"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "error": {
                "code": 403,
                "message": "Request had insufficient authentication scopes.",
                "status": "PERMISSION_DENIED"
            }
        })))
        .mount(&server)
        .await;

    let client = Client::new("test-token")
        .expect("client")
        .with_calendar_endpoint(&server.uri());

    let err = calendar::list(&client, "primary", time_min, time_max)
        .await
        .expect_err("error");

    let message = err.to_string();
    assert!(message.contains("403"), "unexpected error: {message}");
    assert!(message.contains("insufficient authentication scopes"));
}
