use mailjet::send::{self, Message, Recipient};
use mailjet::Client;
use serde_json::json;
use wiremock::matchers::{body_partial_json, header_exists, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn message() -> Message {
    Message::new(
        Recipient::named("hello@openpathtutoring.com", "Open Path Tutoring"),
        "Reminder for Jane Doe and Tutor Bob - session",
    )
    .to(Recipient::new("jane@example.com"))
    .html("<p>reminder</p>")
}

#[tokio::test]
async fn send_posts_messages_with_basic_auth() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v3.1/send"))
        .and(header_exists("authorization"))
        .and(body_partial_json(json!({
            "Messages": [{
                "From": { "Email": "hello@openpathtutoring.com" },
                "To": [{ "Email": "jane@example.com" }],
                "Subject": "Reminder for Jane Doe and Tutor Bob - session"
            }]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Messages": [{ "Status": "success" }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = Client::new("key", "secret")
        .expect("client")
        .with_endpoint(&server.uri());

    let response = send::send_one(&client, message()).await.expect("send");
    assert_eq!(response.messages.len(), 1);
    assert!(response.messages[0].is_success());
}

#[tokio::test]
async fn per_message_errors_are_rejected() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v3.1/send"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Messages": [{
                "Status": "error",
                "Errors": [{
                    "ErrorCode": "mj-0013",
                    "ErrorMessage": "\"not-an-email\" is an invalid email address."
                }]
            }]
        })))
        .mount(&server)
        .await;

    let client = Client::new("key", "secret")
        .expect("client")
        .with_endpoint(&server.uri());

    let err = send::send_one(&client, message()).await.expect_err("error");
    assert!(err.to_string().contains("invalid email address"));
}

#[tokio::test]
async fn api_errors_decode_the_error_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v3.1/send"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "ErrorIdentifier": "eb52b03f",
            "ErrorCode": "mj-0002",
            "StatusCode": 401,
            "ErrorMessage": "API key authentication/authorization failure."
        })))
        .mount(&server)
        .await;

    let client = Client::new("key", "bad-secret")
        .expect("client")
        .with_endpoint(&server.uri());

    let err = send::send_one(&client, message()).await.expect_err("error");
    let message = err.to_string();
    assert!(message.contains("401"), "unexpected error: {message}");
    assert!(message.contains("authentication/authorization failure"));
}
