//! REST publisher tests against a mocked GitHub API.

use check_comment::{ApiPublisher, CommentPublisher, PublishError};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn posts_comment_to_issue_endpoint() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/repos/acme/infra-live/issues/42/comments"))
        .and(header("authorization", "Bearer test-token"))
        .and(header("accept", "application/vnd.github+json"))
        .and(body_json(serde_json::json!({ "body": "## Results" })))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({ "id": 1 })))
        .expect(1)
        .mount(&server)
        .await;

    let publisher = ApiPublisher::new("test-token", &server.uri()).unwrap();
    publisher
        .create_comment("acme", "infra-live", 42, "## Results")
        .await
        .unwrap();
}

#[tokio::test]
async fn api_error_is_returned_without_retry() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/repos/acme/infra-live/issues/7/comments"))
        .respond_with(ResponseTemplate::new(403).set_body_string("Resource not accessible"))
        .expect(1)
        .mount(&server)
        .await;

    let publisher = ApiPublisher::new("test-token", &server.uri()).unwrap();
    let err = publisher
        .create_comment("acme", "infra-live", 7, "body")
        .await
        .unwrap_err();

    match err {
        PublishError::Api { status, body } => {
            assert_eq!(status, 403);
            assert_eq!(body, "Resource not accessible");
        }
        other => panic!("unexpected error: {other}"),
    }
}
