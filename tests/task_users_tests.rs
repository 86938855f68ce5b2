//! Integration tests for task user and engine error operations.

use std::sync::Arc;

use kinetic_sdk::mocks::MockTransport;
use kinetic_sdk::{
    ErrorMode, HttpMethod, KineticConfig, KineticError, ResolutionAction, TaskClient,
};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

/// Helper to create a test task client backed by the mock transport.
fn create_test_client(transport: Arc<MockTransport>) -> TaskClient {
    let config = KineticConfig::builder()
        .server("https://space.example.com/kinetic-task")
        .username("admin")
        .password("secret")
        .gateway_retry_delay(0.0)
        .build()
        .unwrap();
    TaskClient::with_transport(&config, transport)
}

#[tokio::test]
async fn test_permissive_mode_returns_failing_responses() {
    // Arrange
    let transport = Arc::new(MockTransport::new());
    transport.enqueue_json(400, r#"{"error":"Invalid parameters"}"#);
    let client = create_test_client(transport.clone());

    // Act
    let response = client
        .errors()
        .find_errors(&[], ErrorMode::Permissive)
        .await
        .unwrap();

    // Assert
    assert_eq!(response.status(), 400);
    assert_eq!(response.content()["error"], "Invalid parameters");
}

#[tokio::test]
async fn test_strict_mode_fails_on_unexpected_statuses() {
    // Arrange
    let transport = Arc::new(MockTransport::new());
    transport.enqueue_json(400, r#"{"error":"Invalid parameters"}"#);
    let client = create_test_client(transport.clone());

    // Act
    let result = client.errors().find_errors(&[], ErrorMode::Strict).await;

    // Assert
    assert!(matches!(
        result,
        Err(KineticError::UnexpectedStatus { status: 400, .. })
    ));
}

#[tokio::test]
async fn test_strict_mode_passes_successful_responses_through() {
    // Arrange
    let transport = Arc::new(MockTransport::new());
    transport.enqueue_json(200, r#"{"errors":[]}"#);
    let client = create_test_client(transport.clone());

    // Act
    let response = client
        .errors()
        .find_errors(&[], ErrorMode::Strict)
        .await
        .unwrap();

    // Assert
    assert_eq!(response.status(), 200);
}

#[tokio::test]
async fn test_resolve_errors_sends_ids_action_and_resolution() {
    // Arrange
    let transport = Arc::new(MockTransport::new());
    transport.enqueue_json(200, "{}");
    let client = create_test_client(transport.clone());

    // Act
    client
        .errors()
        .resolve_errors(&[4, 8, 15], ResolutionAction::Retry, "restarted upstream", ErrorMode::Strict)
        .await
        .unwrap();

    // Assert
    transport.verify_request(0, HttpMethod::Post, "/errors/resolve");
    let request = transport.last_request().unwrap();
    let body: Value = serde_json::from_slice(request.body.as_ref().unwrap()).unwrap();
    assert_eq!(
        body,
        json!({
            "ids": [4, 8, 15],
            "action": "Retry",
            "resolution": "restarted upstream",
        })
    );
}

#[tokio::test]
async fn test_derived_error_finds_append_their_preset_parameters() {
    // Arrange
    let transport = Arc::new(MockTransport::new());
    transport.enqueue_json(200, r#"{"errors":[]}"#);
    let client = create_test_client(transport.clone());
    let params = vec![("limit".to_string(), "5".to_string())];

    // Act
    client
        .errors()
        .find_active_errors_by_node(
            "Kinetic Request CE",
            "Submissions > Approvals",
            "Approval Tree",
            "node_12",
            &params,
            ErrorMode::Permissive,
        )
        .await
        .unwrap();

    // Assert
    let request = transport.last_request().unwrap();
    assert!(request.url.ends_with(
        "/errors?limit=5&source=Kinetic+Request+CE&group=Submissions+%3E+Approvals&tree=Approval+Tree&nodeId=node_12&status=Active"
    ));
}

#[tokio::test]
async fn test_find_errors_by_run_does_not_filter_by_status() {
    // Arrange
    let transport = Arc::new(MockTransport::new());
    transport.enqueue_json(200, r#"{"errors":[]}"#);
    let client = create_test_client(transport.clone());

    // Act
    client
        .errors()
        .find_errors_by_run(731, &[], ErrorMode::Permissive)
        .await
        .unwrap();

    // Assert
    let request = transport.last_request().unwrap();
    assert!(request.url.ends_with("/errors?runId=731"));
}

#[tokio::test]
async fn test_delete_users_deletes_each_listed_user() {
    // Arrange
    let transport = Arc::new(MockTransport::new());
    transport.enqueue_json(
        200,
        r#"{"users":[{"loginId":"alice"},{"loginId":"bob"},{"name":"no login id"}]}"#,
    );
    transport.enqueue_json(200, "{}");
    transport.enqueue_json(200, "{}");
    let client = create_test_client(transport.clone());

    // Act
    let responses = client.users().delete_users(ErrorMode::Strict).await.unwrap();

    // Assert: one list call, then one delete per user with a login id
    assert_eq!(responses.len(), 2);
    transport.verify_request_count(3);
    transport.verify_request(0, HttpMethod::Get, "/users");
    transport.verify_request(1, HttpMethod::Delete, "/users/alice");
    transport.verify_request(2, HttpMethod::Delete, "/users/bob");
}

#[tokio::test]
async fn test_delete_users_stops_at_the_first_strict_failure() {
    // Arrange
    let transport = Arc::new(MockTransport::new());
    transport.enqueue_json(
        200,
        r#"{"users":[{"loginId":"alice"},{"loginId":"bob"},{"loginId":"carol"}]}"#,
    );
    transport.enqueue_json(200, "{}");
    transport.enqueue_json(500, r#"{"error":"boom"}"#);
    let client = create_test_client(transport.clone());

    // Act
    let result = client.users().delete_users(ErrorMode::Strict).await;

    // Assert: the failing delete is the last request issued
    assert!(matches!(
        result,
        Err(KineticError::UnexpectedStatus { status: 500, .. })
    ));
    transport.verify_request_count(3);
    transport.verify_request(2, HttpMethod::Delete, "/users/bob");
}

#[tokio::test]
async fn test_update_user_percent_encodes_the_login_id() {
    // Arrange
    let transport = Arc::new(MockTransport::new());
    transport.enqueue_json(200, "{}");
    let client = create_test_client(transport.clone());

    // Act
    client
        .users()
        .update_user(
            "dev@acme.co",
            &json!({ "password": "new-secret" }),
            ErrorMode::Strict,
        )
        .await
        .unwrap();

    // Assert
    transport.verify_request(0, HttpMethod::Put, "/users/dev%40acme.co");
}

#[tokio::test]
async fn test_environment_is_served_from_the_task_root() {
    // Arrange
    let transport = Arc::new(MockTransport::new());
    transport.enqueue_json(200, r#"{"version":"4.4.0"}"#);
    let client = create_test_client(transport.clone());

    // Act
    let response = client.environment(&[]).await.unwrap();

    // Assert
    assert_eq!(response.content()["version"], "4.4.0");
    let request = transport.last_request().unwrap();
    assert_eq!(
        request.url,
        "https://space.example.com/kinetic-task/app/api/v1/environment"
    );
}
