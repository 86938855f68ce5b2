//! Integration tests for the request layer against a live HTTP server.

use kinetic_sdk::{CoreClient, KineticConfig};
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Helper to create a core client pointed at the mock server.
fn create_test_client(server_url: &str) -> CoreClient {
    let config = KineticConfig::builder()
        .server(server_url)
        .username("admin")
        .password("secret")
        .gateway_retry_delay(0.0)
        .build()
        .unwrap();
    CoreClient::new(&config).unwrap()
}

#[tokio::test]
async fn test_requests_carry_basic_auth_on_the_wire() {
    // Arrange
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/app/api/v1/version"))
        .and(header("Authorization", "Basic YWRtaW46c2VjcmV0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "version": "5.0.3" })))
        .expect(1)
        .mount(&mock_server)
        .await;
    let client = create_test_client(&mock_server.uri());

    // Act
    let response = client.meta().app_version().await.unwrap();

    // Assert
    assert_eq!(response.status(), 200);
    assert_eq!(response.content()["version"], "5.0.3");
}

#[tokio::test]
async fn test_bad_gateway_responses_are_retried_transparently() {
    // Arrange
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/app/api/v1/spaces"))
        .respond_with(ResponseTemplate::new(502))
        .up_to_n_times(2)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/app/api/v1/spaces"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "spaces": [] })))
        .expect(1)
        .mount(&mock_server)
        .await;
    let client = create_test_client(&mock_server.uri());

    // Act
    let response = client.spaces().find_spaces(&[]).await.unwrap();

    // Assert
    assert_eq!(response.status(), 200);
}

#[tokio::test]
async fn test_bad_gateway_responses_exhaust_the_retry_limit() {
    // Arrange
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/app/api/v1/spaces"))
        .respond_with(ResponseTemplate::new(502))
        .expect(6)
        .mount(&mock_server)
        .await;
    let client = create_test_client(&mock_server.uri());

    // Act
    let response = client.spaces().find_spaces(&[]).await.unwrap();

    // Assert: the initial attempt plus five retries, then the 502 comes back
    assert_eq!(response.status(), 502);
}

#[tokio::test]
async fn test_identifier_path_segments_are_percent_encoded() {
    // Arrange
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/app/api/v1/spaces/acme%20co/users/dev%40acme.co"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "user": {} })))
        .expect(1)
        .mount(&mock_server)
        .await;
    let client = create_test_client(&mock_server.uri());

    // Act
    let response = client
        .spaces()
        .find_space_user("acme co", "dev@acme.co", &[])
        .await
        .unwrap();

    // Assert
    assert_eq!(response.status(), 200);
}

#[tokio::test]
async fn test_query_parameters_reach_the_server() {
    // Arrange
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/app/api/v1/kapps/services/forms"))
        .and(query_param("include", "details"))
        .and(query_param("limit", "25"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "forms": [] })))
        .expect(1)
        .mount(&mock_server)
        .await;
    let client = create_test_client(&mock_server.uri());
    let params = vec![
        ("include".to_string(), "details".to_string()),
        ("limit".to_string(), "25".to_string()),
    ];

    // Act
    let response = client.forms().find_forms("services", &params).await.unwrap();

    // Assert
    assert_eq!(response.status(), 200);
}

#[tokio::test]
async fn test_non_json_bodies_fall_back_to_raw_content() {
    // Arrange
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/app/api/v1/version"))
        .respond_with(ResponseTemplate::new(500).set_body_string("<html>gateway error</html>"))
        .mount(&mock_server)
        .await;
    let client = create_test_client(&mock_server.uri());

    // Act
    let response = client.meta().app_version().await.unwrap();

    // Assert
    assert_eq!(response.status(), 500);
    assert_eq!(response.content()["raw"], "<html>gateway error</html>");
}
