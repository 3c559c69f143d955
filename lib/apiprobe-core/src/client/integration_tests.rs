//! End-to-end tests driving the full pipeline against a mock server.

use httpmock::prelude::*;
use serde::Deserialize;
use serde_json::json;

use super::{ClientFactory, ClientError, OAuth2Params, ResponseBody};

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

#[derive(Debug, PartialEq, Deserialize)]
struct User {
    id: u32,
    name: String,
}

#[test]
fn test_authenticated_request_carries_bearer_token_and_decodes_json() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/users")
            .header("authorization", "bearer test-token");
        then.status(200)
            .json_body(json!([{"id": 1, "name": "brina"}]));
    });

    let mut credentials = OAuth2Params::new();
    credentials.set_token("test-token");
    let mut factory = ClientFactory::new().with_credentials(credentials);
    let client = factory
        .client_for_host(&server.base_url(), None)
        .expect("client builds");

    let response = client.get("/users").expect("request succeeds");
    mock.assert();
    assert!(response.is_success());

    let users: Vec<User> = response.json().expect("decoded JSON");
    assert_eq!(
        users,
        vec![User {
            id: 1,
            name: "brina".to_string()
        }]
    );
}

#[test]
fn test_unauthenticated_client_sends_no_authorization_header() {
    let server = MockServer::start();
    // This mock only matches requests that carry an authorization header;
    // an unauthenticated client must fall through to the mock-server 404.
    let mock = server.mock(|when, then| {
        when.method(GET).path("/users").header_exists("authorization");
        then.status(200).json_body(json!([]));
    });

    let mut factory = ClientFactory::new();
    let client = factory
        .client_for_host(&server.base_url(), None)
        .expect("client builds");

    let response = client.get("/users").expect("request succeeds");
    assert_eq!(mock.hits(), 0);
    assert_eq!(response.status(), 404);
}

#[test]
fn test_post_encodes_body_as_json() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/users")
            .header("content-type", "application/json")
            .json_body(json!({"name": "pat"}));
        then.status(201)
            .json_body(json!({"id": 7, "name": "pat"}));
    });

    let mut factory = ClientFactory::new();
    let client = factory
        .client_for_host(&server.base_url(), None)
        .expect("client builds");

    let response = client
        .post("/users", &json!({"name": "pat"}))
        .expect("request succeeds");
    mock.assert();

    let created: User = response.json().expect("decoded JSON");
    assert_eq!(created.id, 7);
}

#[test]
fn test_non_json_response_passes_through_undecoded() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/page");
        then.status(200)
            .header("content-type", "text/html")
            .body("<html></html>");
    });

    let mut factory = ClientFactory::new();
    let client = factory
        .client_for_host(&server.base_url(), None)
        .expect("client builds");

    let response = client.get("/page").expect("request succeeds");
    assert_eq!(response.text(), Some("<html></html>"));
    assert!(matches!(
        response.json::<serde_json::Value>(),
        Err(ClientError::UnsupportedJsonBody { .. })
    ));
}

#[test]
fn test_json_suffix_content_type_is_decoded() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/document");
        then.status(200)
            .header("content-type", "application/ld+json")
            .body(r#"{"@context": "https://schema.org"}"#);
    });

    let mut factory = ClientFactory::new();
    let client = factory
        .client_for_host(&server.base_url(), None)
        .expect("client builds");

    let response = client.get("/document").expect("request succeeds");
    assert!(matches!(response.body(), ResponseBody::Json(_)));
}

#[test]
fn test_clients_carry_provider_state_at_their_build_time() {
    let server = MockServer::start();
    let first = server.mock(|when, then| {
        when.method(GET)
            .path("/first")
            .header("authorization", "bearer first");
        then.status(200).json_body(json!({}));
    });
    let second = server.mock(|when, then| {
        when.method(GET)
            .path("/second")
            .header("authorization", "bearer second");
        then.status(200).json_body(json!({}));
    });

    let mut credentials = OAuth2Params::new();
    credentials.set_token("first");
    let mut factory = ClientFactory::new().with_credentials(credentials);

    let client_one = factory
        .client_for_host(&server.base_url(), None)
        .expect("client builds");
    factory
        .credentials_mut()
        .expect("credentials attached")
        .set_token("second");
    let client_two = factory
        .client_for_host(&server.base_url(), None)
        .expect("client builds");

    // The first client still holds the token captured at its build time.
    let response = client_one.get("/first").expect("request succeeds");
    assert!(response.is_success());
    let response = client_two.get("/second").expect("request succeeds");
    assert!(response.is_success());
    first.assert();
    second.assert();
}

#[test]
fn test_logged_exchange_round_trips() {
    init_tracing();

    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/users");
        then.status(200).json_body(json!([]));
    });

    let mut factory = ClientFactory::new();
    let client = factory
        .client_for_host(&server.base_url(), Some("debug"))
        .expect("client builds");

    let response = client.get("/users").expect("request succeeds");
    assert!(response.is_success());
}

#[test]
fn test_empty_response_body() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(DELETE).path("/users/1");
        then.status(204);
    });

    let mut factory = ClientFactory::new();
    let client = factory
        .client_for_host(&server.base_url(), None)
        .expect("client builds");

    let response = client.delete("/users/1").expect("request succeeds");
    assert_eq!(response.status(), 204);
    assert_eq!(response.body(), &ResponseBody::Empty);
}
