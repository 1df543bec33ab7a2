use super::*;

fn connection_for(url: &str) -> Connection {
    Connection::new(url, "u", "p").unwrap()
}

// base64("u:p")
const AUTH_U_P: &str = "Basic dTpw";

#[test]
fn test_client_new_keeps_normalized_url() {
    let client = Client::new(connection_for("localhost:5000/")).unwrap();
    assert_eq!(client.registry_url(), "http://localhost:5000");
}

#[test]
fn test_url_for_appends_path() {
    let client = Client::new(connection_for("https://r.example")).unwrap();
    assert_eq!(
        client.url_for("/v2/_catalog"),
        "https://r.example/v2/_catalog"
    );
}

#[test]
fn test_client_config_defaults() {
    let config = ClientConfig::new();
    assert_eq!(config.list_timeout_seconds, 15);
    assert_eq!(config.modify_timeout_seconds, 5);
}

#[test]
fn test_client_config_builder_chaining() {
    let config = ClientConfig::new()
        .with_list_timeout(60)
        .with_modify_timeout(20);
    assert_eq!(config.list_timeout_seconds, 60);
    assert_eq!(config.modify_timeout_seconds, 20);
}

#[test]
fn test_client_with_custom_config() {
    let config = ClientConfig::new().with_list_timeout(1);
    let client = Client::with_config(connection_for("http://localhost:5000"), config).unwrap();
    assert_eq!(client.config().list_timeout_seconds, 1);
    assert_eq!(client.config().modify_timeout_seconds, 5);
}

#[test]
fn test_status_line_uses_canonical_reason() {
    assert_eq!(status_line(StatusCode::ACCEPTED), "202 Accepted");
    assert_eq!(status_line(StatusCode::NOT_FOUND), "404 Not Found");
    assert_eq!(
        status_line(StatusCode::METHOD_NOT_ALLOWED),
        "405 Method Not Allowed"
    );
}

#[test]
fn test_status_line_without_reason() {
    let status = StatusCode::from_u16(599).unwrap();
    assert_eq!(status_line(status), "599");
}

#[test]
fn test_method_as_str() {
    assert_eq!(Method::Get.as_str(), "GET");
    assert_eq!(Method::Delete.as_str(), "DELETE");
}

// Mock-based tests

#[test]
fn test_get_body_sends_auth_and_user_agent() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", "/v2/_catalog")
        .match_header("authorization", AUTH_U_P)
        .match_header("user-agent", USER_AGENT)
        .with_status(200)
        .with_body(r#"{"repositories":["alpine"]}"#)
        .create();

    let client = Client::new(connection_for(&server.url())).unwrap();
    let body = client.get_body("/v2/_catalog").unwrap();

    mock.assert();
    assert_eq!(body, br#"{"repositories":["alpine"]}"#.to_vec());
}

#[test]
fn test_get_body_unauthorized() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", "/v2/_catalog")
        .with_status(401)
        .with_body("authentication required")
        .create();

    let client = Client::new(connection_for(&server.url())).unwrap();
    let result = client.get_body("/v2/_catalog");

    mock.assert();
    match result.unwrap_err() {
        LrError::Authentication {
            message,
            status_code,
        } => {
            assert_eq!(status_code, Some(401));
            assert!(message.contains("authentication required"));
        }
        other => panic!("Expected Authentication error, got {:?}", other),
    }
}

#[test]
fn test_get_body_forbidden() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", "/v2/_catalog")
        .with_status(403)
        .create();

    let client = Client::new(connection_for(&server.url())).unwrap();
    let result = client.get_body("/v2/_catalog");

    mock.assert();
    assert!(matches!(
        result.unwrap_err(),
        LrError::Authentication {
            status_code: Some(403),
            ..
        }
    ));
}

#[test]
fn test_get_body_not_found() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", "/v2/missing/tags/list")
        .with_status(404)
        .with_body(r#"{"errors":[{"code":"NAME_UNKNOWN"}]}"#)
        .create();

    let client = Client::new(connection_for(&server.url())).unwrap();
    let result = client.get_body("/v2/missing/tags/list");

    mock.assert();
    assert!(matches!(result.unwrap_err(), LrError::NotFound { .. }));
}

#[test]
fn test_get_body_rate_limited() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", "/v2/_catalog")
        .with_status(429)
        .create();

    let client = Client::new(connection_for(&server.url())).unwrap();
    let result = client.get_body("/v2/_catalog");

    mock.assert();
    assert!(matches!(result.unwrap_err(), LrError::RateLimit { .. }));
}

#[test]
fn test_get_body_server_error() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", "/v2/_catalog")
        .with_status(503)
        .with_body("maintenance")
        .create();

    let client = Client::new(connection_for(&server.url())).unwrap();
    let result = client.get_body("/v2/_catalog");

    mock.assert();
    assert!(matches!(
        result.unwrap_err(),
        LrError::Server {
            status_code: 503,
            ..
        }
    ));
}

#[test]
fn test_get_body_unexpected_status() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", "/v2/_catalog")
        .with_status(418)
        .with_body("teapot")
        .create();

    let client = Client::new(connection_for(&server.url())).unwrap();
    let result = client.get_body("/v2/_catalog");

    mock.assert();
    let err = result.unwrap_err();
    assert!(matches!(err, LrError::Network { .. }));
    assert!(err.to_string().contains("418"));
}

#[test]
fn test_get_header_sends_accept_and_reads_digest() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", "/v2/myimg/manifests/v1")
        .match_header("accept", MANIFEST_V2_MEDIA_TYPE)
        .match_header("authorization", AUTH_U_P)
        .with_status(200)
        .with_header(DIGEST_HEADER, "sha256:abc123")
        .create();

    let client = Client::new(connection_for(&server.url())).unwrap();
    let lookup = client
        .get_header(
            "/v2/myimg/manifests/v1",
            Some(MANIFEST_V2_MEDIA_TYPE),
            DIGEST_HEADER,
        )
        .unwrap();

    mock.assert();
    assert_eq!(lookup.status, "200 OK");
    assert_eq!(lookup.value.as_deref(), Some("sha256:abc123"));
}

#[test]
fn test_get_header_missing_is_none() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", "/v2/myimg/manifests/gone")
        .with_status(404)
        .create();

    let client = Client::new(connection_for(&server.url())).unwrap();
    let lookup = client
        .get_header("/v2/myimg/manifests/gone", None, DIGEST_HEADER)
        .unwrap();

    mock.assert();
    assert_eq!(lookup.status, "404 Not Found");
    assert_eq!(lookup.value, None);
}

#[test]
fn test_delete_returns_status_line() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("DELETE", "/v2/myimg/manifests/sha256:abc123")
        .match_header("authorization", AUTH_U_P)
        .match_header("user-agent", USER_AGENT)
        .with_status(202)
        .create();

    let client = Client::new(connection_for(&server.url())).unwrap();
    let status = client.delete("/v2/myimg/manifests/sha256:abc123").unwrap();

    mock.assert();
    assert_eq!(status, "202 Accepted");
}

#[test]
fn test_delete_non_success_is_not_an_error() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("DELETE", "/v2/myimg/manifests/sha256:abc123")
        .with_status(405)
        .create();

    let client = Client::new(connection_for(&server.url())).unwrap();
    let status = client.delete("/v2/myimg/manifests/sha256:abc123").unwrap();

    mock.assert();
    assert_eq!(status, "405 Method Not Allowed");
}

#[test]
fn test_connection_refused_is_network_error() {
    // Port 1 on localhost is reserved and nothing listens there.
    let client = Client::new(connection_for("http://127.0.0.1:1")).unwrap();
    let result = client.get_body("/v2/_catalog");

    match result.unwrap_err() {
        LrError::Network { message, .. } => {
            assert!(message.contains("127.0.0.1:1"));
        }
        other => panic!("Expected Network error, got {:?}", other),
    }
}
