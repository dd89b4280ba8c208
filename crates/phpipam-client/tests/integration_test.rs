//! Integration tests for the phpIPAM client
//!
//! Most tests run the HTTP transport against a wiremock server.
//! The `#[ignore]`d tests require a running phpIPAM instance;
//! set PHPIPAM_ENDPOINT_ADDR, PHPIPAM_APP_ID, PHPIPAM_USER_NAME and
//! PHPIPAM_PASSWORD to run them.

use phpipam_client::controllers::{L2DomainsController, SectionsController, SubnetsController, VlansController};
use phpipam_client::{Config, PhpIpamClient, PhpIpamError, PhpIpamTransport, Session};
use serde_json::json;
use std::sync::Arc;
use wiremock::matchers::{basic_auth, body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const APP: &str = "automation";

async fn setup() -> (MockServer, Arc<dyn PhpIpamTransport>) {
    let server = MockServer::start().await;
    let config = Config::new(format!("{}/api", server.uri()), APP);
    let client = PhpIpamClient::with_client(reqwest::Client::new(), Session::with_token(config, "test-token"));
    (server, client.into_transport())
}

fn api_path(suffix: &str) -> String {
    format!("/api/{}{}", APP, suffix)
}

#[tokio::test]
async fn test_connect_logs_in_with_basic_auth() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(api_path("/user/")))
        .and(basic_auth("svc-ipam", "secret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 200,
            "success": true,
            "data": {"token": "fresh-token", "expires": "2030-01-01 12:00:00"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let config = Config::new(format!("{}/api", server.uri()), APP).with_credentials("svc-ipam", "secret");
    let client = PhpIpamClient::connect_with_client(reqwest::Client::new(), config)
        .await
        .unwrap();

    assert_eq!(client.session().token(), Some("fresh-token"));
    assert!(client.session().expires().is_some());
}

#[tokio::test]
async fn test_connect_rejected_credentials() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(api_path("/user/")))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "code": 500,
            "success": false,
            "message": "Invalid username or password"
        })))
        .mount(&server)
        .await;

    let config = Config::new(format!("{}/api", server.uri()), APP).with_credentials("svc-ipam", "wrong");
    let result = PhpIpamClient::connect_with_client(reqwest::Client::new(), config).await;

    assert!(
        matches!(result, Err(PhpIpamError::Authentication(_))),
        "expected Authentication error, got: {result:?}"
    );
}

#[tokio::test]
async fn test_connect_requires_user_name() {
    let config = Config::new("http://localhost/api", APP);
    let result = PhpIpamClient::connect_with_client(reqwest::Client::new(), config).await;
    assert!(matches!(result, Err(PhpIpamError::InvalidConfig(_))));
}

#[tokio::test]
async fn test_list_sections_sends_token_header() {
    let (server, transport) = setup().await;
    Mock::given(method("GET"))
        .and(path(api_path("/sections/")))
        .and(header("token", "test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 200,
            "success": true,
            "data": [
                {"id": "1", "name": "Customers", "strictMode": "1", "masterSection": "0"},
                {"id": "2", "name": "IPv6", "strictMode": "0", "masterSection": null}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let sections = SectionsController::new(transport).list_sections().await.unwrap();

    assert_eq!(sections.len(), 2);
    assert_eq!(sections[0].id, 1);
    assert!(sections[0].strict_mode.0);
    assert_eq!(sections[1].master_section, 0);
}

#[tokio::test]
async fn test_empty_collection_without_data() {
    let (server, transport) = setup().await;
    Mock::given(method("GET"))
        .and(path(api_path("/l2domains/")))
        .and(query_param("filter_by", "name"))
        .and(query_param("filter_value", "nowhere"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 200,
            "success": true,
            "message": "No results (filter applied)"
        })))
        .mount(&server)
        .await;

    let domains = L2DomainsController::new(transport)
        .get_l2_domains_by_name("nowhere")
        .await
        .unwrap();
    assert!(domains.is_empty());
}

#[tokio::test]
async fn test_not_found_status() {
    let (server, transport) = setup().await;
    Mock::given(method("GET"))
        .and(path(api_path("/subnets/404/")))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "code": 404,
            "success": false,
            "message": "Subnet does not exist"
        })))
        .mount(&server)
        .await;

    let result = SubnetsController::new(transport).get_subnet_by_id(404).await;
    match result {
        Err(PhpIpamError::NotFound(message)) => assert!(message.contains("Subnet does not exist"), "{message}"),
        other => panic!("expected NotFound, got {other:?}"),
    }
}

#[tokio::test]
async fn test_expired_token_is_authentication_error() {
    let (server, transport) = setup().await;
    Mock::given(method("GET"))
        .and(path(api_path("/vlans/5/")))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "code": 401,
            "success": false,
            "message": "Token expired"
        })))
        .mount(&server)
        .await;

    let result = VlansController::new(transport).get_vlan_by_id(5).await;
    assert!(matches!(result, Err(PhpIpamError::Authentication(_))));
}

#[tokio::test]
async fn test_unsuccessful_envelope_is_api_error() {
    let (server, transport) = setup().await;
    Mock::given(method("POST"))
        .and(path(api_path("/sections/")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 409,
            "success": false,
            "message": "Section with that name already exists"
        })))
        .mount(&server)
        .await;

    let section = phpipam_client::controllers::Section {
        name: "Customers".to_string(),
        ..Default::default()
    };
    let result = SectionsController::new(transport).create_section(&section).await;
    match result {
        Err(PhpIpamError::Api(message)) => assert!(message.contains("already exists"), "{message}"),
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_non_json_body_is_api_error() {
    let (server, transport) = setup().await;
    Mock::given(method("GET"))
        .and(path(api_path("/sections/")))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let result = SectionsController::new(transport).list_sections().await;
    match result {
        Err(PhpIpamError::Api(message)) => assert!(message.contains("maintenance"), "{message}"),
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_malformed_scalar_over_http() {
    let (server, transport) = setup().await;
    Mock::given(method("GET"))
        .and(path(api_path("/sections/1/")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 200,
            "success": true,
            "data": {"id": "abc", "name": "Customers"}
        })))
        .mount(&server)
        .await;

    let result = SectionsController::new(transport).get_section_by_id(1).await;
    assert!(
        matches!(result, Err(PhpIpamError::MalformedScalar(_))),
        "expected MalformedScalar, got: {result:?}"
    );
}

#[tokio::test]
async fn test_create_subnet_posts_json_body() {
    let (server, transport) = setup().await;
    Mock::given(method("POST"))
        .and(path(api_path("/subnets/")))
        .and(body_json(json!({"subnet": "10.20.0.0", "mask": "24", "sectionId": "1"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "code": 201,
            "success": true,
            "message": "Subnet created",
            "id": "31"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let subnet = phpipam_client::controllers::Subnet {
        subnet_address: "10.20.0.0".to_string(),
        mask: 24,
        section_id: 1,
        ..Default::default()
    };
    let message = SubnetsController::new(transport).create_subnet(&subnet).await.unwrap();
    assert_eq!(message, "Subnet created");
}

#[tokio::test]
#[ignore] // Requires running phpIPAM instance
async fn test_live_list_sections() {
    let config = Config::from_env().expect("PHPIPAM_APP_ID environment variable must be set");
    let client = PhpIpamClient::connect(config).await.expect("Failed to log in");

    let sections = SectionsController::new(client.into_transport())
        .list_sections()
        .await
        .expect("Failed to list sections");

    println!("Found {} sections", sections.len());
}
