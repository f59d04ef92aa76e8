use std::collections::HashMap;

use axum::{
    extract::{Path, Query},
    http::{header, HeaderMap, HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use axum_test::TestServer;
use serde_json::{json, Value};

use overlap_api::{
    config::Config,
    error::NOT_FOUND_OR_PRIVATE,
    routes::{create_router, AppState},
};

const USER_AGENT: &str = "overlap-test/1.0";

fn release_json(id: u64, master_id: u64, title: &str, artist: &str) -> Value {
    json!({
        "id": id,
        "instance_id": id * 10,
        "basic_information": {
            "id": id,
            "master_id": master_id,
            "title": title,
            "year": 1969,
            "artists": [{"name": artist, "id": 1}],
            "cover_image": format!("https://img.example/{id}.jpg")
        }
    })
}

/// Stand-in for the Discogs collection endpoint
async fn fake_collection(
    Path(username): Path<String>,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Response {
    if headers.get(header::USER_AGENT).and_then(|v| v.to_str().ok()) != Some(USER_AGENT) {
        return (
            StatusCode::FORBIDDEN,
            Json(json!({"message": "Missing User-Agent"})),
        )
            .into_response();
    }

    let page: u32 = query.get("page").and_then(|p| p.parse().ok()).unwrap_or(1);

    match (username.as_str(), page) {
        ("alice", 1) => Json(json!({
            "pagination": {"page": 1, "pages": 2, "per_page": 2, "items": 3},
            "releases": [
                release_json(1, 100, "Hundred", "Artist A"),
                release_json(2, 200, "Two Hundred", "Artist B")
            ]
        }))
        .into_response(),
        ("alice", 2) => Json(json!({
            "pagination": {"page": 2, "pages": 2, "per_page": 2, "items": 3},
            "releases": [release_json(5, 0, "Abbey Road", "The Beatles")]
        }))
        .into_response(),
        ("bob", _) => Json(json!({
            "pagination": {"page": 1, "pages": 1, "per_page": 100, "items": 3},
            "releases": [
                release_json(3, 200, "Two Hundred (Reissue)", "Artist B"),
                release_json(6, 0, "abbey-road!!", "the beatles"),
                release_json(4, 300, "Three Hundred", "Artist C")
            ]
        }))
        .into_response(),
        ("sparse", _) => Json(json!({
            "pagination": {"page": 1, "pages": 1},
            "releases": [{
                "id": 9,
                "basic_information": {"title": null, "artists": null, "year": null, "master_id": null}
            }]
        }))
        .into_response(),
        ("garbled", _) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/html")],
            "<html>maintenance</html>",
        )
            .into_response(),
        _ => (
            StatusCode::NOT_FOUND,
            Json(json!({"message": "User does not exist or may have been deleted."})),
        )
            .into_response(),
    }
}

async fn spawn_fake_discogs() -> String {
    let app = Router::new().route(
        "/users/:username/collection/folders/0/releases",
        get(fake_collection),
    );
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

fn create_test_server(api_url: String) -> TestServer {
    let config = Config {
        discogs_api_url: api_url,
        discogs_user_agent: USER_AGENT.to_string(),
        ..Config::default()
    };
    let app = create_router(AppState::new(&config));
    TestServer::new(app).unwrap()
}

#[tokio::test]
async fn test_health_check() {
    let server = create_test_server(spawn_fake_discogs().await);
    let response = server.get("/health").await;
    response.assert_status_ok();
    assert!(response.header("x-request-id").to_str().is_ok());
}

#[tokio::test]
async fn test_incoming_request_id_is_echoed() {
    let server = create_test_server(spawn_fake_discogs().await);
    let request_id = "6f1c2d9e-4b7a-4c1e-9a53-2f8e0d7b1a44";

    let response = server
        .get("/health")
        .add_header(
            HeaderName::from_static("x-request-id"),
            HeaderValue::from_static(request_id),
        )
        .await;

    response.assert_status_ok();
    assert_eq!(response.header("x-request-id"), request_id);
}

#[tokio::test]
async fn test_proxy_missing_username() {
    let server = create_test_server(spawn_fake_discogs().await);

    let response = server.get("/api/discogs").await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body, json!({"error": "Missing username"}));
}

#[tokio::test]
async fn test_proxy_relays_upstream_page() {
    let server = create_test_server(spawn_fake_discogs().await);

    let response = server
        .get("/api/discogs")
        .add_query_param("username", "alice")
        .add_query_param("page", 2)
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["pagination"]["pages"], 2);
    assert_eq!(body["releases"][0]["id"], 5);
    assert_eq!(body["releases"][0]["instance_id"], 50);
}

#[tokio::test]
async fn test_proxy_empty_pagination_uses_defaults() {
    let server = create_test_server(spawn_fake_discogs().await);

    let response = server
        .get("/api/discogs")
        .add_query_param("username", "alice")
        .add_query_param("per_page", "")
        .add_query_param("page", "")
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["pagination"]["page"], 1);
    assert_eq!(body["releases"][0]["id"], 1);
}

#[tokio::test]
async fn test_proxy_rejects_non_integer_page_as_json() {
    let server = create_test_server(spawn_fake_discogs().await);

    let response = server
        .get("/api/discogs")
        .add_query_param("username", "alice")
        .add_query_param("page", "two")
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body, json!({"error": "Invalid page"}));
}

#[tokio::test]
async fn test_compare_json_tolerates_null_fields() {
    let server = create_test_server(spawn_fake_discogs().await);

    let response = server
        .get("/api/compare")
        .add_query_param("username1", "sparse")
        .add_query_param("username2", "sparse")
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["shared"][0]["key"], "t__a_");
    assert_eq!(body["debug"]["user1"]["count"], 1);
}

#[tokio::test]
async fn test_proxy_echoes_upstream_not_found() {
    let server = create_test_server(spawn_fake_discogs().await);

    let response = server
        .get("/api/discogs")
        .add_query_param("username", "nobody")
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert_eq!(body["error"], "User does not exist or may have been deleted.");
    assert_eq!(
        body["details"]["message"],
        "User does not exist or may have been deleted."
    );
}

#[tokio::test]
async fn test_proxy_wraps_non_json_body() {
    let server = create_test_server(spawn_fake_discogs().await);

    let response = server
        .get("/api/discogs")
        .add_query_param("username", "garbled")
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["error"], "Non-JSON response from Discogs");
    assert_eq!(body["text"], "<html>maintenance</html>");
}

#[tokio::test]
async fn test_proxy_network_failure() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let server = create_test_server(format!("http://{}", addr));
    let response = server
        .get("/api/discogs")
        .add_query_param("username", "alice")
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json();
    assert_eq!(body["error"], "Failed to fetch from Discogs");
    assert!(body["details"].is_string());
}

#[tokio::test]
async fn test_compare_json_finds_shared_albums() {
    let server = create_test_server(spawn_fake_discogs().await);

    let response = server
        .get("/api/compare")
        .add_query_param("username1", "alice")
        .add_query_param("username2", "bob")
        .await;

    response.assert_status_ok();
    let body: Value = response.json();

    let keys: Vec<&str> = body["shared"]
        .as_array()
        .unwrap()
        .iter()
        .map(|album| album["key"].as_str().unwrap())
        .collect();
    assert_eq!(keys, vec!["m_200", "t_abbeyroad_a_thebeatles"]);

    assert_eq!(body["shared"][0]["user1"][0]["id"], 2);
    assert_eq!(body["shared"][0]["user2"][0]["id"], 3);
    assert_eq!(body["shared"][0]["display"]["id"], 2);
    assert_eq!(body["shared"][1]["user1"][0]["id"], 5);
    assert_eq!(body["shared"][1]["user2"][0]["id"], 6);

    assert_eq!(body["debug"]["user1"]["count"], 3);
    assert_eq!(body["debug"]["user2"]["count"], 3);
    assert_eq!(
        body["debug"]["user1"]["titles"],
        json!(["Hundred", "Two Hundred", "Abbey Road"])
    );
}

#[tokio::test]
async fn test_compare_json_unknown_user() {
    let server = create_test_server(spawn_fake_discogs().await);

    let response = server
        .get("/api/compare")
        .add_query_param("username1", "alice")
        .add_query_param("username2", "nobody")
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert_eq!(body["error"], NOT_FOUND_OR_PRIVATE);
}

#[tokio::test]
async fn test_compare_json_missing_username() {
    let server = create_test_server(spawn_fake_discogs().await);

    let response = server
        .get("/api/compare")
        .add_query_param("username1", "alice")
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"], "Please enter both usernames.");
}

#[tokio::test]
async fn test_index_renders_form() {
    let server = create_test_server(spawn_fake_discogs().await);

    let response = server.get("/").await;
    response.assert_status_ok();
    let page = response.text();
    assert!(page.contains("Discogs Collection Overlap"));
    assert!(page.contains("Find Overlap"));
}

#[tokio::test]
async fn test_compare_page_renders_results() {
    let server = create_test_server(spawn_fake_discogs().await);

    let response = server
        .get("/compare")
        .add_query_param("username1", "alice")
        .add_query_param("username2", "bob")
        .await;

    response.assert_status_ok();
    let page = response.text();
    assert!(page.contains("Shared Albums"));
    assert!(page.contains("https://www.discogs.com/master/200"));
    assert!(page.contains("https://www.discogs.com/release/6"));
    assert!(page.contains("User 1: 3 releases. Sample: Hundred, Two Hundred, Abbey Road"));
    assert!(page.contains("value=\"alice\""));
}

#[tokio::test]
async fn test_compare_page_shows_error_inline() {
    let server = create_test_server(spawn_fake_discogs().await);

    let response = server
        .get("/compare")
        .add_query_param("username1", "alice")
        .add_query_param("username2", "nobody")
        .await;

    response.assert_status_ok();
    let page = response.text();
    assert!(page.contains(NOT_FOUND_OR_PRIVATE));
    assert!(!page.contains("Shared Albums"));
}
