//! Integration tests for the file API.
//!
//! Requests go straight through the router with `tower::ServiceExt::oneshot`, no network.

mod common;

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
};
use serde_json::json;

use common::{TestApp, json_body};

#[tokio::test]
async fn health_reports_ok() {
    let app = TestApp::new();

    let (status, body) = app.call(Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "ok", "message": "Server is running"}));
}

#[tokio::test]
async fn create_read_update_delete_scenario() {
    let app = TestApp::new();

    let (status, body) = app
        .call(
            Method::POST,
            "/files",
            Some(json!({"filename": "notes.txt", "content": "draft"})),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body, json!({"message": "File created successfully"}));

    let (status, body) = app.call(Method::GET, "/files/notes.txt", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"content": "draft"}));

    let (status, _) = app
        .call(
            Method::PUT,
            "/files/notes.txt",
            Some(json!({"content": "final"})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = app.call(Method::GET, "/files/notes.txt", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"content": "final"}));

    let (status, body) = app.call(Method::DELETE, "/files/notes.txt", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": "File deleted successfully"}));

    let (status, body) = app.call(Method::GET, "/files/notes.txt", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"error": "File not found"}));
}

#[tokio::test]
async fn list_returns_metadata_for_text_files() {
    let app = TestApp::new();
    app.store.create("a.txt", "hello").unwrap();
    app.store.create("b.txt", "").unwrap();
    std::fs::write(app.store.root().join("skip.md"), "# not listed").unwrap();

    let (status, body) = app.call(Method::GET, "/files", None).await;
    assert_eq!(status, StatusCode::OK);

    let mut entries = body.as_array().expect("array body").clone();
    entries.sort_by(|a, b| a["name"].as_str().cmp(&b["name"].as_str()));
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["name"], "a.txt");
    assert_eq!(entries[0]["size"], 5);
    assert_eq!(entries[1]["name"], "b.txt");
    assert_eq!(entries[1]["size"], 0);
    assert!(entries[0]["modified"].is_string());
}

#[tokio::test]
async fn duplicate_create_conflicts_and_keeps_first_content() {
    let app = TestApp::new();
    let payload = json!({"filename": "dup.txt", "content": "first"});

    let (status, _) = app.call(Method::POST, "/files", Some(payload)).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = app
        .call(
            Method::POST,
            "/files",
            Some(json!({"filename": "dup.txt", "content": "second"})),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body, json!({"error": "File already exists"}));

    let (_, body) = app.call(Method::GET, "/files/dup.txt", None).await;
    assert_eq!(body, json!({"content": "first"}));
}

#[tokio::test]
async fn create_without_content_makes_empty_file() {
    let app = TestApp::new();

    let (status, _) = app
        .call(Method::POST, "/files", Some(json!({"filename": "blank.txt"})))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(app.store.read("blank.txt").unwrap(), "");
}

#[tokio::test]
async fn content_larger_than_two_mib_round_trips() {
    let app = TestApp::new();
    let big = "a".repeat(3 * 1024 * 1024);

    let (status, _) = app
        .call(
            Method::POST,
            "/files",
            Some(json!({"filename": "big.txt", "content": big})),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let bigger = "b".repeat(5 * 1024 * 1024);
    let (status, _) = app
        .call(Method::PUT, "/files/big.txt", Some(json!({"content": &bigger})))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(app.store.read("big.txt").unwrap().len(), bigger.len());

    let (status, body) = app.call(Method::GET, "/files/big.txt", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["content"].as_str().unwrap(), bigger);
}

#[tokio::test]
async fn update_of_missing_file_is_not_found() {
    let app = TestApp::new();

    let (status, body) = app
        .call(Method::PUT, "/files/ghost.txt", Some(json!({"content": "x"})))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"error": "File not found"}));
    assert!(!app.store.root().join("ghost.txt").exists());
}

#[tokio::test]
async fn delete_twice_is_not_found() {
    let app = TestApp::new();
    app.store.create("once.txt", "").unwrap();

    let (status, _) = app.call(Method::DELETE, "/files/once.txt", None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = app.call(Method::DELETE, "/files/once.txt", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"error": "File not found"}));
}

#[tokio::test]
async fn invalid_names_are_bad_requests() {
    let app = TestApp::new();
    let outside = app.dir.path().join("secret.txt");
    std::fs::write(&outside, "top secret").unwrap();

    for uri in [
        "/files/notes.md",
        "/files/..%2Fsecret.txt",
        "/files/sub%5Cx.txt",
        "/files/%FF.txt",
    ] {
        let (status, body) = app.call(Method::GET, uri, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "GET {uri}");
        assert_eq!(body, json!({"error": "Invalid filename"}));
    }

    let (status, _) = app
        .call(Method::DELETE, "/files/..%2Fsecret.txt", None)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(outside.exists());

    let (status, body) = app
        .call(Method::PUT, "/files/%FF.txt", Some(json!({"content": "x"})))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "Invalid filename"}));

    let (status, body) = app.call(Method::DELETE, "/files/%FF.txt", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "Invalid filename"}));

    let (status, body) = app
        .call(
            Method::POST,
            "/files",
            Some(json!({"filename": "../escape.txt", "content": "x"})),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "Invalid filename"}));
    assert!(!app.dir.path().join("escape.txt").exists());

    let (status, _) = app
        .call(
            Method::POST,
            "/files",
            Some(json!({"filename": "", "content": "x"})),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn malformed_bodies_are_rejected_before_the_store() {
    let app = TestApp::new();

    let (status, body) = app
        .call(Method::POST, "/files", Some(json!({"content": "no name"})))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().starts_with("Invalid request body"));

    let (status, _) = app
        .call(
            Method::POST,
            "/files",
            Some(json!({"filename": 7, "content": "x"})),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let request = Request::builder()
        .method(Method::POST)
        .uri("/files")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = app.send(request).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert!(body["error"].is_string());

    assert!(app.store.list().unwrap().is_empty());
}
