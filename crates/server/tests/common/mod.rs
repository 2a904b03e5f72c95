#![allow(dead_code)]

use axum::{
    Router,
    body::Body,
    http::{Method, Request, Response, StatusCode},
};
use http_body_util::BodyExt;
use serde_json::Value;
use tempfile::TempDir;
use text_editor_file_store::FileStore;
use text_editor_server::{AppState, create_router};
use tower::ServiceExt;

pub const ALLOWED_ORIGIN: &str = "http://localhost:5173";

pub struct TestApp {
    pub router: Router,
    pub store: FileStore,
    pub dir: TempDir,
}

impl TestApp {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("temp dir");
        let store = FileStore::new(dir.path().join("managed_files"));
        store.ensure_root().expect("create managed dir");
        let router = create_router(
            AppState::new(store.clone()),
            &[ALLOWED_ORIGIN, "https://text-editor-app.vercel.app"],
        );
        Self { router, store, dir }
    }

    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible")
    }

    pub async fn call(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("valid request");

        let response = self.send(request).await;
        let status = response.status();
        (status, json_body(response).await)
    }
}

pub async fn json_body(response: Response<Body>) -> Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("read body")
        .to_bytes();
    if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("body should be JSON")
    }
}
