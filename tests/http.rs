//! HTTP transport integration tests.
//!
//! Starts an axum server and exercises it with reqwest.

#![cfg(feature = "http")]

use std::sync::Arc;

use content_store::{http, CollectionService, DocumentStore};
use serde_json::{json, Value};

fn temp_path(name: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!("content_store_http_{}.json", name))
}

/// Bind to port 0 and return the actual address.
async fn start_server(name: &str) -> String {
    let path = temp_path(name);
    let _ = std::fs::remove_file(&path);
    let store = DocumentStore::open(&path).unwrap();
    let app = http::router(CollectionService::new(Arc::new(store)));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

#[tokio::test]
async fn health_check() {
    let base = start_server("health").await;
    let resp = reqwest::get(format!("{base}/health")).await.unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body, json!({ "ok": true }));
}

#[tokio::test]
async fn crud_round_trip() {
    let base = start_server("crud").await;
    let client = reqwest::Client::new();

    let resp = client.get(format!("{base}/api/team")).send().await.unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(resp.json::<Value>().await.unwrap(), json!([]));

    // Create
    let resp = client
        .post(format!("{base}/api/team"))
        .json(&json!({ "name": "A", "position": "Lead" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let created: Value = resp.json().await.unwrap();
    assert_eq!(created, json!({ "id": 1, "name": "A", "position": "Lead" }));

    // Get one
    let resp = client.get(format!("{base}/api/team/1")).send().await.unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(resp.json::<Value>().await.unwrap(), created);

    // Update
    let resp = client
        .put(format!("{base}/api/team/1"))
        .json(&json!({ "id": 5, "name": "A2" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(
        resp.json::<Value>().await.unwrap(),
        json!({ "id": 1, "name": "A2" })
    );

    // Delete, twice
    for _ in 0..2 {
        let resp = client
            .delete(format!("{base}/api/team/1"))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 200);
        assert_eq!(
            resp.json::<Value>().await.unwrap(),
            json!({ "success": true })
        );
    }

    let resp = client.get(format!("{base}/api/team")).send().await.unwrap();
    assert_eq!(resp.json::<Value>().await.unwrap(), json!([]));
}

#[tokio::test]
async fn update_missing_is_404() {
    let base = start_server("update_missing").await;
    let client = reqwest::Client::new();
    let resp = client
        .put(format!("{base}/api/faqs/12"))
        .json(&json!({ "question": "Q" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
    assert_eq!(
        resp.json::<Value>().await.unwrap(),
        json!({ "error": "Not found" })
    );
}

#[tokio::test]
async fn unknown_collection_is_404() {
    let base = start_server("unknown_collection").await;
    let resp = reqwest::get(format!("{base}/api/users")).await.unwrap();
    assert_eq!(resp.status(), 404);
    let body: Value = resp.json().await.unwrap();
    assert!(body["error"].as_str().unwrap().contains("users"));
}

#[tokio::test]
async fn malformed_input_is_400() {
    let base = start_server("malformed").await;
    let client = reqwest::Client::new();

    let resp = client
        .delete(format!("{base}/api/projects/abc"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);

    let resp = client
        .post(format!("{base}/api/projects"))
        .header("content-type", "application/json")
        .body("{ not json")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);

    let resp = client
        .post(format!("{base}/api/projects"))
        .json(&json!(["not", "an", "object"]))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);

    let resp = client
        .get(format!("{base}/api/projects"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.json::<Value>().await.unwrap(), json!([]));
}

#[tokio::test]
async fn cors_headers_and_preflight() {
    let base = start_server("cors").await;
    let client = reqwest::Client::new();

    let resp = client.get(format!("{base}/api/faqs")).send().await.unwrap();
    assert_eq!(resp.headers()["access-control-allow-origin"], "*");

    let resp = client
        .request(reqwest::Method::OPTIONS, format!("{base}/api/faqs/3"))
        .header("origin", "http://localhost:5173")
        .header("access-control-request-method", "PUT")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 204);
    assert_eq!(resp.headers()["access-control-allow-origin"], "*");
    let methods = resp.headers()["access-control-allow-methods"]
        .to_str()
        .unwrap();
    assert!(methods.contains("PUT"));
}
