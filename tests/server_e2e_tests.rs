//! End-to-end tests against a live listener
//!
//! Binds the router on an ephemeral port and talks to it over HTTP.

use serde_json::{json, Value};
use slide_cache::{api::create_router, AppState, ServerConfig};
use tokio::net::TcpListener;

async fn spawn_server(config: ServerConfig) -> String {
    let state = AppState::from_config(&config).unwrap();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, create_router(state)).await.unwrap();
    });

    format!("http://{}", addr)
}

#[tokio::test]
async fn test_set_get_has_over_http() {
    let base = spawn_server(ServerConfig::default()).await;
    let client = reqwest::Client::new();

    let response = client
        .put(format!("{}/set", base))
        .json(&json!({ "key": "greeting", "value": "hello" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::OK);

    let body: Value = client
        .get(format!("{}/get/greeting", base))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["value"], "hello");

    let body: Value = client
        .get(format!("{}/has/greeting", base))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["exists"], true);
}

#[tokio::test]
async fn test_capacity_over_http() {
    let config = ServerConfig {
        item_limit: 2,
        ..ServerConfig::default()
    };
    let base = spawn_server(config).await;
    let client = reqwest::Client::new();

    for (key, value) in [("a", "1"), ("b", "2"), ("c", "3")] {
        client
            .put(format!("{}/set", base))
            .json(&json!({ "key": key, "value": value }))
            .send()
            .await
            .unwrap();
    }

    let response = client.get(format!("{}/get/a", base)).send().await.unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::NOT_FOUND);

    let stats: Value = client
        .get(format!("{}/stats", base))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(stats["total_entries"], 2);
    assert_eq!(stats["evictions"], 1);
}
