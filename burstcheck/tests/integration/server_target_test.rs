//! Integration Test: dispatcher against a live burstcheck server

use burstcheck::api::health::HealthResponse;
use burstcheck::dispatch::Dispatcher;
use reqwest::Client;
use serde_json::Value;
use url::Url;

use crate::support::http::spawn_test_server;

/// `/health` の形: {status, port, db}
#[tokio::test]
async fn test_health_route_shape() {
    let server = spawn_test_server().await;

    let response = Client::new().get(server.url("/health")).send().await.unwrap();
    assert_eq!(response.status().as_u16(), 200);

    let body: HealthResponse = response.json().await.unwrap();
    assert_eq!(body.status, "UP");
    assert_eq!(body.port, server.addr().port());
    assert_eq!(body.db, "sqlite::memory:");

    server.stop().await;
}

/// `/test` は呼ぶたびに1件追加して全件を返す
#[tokio::test]
async fn test_insert_then_select_route() {
    let server = spawn_test_server().await;
    let client = Client::new();

    for expected in 1..=3 {
        let body: Value = client
            .get(server.url("/test"))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        let rows = body.as_array().unwrap();
        assert_eq!(rows.len(), expected);
        assert!(rows.iter().all(|r| r["name"] == "John Doe"));
    }

    server.stop().await;
}

/// `/health` は `message` を持たないが、JSONなので全件Success
#[tokio::test]
async fn test_dispatch_against_health_route() {
    let server = spawn_test_server().await;
    let target = Url::parse(&server.url("/health")).unwrap();

    let dispatcher = Dispatcher::http(None).unwrap();
    let summary = dispatcher.run_batch(&target, 50).await.unwrap();

    assert_eq!(summary.succeeded, 50);
    assert!(summary.outcomes.iter().all(|o| o.outcome.message().is_none()));
    summary.report();

    server.stop().await;
}

/// 存在しないパス: すべて404
#[tokio::test]
async fn test_dispatch_against_unknown_route() {
    let server = spawn_test_server().await;
    let target = Url::parse(&server.url("/user/health")).unwrap();

    let dispatcher = Dispatcher::http(None).unwrap();
    let summary = dispatcher.run_batch(&target, 5).await.unwrap();

    assert_eq!(summary.failed, 5);
    assert_eq!(summary.failed_slots(), vec![1, 2, 3, 4, 5]);

    server.stop().await;
}
