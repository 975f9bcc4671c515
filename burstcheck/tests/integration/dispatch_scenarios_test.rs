//! Integration Test: fan-out dispatcher scenarios
//!
//! Each scenario fires a batch at a mock target and checks the summary.

use burstcheck::dispatch::{Dispatcher, RequestOutcome, TransportError};
use serde_json::json;
use std::time::Duration;
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::support::http::unused_addr;
use crate::support::transport::{ok, status, ScriptedTransport};

async fn health_mock(template: ResponseTemplate, expected: u64) -> (MockServer, Url) {
    let mock = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/user/health"))
        .respond_with(template)
        .expect(expected)
        .mount(&mock)
        .await;
    let target = Url::parse(&format!("{}/user/health", mock.uri())).unwrap();
    (mock, target)
}

/// 全件200: すべてSuccess、失敗リストは空
#[tokio::test]
async fn test_all_ok_target_yields_all_successes() {
    let (mock, target) = health_mock(
        ResponseTemplate::new(200).set_body_json(json!({"message": "ok"})),
        100,
    )
    .await;

    let dispatcher = Dispatcher::http(None).unwrap();
    let summary = dispatcher.run_batch(&target, 100).await.unwrap();

    assert_eq!(summary.total, 100);
    assert_eq!(summary.succeeded, 100);
    assert!(summary.failed_slots().is_empty());
    assert!(summary.all_succeeded());
    assert!(summary.outcomes.iter().all(|o| o.outcome.message() == Some("ok")));

    mock.verify().await;
}

/// 全件503: すべてHttpError(503)、成功リストは空
#[tokio::test]
async fn test_unavailable_target_yields_all_http_errors() {
    let (_mock, target) = health_mock(ResponseTemplate::new(503), 20).await;

    let dispatcher = Dispatcher::http(None).unwrap();
    let summary = dispatcher.run_batch(&target, 20).await.unwrap();

    assert_eq!(summary.successes().count(), 0);
    assert_eq!(summary.failed, 20);
    assert!(summary
        .outcomes
        .iter()
        .all(|o| o.outcome == RequestOutcome::HttpError(503)));
    assert_eq!(summary.failed_slots(), (1..=20).collect::<Vec<_>>());
}

/// 接続不可: すべてTransportError
#[tokio::test]
async fn test_unreachable_target_yields_transport_errors() {
    let target = Url::parse(&format!("http://{}/user/health", unused_addr())).unwrap();

    let dispatcher = Dispatcher::http(Some(Duration::from_secs(5))).unwrap();
    let summary = dispatcher.run_batch(&target, 10).await.unwrap();

    assert_eq!(summary.total, 10);
    assert_eq!(summary.succeeded, 0);
    assert!(summary
        .outcomes
        .iter()
        .all(|o| matches!(o.outcome, RequestOutcome::TransportError(_))));
}

/// 2xxだがJSONでない: TransportError(Parse)
#[tokio::test]
async fn test_non_json_body_is_parse_failure() {
    let (_mock, target) = health_mock(
        ResponseTemplate::new(200).set_body_string("<html>healthy</html>"),
        3,
    )
    .await;

    let dispatcher = Dispatcher::http(None).unwrap();
    let summary = dispatcher.run_batch(&target, 3).await.unwrap();

    assert_eq!(summary.failed, 3);
    for entry in &summary.outcomes {
        assert!(matches!(
            entry.outcome,
            RequestOutcome::TransportError(TransportError::Parse(_))
        ));
    }
}

/// count = 0: リクエストを送らず空のサマリー
#[tokio::test]
async fn test_zero_count_sends_nothing() {
    let (mock, target) = health_mock(ResponseTemplate::new(200), 0).await;

    let dispatcher = Dispatcher::http(None).unwrap();
    let summary = dispatcher.run_batch(&target, 0).await.unwrap();

    assert_eq!(summary.total, 0);
    assert_eq!(summary.succeeded, 0);
    assert_eq!(summary.failed, 0);
    assert!(summary.outcomes.is_empty());

    mock.verify().await;
}

/// 200/503交互（スロット番号基準）: 成功5件、失敗5件、失敗は偶数スロット
#[tokio::test]
async fn test_alternating_target_reports_failed_slots() {
    let dispatcher = Dispatcher::new(ScriptedTransport::new(|slot: usize| {
        if slot % 2 == 1 {
            ok()
        } else {
            status(503)
        }
    }));
    let target = Url::parse("http://localhost:3000/health").unwrap();

    let summary = dispatcher.run_batch(&target, 10).await.unwrap();

    assert_eq!(summary.succeeded, 5);
    assert_eq!(summary.failed, 5);
    assert_eq!(summary.failed_slots(), vec![2, 4, 6, 8, 10]);
    assert!(summary
        .failures()
        .all(|o| o.outcome == RequestOutcome::HttpError(503)));
    let slots: Vec<usize> = summary.outcomes.iter().map(|o| o.slot).collect();
    assert_eq!(slots, (1..=10).collect::<Vec<_>>());
}

/// 同一条件で2回実行: 件数が同じ
#[tokio::test]
async fn test_repeated_runs_are_structurally_identical() {
    let (mock, target) = health_mock(
        ResponseTemplate::new(200).set_body_json(json!({"message": "ok"})),
        30,
    )
    .await;

    let dispatcher = Dispatcher::http(None).unwrap();
    let first = dispatcher.run_batch(&target, 15).await.unwrap();
    let second = dispatcher.run_batch(&target, 15).await.unwrap();

    assert_eq!(first.total, second.total);
    assert_eq!(first.succeeded, second.succeeded);
    assert_eq!(first.failed_slots(), second.failed_slots());
    assert_ne!(first.batch_id, second.batch_id);

    // No caching: both batches hit the target.
    mock.verify().await;
}

/// 遅いスロットがあっても全件の完了を待つ
#[tokio::test]
async fn test_join_waits_for_slow_responses() {
    let (_mock, target) = health_mock(
        ResponseTemplate::new(200)
            .set_body_json(json!({"message": "slow"}))
            .set_delay(Duration::from_millis(300)),
        5,
    )
    .await;

    let dispatcher = Dispatcher::http(None).unwrap();
    let summary = dispatcher.run_batch(&target, 5).await.unwrap();

    assert_eq!(summary.succeeded, 5);
    // All five were in flight together, so the batch takes about one delay, not five.
    assert!(summary.elapsed_ms >= 300);
    assert!(summary.elapsed_ms < 1500, "elapsed {}ms", summary.elapsed_ms);
}
