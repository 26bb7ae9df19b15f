//! The liveness sidecar served over a real socket.

use std::time::Duration;

use tokio::time::timeout;

use mushaf_bot::error::HealthError;
use mushaf_bot::health;

const TEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Bind on a random port and serve in the background.
async fn start_health_server() -> u16 {
    let listener = health::bind(0).await.unwrap();
    let port = listener.local_addr().unwrap().port();
    tokio::spawn(health::serve(listener));
    port
}

#[tokio::test]
async fn root_returns_ok() {
    let port = start_health_server().await;

    let resp = timeout(
        TEST_TIMEOUT,
        reqwest::get(format!("http://127.0.0.1:{port}/")),
    )
    .await
    .unwrap()
    .unwrap();

    assert_eq!(resp.status(), reqwest::StatusCode::OK);
    assert_eq!(resp.text().await.unwrap(), "OK");
}

#[tokio::test]
async fn concurrent_probes_all_succeed() {
    let port = start_health_server().await;
    let client = reqwest::Client::new();

    let probes = (0..16).map(|_| {
        let client = client.clone();
        let url = format!("http://127.0.0.1:{port}/");
        async move { client.get(url).send().await.map(|r| r.status()) }
    });

    let statuses = timeout(TEST_TIMEOUT, futures::future::join_all(probes))
        .await
        .unwrap();
    for status in statuses {
        assert_eq!(status.unwrap(), reqwest::StatusCode::OK);
    }
}

#[tokio::test]
async fn bind_failure_is_observable() {
    let taken = tokio::net::TcpListener::bind(("0.0.0.0", 0)).await.unwrap();
    let port = taken.local_addr().unwrap().port();

    let handle = health::spawn_health_server(port);
    let result = timeout(TEST_TIMEOUT, handle).await.unwrap().unwrap();
    assert!(matches!(result, Err(HealthError::Bind { .. })));
}
