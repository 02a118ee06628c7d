use std::sync::Arc;
use std::time::Duration;

use chainfetch_core::{
    AccountIdentifier, BackoffConfig, CancellationToken, FetchError, Fetcher, FetcherConfig,
    NetworkIdentifier, Transport, TransportError,
};
use chainfetch_http::HttpTransport;
use mockito::Matcher;
use serde_json::json;

fn fast_fetcher(url: String) -> Fetcher {
    let transport = HttpTransport::default_for(url).unwrap();
    let config = FetcherConfig {
        backoff: BackoffConfig {
            initial_interval: Duration::from_millis(1),
            multiplier: 1.0,
            max_interval: Duration::from_millis(1),
            randomization_factor: 0.0,
        },
        ..FetcherConfig::default()
    };
    Fetcher::new(Arc::new(transport), config)
}

fn network() -> NetworkIdentifier {
    NetworkIdentifier::new("bitcoin", "mainnet")
}

#[tokio::test]
async fn posts_json_and_validates_status() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/network/status")
        .match_header("content-type", "application/json")
        .match_header("accept", "application/json")
        .match_body(Matcher::Json(json!({
            "network_identifier": {"blockchain": "bitcoin", "network": "mainnet"}
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "current_block_identifier": {"index": 10, "hash": "block 10"},
                "current_block_timestamp": 1582833600000i64,
                "genesis_block_identifier": {"index": 0, "hash": "block 0"},
                "peers": []
            })
            .to_string(),
        )
        .create_async()
        .await;

    let status = fast_fetcher(server.url()).network_status(&network()).await.unwrap();

    assert_eq!(status.current_block_identifier.unwrap().hash, "block 10");
    mock.assert_async().await;
}

#[tokio::test]
async fn non_200_body_is_decoded_as_node_error() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/account/balance")
        .with_status(500)
        .with_header("content-type", "application/json")
        .with_body(json!({"code": 12, "message": "account not found"}).to_string())
        .expect(1)
        .create_async()
        .await;

    let cancel = CancellationToken::new();
    let err = fast_fetcher(server.url())
        .account_balance_retry(
            &cancel,
            &network(),
            &AccountIdentifier::new("acct1"),
            Duration::from_secs(5),
            3,
        )
        .await
        .unwrap_err();

    // Not flagged retriable: one request only.
    assert!(matches!(err, FetchError::Transport(TransportError::Node(ref e)) if e.code == 12));
    mock.assert_async().await;
}

#[tokio::test]
async fn retriable_node_error_is_retried_until_exhausted() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/network/list")
        .with_status(500)
        .with_body(json!({"code": 3, "message": "node syncing", "retriable": true}).to_string())
        .expect(3)
        .create_async()
        .await;

    let cancel = CancellationToken::new();
    let err = fast_fetcher(server.url())
        .network_list_retry(&cancel, Duration::from_secs(5), 2)
        .await
        .unwrap_err();

    assert!(matches!(err, FetchError::RetriesExhausted { operation: "network_list", .. }));
    assert_eq!(err.node_error().map(|e| e.code), Some(3));
    mock.assert_async().await;
}

#[tokio::test]
async fn non_json_error_body_is_http_error() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/network/list")
        .with_status(502)
        .with_body("bad gateway")
        .create_async()
        .await;

    let transport = HttpTransport::default_for(server.url()).unwrap();
    let err = transport.send("/network/list", json!({})).await.unwrap_err();

    assert!(matches!(err, TransportError::Http(ref msg) if msg == "HTTP 502: bad gateway"));
    assert!(err.is_retryable());
}

#[tokio::test]
async fn ok_status_with_non_json_content_type_is_http_error() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/network/list")
        .with_status(200)
        .with_header("content-type", "text/plain")
        .with_body(json!({"network_identifiers": []}).to_string())
        .create_async()
        .await;

    let transport = HttpTransport::default_for(server.url()).unwrap();
    let err = transport.send("/network/list", json!({})).await.unwrap_err();

    assert!(matches!(err, TransportError::Http(ref msg) if msg.contains("text/plain")));
    assert!(err.is_retryable());
}

#[tokio::test]
async fn connection_refused_is_retryable() {
    // Reserve a free port, then release it so nothing is listening.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let transport = HttpTransport::default_for(format!("http://{addr}")).unwrap();
    let err = transport.send("/network/list", json!({})).await.unwrap_err();
    assert!(err.is_retryable());
}
