//! `CoinCapHttp` and the sub-clients against a local HTTP responder.

#![cfg(feature = "http")]

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::sync::oneshot;

use coinrates::client::RatesClient;
use coinrates::error::{FetchError, RatesError};
use coinrates::shared::Interval;

const ASSET_JSON: &str = r#"{"id":"bitcoin","rank":"1","symbol":"BTC","name":"Bitcoin","supply":"17193925.0000000000000000","maxSupply":"21000000.0000000000000000","marketCapUsd":"119150835874.4699281625807300","volumeUsd24Hr":"2927959461.1750323310959460","priceUsd":"6929.8217756835584756","changePercent24Hr":"-0.8101417214350335","vwap24Hr":"7175.0663247679233209","explorer":"https://blockchain.info/"}"#;

/// Answer one request with `status` and `body`. Resolves to the raw request head.
async fn respond_once(status: u16, body: String) -> (String, oneshot::Receiver<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base_url = format!("http://{}/v2", listener.local_addr().unwrap());
    let (tx, rx) = oneshot::channel();

    tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await.unwrap();
        let mut head = Vec::new();
        let mut buf = [0u8; 1024];
        while !head.windows(4).any(|w| w == b"\r\n\r\n") {
            let n = stream.read(&mut buf).await.unwrap();
            if n == 0 {
                break;
            }
            head.extend_from_slice(&buf[..n]);
        }

        let response = format!(
            "HTTP/1.1 {} Test\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            body.len(),
            body
        );
        stream.write_all(response.as_bytes()).await.unwrap();
        let _ = stream.shutdown().await;
        let _ = tx.send(String::from_utf8_lossy(&head).into_owned());
    });

    (base_url, rx)
}

fn client(base_url: &str) -> RatesClient {
    RatesClient::builder().base_url(base_url).build().unwrap()
}

async fn detail_error(status: u16, body: &str) -> RatesError {
    let (url, _head) = respond_once(status, body.to_string()).await;
    client(&url).assets().get("bitcoin").await.unwrap_err()
}

#[tokio::test]
async fn status_codes_map_to_fetch_errors() {
    assert!(matches!(
        detail_error(404, r#"{"error":"bitcoinx not found"}"#).await,
        RatesError::Fetch(FetchError::NotFound(body)) if body.contains("bitcoinx")
    ));
    assert!(matches!(
        detail_error(401, "").await,
        RatesError::Fetch(FetchError::Unauthorized)
    ));
    assert!(matches!(
        detail_error(429, "").await,
        RatesError::Fetch(FetchError::RateLimited)
    ));
    assert!(matches!(
        detail_error(400, "bad").await,
        RatesError::Fetch(FetchError::BadRequest(_))
    ));
    assert!(matches!(
        detail_error(502, "gateway").await,
        RatesError::Fetch(FetchError::Server { status: 502, .. })
    ));
}

#[tokio::test]
async fn undecodable_body_is_request_error() {
    assert!(matches!(
        detail_error(200, "not json").await,
        RatesError::Fetch(FetchError::Request(_))
    ));
}

#[tokio::test]
async fn connection_refused_is_request_error() {
    let err = client("http://127.0.0.1:1/v2").assets().list().await.unwrap_err();
    assert!(matches!(err, RatesError::Fetch(FetchError::Request(_))));
}

#[tokio::test]
async fn asset_detail_parses_and_sends_bearer_key() {
    let (url, head) = respond_once(200, format!(r#"{{"data":{},"timestamp":1533581098863}}"#, ASSET_JSON)).await;
    let client = RatesClient::builder()
        .base_url(&url)
        .api_key("secret-key")
        .build()
        .unwrap();

    let asset = client.assets().get("bitcoin").await.unwrap();
    assert_eq!(asset.id.as_str(), "bitcoin");
    assert_eq!(asset.rank, 1);
    assert_eq!(asset.max_supply.as_deref(), Some("21000000.0000000000000000"));

    let head = head.await.unwrap().to_lowercase();
    assert!(head.starts_with("get /v2/assets/bitcoin http/1.1"));
    assert!(head.contains("authorization: bearer secret-key"));
}

#[tokio::test]
async fn asset_list_skips_invalid_entries() {
    let body = format!(
        r#"{{"data":[{},{{"id":"broken","rank":"2","symbol":null,"name":"Broken","priceUsd":"1"}}],"timestamp":1}}"#,
        ASSET_JSON
    );
    let (url, _head) = respond_once(200, body).await;

    let result = client(&url).assets().list().await.unwrap();
    assert_eq!(result.assets.len(), 1);
    assert_eq!(result.validation_errors.len(), 1);
}

#[tokio::test]
async fn history_requests_interval_and_sorts_points() {
    let body = r#"{"data":[
        {"priceUsd":"6400.1","time":1530489600000,"date":"2018-07-02T00:00:00.000Z"},
        {"priceUsd":"6379.3","time":1530403200000,"date":"2018-07-01T00:00:00.000Z"}
    ],"timestamp":1}"#;
    let (url, head) = respond_once(200, body.to_string()).await;

    let points = client(&url).history().get("bitcoin", Interval::Hour6).await.unwrap();
    assert_eq!(points.len(), 2);
    assert!(points[0].time < points[1].time);

    let head = head.await.unwrap();
    assert!(head.starts_with("GET /v2/assets/bitcoin/history?interval=h6 HTTP/1.1"));
}
