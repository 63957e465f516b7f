//! Integration tests for the HTTP client against a canned local server

use momentum_board::client::{ClientError, DashboardClient, DashboardConfig, MacroConfig};
use momentum_board::engine::run_once;
use momentum_board::render::{MemorySink, RenderEvent};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// Request line plus body, as received
#[derive(Debug, Clone)]
struct Recorded {
    request_line: String,
    body: String,
}

/// Serve the same response to every connection
async fn serve(status: u16, body: &'static str) -> (String, Arc<Mutex<Vec<Recorded>>>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let recorded = Arc::new(Mutex::new(Vec::new()));
    let log = recorded.clone();

    tokio::spawn(async move {
        loop {
            let Ok((mut stream, _)) = listener.accept().await else {
                break;
            };
            let request = read_request(&mut stream).await;
            log.lock().unwrap().push(request);

            let response = format!(
                "HTTP/1.1 {status} Canned\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            let _ = stream.write_all(response.as_bytes()).await;
            let _ = stream.shutdown().await;
        }
    });

    (format!("http://{addr}"), recorded)
}

async fn read_request(stream: &mut tokio::net::TcpStream) -> Recorded {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];

    let header_end = loop {
        let n = stream.read(&mut chunk).await.unwrap();
        if n == 0 {
            break buf.len();
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let head = String::from_utf8_lossy(&buf[..header_end]).to_string();
    let content_length = head
        .lines()
        .find_map(|line| {
            let (name, value) = line.split_once(':')?;
            name.eq_ignore_ascii_case("content-length")
                .then(|| value.trim().parse::<usize>().ok())
                .flatten()
        })
        .unwrap_or(0);

    while buf.len() < header_end + content_length {
        let n = stream.read(&mut chunk).await.unwrap();
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
    }

    Recorded {
        request_line: head.lines().next().unwrap_or_default().to_string(),
        body: String::from_utf8_lossy(&buf[header_end..]).to_string(),
    }
}

fn client(base_url: String) -> DashboardClient {
    DashboardClient::with_config(DashboardConfig {
        base_url,
        timeout: Duration::from_secs(5),
    })
    .unwrap()
}

const SNAPSHOT: &str = r#"{"timestamp":"2026-03-02 10:00:00","status":"OPEN","summary":{"market_fear":{"status":"RISK ON","tag":"FEAR FALLING","value":"VXX: 41.20 (-1.10%)"}},"tickers":[{"ticker":"AMD","price":150.25,"gap_percent":1.2,"volume":30500000,"atr_percent":2.4,"rsi":58.1,"vwap":149.9,"trend":"UP","score":3}]}"#;

#[tokio::test]
async fn test_fetch_data() {
    let (url, recorded) = serve(200, SNAPSHOT).await;
    let snapshot = client(url).fetch_data().await.unwrap();

    assert_eq!(snapshot.instruments().len(), 1);
    assert_eq!(snapshot.view().status.as_deref(), Some("OPEN"));
    assert!(recorded.lock().unwrap()[0].request_line.starts_with("GET /data "));
}

#[tokio::test]
async fn test_non_success_status() {
    let (url, _) = serve(503, r#"{"detail":"upstream down"}"#).await;
    let err = client(url).fetch_data().await.unwrap_err();

    match err {
        ClientError::Status { status, body } => {
            assert_eq!(status, 503);
            assert!(body.contains("upstream down"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_non_object_body_is_decode_error() {
    let (url, _) = serve(200, "[1,2,3]").await;
    let err = client(url).fetch_data().await.unwrap_err();
    assert!(matches!(err, ClientError::Decode(_)));
}

#[tokio::test]
async fn test_connection_refused_is_transport_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = client(format!("http://{addr}")).fetch_data().await.unwrap_err();
    assert!(matches!(err, ClientError::Transport(_)));
}

#[tokio::test]
async fn test_update_symbols_posts_normalized_list() {
    let (url, recorded) = serve(200, r#"{"message":"ok"}"#).await;
    let sent = client(url)
        .update_symbols([" aapl", "", "msft "])
        .await
        .unwrap();

    assert_eq!(sent, vec!["AAPL", "MSFT"]);
    let request = recorded.lock().unwrap()[0].clone();
    assert!(request.request_line.starts_with("POST /symbols "));
    let body: serde_json::Value = serde_json::from_str(&request.body).unwrap();
    assert_eq!(body, serde_json::json!(["AAPL", "MSFT"]));
}

#[tokio::test]
async fn test_update_macros_posts_config() {
    let (url, recorded) = serve(200, "{}").await;
    let config = MacroConfig {
        market: "qqq".into(),
        volatility: " ".into(),
        bonds: "tlt".into(),
        dollar: "".into(),
    };
    client(url).update_macros(&config).await.unwrap();

    let request = recorded.lock().unwrap()[0].clone();
    assert!(request.request_line.starts_with("POST /config "));
    let body: serde_json::Value = serde_json::from_str(&request.body).unwrap();
    assert_eq!(
        body,
        serde_json::json!({"market": "QQQ", "volatility": "VXX", "bonds": "TLT", "dollar": "UUP"})
    );
}

#[tokio::test]
async fn test_reset_cache() {
    let (url, recorded) = serve(200, r#"{"message":"Cache cleared successfully."}"#).await;
    client(url).reset_cache().await.unwrap();
    assert!(recorded.lock().unwrap()[0]
        .request_line
        .starts_with("POST /cache/reset "));
}

#[tokio::test]
async fn test_single_cycle_renders_snapshot() {
    let (url, _) = serve(200, SNAPSHOT).await;
    let scheduler = run_once(&client(url), MemorySink::new()).await.unwrap();

    let sink = scheduler.sink();
    assert_eq!(sink.row_ops().len(), 1);
    let header = sink
        .events()
        .iter()
        .find_map(|e| match e {
            RenderEvent::Header(h) => Some(h.clone()),
            _ => None,
        })
        .unwrap();
    assert_eq!(header.timestamp.as_deref(), Some("2026-03-02 10:00:00"));
    assert_eq!(header.indicators.len(), 1);
    assert!(scheduler.last_snapshot().is_some());
}
