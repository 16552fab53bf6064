//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::sync::mpsc;

use erratic::config::RelayConfig;
use erratic::http::HttpServer;
use erratic::lifecycle::Shutdown;

/// Start the relay server on the given address and wait until it accepts.
pub async fn start_relay(proxy_addr: SocketAddr, mut config: RelayConfig) -> Shutdown {
    config.listener.bind_address = proxy_addr.to_string();

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config);
    let listener = TcpListener::bind(proxy_addr).await.unwrap();
    let server_shutdown = shutdown.subscribe();

    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    tokio::time::sleep(Duration::from_millis(300)).await;
    shutdown
}

/// Start a mock upstream that returns a fixed response with extra headers.
#[allow(dead_code)]
pub async fn start_mock_upstream(
    addr: SocketAddr,
    status: u16,
    headers: &'static [(&'static str, &'static str)],
    body: &'static str,
) {
    let listener = TcpListener::bind(addr).await.unwrap();

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    tokio::spawn(async move {
                        let _ = read_request_head(&mut socket).await;

                        let status_text = status_text(status);
                        let mut header_lines = String::new();
                        for (name, value) in headers {
                            header_lines.push_str(&format!("{name}: {value}\r\n"));
                        }
                        let response = format!(
                            "HTTP/1.1 {}\r\nContent-Length: {}\r\n{}Connection: close\r\n\r\n{}",
                            status_text,
                            body.len(),
                            header_lines,
                            body
                        );
                        let _ = socket.write_all(response.as_bytes()).await;
                        let _ = socket.shutdown().await;
                        tokio::time::sleep(Duration::from_millis(10)).await;
                    });
                }
                Err(_) => break,
            }
        }
    });
}

/// Request line and host header as seen by an upstream.
#[derive(Debug)]
#[allow(dead_code)]
pub struct CapturedRequest {
    pub method: String,
    pub path: String,
    pub host: Option<String>,
}

/// Start a mock upstream that records each request head and replies 200.
#[allow(dead_code)]
pub async fn start_capture_upstream(addr: SocketAddr) -> mpsc::UnboundedReceiver<CapturedRequest> {
    let listener = TcpListener::bind(addr).await.unwrap();
    let (tx, rx) = mpsc::unbounded_channel();

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let tx = tx.clone();
                    tokio::spawn(async move {
                        if let Some(head) = read_request_head(&mut socket).await {
                            if let Some(captured) = parse_request_head(&head) {
                                let _ = tx.send(captured);
                            }
                        }

                        let body = "ok";
                        let response = format!(
                            "HTTP/1.1 200 OK\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            body.len(),
                            body
                        );
                        let _ = socket.write_all(response.as_bytes()).await;
                        let _ = socket.shutdown().await;
                        tokio::time::sleep(Duration::from_millis(10)).await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    rx
}

#[allow(dead_code)]
async fn read_request_head(socket: &mut tokio::net::TcpStream) -> Option<Vec<u8>> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];

    while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
        match socket.read(&mut chunk).await {
            Ok(0) | Err(_) => break,
            Ok(n) => buf.extend_from_slice(&chunk[..n]),
        }
        if buf.len() > 64 * 1024 {
            break;
        }
    }

    if buf.is_empty() {
        None
    } else {
        Some(buf)
    }
}

#[allow(dead_code)]
fn parse_request_head(head: &[u8]) -> Option<CapturedRequest> {
    let head = String::from_utf8_lossy(head);
    let mut lines = head.lines();

    let request_line = lines.next()?;
    let mut parts = request_line.split_whitespace();
    let method = parts.next()?.to_string();
    let path = parts.next()?.to_string();

    let host = lines
        .filter_map(|line| line.split_once(':'))
        .find(|(name, _)| name.eq_ignore_ascii_case("host"))
        .map(|(_, value)| value.trim().to_string());

    Some(CapturedRequest { method, path, host })
}

#[allow(dead_code)]
fn status_text(status: u16) -> &'static str {
    match status {
        200 => "200 OK",
        204 => "204 No Content",
        302 => "302 Found",
        404 => "404 Not Found",
        500 => "500 Internal Server Error",
        503 => "503 Service Unavailable",
        _ => "200 OK",
    }
}
