//! Shared utilities for integration testing against a mock Data Plane endpoint.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde_json::{json, Value};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

/// One request as seen by the mock endpoint.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub target: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Start a mock Data Plane API endpoint serving the canned runtime-server
/// fixtures. Returns its address and the log of received requests.
pub async fn start_data_plane_mock() -> (SocketAddr, Arc<Mutex<Vec<RecordedRequest>>>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let requests = Arc::new(Mutex::new(Vec::new()));
    let log = requests.clone();

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let log = log.clone();
                    tokio::spawn(async move {
                        let Some(request) = read_request(&mut socket).await else {
                            return;
                        };
                        let (status, body) = route(&request);
                        // Record before responding so assertions never race
                        // the client's return.
                        log.lock().unwrap().push(request);

                        let status_text = match status {
                            200 => "200 OK",
                            404 => "404 Not Found",
                            500 => "500 Internal Server Error",
                            _ => "200 OK",
                        };
                        let response = format!(
                            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            status_text,
                            body.len(),
                            body
                        );
                        let _ = socket.write_all(response.as_bytes()).await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    (addr, requests)
}

/// Start a listener that accepts connections but never responds, for
/// exercising the request timeout.
pub async fn start_black_hole() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((socket, _)) => {
                    tokio::spawn(async move {
                        tokio::time::sleep(Duration::from_secs(60)).await;
                        drop(socket);
                    });
                }
                Err(_) => break,
            }
        }
    });

    addr
}

async fn read_request(socket: &mut TcpStream) -> Option<RecordedRequest> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];

    let header_end = loop {
        let n = socket.read(&mut chunk).await.ok()?;
        if n == 0 {
            return None;
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = buf.windows(4).position(|window| window == b"\r\n\r\n") {
            break pos;
        }
        if buf.len() > 64 * 1024 {
            return None;
        }
    };

    let head = String::from_utf8_lossy(&buf[..header_end]).into_owned();
    let mut lines = head.split("\r\n");
    let mut request_line = lines.next()?.split_whitespace();
    let method = request_line.next()?.to_string();
    let target = request_line.next()?.to_string();

    let headers: Vec<(String, String)> = lines
        .filter_map(|line| line.split_once(':'))
        .map(|(key, value)| (key.trim().to_string(), value.trim().to_string()))
        .collect();

    let content_length = headers
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case("content-length"))
        .and_then(|(_, value)| value.parse::<usize>().ok())
        .unwrap_or(0);

    let mut body = buf[header_end + 4..].to_vec();
    while body.len() < content_length {
        let n = socket.read(&mut chunk).await.ok()?;
        if n == 0 {
            break;
        }
        body.extend_from_slice(&chunk[..n]);
    }
    body.truncate(content_length);

    Some(RecordedRequest {
        method,
        target,
        headers,
        body: String::from_utf8_lossy(&body).into_owned(),
    })
}

fn route(request: &RecordedRequest) -> (u16, String) {
    let (path, query) = request
        .target
        .split_once('?')
        .unwrap_or((request.target.as_str(), ""));
    let backend = query
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(key, _)| *key == "backend")
        .map(|(_, value)| value)
        .unwrap_or("");

    match (request.method.as_str(), path) {
        ("GET", "/v2/services/haproxy/runtime/servers") => {
            if backend == "foo_bar" {
                (200, Value::Array(all_servers()).to_string())
            } else {
                (200, "[]".to_string())
            }
        }
        ("GET", "/v2/services/haproxy/runtime/servers/foo_bar1") if backend == "foo_bar" => {
            (200, server_json("foo_bar1", "12.0.5.102").to_string())
        }
        ("PUT", "/v2/services/haproxy/runtime/servers/foo_bar1") if backend == "foo_bar" => {
            let mut server = server_json("foo_bar1", "12.0.5.102");
            if let Ok(Value::Object(settings)) = serde_json::from_str(&request.body) {
                if let Value::Object(fields) = &mut server {
                    for (key, value) in settings {
                        fields.insert(key, value);
                    }
                }
            }
            (200, server.to_string())
        }
        (_, path) if path.starts_with("/v2/services/haproxy/runtime/servers/") => {
            let name = path.rsplit('/').next().unwrap_or("");
            let body = json!({
                "code": 500,
                "message": format!("no data for {backend}/{name}: not found")
            });
            (500, body.to_string())
        }
        _ => (404, json!({"code": 404, "message": "not found"}).to_string()),
    }
}

fn all_servers() -> Vec<Value> {
    vec![
        server_json("foo_bar1", "12.0.5.102"),
        server_json("foo_bar2", "12.0.5.103"),
    ]
}

fn server_json(name: &str, address: &str) -> Value {
    json!({
        "admin_state": "ready",
        "operational_state": "up",
        "name": name,
        "address": address,
        "port": 4512
    })
}
