#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// What the stub answers for a route.
#[derive(Clone, Debug)]
pub enum Reply {
    Status(u16),
    Body(u16, String),
    Delayed(u64, u16),
    Redirect(u16, String),
    /// 200 whose headers go out after the first delay and body after the second.
    Trickle(u64, u64, String),
    /// Accept the connection and never answer.
    Hang,
}

/// Minimal HTTP/1.1 server: routes by path prefix, records request heads.
pub struct StubServer {
    pub base: String,
    requests: Arc<Mutex<Vec<String>>>,
}

impl StubServer {
    pub async fn start(routes: Vec<(&str, Reply)>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind stub");
        let base = format!("http://{}", listener.local_addr().expect("stub addr"));
        let routes: Arc<Vec<(String, Reply)>> =
            Arc::new(routes.into_iter().map(|(p, r)| (p.to_string(), r)).collect());
        let requests = Arc::new(Mutex::new(Vec::new()));

        let log = requests.clone();
        tokio::spawn(async move {
            loop {
                let Ok((mut sock, _)) = listener.accept().await else { break };
                let routes = routes.clone();
                let log = log.clone();
                tokio::spawn(async move {
                    let mut buf = Vec::new();
                    let mut chunk = [0u8; 2048];
                    loop {
                        match sock.read(&mut chunk).await {
                            Ok(0) | Err(_) => return,
                            Ok(n) => buf.extend_from_slice(&chunk[..n]),
                        }
                        if buf.windows(4).any(|w| w == b"\r\n\r\n") || buf.len() > 16 * 1024 {
                            break;
                        }
                    }
                    let head = String::from_utf8_lossy(&buf).to_string();
                    let path = head.split_whitespace().nth(1).unwrap_or("/").to_string();
                    log.lock().unwrap().push(head);

                    let reply = routes
                        .iter()
                        .find(|(prefix, _)| path.starts_with(prefix.as_str()))
                        .map(|(_, r)| r.clone())
                        .unwrap_or(Reply::Status(404));

                    let (status, headers, body) = match reply {
                        Reply::Status(s) => (s, String::new(), String::new()),
                        Reply::Body(s, b) => (s, "Content-Type: application/json\r\n".to_string(), b),
                        Reply::Delayed(ms, s) => {
                            tokio::time::sleep(Duration::from_millis(ms)).await;
                            (s, String::new(), String::new())
                        }
                        Reply::Redirect(s, loc) => (s, format!("Location: {loc}\r\n"), String::new()),
                        Reply::Trickle(head_ms, body_ms, body) => {
                            tokio::time::sleep(Duration::from_millis(head_ms)).await;
                            let head = format!(
                                "HTTP/1.1 200 Stub\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                                body.len()
                            );
                            if sock.write_all(head.as_bytes()).await.is_err() {
                                return;
                            }
                            let _ = sock.flush().await;
                            tokio::time::sleep(Duration::from_millis(body_ms)).await;
                            let _ = sock.write_all(body.as_bytes()).await;
                            let _ = sock.shutdown().await;
                            return;
                        }
                        Reply::Hang => {
                            tokio::time::sleep(Duration::from_secs(60)).await;
                            return;
                        }
                    };
                    let resp = format!(
                        "HTTP/1.1 {status} Stub\r\n{headers}Content-Length: {}\r\nConnection: close\r\n\r\n{body}",
                        body.len()
                    );
                    let _ = sock.write_all(resp.as_bytes()).await;
                    let _ = sock.shutdown().await;
                });
            }
        });

        Self { base, requests }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    /// Request heads received so far, lowercased for header matching.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().iter().map(|r| r.to_lowercase()).collect()
    }

    pub fn hits(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

/// A port with nothing listening on it.
pub fn closed_port_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind free port");
    let port = listener.local_addr().expect("addr").port();
    drop(listener);
    format!("http://127.0.0.1:{port}")
}
