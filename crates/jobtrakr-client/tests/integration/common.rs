use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;

/// How the fixture server answers every connection.
#[derive(Clone)]
pub enum Behavior {
    Respond {
        status: u16,
        headers: Vec<(String, String)>,
        body: String,
    },
    /// Accept the connection and never answer.
    Hang,
}

impl Behavior {
    pub fn html(status: u16, body: &str) -> Self {
        Behavior::Respond {
            status,
            headers: vec![("Content-Type".into(), "text/html; charset=utf-8".into())],
            body: body.to_string(),
        }
    }

    pub fn redirect(location: &str) -> Self {
        Behavior::Respond {
            status: 302,
            headers: vec![("Location".into(), location.to_string())],
            body: String::new(),
        }
    }
}

/// A local HTTP/1.1 server on an ephemeral port.
pub struct FixtureServer {
    pub addr: SocketAddr,
    hits: Arc<AtomicUsize>,
    requests: Arc<Mutex<Vec<String>>>,
    handle: JoinHandle<()>,
}

impl FixtureServer {
    pub async fn spawn(behavior: Behavior) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let hits = Arc::new(AtomicUsize::new(0));
        let requests = Arc::new(Mutex::new(Vec::new()));

        let handle = tokio::spawn({
            let hits = Arc::clone(&hits);
            let requests = Arc::clone(&requests);
            async move {
                while let Ok((socket, _)) = listener.accept().await {
                    hits.fetch_add(1, Ordering::SeqCst);
                    tokio::spawn(serve(socket, behavior.clone(), Arc::clone(&requests)));
                }
            }
        });

        Self {
            addr,
            hits,
            requests,
            handle,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

impl Drop for FixtureServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn serve(mut socket: TcpStream, behavior: Behavior, requests: Arc<Mutex<Vec<String>>>) {
    let head = read_request_head(&mut socket).await;
    requests.lock().unwrap().push(head);

    match behavior {
        Behavior::Respond {
            status,
            headers,
            body,
        } => {
            let mut response = format!("HTTP/1.1 {status} Fixture\r\n");
            for (name, value) in headers {
                response.push_str(&format!("{name}: {value}\r\n"));
            }
            response.push_str(&format!(
                "Content-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            ));
            let _ = socket.write_all(response.as_bytes()).await;
            let _ = socket.shutdown().await;
        }
        Behavior::Hang => {
            tokio::time::sleep(Duration::from_secs(60)).await;
        }
    }
}

async fn read_request_head(socket: &mut TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    loop {
        match socket.read(&mut chunk).await {
            Ok(0) | Err(_) => break,
            Ok(n) => {
                buf.extend_from_slice(&chunk[..n]);
                if buf.windows(4).any(|w| w == b"\r\n\r\n") {
                    break;
                }
            }
        }
    }
    String::from_utf8_lossy(&buf).into_owned()
}

/// An address with nothing listening on it.
pub async fn refused_addr() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    addr
}

pub const LINKEDIN_PAGE: &str = r#"<!DOCTYPE html>
<html>
<head>
  <title>Senior Rust Engineer | Globex | LinkedIn</title>
  <meta property="og:title" content="Globex hiring Senior Rust Engineer in Berlin">
</head>
<body>
  <h1 class="top-card-layout__title">
    Senior Rust Engineer
    (Hybrid) - R-20931
  </h1>
  <a class="topcard__org-name-link" href="/company/globex">Globex · Berlin</a>
  <ul class="description__job-criteria-list">
    <li class="description__job-criteria-text">Mid-Senior level</li>
    <li class="description__job-criteria-text">Full-time</li>
  </ul>
</body>
</html>"#;
