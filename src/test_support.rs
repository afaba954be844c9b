//! Lokální HTTP stub pro testy pipeline

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

#[derive(Clone)]
pub struct StubResponse {
    status_line: &'static str,
    body:        String,
}

impl StubResponse {
    pub fn ok(body: &str) -> Self {
        Self { status_line: "200 OK", body: body.to_string() }
    }

    pub fn status(status_line: &'static str) -> Self {
        Self { status_line, body: String::new() }
    }
}

pub struct Stub {
    addr: std::net::SocketAddr,
    hits: Arc<AtomicUsize>,
}

impl Stub {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

/// Odpovídá stále stejně na každé spojení, počítá požadavky
pub async fn serve(response: StubResponse) -> Stub {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let hits = Arc::new(AtomicUsize::new(0));
    let counter = hits.clone();

    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            let mut buf = vec![0u8; 8192];
            let _ = socket.read(&mut buf).await;
            counter.fetch_add(1, Ordering::SeqCst);

            let head = format!(
                "HTTP/1.1 {}\r\nContent-Type: text/html; charset=utf-8\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                response.status_line,
                response.body.len()
            );
            let _ = socket.write_all(head.as_bytes()).await;
            let _ = socket.write_all(response.body.as_bytes()).await;
            let _ = socket.shutdown().await;
        }
    });

    Stub { addr, hits }
}
