//! Minimal HTTP responder serving canned JSON bodies to the adapters.

use std::sync::{Arc, Mutex};

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// A local server answering every request with the same response.
#[derive(Debug)]
pub struct CannedServer {
    /// Base URL, e.g. `http://127.0.0.1:41234`.
    pub base_url: String,
    request_lines: Arc<Mutex<Vec<String>>>,
}

impl CannedServer {
    /// Bind to an ephemeral port and answer with `status` and `body`.
    ///
    /// Must be called from within a Tokio runtime; the accept loop runs as
    /// a spawned task on that runtime.
    pub async fn start(status: u16, body: &'static str) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .unwrap_or_else(|err| panic!("failed to bind test listener: {err}"));
        let address = listener
            .local_addr()
            .unwrap_or_else(|err| panic!("listener has no address: {err}"));
        let request_lines = Arc::new(Mutex::new(Vec::new()));
        let recorded = Arc::clone(&request_lines);

        tokio::spawn(async move {
            while let Ok((mut socket, _)) = listener.accept().await {
                let mut buffer = vec![0_u8; 16 * 1024];
                let read = socket.read(&mut buffer).await.unwrap_or(0);
                let head = String::from_utf8_lossy(buffer.get(..read).unwrap_or_default());
                if let Some(line) = head.lines().next() {
                    recorded
                        .lock()
                        .unwrap_or_else(|err| panic!("request log poisoned: {err}"))
                        .push(line.to_owned());
                }
                let response = format!(
                    "HTTP/1.1 {status} {}\r\nContent-Type: application/json\r\n\
                     Content-Length: {}\r\nConnection: close\r\n\r\n{body}",
                    reason(status),
                    body.len()
                );
                if socket.write_all(response.as_bytes()).await.is_ok() {
                    socket.shutdown().await.ok();
                }
            }
        });

        Self {
            base_url: format!("http://{address}"),
            request_lines,
        }
    }

    /// First line of every request received, e.g. `GET /path?query HTTP/1.1`.
    pub fn request_lines(&self) -> Vec<String> {
        self.request_lines
            .lock()
            .unwrap_or_else(|err| panic!("request log poisoned: {err}"))
            .clone()
    }
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        429 => "Too Many Requests",
        500 => "Internal Server Error",
        _ => "Unknown",
    }
}

/// Run `future` to completion on a fresh single-threaded runtime.
pub fn block_on<F: std::future::Future>(future: F) -> F::Output {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap_or_else(|err| panic!("failed to build test runtime: {err}"))
        .block_on(future)
}
