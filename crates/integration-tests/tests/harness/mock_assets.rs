//! Mock asset server for integration tests
//!
//! Serves a small PNG plus routes that misbehave in the ways image downloads
//! have to survive: missing objects, oversized and chunked bodies, slow
//! responses and redirects.

use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use axum::body::Body;
use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Redirect, Response};
use axum::{Router, routing};
use tokio_util::sync::CancellationToken;

/// Bytes served at `/images/pixel.png`
pub const PIXEL_PNG: &[u8] = b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR\0\0\0\x01\0\0\0\x01";

/// Size of the bodies served at `/images/large.png` and `/images/chunked.png`
pub const LARGE_BODY_LEN: usize = 64 * 1024;

/// Mock asset host that counts the requests it receives
pub struct MockAssets {
    addr: SocketAddr,
    shutdown: CancellationToken,
    state: Arc<MockAssetsState>,
}

struct MockAssetsState {
    request_count: AtomicU32,
    port: u16,
}

impl MockAssets {
    /// Start the mock server, returning immediately
    pub async fn start() -> anyhow::Result<Self> {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;

        let state = Arc::new(MockAssetsState {
            request_count: AtomicU32::new(0),
            port: addr.port(),
        });

        let app = Router::new()
            .route("/images/pixel.png", routing::get(handle_pixel))
            .route("/images/large.png", routing::get(handle_large))
            .route("/images/chunked.png", routing::get(handle_chunked))
            .route("/images/slow.png", routing::get(handle_slow))
            .route("/images/empty.png", routing::get(handle_empty))
            .route("/redirect/local", routing::get(handle_redirect_local))
            .route("/redirect/external", routing::get(handle_redirect_external))
            .fallback(handle_missing)
            .with_state(Arc::clone(&state));

        let shutdown = CancellationToken::new();
        let shutdown_clone = shutdown.clone();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    shutdown_clone.cancelled().await;
                })
                .await
                .ok();
        });

        Ok(Self { addr, shutdown, state })
    }

    /// Absolute URL of `path` on this server
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{path}", self.addr)
    }

    /// Number of requests received
    pub fn request_count(&self) -> u32 {
        self.state.request_count.load(Ordering::Relaxed)
    }
}

impl Drop for MockAssets {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

fn count(state: &MockAssetsState) {
    state.request_count.fetch_add(1, Ordering::Relaxed);
}

async fn handle_pixel(State(state): State<Arc<MockAssetsState>>) -> impl IntoResponse {
    count(&state);
    ([(header::CONTENT_TYPE, "image/png")], PIXEL_PNG)
}

async fn handle_large(State(state): State<Arc<MockAssetsState>>) -> impl IntoResponse {
    count(&state);
    ([(header::CONTENT_TYPE, "image/png")], vec![0u8; LARGE_BODY_LEN])
}

/// Body of unknown length, sent in 4 KiB chunks
async fn handle_chunked(State(state): State<Arc<MockAssetsState>>) -> Response {
    count(&state);
    let chunks = (0..LARGE_BODY_LEN / 4096).map(|_| Ok::<_, Infallible>(vec![0u8; 4096]));
    Body::from_stream(futures_util::stream::iter(chunks)).into_response()
}

async fn handle_slow(State(state): State<Arc<MockAssetsState>>) -> impl IntoResponse {
    count(&state);
    tokio::time::sleep(Duration::from_secs(5)).await;
    PIXEL_PNG
}

async fn handle_empty(State(state): State<Arc<MockAssetsState>>) -> impl IntoResponse {
    count(&state);
    StatusCode::OK
}

async fn handle_redirect_local(State(state): State<Arc<MockAssetsState>>) -> impl IntoResponse {
    count(&state);
    Redirect::temporary("/images/pixel.png")
}

/// Redirect to the same server under the name `localhost`
async fn handle_redirect_external(State(state): State<Arc<MockAssetsState>>) -> impl IntoResponse {
    count(&state);
    Redirect::temporary(&format!("http://localhost:{}/images/pixel.png", state.port))
}

async fn handle_missing(State(state): State<Arc<MockAssetsState>>) -> impl IntoResponse {
    count(&state);
    StatusCode::NOT_FOUND
}
