//! Vitrine Mock - in-process content API
//!
//! A small stand-in for the repository content API and its raw mirror,
//! served on an ephemeral port. Used by integration tests and for local
//! development of the admin tool.

pub mod api;
pub mod state;

pub use api::router;
pub use state::{MockState, RawRequest};

use std::net::SocketAddr;
use std::sync::Arc;
use tokio::task::JoinHandle;

/// A running mock server
pub struct MockServer {
    pub addr: SocketAddr,
    pub state: Arc<MockState>,
    handle: JoinHandle<()>,
}

impl MockServer {
    /// Bind `127.0.0.1:0` and serve `state` in the background
    pub async fn start(state: MockState) -> std::io::Result<Self> {
        let state = Arc::new(state);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let app = router(state.clone());

        let handle = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                tracing::error!("Mock server error: {}", e);
            }
        });
        tracing::debug!(%addr, "Mock content API listening");

        Ok(Self {
            addr,
            state,
            handle,
        })
    }

    /// Base URL to use as the API base
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Base URL of the raw mirror
    pub fn raw_url(&self) -> String {
        format!("http://{}/raw", self.addr)
    }
}

impl Drop for MockServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
