//! Loopback stand-in for the external provisioning service.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use serde_json::Value;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Canned answer returned for every submission.
#[derive(Debug, Clone)]
pub struct CannedReply {
    status: StatusCode,
    body: &'static str,
    delay: Duration,
}

impl CannedReply {
    /// Answers with `status` and a JSON `body`.
    #[must_use]
    pub const fn new(status: StatusCode, body: &'static str) -> Self {
        Self {
            status,
            body,
            delay: Duration::ZERO,
        }
    }

    /// Holds each answer back for `delay`.
    #[must_use]
    pub const fn after(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

#[derive(Clone)]
struct StubState {
    reply: CannedReply,
    received: Arc<Mutex<Vec<Value>>>,
}

async fn submit(State(state): State<StubState>, Json(body): Json<Value>) -> Response {
    state
        .received
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .push(body);
    tokio::time::sleep(state.reply.delay).await;
    (
        state.reply.status,
        [(header::CONTENT_TYPE, "application/json")],
        state.reply.body,
    )
        .into_response()
}

/// A running stub; the server stops when this value is dropped.
pub struct StubProvider {
    base_url: String,
    received: Arc<Mutex<Vec<Value>>>,
    server: JoinHandle<()>,
}

impl StubProvider {
    /// Serves `reply` at `POST /deployments` on an ephemeral loopback port.
    ///
    /// # Panics
    ///
    /// Panics if the loopback listener cannot be bound.
    pub async fn start(reply: CannedReply) -> Self {
        let received = Arc::new(Mutex::new(Vec::new()));
        let app = Router::new()
            .route("/deployments", post(submit))
            .with_state(StubState {
                reply,
                received: received.clone(),
            });
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("loopback listener should bind");
        let address = listener
            .local_addr()
            .expect("listener should report its address");
        let server = tokio::spawn(async move {
            if let Err(err) = axum::serve(listener, app).await {
                tracing::warn!(error = %err, "stub provisioning server stopped");
            }
        });

        Self {
            base_url: format!("http://{address}/"),
            received,
            server,
        }
    }

    /// Base URL the client should be pointed at.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// JSON bodies received so far, oldest first.
    #[must_use]
    pub fn received(&self) -> Vec<Value> {
        self.received
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Drop for StubProvider {
    fn drop(&mut self) {
        self.server.abort();
    }
}
