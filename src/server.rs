//! Webhook server: delivers Telegram updates to the navigation core.
//!
//! The route surface is deliberately tiny: a liveness line, a JSON
//! health snapshot, and the update endpoint. `POST /telegram` answers
//! `200 "ok"` to every JSON body, decodable or not — Telegram
//! re-delivers on anything else, and a bad update must never wedge the
//! queue. Per-event failures are logged and absorbed here; nothing
//! below this layer crosses an HTTP status.

use std::sync::Arc;
use std::time::Instant;

use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::Value;
use tracing::{info, warn};

use crate::catalog::Catalog;
use crate::nav::{NavEvent, Navigator};
use crate::telegram::Update;
use crate::transport::ChatTransport;

/// Shared state cloned into every handler invocation.
///
/// Everything here is read-only after startup, which is what makes
/// concurrent update handling lock-free.
pub struct AppState {
    pub catalog: Arc<Catalog>,
    pub navigator: Navigator,
    pub transport: Arc<dyn ChatTransport>,
    pub started_at: Instant,
}

/// Build the axum router.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/telegram", post(webhook))
        .with_state(state)
}

/// Bind and serve until the process exits.
pub async fn start(port: u16, state: Arc<AppState>) -> anyhow::Result<()> {
    let app = router(state);
    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));
    info!("webhook server listening on http://{addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

async fn index() -> &'static str {
    "Rebar.uz bot is running"
}

async fn health(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "categories": state.catalog.categories.len(),
        "uptime_seconds": state.started_at.elapsed().as_secs_f64(),
    }))
}

/// Accept one update from Telegram.
async fn webhook(State(state): State<Arc<AppState>>, Json(body): Json<Value>) -> &'static str {
    let update: Update = match serde_json::from_value(body) {
        Ok(update) => update,
        Err(e) => {
            warn!("undecodable update: {e}");
            return "ok";
        }
    };

    handle_update(&state, update).await;
    "ok"
}

async fn handle_update(state: &AppState, update: Update) {
    // A command message: /start opens the welcome screen as a fresh message.
    if let Some(message) = update.message {
        let is_start = matches!(message.text.as_deref(), Some(t) if t.starts_with("/start"));
        if !is_start {
            return;
        }
        match state.navigator.handle(&state.catalog, NavEvent::Start) {
            Ok(rendering) => {
                if let Err(e) = state.transport.send(message.chat.id, &rendering).await {
                    warn!("sending welcome to chat {}: {e:#}", message.chat.id);
                }
            }
            Err(e) => warn!("rendering welcome: {e}"),
        }
        return;
    }

    // A button press: decode the tag, render, edit the pressed message.
    let Some(callback) = update.callback_query else {
        return;
    };
    let tag = callback.data.clone().unwrap_or_default();
    let outcome = NavEvent::parse(&tag).and_then(|event| state.navigator.handle(&state.catalog, event));

    // Answer the query either way so the client stops its spinner; on a
    // navigation error this ack is the entire (no-op) reply.
    if let Err(e) = state.transport.ack(&callback.id).await {
        warn!("answering callback {}: {e:#}", callback.id);
    }

    match outcome {
        Ok(rendering) => match callback.message {
            Some(message) => {
                if let Err(e) = state
                    .transport
                    .edit(message.chat.id, message.message_id, &rendering)
                    .await
                {
                    warn!("editing message {} in chat {}: {e:#}", message.message_id, message.chat.id);
                }
            }
            None => warn!("callback {tag:?} carries no source message, nowhere to render"),
        },
        Err(e) => warn!("ignoring event {tag:?}: {e}"),
    }
}
