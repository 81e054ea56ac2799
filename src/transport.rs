//! The seam between the navigation core and the chat service.
//!
//! The core produces [`Rendering`]s; how they reach a user is the
//! transport's business. Handlers hold an `Arc<dyn ChatTransport>`, so
//! tests swap in a recording mock and the production binary plugs in
//! [`crate::telegram::TelegramClient`].

use anyhow::Result;
use async_trait::async_trait;

use crate::nav::Rendering;

/// Delivery capability the webhook handlers call into.
#[async_trait]
pub trait ChatTransport: Send + Sync {
    /// Deliver a rendering as a new message in a chat.
    async fn send(&self, chat_id: i64, rendering: &Rendering) -> Result<()>;

    /// Replace an existing message's text and keyboard in place.
    async fn edit(&self, chat_id: i64, message_id: i64, rendering: &Rendering) -> Result<()>;

    /// Acknowledge a button press. Also the neutral no-op reply when an
    /// event cannot be handled — the client stops its spinner and the
    /// screen stays put.
    async fn ack(&self, callback_id: &str) -> Result<()>;
}
