//! Telegram Bot API client and the wire types it speaks.
//!
//! Only the slice of the Bot API this bot uses: incoming updates with a
//! message or callback query, outgoing sendMessage / editMessageText /
//! answerCallbackQuery / setWebhook. Optional fields follow the API's
//! own optionality, not ours.

use std::time::Duration;

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::nav::{ButtonAction, Rendering};
use crate::transport::ChatTransport;

// ── Incoming wire types ─────────────────────────────────────────────────────

/// One update delivered to the webhook.
#[derive(Debug, Clone, Deserialize)]
pub struct Update {
    pub update_id: i64,
    #[serde(default)]
    pub message: Option<Message>,
    #[serde(default)]
    pub callback_query: Option<CallbackQuery>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Message {
    pub message_id: i64,
    pub chat: Chat,
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Chat {
    pub id: i64,
}

/// A button press. `message` is the message the keyboard was attached
/// to — absent for presses on messages the API no longer tracks.
#[derive(Debug, Clone, Deserialize)]
pub struct CallbackQuery {
    pub id: String,
    #[serde(default)]
    pub data: Option<String>,
    #[serde(default)]
    pub message: Option<Message>,
}

// ── Outgoing wire types ─────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct InlineKeyboardMarkup {
    pub inline_keyboard: Vec<Vec<InlineKeyboardButton>>,
}

/// Exactly one of `callback_data` / `url` is set per button.
#[derive(Debug, Serialize)]
pub struct InlineKeyboardButton {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub callback_data: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl From<&Rendering> for InlineKeyboardMarkup {
    fn from(rendering: &Rendering) -> Self {
        let inline_keyboard = rendering
            .keyboard
            .iter()
            .map(|row| {
                row.iter()
                    .map(|button| match &button.action {
                        ButtonAction::Callback(tag) => InlineKeyboardButton {
                            text: button.label.clone(),
                            callback_data: Some(tag.clone()),
                            url: None,
                        },
                        ButtonAction::Url(url) => InlineKeyboardButton {
                            text: button.label.clone(),
                            callback_data: None,
                            url: Some(url.clone()),
                        },
                    })
                    .collect()
            })
            .collect();
        Self { inline_keyboard }
    }
}

/// Bot API envelope: every method answers `{ok, description?, ...}`.
#[derive(Debug, Deserialize)]
struct ApiResponse {
    ok: bool,
    #[serde(default)]
    description: Option<String>,
}

// ── Client ──────────────────────────────────────────────────────────────────

/// Thin Bot API client over reqwest.
#[derive(Clone)]
pub struct TelegramClient {
    http: reqwest::Client,
    base: String,
}

impl TelegramClient {
    pub fn new(token: &str) -> Self {
        Self::with_api_root("https://api.telegram.org", token)
    }

    /// Point the client at a different API root (tests).
    pub fn with_api_root(root: &str, token: &str) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(15))
            .build()
            .unwrap_or_default();
        Self {
            http,
            base: format!("{root}/bot{token}"),
        }
    }

    /// Register the webhook endpoint with the Bot API.
    pub async fn set_webhook(&self, url: &str) -> Result<()> {
        self.call("setWebhook", json!({ "url": url })).await
    }

    async fn call(&self, method: &str, payload: serde_json::Value) -> Result<()> {
        let url = format!("{}/{}", self.base, method);
        let resp = self
            .http
            .post(&url)
            .json(&payload)
            .send()
            .await
            .with_context(|| format!("calling {method}"))?;

        let body: ApiResponse = resp
            .json()
            .await
            .with_context(|| format!("decoding {method} response"))?;
        if !body.ok {
            bail!(
                "{method} rejected: {}",
                body.description.unwrap_or_else(|| "no description".into())
            );
        }
        Ok(())
    }
}

#[async_trait]
impl ChatTransport for TelegramClient {
    async fn send(&self, chat_id: i64, rendering: &Rendering) -> Result<()> {
        self.call(
            "sendMessage",
            json!({
                "chat_id": chat_id,
                "text": rendering.text,
                "parse_mode": "Markdown",
                "reply_markup": InlineKeyboardMarkup::from(rendering),
            }),
        )
        .await
    }

    async fn edit(&self, chat_id: i64, message_id: i64, rendering: &Rendering) -> Result<()> {
        self.call(
            "editMessageText",
            json!({
                "chat_id": chat_id,
                "message_id": message_id,
                "text": rendering.text,
                "parse_mode": "Markdown",
                "reply_markup": InlineKeyboardMarkup::from(rendering),
            }),
        )
        .await
    }

    async fn ack(&self, callback_id: &str) -> Result<()> {
        self.call(
            "answerCallbackQuery",
            json!({ "callback_query_id": callback_id }),
        )
        .await
    }
}
