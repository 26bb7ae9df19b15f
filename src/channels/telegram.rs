//! Telegram channel that long-polls the Bot API for updates.
//!
//! Only plain text messages are forwarded. Replies go out through
//! `sendMessage`, `sendPhoto` and `sendAudio`.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use crate::assets::Asset;
use crate::channels::{Channel, IncomingMessage, MessageStream};
use crate::dispatch::TextFormat;
use crate::error::ChannelError;

/// Maximum message length for Telegram's sendMessage API.
const TELEGRAM_MAX_MESSAGE_LENGTH: usize = 4096;

const DEFAULT_API_BASE: &str = "https://api.telegram.org";

/// Long-poll timeout passed to getUpdates, in seconds.
const POLL_TIMEOUT_SECS: u64 = 30;

/// Pause after a failed poll before trying again.
const POLL_BACKOFF: Duration = Duration::from_secs(5);

// ── Bot API payloads ────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct UpdatesResponse {
    #[serde(default)]
    ok: bool,
    #[serde(default)]
    result: Vec<Update>,
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Update {
    update_id: i64,
    message: Option<TgMessage>,
}

#[derive(Debug, Deserialize)]
struct TgMessage {
    chat: TgChat,
    from: Option<TgUser>,
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TgChat {
    id: i64,
}

#[derive(Debug, Deserialize)]
struct TgUser {
    id: i64,
    username: Option<String>,
    first_name: Option<String>,
}

impl Update {
    /// Convert to an inbound message; `None` for non-text updates.
    fn into_incoming(self) -> Option<IncomingMessage> {
        let message = self.message?;
        let text = message.text?;

        let mut incoming = IncomingMessage::new("telegram", message.chat.id.to_string(), text);
        if let Some(from) = message.from {
            incoming = incoming.with_user_id(from.id.to_string());
            if let Some(name) = from.first_name.or(from.username) {
                incoming = incoming.with_user_name(name);
            }
        }
        Some(incoming)
    }
}

// ── Channel ─────────────────────────────────────────────────────────

/// Telegram channel, connected to the Bot API via long-polling.
pub struct TelegramChannel {
    bot_token: SecretString,
    api_base: String,
    client: reqwest::Client,
}

impl TelegramChannel {
    pub fn new(bot_token: SecretString) -> Self {
        Self::with_api_base(bot_token, DEFAULT_API_BASE)
    }

    /// Use a different Bot API server (self-hosted server or test double).
    pub fn with_api_base(bot_token: SecretString, api_base: impl Into<String>) -> Self {
        Self {
            bot_token,
            api_base: api_base.into().trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    fn api_url(&self, method: &str) -> String {
        api_url(&self.api_base, &self.bot_token, method)
    }

    fn send_failed(reason: impl Into<String>) -> ChannelError {
        ChannelError::SendFailed {
            name: "telegram".into(),
            reason: reason.into(),
        }
    }

    /// Send a text message, splitting bodies over Telegram's length limit.
    async fn send_message(
        &self,
        chat_id: &str,
        text: &str,
        format: TextFormat,
    ) -> Result<(), ChannelError> {
        for chunk in split_message(text, TELEGRAM_MAX_MESSAGE_LENGTH) {
            self.send_message_chunk(chat_id, &chunk, format).await?;
        }
        Ok(())
    }

    /// Send one chunk. Markdown chunks fall back to plain text if Telegram
    /// rejects the markup.
    async fn send_message_chunk(
        &self,
        chat_id: &str,
        text: &str,
        format: TextFormat,
    ) -> Result<(), ChannelError> {
        if format == TextFormat::Markdown {
            let markdown_body = serde_json::json!({
                "chat_id": chat_id,
                "text": text,
                "parse_mode": "Markdown"
            });

            let markdown_resp = self
                .client
                .post(self.api_url("sendMessage"))
                .json(&markdown_body)
                .send()
                .await
                .map_err(|e| Self::send_failed(e.without_url().to_string()))?;

            if markdown_resp.status().is_success() {
                return Ok(());
            }

            tracing::warn!(
                status = ?markdown_resp.status(),
                "Telegram sendMessage with Markdown failed; retrying without parse_mode"
            );
        }

        let plain_body = serde_json::json!({
            "chat_id": chat_id,
            "text": text,
        });
        let plain_resp = self
            .client
            .post(self.api_url("sendMessage"))
            .json(&plain_body)
            .send()
            .await
            .map_err(|e| Self::send_failed(e.without_url().to_string()))?;

        if !plain_resp.status().is_success() {
            let status = plain_resp.status();
            let err = plain_resp.text().await.unwrap_or_default();
            return Err(Self::send_failed(format!("sendMessage failed ({status}): {err}")));
        }

        Ok(())
    }

    /// Upload in-memory bytes as a multipart file field.
    async fn send_file(
        &self,
        method: &str,
        field: &'static str,
        chat_id: &str,
        asset: &Asset,
    ) -> Result<(), ChannelError> {
        let file_name = asset.file_name();
        let part = Part::bytes(asset.bytes.clone()).file_name(file_name.clone());
        let form = Form::new()
            .text("chat_id", chat_id.to_string())
            .part(field, part);

        let resp = self
            .client
            .post(self.api_url(method))
            .multipart(form)
            .send()
            .await
            .map_err(|e| Self::send_failed(e.without_url().to_string()))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let err = resp.text().await.unwrap_or_default();
            return Err(Self::send_failed(format!("{method} failed ({status}): {err}")));
        }

        tracing::info!(chat_id, file = %file_name, "Telegram {field} sent");
        Ok(())
    }
}

#[async_trait]
impl Channel for TelegramChannel {
    fn name(&self) -> &str {
        "telegram"
    }

    async fn start(&self) -> Result<MessageStream, ChannelError> {
        let (tx, rx) = tokio::sync::mpsc::unbounded_channel();
        let url = self.api_url("getUpdates");
        let client = self.client.clone();

        tokio::spawn(async move {
            let mut offset: i64 = 0;

            tracing::info!("Telegram channel listening for messages...");

            loop {
                let body = serde_json::json!({
                    "offset": offset,
                    "timeout": POLL_TIMEOUT_SECS,
                    "allowed_updates": ["message"]
                });

                let resp = match client.post(&url).json(&body).send().await {
                    Ok(r) => r,
                    Err(e) => {
                        // reqwest errors can embed the URL, which carries the token.
                        tracing::warn!("Telegram poll error: {}", e.without_url());
                        tokio::time::sleep(POLL_BACKOFF).await;
                        continue;
                    }
                };

                let data: UpdatesResponse = match resp.json().await {
                    Ok(d) => d,
                    Err(e) => {
                        tracing::warn!("Telegram parse error: {}", e.without_url());
                        tokio::time::sleep(POLL_BACKOFF).await;
                        continue;
                    }
                };

                if !data.ok {
                    tracing::warn!(
                        description = data.description.as_deref().unwrap_or("unknown"),
                        "Telegram getUpdates returned an error"
                    );
                    tokio::time::sleep(POLL_BACKOFF).await;
                    continue;
                }

                for update in data.result {
                    offset = next_offset(offset, update.update_id);

                    let Some(incoming) = update.into_incoming() else {
                        continue;
                    };

                    if tx.send(incoming).is_err() {
                        tracing::info!("Telegram listener channel closed");
                        return;
                    }
                }
            }
        });

        let stream = futures::stream::unfold(rx, |mut rx| async move {
            rx.recv().await.map(|msg| (msg, rx))
        });

        Ok(Box::pin(stream))
    }

    async fn send_text(
        &self,
        chat_id: &str,
        body: &str,
        format: TextFormat,
    ) -> Result<(), ChannelError> {
        self.send_message(chat_id, body, format).await
    }

    async fn send_photo(&self, chat_id: &str, asset: &Asset) -> Result<(), ChannelError> {
        self.send_file("sendPhoto", "photo", chat_id, asset).await
    }

    async fn send_audio(&self, chat_id: &str, asset: &Asset) -> Result<(), ChannelError> {
        self.send_file("sendAudio", "audio", chat_id, asset).await
    }

    async fn health_check(&self) -> Result<(), ChannelError> {
        let resp = self
            .client
            .get(self.api_url("getMe"))
            .send()
            .await
            .map_err(|e| ChannelError::StartupFailed {
                name: "telegram".into(),
                reason: e.without_url().to_string(),
            })?;

        if resp.status().is_success() {
            Ok(())
        } else {
            Err(ChannelError::StartupFailed {
                name: "telegram".into(),
                reason: format!("getMe returned {}", resp.status()),
            })
        }
    }
}

// ── Helpers ─────────────────────────────────────────────────────────

fn api_url(api_base: &str, token: &SecretString, method: &str) -> String {
    format!("{api_base}/bot{}/{method}", token.expose_secret())
}

/// Offset for the next getUpdates call: one past the highest update seen.
fn next_offset(current: i64, update_id: i64) -> i64 {
    current.max(update_id + 1)
}

/// Split a message into chunks of at most `max_len` bytes.
/// Tries to split on newlines, then spaces, then hard-cuts on a char boundary.
fn split_message(text: &str, max_len: usize) -> Vec<String> {
    if text.len() <= max_len {
        return vec![text.to_string()];
    }

    let mut chunks = Vec::new();
    let mut remaining = text;

    while !remaining.is_empty() {
        if remaining.len() <= max_len {
            chunks.push(remaining.to_string());
            break;
        }

        let mut limit = max_len;
        while !remaining.is_char_boundary(limit) {
            limit -= 1;
        }

        // Find a good split point
        let chunk = &remaining[..limit];
        let split_at = chunk
            .rfind('\n')
            .or_else(|| chunk.rfind(' '))
            .unwrap_or(limit);

        // Don't split at position 0 (infinite loop guard)
        let split_at = if split_at == 0 { limit } else { split_at };

        chunks.push(remaining[..split_at].to_string());
        remaining = remaining[split_at..].trim_start();
    }

    chunks
}

// ── Tests ───────────────────────────────────────────────────────────
