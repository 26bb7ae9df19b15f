//! Channel abstraction for message I/O.

pub mod cli;
pub mod telegram;

use std::pin::Pin;

use async_trait::async_trait;
use futures::Stream;

use crate::assets::Asset;
use crate::dispatch::TextFormat;
use crate::error::ChannelError;

pub use cli::CliChannel;
pub use telegram::TelegramChannel;

/// A text message received from a channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncomingMessage {
    /// Channel that delivered the message (e.g. "telegram").
    pub channel: String,
    /// Conversation to reply into.
    pub chat_id: String,
    /// Sender identity, if known.
    pub user_id: Option<String>,
    /// Display name, if known.
    pub user_name: Option<String>,
    /// Raw message text.
    pub text: String,
}

impl IncomingMessage {
    pub fn new(channel: &str, chat_id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            channel: channel.to_string(),
            chat_id: chat_id.into(),
            user_id: None,
            user_name: None,
            text: text.into(),
        }
    }

    pub fn with_user_id(mut self, id: impl Into<String>) -> Self {
        self.user_id = Some(id.into());
        self
    }

    pub fn with_user_name(mut self, name: impl Into<String>) -> Self {
        self.user_name = Some(name.into());
        self
    }
}

/// Stream of inbound messages.
pub type MessageStream = Pin<Box<dyn Stream<Item = IncomingMessage> + Send>>;

/// A messaging transport: delivers text in, sends text and media out.
#[async_trait]
pub trait Channel: Send + Sync {
    fn name(&self) -> &str;

    /// Begin receiving messages.
    async fn start(&self) -> Result<MessageStream, ChannelError>;

    /// Send a text reply; `format` is passed to the platform unchanged.
    async fn send_text(
        &self,
        chat_id: &str,
        body: &str,
        format: TextFormat,
    ) -> Result<(), ChannelError>;

    async fn send_photo(&self, chat_id: &str, asset: &Asset) -> Result<(), ChannelError>;

    async fn send_audio(&self, chat_id: &str, asset: &Asset) -> Result<(), ChannelError>;

    /// Check that the channel is reachable.
    async fn health_check(&self) -> Result<(), ChannelError> {
        Ok(())
    }
}
