//! Message loop: pulls inbound text from a channel, dispatches it, and sends
//! the resulting action back.
//!
//! Each message is handled on its own task, so a slow asset read or upload
//! never holds up other chats.

use std::sync::Arc;

use futures::StreamExt;
use tracing::{debug, info, warn};

use crate::channels::{Channel, IncomingMessage};
use crate::dispatch::{Action, Dispatcher};
use crate::error::ChannelError;

pub struct Bot {
    dispatcher: Arc<Dispatcher>,
    channel: Arc<dyn Channel>,
}

impl Bot {
    pub fn new(dispatcher: Arc<Dispatcher>, channel: Arc<dyn Channel>) -> Self {
        Self {
            dispatcher,
            channel,
        }
    }

    /// Run until the channel's message stream ends.
    pub async fn run(&self) -> Result<(), ChannelError> {
        if let Err(e) = self.channel.health_check().await {
            warn!(channel = self.channel.name(), error = %e, "Channel health check failed");
        }

        let mut messages = self.channel.start().await?;
        info!(channel = self.channel.name(), "Bot started");

        while let Some(message) = messages.next().await {
            let dispatcher = Arc::clone(&self.dispatcher);
            let channel = Arc::clone(&self.channel);
            tokio::spawn(async move {
                handle_message(&dispatcher, channel.as_ref(), &message).await;
            });
        }

        info!(channel = self.channel.name(), "Message stream ended");
        Ok(())
    }
}

/// Dispatch one message and deliver the action. Send failures are logged,
/// never retried.
pub async fn handle_message(
    dispatcher: &Dispatcher,
    channel: &dyn Channel,
    message: &IncomingMessage,
) {
    debug!(
        channel = %message.channel,
        chat_id = %message.chat_id,
        user_id = message.user_id.as_deref().unwrap_or("-"),
        user = message.user_name.as_deref().unwrap_or("-"),
        "Message received"
    );

    let action = dispatcher.handle(&message.text).await;
    if action.is_noop() {
        debug!(chat_id = %message.chat_id, "No reply");
        return;
    }

    if let Err(e) = deliver(channel, &message.chat_id, &action).await {
        warn!(
            channel = channel.name(),
            chat_id = %message.chat_id,
            error = %e,
            "Failed to deliver reply"
        );
    }
}

/// Send an action through a channel. A composite sends the image first,
/// then the audio; a failed image does not stop the audio.
pub async fn deliver(
    channel: &dyn Channel,
    chat_id: &str,
    action: &Action,
) -> Result<(), ChannelError> {
    match action {
        Action::NoOp => Ok(()),
        Action::SendText(reply) => channel.send_text(chat_id, &reply.body, reply.format).await,
        Action::SendImage(asset) => channel.send_photo(chat_id, asset).await,
        Action::SendAudio(asset) => channel.send_audio(chat_id, asset).await,
        Action::Composite { image, audio } => {
            let image_result = match image {
                Some(asset) => channel.send_photo(chat_id, asset).await,
                None => Ok(()),
            };
            let audio_result = match audio {
                Some(asset) => channel.send_audio(chat_id, asset).await,
                None => Ok(()),
            };
            image_result.and(audio_result)
        }
    }
}
