//! CLI channel: stdin/stdout REPL for trying the bot locally.
//!
//! Media replies are reported by file name and size instead of being shown.

use async_trait::async_trait;
use futures::stream;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::assets::Asset;
use crate::channels::{Channel, IncomingMessage, MessageStream};
use crate::dispatch::TextFormat;
use crate::error::ChannelError;

/// A simple CLI channel that reads from stdin and writes to stdout.
#[derive(Debug, Default)]
pub struct CliChannel;

impl CliChannel {
    pub fn new() -> Self {
        Self
    }
}

/// One-line description of an asset reply.
fn describe(label: &str, asset: &Asset) -> String {
    format!("[{label}] {} ({} bytes)", asset.file_name(), asset.bytes.len())
}

#[async_trait]
impl Channel for CliChannel {
    fn name(&self) -> &str {
        "cli"
    }

    async fn start(&self) -> Result<MessageStream, ChannelError> {
        let (tx, rx) = tokio::sync::mpsc::unbounded_channel();

        tokio::spawn(async move {
            let stdin = tokio::io::stdin();
            let reader = BufReader::new(stdin);
            let mut lines = reader.lines();

            // Print prompt
            eprint!("> ");

            loop {
                match lines.next_line().await {
                    Ok(Some(line)) => {
                        if line.trim().is_empty() {
                            eprint!("> ");
                            continue;
                        }
                        let msg = IncomingMessage::new("cli", "local", line)
                            .with_user_name("local-user");
                        if tx.send(msg).is_err() {
                            break;
                        }
                    }
                    Ok(None) => break, // EOF
                    Err(e) => {
                        tracing::error!("Error reading stdin: {}", e);
                        break;
                    }
                }
            }
        });

        let stream = stream::unfold(rx, |mut rx| async move {
            rx.recv().await.map(|msg| (msg, rx))
        });

        Ok(Box::pin(stream))
    }

    async fn send_text(
        &self,
        _chat_id: &str,
        body: &str,
        _format: TextFormat,
    ) -> Result<(), ChannelError> {
        println!("\n{body}\n");
        eprint!("> ");
        Ok(())
    }

    async fn send_photo(&self, _chat_id: &str, asset: &Asset) -> Result<(), ChannelError> {
        println!("{}", describe("image", asset));
        eprint!("> ");
        Ok(())
    }

    async fn send_audio(&self, _chat_id: &str, asset: &Asset) -> Result<(), ChannelError> {
        println!("{}", describe("audio", asset));
        eprint!("> ");
        Ok(())
    }
}
