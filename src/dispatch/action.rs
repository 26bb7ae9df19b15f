//! Dispatcher output.

use crate::assets::Asset;

/// Markup hint passed through to the transport unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextFormat {
    Plain,
    /// Lightweight markup: `*bold*` and `` `fixed-width` `` spans.
    Markdown,
}

/// A fixed text reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextReply {
    pub body: String,
    pub format: TextFormat,
}

impl TextReply {
    pub fn plain(body: impl Into<String>) -> Self {
        Self {
            body: body.into(),
            format: TextFormat::Plain,
        }
    }

    pub fn markdown(body: impl Into<String>) -> Self {
        Self {
            body: body.into(),
            format: TextFormat::Markdown,
        }
    }
}

/// What to send back for one inbound message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Send nothing.
    NoOp,
    SendText(TextReply),
    SendImage(Asset),
    SendAudio(Asset),
    /// Image first, then audio. At least one leg is present.
    Composite {
        image: Option<Asset>,
        audio: Option<Asset>,
    },
}

impl Action {
    /// Page image plus recitation. Collapses to `NoOp` when both are absent.
    pub fn page(image: Option<Asset>, audio: Option<Asset>) -> Self {
        if image.is_none() && audio.is_none() {
            Action::NoOp
        } else {
            Action::Composite { image, audio }
        }
    }

    /// Recitation only. Collapses to `NoOp` when absent.
    pub fn recitation(audio: Option<Asset>) -> Self {
        audio.map_or(Action::NoOp, Action::SendAudio)
    }

    pub fn is_noop(&self) -> bool {
        matches!(self, Action::NoOp)
    }

    /// Text body, if this is a text reply.
    pub fn text(&self) -> Option<&TextReply> {
        match self {
            Action::SendText(reply) => Some(reply),
            _ => None,
        }
    }
}
