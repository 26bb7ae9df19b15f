//! Intent dispatch: turns one inbound text into at most one outbound action.
//!
//! [`Dispatcher::dispatch`] never fails. Unmatched input, out-of-range page
//! numbers and missing assets all produce [`Action::NoOp`].

pub mod action;
pub mod catalogue;
pub mod commands;
pub mod rules;

use std::sync::Arc;

use tracing::debug;

pub use action::{Action, TextFormat, TextReply};
pub use commands::{Command, parse_command};
pub use rules::{Capture, Matcher, NormalizedMessage, Responder, Rule, RuleTable};

use crate::assets::{AUDIO_PAGES, AssetKind, AssetResolver, IMAGE_PAGES, PageNumber};

/// Shared, read-only dispatcher. Cheap to call concurrently.
pub struct Dispatcher {
    rules: RuleTable,
    assets: Arc<dyn AssetResolver>,
}

impl Dispatcher {
    pub fn new(rules: RuleTable, assets: Arc<dyn AssetResolver>) -> Self {
        Self { rules, assets }
    }

    /// Dispatcher with the production rule table.
    pub fn standard(assets: Arc<dyn AssetResolver>) -> Self {
        Self::new(RuleTable::standard(), assets)
    }

    pub fn rules(&self) -> &RuleTable {
        &self.rules
    }

    /// Entry point for raw transport text: slash commands first, then rules.
    pub async fn handle(&self, raw: &str) -> Action {
        match parse_command(raw) {
            Some(Command::Start) => Action::SendText(TextReply::markdown(catalogue::WELCOME)),
            Some(Command::Help) => Action::SendText(TextReply::markdown(catalogue::help_text())),
            Some(Command::Other(name)) => {
                debug!(command = name, "Ignoring unknown command");
                Action::NoOp
            }
            None => self.dispatch(raw).await,
        }
    }

    /// Classify text against the rule table and build the action.
    pub async fn dispatch(&self, raw: &str) -> Action {
        let message = NormalizedMessage::new(raw);

        let Some((rule, capture)) = self.rules.first_match(&message) else {
            return Action::NoOp;
        };

        match (&rule.responder, capture) {
            (Responder::Reply(reply), _) => Action::SendText(reply.clone()),
            (Responder::PageMedia, Capture::Number(n)) => self.page_media(n).await,
            (Responder::Recitation, Capture::Number(n)) => self.recitation(n).await,
            // Media responders paired with a non-numeric matcher capture nothing.
            (Responder::PageMedia | Responder::Recitation, Capture::Whole) => Action::NoOp,
        }
    }

    async fn page_media(&self, n: Option<u32>) -> Action {
        let Some(page) = n.and_then(|n| PageNumber::within(n, &IMAGE_PAGES)) else {
            debug!(page = ?n, "Page number out of range");
            return Action::NoOp;
        };

        let (image, audio) = tokio::join!(
            self.assets.resolve(AssetKind::Image, page),
            self.assets.resolve(AssetKind::Audio, page),
        );
        debug!(
            %page,
            image = image.is_some(),
            audio = audio.is_some(),
            "Resolved page assets"
        );
        Action::page(image, audio)
    }

    async fn recitation(&self, n: Option<u32>) -> Action {
        let Some(page) = n.and_then(|n| PageNumber::within(n, &AUDIO_PAGES)) else {
            debug!(page = ?n, "Recitation page out of range");
            return Action::NoOp;
        };

        Action::recitation(self.assets.resolve(AssetKind::Audio, page).await)
    }
}
