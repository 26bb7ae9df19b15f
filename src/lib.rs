//! Mushaf bot: serves Quran page images, page recitations and tajweed
//! notes over a chat channel.

pub mod assets;
pub mod bot;
pub mod channels;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod health;
