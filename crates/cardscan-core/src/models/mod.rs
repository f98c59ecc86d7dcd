//! Data models: extracted card records and configuration.

pub mod card;
pub mod config;
