//! chatlens: who talks to whom, and how they talk, in an exported group chat
//!
//! The pipeline turns one chat export into an interaction graph between
//! participants and a ranked, per-participant vocabulary:
//!
//! 1. [`parser`] splits the export into messages and collects display names
//! 2. [`tokenizer`] turns message bodies into Han bigrams and English words
//! 3. [`cleaner`] drops blacklisted identities and bots
//! 4. [`session`] cuts the message stream at silences
//! 5. [`interaction`] weighs pairs of participants by shared sessions
//! 6. [`tfidf`] scores each participant's words against everyone else's

pub mod cleaner;
pub mod cli;
pub mod config;
pub mod errors;
pub mod interaction;
pub mod logging;
pub mod models;
pub mod parser;
pub mod pipeline;
pub mod report;
pub mod session;
pub mod tfidf;
pub mod tokenizer;

#[cfg(test)]
mod config_tests;

pub use config::AppConfig;
pub use errors::*;
pub use pipeline::analyze;
pub use pipeline::Analysis;
pub use pipeline::AnalysisOptions;
