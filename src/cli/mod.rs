//! CLI module for PawIdentify
//!
//! Subcommands:
//! - `serve`: HTTP API server
//! - `classify`: identify the breed in one image
//! - `ask`: one question about a breed
//! - `chat`: identify an image, then answer questions from stdin

pub mod ask;
pub mod chat;
pub mod classify;
pub mod serve;

use clap::{Parser, Subcommand};

use crate::config::AppConfig;

/// PawIdentify - Dog breed identification and breed knowledge chat
#[derive(Parser)]
#[command(name = "paw-identify")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP API server
    Serve,

    /// Identify the breed shown in an image
    Classify(classify::ClassifyArgs),

    /// Ask a question about a breed
    Ask(ask::AskArgs),

    /// Identify an image, then chat about the breed
    Chat(chat::ChatArgs),
}

/// Load `.env` and configuration, falling back to defaults
pub(crate) fn load_config() -> AppConfig {
    dotenvy::dotenv().ok();
    AppConfig::load().unwrap_or_default()
}
