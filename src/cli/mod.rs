//! CLI module for vidask.

pub mod commands;
mod output;
pub mod preflight;

pub use output::Output;

use clap::{Parser, Subcommand};

/// vidask - ask questions about a YouTube video
///
/// Fetches the video's captions, splits them into chunks, and answers your
/// question from the most relevant ones, citing timestamps.
#[derive(Parser, Debug)]
#[command(name = "vidask")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Ask a question about a video
    Ask {
        /// YouTube video URL (watch?v=... or youtu.be/...)
        video_url: String,

        /// The question to ask
        question: String,

        /// Number of transcript chunks used as context
        #[arg(short = 'k', long)]
        top_k: Option<usize>,

        /// Segmentation strategy (drift, window)
        #[arg(short, long)]
        strategy: Option<String>,
    },

    /// Show how a video's transcript is split into chunks
    Chunks {
        /// YouTube video URL (watch?v=... or youtu.be/...)
        video_url: String,

        /// Segmentation strategy (drift, window)
        #[arg(short, long)]
        strategy: Option<String>,
    },

    /// Start the HTTP API server
    Serve {
        /// Host to bind to (defaults to server.host)
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to (defaults to server.port)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Show configuration file path
    Path,
}
