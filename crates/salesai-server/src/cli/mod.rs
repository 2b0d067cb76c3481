pub mod briefing;

use crate::config::{CompletionSettings, ServeConfig};
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "salesai")]
#[command(version, about = "Account briefings for sales teams, synthesised by a hosted LLM")]
pub struct Cli {
    /// Verbose logging
    #[arg(long, global = true, env = "SALESAI_DEBUG")]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the HTTP server
    Serve(ServeConfig),
    /// Generate one briefing and print it
    Briefing(BriefingArgs),
}

#[derive(Args, Debug)]
pub struct BriefingArgs {
    pub account_id: String,
    /// Requester role ("sdr", "ae", or anything else for no role sections)
    #[arg(long, default_value = "ae")]
    pub role: String,
    /// Free-text question to focus the briefing
    #[arg(long, default_value = "")]
    pub query: String,
    /// "text" or "json"
    #[arg(long, default_value = "text")]
    pub format: String,

    #[command(flatten)]
    pub completion: CompletionSettings,
}
