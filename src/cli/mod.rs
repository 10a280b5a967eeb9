//! CLI module for Meguru.
//!
//! Subcommands:
//! - `replay`: Drive expansions from a recorded session file
//! - `catalog`: Inspect the built-in domain catalogs

mod catalog;
mod replay;

use clap::{Parser, Subcommand};

pub use catalog::CatalogCommand;
pub use replay::ReplayCommand;

/// Meguru - Incremental Knowledge Map
#[derive(Parser)]
#[command(name = "meguru")]
#[command(about = "Incremental knowledge map - LLM-driven graph exploration")]
#[command(version)]
pub struct App {
    /// Run in verbose mode
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Replay a recorded expansion session and print the resulting graph
    Replay(ReplayCommand),

    /// List built-in domains, or show one domain's kind table
    Catalog(CatalogCommand),
}

impl App {
    /// Run the CLI application.
    pub async fn run(self) -> color_eyre::Result<()> {
        match self.command {
            Command::Replay(cmd) => cmd.run().await,
            Command::Catalog(cmd) => cmd.run(),
        }
    }
}
