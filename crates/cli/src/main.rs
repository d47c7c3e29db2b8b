//! Gemini Store CLI - catalog preview tools.
//!
//! # Usage
//!
//! ```bash
//! # Generate a catalog and print it as a table
//! gs-cli catalog generate
//!
//! # Generate a catalog and print the raw products as JSON
//! gs-cli catalog generate --json
//!
//! # Print the response schema sent to Gemini
//! gs-cli catalog schema
//! ```
//!
//! # Commands
//!
//! - `catalog generate` - Ask Gemini for a catalog, exactly as the server does
//! - `catalog schema` - Show the prompt and structured output schema

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "gs-cli")]
#[command(author, version, about = "Gemini Store CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Work with the generated catalog
    Catalog {
        #[command(subcommand)]
        action: CatalogAction,
    },
}

#[derive(Subcommand)]
enum CatalogAction {
    /// Generate a catalog with Gemini and print it
    Generate {
        /// Print products as JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Print the generation prompt and response schema
    Schema,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Catalog { action } => match action {
            CatalogAction::Generate { json } => commands::catalog::generate(json).await?,
            CatalogAction::Schema => commands::catalog::schema()?,
        },
    }
    Ok(())
}
