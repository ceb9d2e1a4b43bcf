//! Back-office CLI - database migrations and session tokens.
//!
//! # Usage
//!
//! ```bash
//! # Apply catalog migrations
//! bo-cli migrate
//!
//! # Mint a session token for a provider profile
//! bo-cli token issue --profile-id 583231 --access-token gho_xxx
//! ```
//!
//! # Commands
//!
//! - `migrate` - Run database migrations
//! - `token issue` - Sign a session token

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "bo-cli")]
#[command(author, version, about = "Back-office CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Manage session tokens
    Token {
        #[command(subcommand)]
        action: TokenAction,
    },
}

#[derive(Subcommand)]
enum TokenAction {
    /// Sign a session token from a provider account/profile pair
    Issue {
        /// Provider subject id (becomes the session's `userId`)
        #[arg(long)]
        profile_id: String,

        /// Provider access token
        #[arg(long)]
        access_token: String,

        /// Provider name
        #[arg(long, default_value = "github")]
        provider: String,
    },
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

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
        Commands::Migrate => commands::migrate::run().await?,
        Commands::Token { action } => match action {
            TokenAction::Issue {
                profile_id,
                access_token,
                provider,
            } => {
                let token = commands::token::issue(&profile_id, &access_token, &provider)?;
                #[allow(clippy::print_stdout)]
                {
                    println!("{token}");
                }
            }
        },
    }
    Ok(())
}
