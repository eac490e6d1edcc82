//! Tiffin CLI - Database migrations and management tools.
//!
//! # Usage
//!
//! ```bash
//! # Run database migrations
//! tiffin-cli migrate
//!
//! # Create an admin account
//! tiffin-cli admin create -e admin@example.com -p changeme --first-name Mess --last-name Admin
//! ```
//!
//! # Commands
//!
//! - `migrate` - Run database migrations
//! - `admin create` - Create admin accounts

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "tiffin-cli")]
#[command(author, version, about = "Tiffin CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Manage admin accounts
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },
}

#[derive(Subcommand)]
enum AdminAction {
    /// Create a new admin account
    Create {
        /// Admin email address
        #[arg(short, long)]
        email: String,

        /// Admin password (minimum 6 characters)
        #[arg(short, long)]
        password: String,

        /// First name for the profile
        #[arg(long, default_value = "Mess")]
        first_name: String,

        /// Last name for the profile
        #[arg(long, default_value = "Admin")]
        last_name: String,
    },
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
        Commands::Migrate => commands::migrate::run().await?,
        Commands::Admin { action } => match action {
            AdminAction::Create {
                email,
                password,
                first_name,
                last_name,
            } => {
                commands::admin::create_admin(&email, &password, &first_name, &last_name).await?;
            }
        },
    }
    Ok(())
}
