//! Command-line interface for the Digital Library API.
//!
//! Commands:
//! - health: Check the service status
//! - login: Exchange username/password for a bearer token
//! - list: List all books
//! - add: Add a new book
//!
//! Configuration via environment (a `.env` file is read if present):
//! - BASE_URL: Base URL of the server (default: http://127.0.0.1:5001)
//! - API_KEY: Static API key; preferred over username/password when set
//! - ADMIN_USER / ADMIN_PASSWORD: Credentials used to obtain a bearer token

mod commands;

use clap::{Parser, Subcommand};

use commands::{AuthSource, add::AddArgs, health::HealthArgs, list::ListArgs, login::LoginArgs};

/// Digital Library CLI
///
/// Talk to a running library-server. Output is JSON unless --human is given.
#[derive(Parser)]
#[command(name = "library")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Output human-readable formatted text instead of JSON
    #[arg(long, global = true)]
    human: bool,

    /// Library server URL
    #[arg(
        long,
        env = "BASE_URL",
        default_value = "http://127.0.0.1:5001",
        global = true
    )]
    url: String,

    /// Static API key sent in the ApiKey header
    #[arg(long, env = "API_KEY", global = true, hide_env_values = true)]
    api_key: Option<String>,

    /// Username used to obtain a bearer token
    #[arg(long, env = "ADMIN_USER", global = true)]
    username: Option<String>,

    /// Password used to obtain a bearer token
    #[arg(long, env = "ADMIN_PASSWORD", global = true, hide_env_values = true)]
    password: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check service health
    Health(HealthArgs),

    /// Log in and print the issued token
    Login(LoginArgs),

    /// List all books
    List(ListArgs),

    /// Add a new book
    Add(AddArgs),
}

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    let client = reqwest::Client::new();
    let base_url = cli.url.trim_end_matches('/').to_string();
    let auth = AuthSource::from_options(cli.api_key, cli.username, cli.password);

    let result = match cli.command {
        Commands::Health(args) => {
            commands::health::execute(&client, &base_url, cli.human, args).await
        }
        Commands::Login(args) => {
            commands::login::execute(&client, &base_url, &auth, cli.human, args).await
        }
        Commands::List(args) => {
            commands::list::execute(&client, &base_url, &auth, cli.human, args).await
        }
        Commands::Add(args) => {
            commands::add::execute(&client, &base_url, &auth, cli.human, args).await
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
