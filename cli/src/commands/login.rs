//! LOGIN command - Exchange username/password for a bearer token.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::{AuthSource, CliError, HumanReadable, output, request_token};

/// Arguments for the login command.
#[derive(Args)]
pub struct LoginArgs {}

#[derive(Debug, Deserialize, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: u64,
}

impl HumanReadable for TokenResponse {
    fn print_human(&self) {
        println!("{}", "Logged in".green().bold());
        println!();
        println!("  {} {}", "Token:".cyan(), self.access_token);
        println!("  {} {}", "Type:".cyan(), self.token_type);
        println!("  {} {}s", "Expires in:".cyan(), self.expires_in);
    }
}

/// Execute the login command. Requires username and password; an API key alone
/// cannot be exchanged for a token.
pub async fn execute(
    client: &Client,
    base_url: &str,
    auth: &AuthSource,
    human: bool,
    _args: LoginArgs,
) -> Result<()> {
    let (username, password) = auth.credentials().ok_or(CliError::MissingCredentials)?;

    let response = request_token(client, base_url, username, password).await?;
    output(&response, human)
}
