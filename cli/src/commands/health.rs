//! HEALTH command - Check service status.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::{HumanReadable, make_request, output};

/// Arguments for the health command.
#[derive(Args)]
pub struct HealthArgs {}

#[derive(Debug, Deserialize, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
}

impl HumanReadable for HealthResponse {
    fn print_human(&self) {
        let status = if self.status == "healthy" {
            self.status.green().bold()
        } else {
            self.status.red().bold()
        };
        println!("{} {}", "Status:".cyan(), status);
        println!("{} {}", "Message:".cyan(), self.message);
    }
}

/// Execute the health command.
pub async fn execute(
    client: &Client,
    base_url: &str,
    human: bool,
    _args: HealthArgs,
) -> Result<()> {
    let url = format!("{}/health", base_url);
    let response: HealthResponse = make_request(client.get(&url)).await?;
    output(&response, human)
}
