//! LIST command - List all books.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::{AuthSource, HumanReadable, make_request, output};

/// Arguments for the list command.
#[derive(Args)]
pub struct ListArgs {}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Book {
    pub id: u64,
    pub title: String,
    pub author: String,
    pub year: i32,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct BooksResponse {
    pub books: Vec<Book>,
}

impl HumanReadable for BooksResponse {
    fn print_human(&self) {
        println!("{}", "Books".green().bold());
        println!("{}", "=".repeat(60));

        if self.books.is_empty() {
            println!("  {}", "(No books)".dimmed());
            return;
        }

        for book in &self.books {
            println!(
                "  {:>4}  {} {} ({})",
                book.id.to_string().cyan(),
                book.title.bold(),
                format!("by {}", book.author).dimmed(),
                book.year
            );
        }
        println!();
        println!("  {} {}", "Total:".cyan(), self.books.len());
    }
}

/// Execute the list command.
pub async fn execute(
    client: &Client,
    base_url: &str,
    auth: &AuthSource,
    human: bool,
    _args: ListArgs,
) -> Result<()> {
    let url = format!("{}/books/get_books", base_url);
    let request = auth.authorize(client, base_url, client.get(&url)).await?;
    let response: BooksResponse = make_request(request).await?;
    output(&response, human)
}
