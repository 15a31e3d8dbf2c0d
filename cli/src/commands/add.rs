//! ADD command - Add a new book.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::list::Book;
use super::{AuthSource, HumanReadable, make_request, output};

/// Arguments for the add command.
#[derive(Args)]
pub struct AddArgs {
    /// Book title
    pub title: String,

    /// Book author
    pub author: String,

    /// Publication year
    #[arg(allow_negative_numbers = true)]
    pub year: i32,
}

#[derive(Serialize)]
struct AddBookRequest<'a> {
    title: &'a str,
    author: &'a str,
    year: i32,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct BookCreatedResponse {
    pub message: String,
    pub book: Book,
}

impl HumanReadable for BookCreatedResponse {
    fn print_human(&self) {
        println!("{}", self.message.green().bold());
        println!();
        println!("  {} {}", "ID:".cyan(), self.book.id);
        println!("  {} {}", "Title:".cyan(), self.book.title);
        println!("  {} {}", "Author:".cyan(), self.book.author);
        println!("  {} {}", "Year:".cyan(), self.book.year);
    }
}

async fn add_book(
    client: &Client,
    base_url: &str,
    auth: &AuthSource,
    args: &AddArgs,
) -> Result<BookCreatedResponse> {
    let url = format!("{}/books/add_book", base_url);
    let body = AddBookRequest {
        title: &args.title,
        author: &args.author,
        year: args.year,
    };
    let request = auth
        .authorize(client, base_url, client.post(&url).json(&body))
        .await?;
    make_request(request).await
}

/// Execute the add command.
pub async fn execute(
    client: &Client,
    base_url: &str,
    auth: &AuthSource,
    human: bool,
    args: AddArgs,
) -> Result<()> {
    let response = add_book(client, base_url, auth, &args).await?;
    output(&response, human)
}
