//! In-memory book registry.

use library_core::{Book, BookDraft, BookId, NewBook};
use tokio::sync::RwLock;

use crate::error::{StoreError, StoreResult};

/// The books every freshly started server holds.
pub fn seed_books() -> Vec<Book> {
    vec![
        Book::from_new(
            BookId(1),
            NewBook::new("The Great Gatsby", "F. Scott Fitzgerald", 1925),
        ),
        Book::from_new(
            BookId(2),
            NewBook::new("To Kill a Mockingbird", "Harper Lee", 1960),
        ),
        Book::from_new(BookId(3), NewBook::new("1984", "George Orwell", 1949)),
    ]
}

/// Ordered collection of books.
///
/// Books keep their insertion order. A new book's id is one more than the
/// largest id currently held, or [`BookId::FIRST`] when empty; reading the
/// maximum and pushing happen under the same write lock.
#[derive(Debug, Default)]
pub struct BookRegistry {
    books: RwLock<Vec<Book>>,
}

impl BookRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding [`seed_books`].
    pub fn seeded() -> Self {
        Self::from_books(seed_books())
    }

    /// Create a registry holding `books` in the given order.
    pub fn from_books(books: Vec<Book>) -> Self {
        Self {
            books: RwLock::new(books),
        }
    }

    /// All books, in insertion order.
    pub async fn list(&self) -> Vec<Book> {
        self.books.read().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.books.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.books.read().await.is_empty()
    }

    /// Validate `draft` and append it as a new book.
    ///
    /// On error the registry is left untouched.
    pub async fn append(&self, draft: BookDraft) -> StoreResult<Book> {
        let new = draft.validate()?;

        let mut books = self.books.write().await;
        let id = next_id(&books)?;
        let book = Book::from_new(id, new);
        books.push(book.clone());

        tracing::debug!(book_id = %book.id, total = books.len(), "Book appended");
        Ok(book)
    }
}

fn next_id(books: &[Book]) -> StoreResult<BookId> {
    match books.iter().map(|b| b.id).max() {
        Some(max) => max.next().ok_or(StoreError::IdSpaceExhausted),
        None => Ok(BookId::FIRST),
    }
}
