//! library-core: Core types for the Digital Library API
//!
//! This crate provides:
//! - Book records and their identifiers
//! - Book drafts with required-field validation
//! - The static credential store used by the login endpoint
//!
//! # Usage
//!
//! ```
//! use library_core::{BookDraft, CredentialStore};
//!
//! let draft = BookDraft::new("Dune", "Frank Herbert", 1965);
//! let book = draft.validate().unwrap();
//! assert_eq!(book.title, "Dune");
//!
//! let creds = CredentialStore::with_demo_accounts("admin", "password123");
//! assert!(creds.verify("admin", "password123"));
//! ```

pub mod credentials;
pub mod types;

pub use credentials::{CredentialStore, DEMO_PASSWORD, DEMO_USER, constant_time_eq};
pub use types::{Book, BookDraft, BookId, NewBook, ValidationError};
