//! library-store: Storage layer for the Digital Library API
//!
//! This crate provides:
//! - An in-memory, insertion-ordered book registry
//! - Identifier assignment (max existing id + 1) under a write lock
//!
//! Nothing is persisted; the registry lives as long as its owner.
//!
//! # Usage
//!
//! ```rust,ignore
//! use library_core::BookDraft;
//! use library_store::BookRegistry;
//!
//! let registry = BookRegistry::seeded();
//! let book = registry.append(BookDraft::new("Dune", "Frank Herbert", 1965)).await?;
//! assert_eq!(book.id.get(), 4);
//! ```

pub mod error;
pub mod registry;

pub use error::{StoreError, StoreResult};
pub use registry::{BookRegistry, seed_books};

// Re-export library-core for downstream crates
pub use library_core;
