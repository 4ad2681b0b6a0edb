//! Bookshelf Domain Types
//!
//! This crate provides the core domain model for the Bookshelf data-access
//! layer. It defines the two catalog entities, their insert drafts, and
//! strongly-typed identifiers.
//!
//! ## Architecture
//!
//! The domain layer is organized into the following modules:
//!
//! - **identifiers**: Strongly-typed surrogate-key identifiers
//! - **author**: Author records and insert drafts
//! - **book**: Book records and insert drafts
//!
//! Identifiers are assigned by the backing store on first insert; the domain
//! layer never generates them. A record that has not been persisted yet is
//! represented by its draft type (`NewAuthor`, `NewBook`), which has no
//! identifier field at all.
//!
//! ## Usage
//!
//! ```rust
//! use bookshelf_domain::{
//!     author::NewAuthor,
//!     book::NewBook,
//!     identifiers::AuthorId,
//! };
//!
//! let draft = NewAuthor {
//!     first_name: "John".to_string(),
//!     last_name: "Thompson".to_string(),
//! };
//!
//! let owner = AuthorId::from(42);
//! let book = NewBook {
//!     isbn: "978-0134685991".to_string(),
//!     title: "Effective Java".to_string(),
//!     publisher: "Addison-Wesley".to_string(),
//!     author_id: Some(owner),
//! };
//! assert_eq!(book.author_id, Some(owner));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod author;
pub mod book;
pub mod identifiers;

// Re-export commonly used types
pub use author::{Author, NewAuthor};
pub use book::{Book, NewBook};
pub use identifiers::{AuthorId, BookId};
