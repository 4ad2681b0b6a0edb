//! Testing utilities for Bookshelf
//!
//! This crate provides testing utilities including:
//! - Test fixtures for the catalog entities
//! - Builder patterns for test data construction
//! - In-memory mock implementations of the repository traits
//! - Test database setup with migrations and cleanup
//!
//! # Examples
//!
//! ```
//! use bookshelf_testing::{builders::*, fixtures::*};
//!
//! // Create a random draft
//! let author = create_test_author();
//!
//! // Build a specific one
//! let book = BookBuilder::new()
//!     .with_title("Clean Code")
//!     .with_isbn("978-0132350884")
//!     .build();
//! ```

pub mod builders;
pub mod database;
pub mod fixtures;
pub mod mocks;

// Re-export commonly used types
pub use builders::*;
pub use fixtures::*;
pub use mocks::*;

// Re-export testing dependencies for convenience
pub use fake;
pub use proptest;
pub use testcontainers;
