//! Infrastructure layer for Bookshelf
//!
//! This crate provides the persistence layer:
//! - Database access (PostgreSQL with sqlx)
//! - Repository pattern implementations for authors and books
//!
//! ## Architecture
//!
//! The infrastructure layer follows the repository pattern, providing concrete
//! implementations of data access that can be swapped for testing or different
//! storage backends. Every operation is self-contained: reads run a single
//! statement against the pool, writes scope exactly one transaction and
//! commit or roll it back before returning. The pool handle is an explicit
//! dependency threaded through repository constructors; there is no ambient
//! global state.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use bookshelf_common::config::DatabaseConfig;
//! use bookshelf_infrastructure::{
//!     database::DatabasePool,
//!     repositories::{AuthorRepository, PgAuthorRepository},
//! };
//!
//! let config = DatabaseConfig::from_env()?;
//! let pool = DatabasePool::new(&config).await?;
//!
//! let authors = PgAuthorRepository::new(pool.pool().clone());
//! let found = authors.get_by_id(42.into()).await?;
//! ```

pub mod database;
pub mod repositories;

// Re-export commonly used types
pub use database::{DatabasePool, HealthStatus, PoolStats, TransactionExt};
pub use repositories::{
    AuthorRepository, BookRepository, PgAuthorRepository, PgBookRepository,
};

/// Crate-level result alias
pub type Result<T> = std::result::Result<T, Error>;

/// Infrastructure-level errors
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Database errors from sqlx
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// An exactly-one lookup matched nothing, or a write targeted a missing row
    #[error("Not found: {0}")]
    NotFound(String),

    /// An exactly-one lookup matched more than one row
    #[error("Non-unique result: {0}")]
    NonUniqueResult(String),

    /// The store rejected a write (unique/check/not-null violation)
    #[error("Constraint violation: {0}")]
    Constraint(String),

    /// Commit failed after successful statements; the unit of work was rolled back
    #[error("Transaction failure: {0}")]
    Transaction(#[source] sqlx::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl Error {
    /// Check if the error is retryable
    pub fn is_retryable(&self) -> bool {
        matches!(self, Error::Database(_) | Error::Transaction(_))
    }

    /// Check whether this error means "the row is not there".
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_retryable() {
        let db_err = Error::Database(sqlx::Error::PoolTimedOut);
        assert!(db_err.is_retryable());

        let not_found = Error::NotFound("author 1".to_string());
        assert!(!not_found.is_retryable());
    }

    #[test]
    fn test_error_classification() {
        assert!(Error::NotFound("book 9".to_string()).is_not_found());
        assert!(!Error::NonUniqueResult("title".to_string()).is_not_found());
        assert!(!Error::Constraint("duplicate key".to_string()).is_retryable());
    }
}
