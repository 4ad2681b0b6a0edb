//! Repository implementations for data persistence.
//!
//! This module provides PostgreSQL-backed implementations of the
//! [`AuthorRepository`] and [`BookRepository`] traits. Both repositories are
//! leaves that depend only on the connection pool; there is no shared mutable
//! in-process state, so concurrent callers are safe by construction.

mod author_repository;
mod book_repository;

pub use author_repository::*;
pub use book_repository::*;

use crate::{Error, Result};

/// Enforce the exactly-one contract on a fetched row set.
///
/// Zero rows is [`Error::NotFound`], two or more is
/// [`Error::NonUniqueResult`]; list-shaped operations never call this and
/// return empty sequences instead.
pub(crate) fn exactly_one<T>(mut rows: Vec<T>, describe: impl FnOnce() -> String) -> Result<T> {
    match rows.len() {
        0 => Err(Error::NotFound(describe())),
        1 => Ok(rows.remove(0)),
        n => Err(Error::NonUniqueResult(format!(
            "{} matched {} rows",
            describe(),
            n
        ))),
    }
}

/// Map a write-path sqlx error, surfacing store-side constraint rejections
/// (unique, foreign-key, not-null, check) as [`Error::Constraint`].
pub(crate) fn map_write_error(e: sqlx::Error) -> Error {
    if let sqlx::Error::Database(db_err) = &e {
        match db_err.kind() {
            sqlx::error::ErrorKind::UniqueViolation
            | sqlx::error::ErrorKind::ForeignKeyViolation
            | sqlx::error::ErrorKind::NotNullViolation
            | sqlx::error::ErrorKind::CheckViolation => {
                return Error::Constraint(db_err.message().to_string());
            }
            _ => {}
        }
    }
    Error::Database(e)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exactly_one_single_row() {
        let result = exactly_one(vec![7], || "seven".to_string());
        assert_eq!(result.unwrap(), 7);
    }

    #[test]
    fn test_exactly_one_empty_is_not_found() {
        let result = exactly_one(Vec::<i32>::new(), || "nothing".to_string());
        assert!(matches!(result, Err(Error::NotFound(msg)) if msg == "nothing"));
    }

    #[test]
    fn test_exactly_one_many_is_non_unique() {
        let result = exactly_one(vec![1, 2, 3], || "dup".to_string());
        assert!(matches!(result, Err(Error::NonUniqueResult(msg)) if msg.contains("3 rows")));
    }

    #[test]
    fn test_map_write_error_passthrough() {
        let mapped = map_write_error(sqlx::Error::PoolTimedOut);
        assert!(matches!(mapped, Error::Database(_)));
    }
}
