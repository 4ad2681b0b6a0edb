//! Strongly-typed identifier types for the Bookshelf domain.
//!
//! This module defines unique identifiers for the catalog entities, preventing
//! accidental mixing of different ID types through compile-time type safety.
//! All IDs are surrogate keys: the database assigns them on first insert
//! (`BIGSERIAL`), so there is no client-side constructor that invents a fresh
//! value — IDs only ever come from a persisted row.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};

macro_rules! define_id {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Get the raw key value
            #[inline]
            pub fn value(&self) -> i64 {
                self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            fn from(value: i64) -> Self {
                Self(value)
            }
        }

        impl From<$name> for i64 {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl std::str::FromStr for $name {
            type Err = std::num::ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(s.parse()?))
            }
        }
    };
}

define_id!(
    AuthorId,
    "Unique identifier for authors (store-assigned surrogate key)"
);

define_id!(
    BookId,
    "Unique identifier for books (store-assigned surrogate key)"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_round_trip() {
        let id = AuthorId::from(7);
        assert_eq!(id.value(), 7);
        assert_eq!(i64::from(id), 7);
    }

    #[test]
    fn test_id_display() {
        let id = BookId::from(42);
        assert_eq!(id.to_string(), "42");
    }

    #[test]
    fn test_id_from_str() {
        let id: AuthorId = "123".parse().unwrap();
        assert_eq!(id, AuthorId::from(123));
        assert!("not-a-number".parse::<AuthorId>().is_err());
    }

    #[test]
    fn test_id_types_are_distinct() {
        // AuthorId and BookId with the same value are different types;
        // this only checks the values line up after explicit conversion.
        let author = AuthorId::from(1);
        let book = BookId::from(1);
        assert_eq!(author.value(), book.value());
    }

    #[test]
    fn test_id_serde_transparent() {
        let id = BookId::from(99);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "99");
        let back: BookId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
