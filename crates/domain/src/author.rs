//! Author records and insert drafts.

use crate::identifiers::AuthorId;
use serde::{Deserialize, Serialize};

/// A persisted author row.
///
/// The identifier is immutable once assigned; both name fields are mutable
/// through repository updates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    /// Store-assigned surrogate key
    pub id: AuthorId,
    /// Given name
    pub first_name: String,
    /// Family name
    pub last_name: String,
}

/// An author that has not been persisted yet.
///
/// Drafts carry no identifier; the store assigns one on insert and the
/// repository returns the resulting [`Author`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewAuthor {
    /// Given name
    pub first_name: String,
    /// Family name
    pub last_name: String,
}

impl Author {
    /// Full display name, "First Last".
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_name() {
        let author = Author {
            id: AuthorId::from(1),
            first_name: "Craig".to_string(),
            last_name: "Walls".to_string(),
        };
        assert_eq!(author.full_name(), "Craig Walls");
    }
}
