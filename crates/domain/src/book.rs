//! Book records and insert drafts.

use crate::identifiers::{AuthorId, BookId};
use serde::{Deserialize, Serialize};

/// A persisted book row.
///
/// `author_id` is a plain reference to an owning author. The persistence
/// layer passes it through unvalidated: a dangling or absent reference is
/// accepted on insert and update. ISBN is expected to be unique by
/// convention but is not enforced at this layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    /// Store-assigned surrogate key
    pub id: BookId,
    /// International Standard Book Number (not validated here)
    pub isbn: String,
    /// Title
    pub title: String,
    /// Publisher name
    pub publisher: String,
    /// Owning author reference, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_id: Option<AuthorId>,
}

/// A book that has not been persisted yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewBook {
    /// International Standard Book Number (not validated here)
    pub isbn: String,
    /// Title
    pub title: String,
    /// Publisher name
    pub publisher: String,
    /// Owning author reference, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_id: Option<AuthorId>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_author_reference_is_optional() {
        let draft = NewBook {
            isbn: "1234X".to_string(),
            title: "ISBN TEST".to_string(),
            publisher: "Self".to_string(),
            author_id: None,
        };
        let json = serde_json::to_string(&draft).unwrap();
        // Absent references are omitted entirely
        assert!(!json.contains("author_id"));
    }
}
