//! Fixture constructors for the catalog entities.
//!
//! Uses `fake` to generate plausible data so tests that only care about the
//! shape of a record do not hard-code values.

use bookshelf_domain::{author::NewAuthor, book::NewBook, identifiers::AuthorId};
use fake::{
    faker::company::en::CompanyName,
    faker::lorem::en::Words,
    faker::name::en::{FirstName, LastName},
    faker::number::en::NumberWithFormat,
    Fake,
};

/// Create an author draft with random names.
pub fn create_test_author() -> NewAuthor {
    NewAuthor {
        first_name: FirstName().fake(),
        last_name: LastName().fake(),
    }
}

/// Create a book draft with a random ISBN-shaped string and no author.
pub fn create_test_book() -> NewBook {
    let title_words: Vec<String> = Words(2..5).fake();
    NewBook {
        isbn: NumberWithFormat("978-#-###-#####-#").fake(),
        title: title_words.join(" "),
        publisher: CompanyName().fake(),
        author_id: None,
    }
}

/// Create a book draft owned by the given author.
pub fn create_test_book_for(author_id: AuthorId) -> NewBook {
    NewBook {
        author_id: Some(author_id),
        ..create_test_book()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_author_fixture_is_populated() {
        let author = create_test_author();
        assert!(!author.first_name.is_empty());
        assert!(!author.last_name.is_empty());
    }

    #[test]
    fn test_book_fixture_isbn_shape() {
        let book = create_test_book();
        assert!(book.isbn.starts_with("978-"));
        assert!(book.author_id.is_none());
    }

    #[test]
    fn test_book_fixture_with_owner() {
        let owner = AuthorId::from(5);
        let book = create_test_book_for(owner);
        assert_eq!(book.author_id, Some(owner));
    }
}
