//! Fluent builder pattern for constructing test data.
//!
//! Builders produce insert drafts by default; `build_with_id` produces a
//! persisted-looking record for tests that need an identifier without going
//! through a repository.

use bookshelf_domain::{
    author::{Author, NewAuthor},
    book::{Book, NewBook},
    identifiers::{AuthorId, BookId},
};

/// Builder for author test instances
#[derive(Clone)]
pub struct AuthorBuilder {
    first_name: String,
    last_name: String,
}

impl AuthorBuilder {
    pub fn new() -> Self {
        Self {
            first_name: "Test".to_string(),
            last_name: "Author".to_string(),
        }
    }

    pub fn with_first_name(mut self, first_name: impl Into<String>) -> Self {
        self.first_name = first_name.into();
        self
    }

    pub fn with_last_name(mut self, last_name: impl Into<String>) -> Self {
        self.last_name = last_name.into();
        self
    }

    pub fn build(self) -> NewAuthor {
        NewAuthor {
            first_name: self.first_name,
            last_name: self.last_name,
        }
    }

    pub fn build_with_id(self, id: impl Into<AuthorId>) -> Author {
        Author {
            id: id.into(),
            first_name: self.first_name,
            last_name: self.last_name,
        }
    }
}

impl Default for AuthorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for book test instances
#[derive(Clone)]
pub struct BookBuilder {
    isbn: String,
    title: String,
    publisher: String,
    author_id: Option<AuthorId>,
}

impl BookBuilder {
    pub fn new() -> Self {
        Self {
            isbn: "978-0-00-000000-0".to_string(),
            title: "Test Book".to_string(),
            publisher: "Test Publisher".to_string(),
            author_id: None,
        }
    }

    pub fn with_isbn(mut self, isbn: impl Into<String>) -> Self {
        self.isbn = isbn.into();
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_publisher(mut self, publisher: impl Into<String>) -> Self {
        self.publisher = publisher.into();
        self
    }

    pub fn with_author(mut self, author_id: impl Into<AuthorId>) -> Self {
        self.author_id = Some(author_id.into());
        self
    }

    pub fn build(self) -> NewBook {
        NewBook {
            isbn: self.isbn,
            title: self.title,
            publisher: self.publisher,
            author_id: self.author_id,
        }
    }

    pub fn build_with_id(self, id: impl Into<BookId>) -> Book {
        Book {
            id: id.into(),
            isbn: self.isbn,
            title: self.title,
            publisher: self.publisher,
            author_id: self.author_id,
        }
    }
}

impl Default for BookBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_author_builder() {
        let draft = AuthorBuilder::new()
            .with_first_name("Craig")
            .with_last_name("Walls")
            .build();
        assert_eq!(draft.first_name, "Craig");
        assert_eq!(draft.last_name, "Walls");
    }

    #[test]
    fn test_book_builder_with_author() {
        let book = BookBuilder::new()
            .with_title("Spring in Action")
            .with_author(3)
            .build_with_id(10);
        assert_eq!(book.id, BookId::from(10));
        assert_eq!(book.author_id, Some(AuthorId::from(3)));
    }
}
