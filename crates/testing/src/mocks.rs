//! In-memory mock repositories.
//!
//! These implement the real repository traits so contract tests can run
//! without a database. Identifier assignment imitates `BIGSERIAL`: a
//! monotonically increasing counter starting at 1, never reused.

use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::BTreeMap;

use bookshelf_domain::{
    author::{Author, NewAuthor},
    book::{Book, NewBook},
    identifiers::{AuthorId, BookId},
};
use bookshelf_infrastructure::{AuthorRepository, BookRepository, Error, Result};

fn single<T>(mut matches: Vec<T>, describe: String) -> Result<T> {
    match matches.len() {
        0 => Err(Error::NotFound(describe)),
        1 => Ok(matches.remove(0)),
        n => Err(Error::NonUniqueResult(format!(
            "{} matched {} rows",
            describe, n
        ))),
    }
}

struct Table<T> {
    rows: BTreeMap<i64, T>,
    next_id: i64,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: BTreeMap::new(),
            next_id: 0,
        }
    }
}

impl<T> Table<T> {
    fn assign_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

/// Mock author repository backed by an in-memory table.
#[derive(Default)]
pub struct MockAuthorRepository {
    table: RwLock<Table<Author>>,
}

impl MockAuthorRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of rows currently stored.
    pub fn len(&self) -> usize {
        self.table.read().rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl AuthorRepository for MockAuthorRepository {
    async fn get_by_id(&self, id: AuthorId) -> Result<Option<Author>> {
        Ok(self.table.read().rows.get(&id.value()).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Author>> {
        Ok(self.table.read().rows.values().cloned().collect())
    }

    async fn list_by_last_name_prefix(&self, prefix: &str) -> Result<Vec<Author>> {
        Ok(self
            .table
            .read()
            .rows
            .values()
            .filter(|a| a.last_name.starts_with(prefix))
            .cloned()
            .collect())
    }

    async fn find_by_name(&self, first_name: &str, last_name: &str) -> Result<Author> {
        let matches: Vec<Author> = self
            .table
            .read()
            .rows
            .values()
            .filter(|a| a.first_name == first_name && a.last_name == last_name)
            .cloned()
            .collect();
        single(
            matches,
            format!("author named {} {}", first_name, last_name),
        )
    }

    async fn find_by_name_built(&self, first_name: &str, last_name: &str) -> Result<Author> {
        // Same predicate and contract as find_by_name; the Pg implementation
        // differs only in query construction.
        self.find_by_name(first_name, last_name).await
    }

    async fn save(&self, draft: NewAuthor) -> Result<Author> {
        let mut table = self.table.write();
        let id = table.assign_id();
        let author = Author {
            id: AuthorId::from(id),
            first_name: draft.first_name,
            last_name: draft.last_name,
        };
        table.rows.insert(id, author.clone());
        Ok(author)
    }

    async fn update(&self, author: &Author) -> Result<Author> {
        let mut table = self.table.write();
        match table.rows.get_mut(&author.id.value()) {
            Some(row) => {
                *row = author.clone();
                Ok(row.clone())
            }
            None => Err(Error::NotFound(format!("author {}", author.id))),
        }
    }

    async fn delete_by_id(&self, id: AuthorId) -> Result<bool> {
        Ok(self.table.write().rows.remove(&id.value()).is_some())
    }

    async fn exists(&self, id: AuthorId) -> Result<bool> {
        Ok(self.table.read().rows.contains_key(&id.value()))
    }

    async fn count(&self) -> Result<u64> {
        Ok(self.table.read().rows.len() as u64)
    }
}

/// Mock book repository backed by an in-memory table.
///
/// The `author_id` reference is passed through unvalidated, like the real
/// schema (no foreign key).
#[derive(Default)]
pub struct MockBookRepository {
    table: RwLock<Table<Book>>,
}

impl MockBookRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of rows currently stored.
    pub fn len(&self) -> usize {
        self.table.read().rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl BookRepository for MockBookRepository {
    async fn get_by_id(&self, id: BookId) -> Result<Option<Book>> {
        Ok(self.table.read().rows.get(&id.value()).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Book>> {
        Ok(self.table.read().rows.values().cloned().collect())
    }

    async fn find_by_isbn(&self, isbn: &str) -> Result<Option<Book>> {
        let mut matches: Vec<Book> = self
            .table
            .read()
            .rows
            .values()
            .filter(|b| b.isbn == isbn)
            .cloned()
            .collect();
        match matches.len() {
            0 => Ok(None),
            1 => Ok(Some(matches.remove(0))),
            n => Err(Error::NonUniqueResult(format!(
                "book with ISBN {:?} matched {} rows",
                isbn, n
            ))),
        }
    }

    async fn find_by_title(&self, title: &str) -> Result<Book> {
        let matches: Vec<Book> = self
            .table
            .read()
            .rows
            .values()
            .filter(|b| b.title == title)
            .cloned()
            .collect();
        single(matches, format!("book titled {:?}", title))
    }

    async fn find_by_title_built(&self, title: &str) -> Result<Book> {
        self.find_by_title(title).await
    }

    async fn save(&self, draft: NewBook) -> Result<Book> {
        let mut table = self.table.write();
        let id = table.assign_id();
        let book = Book {
            id: BookId::from(id),
            isbn: draft.isbn,
            title: draft.title,
            publisher: draft.publisher,
            author_id: draft.author_id,
        };
        table.rows.insert(id, book.clone());
        Ok(book)
    }

    async fn update(&self, book: &Book) -> Result<Book> {
        let mut table = self.table.write();
        match table.rows.get_mut(&book.id.value()) {
            Some(row) => {
                *row = book.clone();
                Ok(row.clone())
            }
            None => Err(Error::NotFound(format!("book {}", book.id))),
        }
    }

    async fn delete_by_id(&self, id: BookId) -> Result<bool> {
        Ok(self.table.write().rows.remove(&id.value()).is_some())
    }

    async fn exists(&self, id: BookId) -> Result<bool> {
        Ok(self.table.read().rows.contains_key(&id.value()))
    }

    async fn count(&self) -> Result<u64> {
        Ok(self.table.read().rows.len() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builders::{AuthorBuilder, BookBuilder};

    #[tokio::test]
    async fn test_mock_assigns_sequential_ids() {
        let repo = MockAuthorRepository::new();
        let a = repo.save(AuthorBuilder::new().build()).await.unwrap();
        let b = repo.save(AuthorBuilder::new().build()).await.unwrap();
        assert_eq!(a.id.value() + 1, b.id.value());
    }

    #[tokio::test]
    async fn test_mock_delete_of_missing_row_is_noop() {
        let repo = MockBookRepository::new();
        assert!(!repo.delete_by_id(BookId::from(404)).await.unwrap());
    }

    #[tokio::test]
    async fn test_mock_update_of_missing_row_is_not_found() {
        let repo = MockBookRepository::new();
        let ghost = BookBuilder::new().build_with_id(404);
        let err = repo.update(&ghost).await.unwrap_err();
        assert!(err.is_not_found());
    }
}
