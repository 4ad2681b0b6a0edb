//! Book repository implementation.
//!
//! PostgreSQL-backed implementation for book persistence operations. The
//! `author_id` reference is passed through unvalidated: there is no
//! foreign-key constraint on the `book` table, so dangling references are
//! accepted on save and update.

use async_trait::async_trait;
use sqlx::{postgres::PgRow, PgPool, Postgres, QueryBuilder, Row};
use tracing::{debug, instrument};

use bookshelf_domain::{
    book::{Book, NewBook},
    identifiers::{AuthorId, BookId},
};

use crate::database::TransactionExt;
use crate::repositories::{exactly_one, map_write_error};
use crate::{Error, Result};

/// Repository trait for book operations.
///
/// Mirrors [`AuthorRepository`](crate::repositories::AuthorRepository):
/// one unit of work per call, transactional writes, exactly-one semantics
/// for the title lookup.
#[async_trait]
pub trait BookRepository: Send + Sync {
    /// Point lookup by primary key; absent rows are `Ok(None)`, never an error.
    async fn get_by_id(&self, id: BookId) -> Result<Option<Book>>;

    /// Unordered full-table fetch.
    async fn find_all(&self) -> Result<Vec<Book>>;

    /// Exact-match lookup by ISBN. Absence is `Ok(None)`, like `get_by_id`.
    /// ISBN is expected unique but not enforced at this layer, so two or
    /// more rows sharing one is `Error::NonUniqueResult`.
    async fn find_by_isbn(&self, isbn: &str) -> Result<Option<Book>>;

    /// Exactly-one lookup by title. Zero matches is `Error::NotFound`,
    /// two or more is `Error::NonUniqueResult`.
    async fn find_by_title(&self, title: &str) -> Result<Book>;

    /// Same contract as [`find_by_title`](Self::find_by_title), expressed
    /// via programmatic predicate composition. The two entry points must
    /// return identical results for identical inputs.
    async fn find_by_title_built(&self, title: &str) -> Result<Book>;

    /// Insert a new book inside a committed transaction, returning the
    /// entity with its store-assigned identifier.
    async fn save(&self, draft: NewBook) -> Result<Book>;

    /// Overwrite the mutable fields of an existing row inside a committed
    /// transaction, then re-read the row fresh so the caller sees
    /// store-applied values. A missing row is `Error::NotFound`.
    async fn update(&self, book: &Book) -> Result<Book>;

    /// Delete by primary key inside a committed transaction. A missing row
    /// is a no-op returning `Ok(false)`.
    async fn delete_by_id(&self, id: BookId) -> Result<bool>;

    /// Check if a book row exists.
    async fn exists(&self, id: BookId) -> Result<bool>;

    /// Count all book rows.
    async fn count(&self) -> Result<u64>;
}

/// PostgreSQL implementation of BookRepository.
pub struct PgBookRepository {
    pool: PgPool,
}

impl PgBookRepository {
    /// Create a new PostgreSQL book repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Decode a book row fetched with id, isbn, title, publisher, author_id.
fn row_to_book(row: PgRow) -> Book {
    Book {
        id: BookId::from(row.get::<i64, _>("id")),
        isbn: row.get("isbn"),
        title: row.get("title"),
        publisher: row.get("publisher"),
        author_id: row.get::<Option<i64>, _>("author_id").map(AuthorId::from),
    }
}

#[async_trait]
impl BookRepository for PgBookRepository {
    #[instrument(skip(self))]
    async fn get_by_id(&self, id: BookId) -> Result<Option<Book>> {
        let row = sqlx::query(
            "SELECT id, isbn, title, publisher, author_id FROM book WHERE id = $1",
        )
        .bind(id.value())
        .fetch_optional(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(row.map(row_to_book))
    }

    #[instrument(skip(self))]
    async fn find_all(&self) -> Result<Vec<Book>> {
        let rows = sqlx::query("SELECT id, isbn, title, publisher, author_id FROM book")
            .fetch_all(&self.pool)
            .await
            .map_err(Error::Database)?;

        Ok(rows.into_iter().map(row_to_book).collect())
    }

    #[instrument(skip(self))]
    async fn find_by_isbn(&self, isbn: &str) -> Result<Option<Book>> {
        let rows = sqlx::query(
            "SELECT id, isbn, title, publisher, author_id FROM book WHERE isbn = $1",
        )
        .bind(isbn)
        .fetch_all(&self.pool)
        .await
        .map_err(Error::Database)?;

        let mut books: Vec<Book> = rows.into_iter().map(row_to_book).collect();
        match books.len() {
            0 => Ok(None),
            1 => Ok(Some(books.remove(0))),
            n => Err(Error::NonUniqueResult(format!(
                "book with ISBN {:?} matched {} rows",
                isbn, n
            ))),
        }
    }

    #[instrument(skip(self))]
    async fn find_by_title(&self, title: &str) -> Result<Book> {
        let rows = sqlx::query(
            r#"
            SELECT id, isbn, title, publisher, author_id
            FROM book
            WHERE title = $1
            "#,
        )
        .bind(title)
        .fetch_all(&self.pool)
        .await
        .map_err(Error::Database)?;

        exactly_one(rows.into_iter().map(row_to_book).collect(), || {
            format!("book titled {:?}", title)
        })
    }

    #[instrument(skip(self))]
    async fn find_by_title_built(&self, title: &str) -> Result<Book> {
        let mut builder: QueryBuilder<Postgres> =
            QueryBuilder::new("SELECT id, isbn, title, publisher, author_id FROM book WHERE ");
        builder.push("title = ").push_bind(title);

        let rows = builder
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(Error::Database)?;

        exactly_one(rows.into_iter().map(row_to_book).collect(), || {
            format!("book titled {:?}", title)
        })
    }

    #[instrument(skip(self, draft), fields(isbn = %draft.isbn))]
    async fn save(&self, draft: NewBook) -> Result<Book> {
        let mut tx = self.pool.begin().await.map_err(Error::Database)?;

        let inserted = sqlx::query(
            r#"
            INSERT INTO book (isbn, title, publisher, author_id)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(&draft.isbn)
        .bind(&draft.title)
        .bind(&draft.publisher)
        .bind(draft.author_id.map(|a| a.value()))
        .fetch_one(&mut *tx)
        .await
        .map_err(map_write_error);

        let row = tx.commit_or_rollback(inserted).await?;
        let id = BookId::from(row.get::<i64, _>("id"));

        debug!(book_id = %id, "Book created successfully");
        Ok(Book {
            id,
            isbn: draft.isbn,
            title: draft.title,
            publisher: draft.publisher,
            author_id: draft.author_id,
        })
    }

    #[instrument(skip(self, book), fields(book_id = %book.id))]
    async fn update(&self, book: &Book) -> Result<Book> {
        let mut tx = self.pool.begin().await.map_err(Error::Database)?;

        let outcome = sqlx::query(
            r#"
            UPDATE book
            SET isbn = $2, title = $3, publisher = $4, author_id = $5
            WHERE id = $1
            "#,
        )
        .bind(book.id.value())
        .bind(&book.isbn)
        .bind(&book.title)
        .bind(&book.publisher)
        .bind(book.author_id.map(|a| a.value()))
        .execute(&mut *tx)
        .await
        .map_err(map_write_error)
        .and_then(|done| {
            if done.rows_affected() == 0 {
                Err(Error::NotFound(format!("book {}", book.id)))
            } else {
                Ok(())
            }
        });

        tx.commit_or_rollback(outcome).await?;

        // Re-read the committed row so the caller sees store-applied values,
        // not their in-memory copy.
        self.get_by_id(book.id)
            .await?
            .ok_or_else(|| Error::NotFound(format!("book {}", book.id)))
    }

    #[instrument(skip(self))]
    async fn delete_by_id(&self, id: BookId) -> Result<bool> {
        let mut tx = self.pool.begin().await.map_err(Error::Database)?;

        let outcome = sqlx::query("DELETE FROM book WHERE id = $1")
            .bind(id.value())
            .execute(&mut *tx)
            .await
            .map_err(map_write_error);

        let done = tx.commit_or_rollback(outcome).await?;
        let deleted = done.rows_affected() > 0;
        if deleted {
            debug!(book_id = %id, "Book deleted");
        }
        Ok(deleted)
    }

    #[instrument(skip(self))]
    async fn exists(&self, id: BookId) -> Result<bool> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM book WHERE id = $1)")
            .bind(id.value())
            .fetch_one(&self.pool)
            .await
            .map_err(Error::Database)?;

        Ok(exists)
    }

    #[instrument(skip(self))]
    async fn count(&self) -> Result<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM book")
            .fetch_one(&self.pool)
            .await
            .map_err(Error::Database)?;

        Ok(count as u64)
    }
}
