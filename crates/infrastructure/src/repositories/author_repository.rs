//! Author repository implementation.
//!
//! PostgreSQL-backed implementation for author persistence operations.

use async_trait::async_trait;
use sqlx::{postgres::PgRow, PgPool, Postgres, QueryBuilder, Row};
use tracing::{debug, instrument};

use bookshelf_domain::{
    author::{Author, NewAuthor},
    identifiers::AuthorId,
};

use crate::database::TransactionExt;
use crate::repositories::{exactly_one, map_write_error};
use crate::{Error, Result};

/// Repository trait for author operations.
///
/// Each method acquires and releases its own unit of work: reads borrow a
/// pooled connection for a single statement, writes scope one transaction
/// and commit (or roll back) before returning. No call spans more than one
/// unit of work.
#[async_trait]
pub trait AuthorRepository: Send + Sync {
    /// Point lookup by primary key; absent rows are `Ok(None)`, never an error.
    async fn get_by_id(&self, id: AuthorId) -> Result<Option<Author>>;

    /// Unordered full-table fetch.
    async fn find_all(&self) -> Result<Vec<Author>>;

    /// All authors whose last name starts with `prefix`, taken literally
    /// (`%` and `_` carry no pattern meaning). Case sensitivity follows the
    /// store's collation; no matches is an empty vec.
    async fn list_by_last_name_prefix(&self, prefix: &str) -> Result<Vec<Author>>;

    /// Exactly-one lookup by full name. Zero matches is `Error::NotFound`,
    /// two or more is `Error::NonUniqueResult`.
    async fn find_by_name(&self, first_name: &str, last_name: &str) -> Result<Author>;

    /// Same contract as [`find_by_name`](Self::find_by_name), expressed via
    /// programmatic predicate composition. The two entry points must return
    /// identical results for identical inputs.
    async fn find_by_name_built(&self, first_name: &str, last_name: &str) -> Result<Author>;

    /// Insert a new author inside a committed transaction, returning the
    /// entity with its store-assigned identifier.
    async fn save(&self, draft: NewAuthor) -> Result<Author>;

    /// Overwrite the mutable fields of an existing row inside a committed
    /// transaction, then re-read the row fresh so the caller sees
    /// store-applied values. A missing row is `Error::NotFound`.
    async fn update(&self, author: &Author) -> Result<Author>;

    /// Delete by primary key inside a committed transaction. A missing row
    /// is a no-op returning `Ok(false)`.
    async fn delete_by_id(&self, id: AuthorId) -> Result<bool>;

    /// Check if an author row exists.
    async fn exists(&self, id: AuthorId) -> Result<bool>;

    /// Count all author rows.
    async fn count(&self) -> Result<u64>;
}

/// PostgreSQL implementation of AuthorRepository.
pub struct PgAuthorRepository {
    pool: PgPool,
}

impl PgAuthorRepository {
    /// Create a new PostgreSQL author repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Decode an author row fetched with the id, first_name, last_name columns.
fn row_to_author(row: PgRow) -> Author {
    Author {
        id: AuthorId::from(row.get::<i64, _>("id")),
        first_name: row.get("first_name"),
        last_name: row.get("last_name"),
    }
}

#[async_trait]
impl AuthorRepository for PgAuthorRepository {
    #[instrument(skip(self))]
    async fn get_by_id(&self, id: AuthorId) -> Result<Option<Author>> {
        let row = sqlx::query("SELECT id, first_name, last_name FROM author WHERE id = $1")
            .bind(id.value())
            .fetch_optional(&self.pool)
            .await
            .map_err(Error::Database)?;

        Ok(row.map(row_to_author))
    }

    #[instrument(skip(self))]
    async fn find_all(&self) -> Result<Vec<Author>> {
        let rows = sqlx::query("SELECT id, first_name, last_name FROM author")
            .fetch_all(&self.pool)
            .await
            .map_err(Error::Database)?;

        Ok(rows.into_iter().map(row_to_author).collect())
    }

    #[instrument(skip(self))]
    async fn list_by_last_name_prefix(&self, prefix: &str) -> Result<Vec<Author>> {
        // LIKE gives % _ \ pattern meaning; escape them so the caller's
        // prefix always matches literally.
        let escaped = prefix
            .replace('\\', "\\\\")
            .replace('%', "\\%")
            .replace('_', "\\_");
        let rows = sqlx::query(
            "SELECT id, first_name, last_name FROM author WHERE last_name LIKE $1",
        )
        .bind(format!("{}%", escaped))
        .fetch_all(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(rows.into_iter().map(row_to_author).collect())
    }

    #[instrument(skip(self))]
    async fn find_by_name(&self, first_name: &str, last_name: &str) -> Result<Author> {
        let rows = sqlx::query(
            r#"
            SELECT id, first_name, last_name
            FROM author
            WHERE first_name = $1 AND last_name = $2
            "#,
        )
        .bind(first_name)
        .bind(last_name)
        .fetch_all(&self.pool)
        .await
        .map_err(Error::Database)?;

        exactly_one(rows.into_iter().map(row_to_author).collect(), || {
            format!("author named {} {}", first_name, last_name)
        })
    }

    #[instrument(skip(self))]
    async fn find_by_name_built(&self, first_name: &str, last_name: &str) -> Result<Author> {
        let mut builder: QueryBuilder<Postgres> =
            QueryBuilder::new("SELECT id, first_name, last_name FROM author WHERE ");
        builder
            .push("first_name = ")
            .push_bind(first_name)
            .push(" AND last_name = ")
            .push_bind(last_name);

        let rows = builder
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(Error::Database)?;

        exactly_one(rows.into_iter().map(row_to_author).collect(), || {
            format!("author named {} {}", first_name, last_name)
        })
    }

    #[instrument(skip(self, draft), fields(last_name = %draft.last_name))]
    async fn save(&self, draft: NewAuthor) -> Result<Author> {
        let mut tx = self.pool.begin().await.map_err(Error::Database)?;

        let inserted = sqlx::query(
            "INSERT INTO author (first_name, last_name) VALUES ($1, $2) RETURNING id",
        )
        .bind(&draft.first_name)
        .bind(&draft.last_name)
        .fetch_one(&mut *tx)
        .await
        .map_err(map_write_error);

        let row = tx.commit_or_rollback(inserted).await?;
        let id = AuthorId::from(row.get::<i64, _>("id"));

        debug!(author_id = %id, "Author created successfully");
        Ok(Author {
            id,
            first_name: draft.first_name,
            last_name: draft.last_name,
        })
    }

    #[instrument(skip(self, author), fields(author_id = %author.id))]
    async fn update(&self, author: &Author) -> Result<Author> {
        let mut tx = self.pool.begin().await.map_err(Error::Database)?;

        let outcome = sqlx::query(
            "UPDATE author SET first_name = $2, last_name = $3 WHERE id = $1",
        )
        .bind(author.id.value())
        .bind(&author.first_name)
        .bind(&author.last_name)
        .execute(&mut *tx)
        .await
        .map_err(map_write_error)
        .and_then(|done| {
            if done.rows_affected() == 0 {
                Err(Error::NotFound(format!("author {}", author.id)))
            } else {
                Ok(())
            }
        });

        tx.commit_or_rollback(outcome).await?;

        // Re-read the committed row so the caller sees store-applied values,
        // not their in-memory copy.
        self.get_by_id(author.id)
            .await?
            .ok_or_else(|| Error::NotFound(format!("author {}", author.id)))
    }

    #[instrument(skip(self))]
    async fn delete_by_id(&self, id: AuthorId) -> Result<bool> {
        let mut tx = self.pool.begin().await.map_err(Error::Database)?;

        let outcome = sqlx::query("DELETE FROM author WHERE id = $1")
            .bind(id.value())
            .execute(&mut *tx)
            .await
            .map_err(map_write_error);

        let done = tx.commit_or_rollback(outcome).await?;
        let deleted = done.rows_affected() > 0;
        if deleted {
            debug!(author_id = %id, "Author deleted");
        }
        Ok(deleted)
    }

    #[instrument(skip(self))]
    async fn exists(&self, id: AuthorId) -> Result<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM author WHERE id = $1)")
                .bind(id.value())
                .fetch_one(&self.pool)
                .await
                .map_err(Error::Database)?;

        Ok(exists)
    }

    #[instrument(skip(self))]
    async fn count(&self) -> Result<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM author")
            .fetch_one(&self.pool)
            .await
            .map_err(Error::Database)?;

        Ok(count as u64)
    }
}
