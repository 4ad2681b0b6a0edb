//! Test database setup.
//!
//! Provides PostgreSQL test database instances with migrations applied.
//! Point `new_with_url` at a database (a local instance, or one started via
//! the re-exported `testcontainers` postgres module) and clean between tests
//! for isolation.

use sqlx::{postgres::PgPoolOptions, PgPool};
use std::sync::Arc;

/// Test database wrapper with automatic schema setup.
pub struct TestDatabase {
    pool: Arc<PgPool>,
}

impl TestDatabase {
    /// Create a new test database with migrations applied.
    pub async fn new_with_url(connection_string: &str) -> anyhow::Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(connection_string)
            .await?;

        sqlx::migrate!("../../migrations").run(&pool).await?;

        Ok(Self {
            pool: Arc::new(pool),
        })
    }

    /// Get a reference to the database pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Get an Arc clone of the pool for sharing
    pub fn pool_arc(&self) -> Arc<PgPool> {
        Arc::clone(&self.pool)
    }

    /// Clean all tables for test isolation
    pub async fn clean(&self) -> anyhow::Result<()> {
        sqlx::query("TRUNCATE TABLE book RESTART IDENTITY CASCADE")
            .execute(self.pool())
            .await?;
        sqlx::query("TRUNCATE TABLE author RESTART IDENTITY CASCADE")
            .execute(self.pool())
            .await?;
        Ok(())
    }
}
