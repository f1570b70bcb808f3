pub mod contacts;
pub mod deals;
pub mod migrations;
pub mod tasks;

use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::Connection;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

/// Store errors callers may want to tell apart from plain SQLite failures.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i64 },
}

impl StoreError {
    pub fn not_found(entity: &'static str, id: i64) -> anyhow::Error {
        StoreError::NotFound { entity, id }.into()
    }
}

/// Maps "no rows" onto [`StoreError::NotFound`], everything else passes through.
pub(crate) fn not_found_or(entity: &'static str, id: i64, e: rusqlite::Error) -> anyhow::Error {
    match e {
        rusqlite::Error::QueryReturnedNoRows => StoreError::not_found(entity, id),
        other => other.into(),
    }
}

#[derive(Clone)]
pub struct AsyncDbConnection {
    pool: Arc<Pool<SqliteConnectionManager>>,
}

impl AsyncDbConnection {
    pub fn new(pool: Pool<SqliteConnectionManager>) -> Self {
        Self {
            pool: Arc::new(pool),
        }
    }

    pub async fn lock(&self) -> anyhow::Result<PooledConnection<SqliteConnectionManager>> {
        self.pool
            .get()
            .map_err(|e| anyhow::anyhow!("Failed to get DB connection from pool: {}", e))
    }
}

pub struct Database {
    pub async_connection: AsyncDbConnection,
}

impl Database {
    /// Open (or create) the database file and run migrations
    pub fn new(db_path: &Path) -> anyhow::Result<Self> {
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        // Migrate on a plain connection before the pool hands any out
        {
            let conn = Connection::open(db_path)?;
            migrations::run_migrations(&conn)?;
        }

        let manager = SqliteConnectionManager::file(db_path).with_init(|conn| {
            conn.busy_timeout(Duration::from_secs(5))?;
            conn.execute_batch("PRAGMA foreign_keys = ON;")?;
            Ok(())
        });

        let pool = Pool::builder().max_size(8).build(manager)?;

        Ok(Database {
            async_connection: AsyncDbConnection::new(pool),
        })
    }

    /// Cheap round trip used by the health endpoint
    pub async fn ping(&self) -> anyhow::Result<()> {
        let conn = self.async_connection.lock().await?;
        conn.query_row("SELECT 1", [], |row| row.get::<_, i64>(0))?;
        Ok(())
    }
}
