use anyhow::{Context, Result};
use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use std::path::Path;

use super::schema::{DEMO_DATA, SCHEMA, TABLES};

/// SQLite in-memory database identifier
const MEMORY_DB_PATH: &str = ":memory:";

/// Per-connection setup. SQLite leaves foreign key enforcement off unless
/// every connection asks for it.
const CONNECTION_PRAGMAS: &str = "PRAGMA foreign_keys = ON;";

pub type DbPool = Pool<SqliteConnectionManager>;
pub type DbConnection = PooledConnection<SqliteConnectionManager>;

/// Database handle with connection pooling support.
///
/// Cheap to clone; pass it (or its pool) to whatever needs storage.
#[derive(Clone)]
pub struct Database {
    pub pool: DbPool,
}

impl Database {
    /// Create a new database connection pool
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let in_memory = Self::is_memory_path(&path);
        let manager = Self::create_connection_manager(path, in_memory);

        // Each in-memory connection is its own database, so a memory pool
        // holds exactly one connection.
        let builder = if in_memory {
            Pool::builder().max_size(1)
        } else {
            Pool::builder()
        };

        let pool = builder
            .build(manager)
            .context("Failed to create database connection pool")?;
        Ok(Self { pool })
    }

    fn is_memory_path<P: AsRef<Path>>(path: P) -> bool {
        let path_str = path.as_ref().to_string_lossy();
        path_str.trim().eq_ignore_ascii_case(MEMORY_DB_PATH)
    }

    /// Create appropriate connection manager based on path
    ///
    /// # Arguments
    /// * `path` - Database file path or ":memory:" for in-memory database
    fn create_connection_manager<P: AsRef<Path>>(path: P, in_memory: bool) -> SqliteConnectionManager {
        let manager = if in_memory {
            SqliteConnectionManager::memory()
        } else {
            SqliteConnectionManager::file(path)
        };
        manager.with_init(|conn| conn.execute_batch(CONNECTION_PRAGMAS))
    }

    /// Create an in-memory database pool (useful for testing)
    pub fn in_memory() -> Result<Self> {
        Self::new(MEMORY_DB_PATH)
    }

    /// Initialize the database schema. Safe to run more than once.
    pub fn initialize(&self) -> Result<()> {
        let conn = self.connection()?;
        conn.execute_batch(SCHEMA)
            .context("Failed to initialize database schema")?;
        tracing::info!("Database schema initialized");
        Ok(())
    }

    /// Seed the database with demo data
    pub fn seed_demo_data(&self) -> Result<()> {
        let conn = self.connection()?;
        conn.execute_batch(DEMO_DATA)
            .context("Failed to seed demo data")?;
        tracing::info!("Demo data seeded");
        Ok(())
    }

    /// Row count for every table, parents first.
    pub fn table_counts(&self) -> Result<Vec<(&'static str, i64)>> {
        let conn = self.connection()?;
        let mut counts = Vec::with_capacity(TABLES.len());
        for table in TABLES {
            let count: i64 = conn
                .query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |row| row.get(0))
                .with_context(|| format!("Failed to count rows in {}", table))?;
            counts.push((table, count));
        }
        Ok(counts)
    }

    /// Get a connection from the pool
    pub fn connection(&self) -> Result<DbConnection> {
        self.pool
            .get()
            .context("Failed to get database connection from pool")
    }
}
