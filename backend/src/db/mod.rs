pub mod facilities;
pub mod facilities_models;
pub mod facilities_schema;
pub mod views;

use std::fs;
use std::path::Path;

use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, CustomizeConnection, Pool, PooledConnection};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};

use parking_lot::Mutex;
use anyhow::{Context, Result, Error as AnyhowError};

use crate::logger::info;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

pub type SqlitePool = Pool<ConnectionManager<SqliteConnection>>;
pub type DbConn = PooledConnection<ConnectionManager<SqliteConnection>>;

/// Applied to every connection as it is checked out of the pool.
#[derive(Debug, Clone, Copy)]
struct ConnectionOptions;

impl CustomizeConnection<SqliteConnection, diesel::r2d2::Error> for ConnectionOptions {
    fn on_acquire(&self, conn: &mut SqliteConnection) -> Result<(), diesel::r2d2::Error> {
        conn.batch_execute("PRAGMA foreign_keys = ON; PRAGMA busy_timeout = 5000;")
            .map_err(diesel::r2d2::Error::QueryError)
    }
}

#[derive(Debug)]
pub struct DatabaseHandle {
    pool: SqlitePool,
    pub write_lock: Mutex<()>,
}

impl DatabaseHandle {
    pub fn new(database_url: &str) -> Result<Self> {
        info(&format!("DatabaseHandle::new() {}", database_url));
        let manager = ConnectionManager::new(database_url);
        let pool = Pool::builder()
            .max_size(5)
            .connection_customizer(Box::new(ConnectionOptions))
            .build(manager)
            .with_context(|| format!("Failed to create pool for: {}", database_url))?;

        Ok(Self {
            pool,
            write_lock: Mutex::new(()),
        })
    }

    /// Opens (creating if needed) the database file and brings its schema up
    /// to date, including the summary views.
    pub fn open(db_path: &Path) -> Result<Self> {
        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create directory: {:?}", parent))?;
            }
        }

        let database_url = db_path.to_str()
            .ok_or_else(|| anyhow::anyhow!("Invalid database path: {:?}", db_path))?;

        let handle = Self::new(database_url)?;
        handle.run_migrations()?;
        Ok(handle)
    }

    pub fn run_migrations(&self) -> Result<()> {
        let _lock = self.write_lock.lock();
        let mut db_conn = self.get_conn()?;
        db_conn.run_pending_migrations(MIGRATIONS)
            .map_err(|e| anyhow::anyhow!("Failed to execute pending database migrations: {}", e))?;
        Ok(())
    }

    pub fn get_conn(&self) -> Result<DbConn> {
        self.pool.get().map_err(AnyhowError::from)
    }

    /// Performs a write operation on the database, guarded by a Mutex write_lock.
    pub fn do_write<F, T>(&self, operation: F) -> Result<T>
    where
        F: FnOnce(&mut SqliteConnection) -> Result<T, diesel::result::Error>,
    {
        let _lock = self.write_lock.lock();
        let mut db_conn = self.pool.get()
            .context("Failed to get connection from pool for write")?;
        operation(&mut db_conn).map_err(AnyhowError::from)
    }

    /// Performs a read operation on the database.
    pub fn do_read<F, T>(&self, operation: F) -> Result<T>
    where
        F: FnOnce(&mut SqliteConnection) -> Result<T, diesel::result::Error>,
    {
        let mut db_conn = self.pool.get()
            .context("Failed to get connection from pool for read")?;
        operation(&mut db_conn).map_err(AnyhowError::from)
    }
}
