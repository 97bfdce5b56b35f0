//! SQLite bootstrap: connection pool, pragmas and schema.

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::Connection;

mod notes;
mod schema;

pub use notes::{NoteStore, SqliteNoteStore};

pub const DATABASE_FILE_NAME: &str = "quicknotes.db";

const FILE_POOL_SIZE: u32 = 8;

pub type DbResult<T> = Result<T, DbError>;

#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("connection pool error: {0}")]
    Pool(#[from] r2d2::Error),
    #[error("could not determine a data directory for the database")]
    NoDataDir,
    #[error("failed to create database directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid data in notes.{column}: {message}")]
    InvalidData {
        column: &'static str,
        message: String,
    },
}

/// Shared handle to the note database.
///
/// Cloning is cheap; every clone draws from the same pool.
#[derive(Clone)]
pub struct Database {
    pool: Pool<SqliteConnectionManager>,
}

impl std::fmt::Debug for Database {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.pool.state();
        f.debug_struct("Database")
            .field("connections", &state.connections)
            .field("idle_connections", &state.idle_connections)
            .finish()
    }
}

impl Database {
    /// Opens (creating if needed) a file-backed database.
    pub fn open(path: impl AsRef<Path>) -> DbResult<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|source| DbError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        tracing::debug!(path = %path.display(), "opening database");
        let manager = SqliteConnectionManager::file(path).with_init(configure_connection);
        let pool = Pool::builder().max_size(FILE_POOL_SIZE).build(manager)?;
        Ok(Self { pool })
    }

    /// Opens a private in-memory database.
    ///
    /// Every SQLite in-memory connection is its own database, so the pool is
    /// held at exactly one connection that is never retired.
    pub fn open_in_memory() -> DbResult<Self> {
        let manager = SqliteConnectionManager::memory().with_init(configure_connection);
        let pool = Pool::builder()
            .max_size(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .build(manager)?;
        Ok(Self { pool })
    }

    /// Opens the database at the platform data directory.
    pub fn open_default() -> DbResult<Self> {
        Self::open(Self::default_path()?)
    }

    pub fn default_path() -> DbResult<PathBuf> {
        let dirs = ProjectDirs::from("", "", "quicknotes").ok_or(DbError::NoDataDir)?;
        Ok(dirs.data_dir().join(DATABASE_FILE_NAME))
    }

    /// Creates the notes table and indexes if they do not exist yet.
    pub fn migrate(&self) -> DbResult<()> {
        let conn = self.connection()?;
        conn.execute_batch(schema::SCHEMA)?;
        tracing::info!("database schema ready");
        Ok(())
    }

    /// Checks out a connection. It goes back to the pool when dropped.
    pub fn connection(&self) -> DbResult<PooledConnection<SqliteConnectionManager>> {
        Ok(self.pool.get()?)
    }
}

fn configure_connection(conn: &mut Connection) -> rusqlite::Result<()> {
    conn.busy_timeout(Duration::from_secs(5))?;
    // journal_mode answers with a row, so it needs the checking variant.
    conn.pragma_update_and_check(None, "journal_mode", "WAL", |_| Ok(()))?;
    conn.pragma_update(None, "foreign_keys", "ON")
}
