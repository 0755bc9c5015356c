use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use rusqlite::Connection;

/// Owner of one open SQLite handle and the file path it came from. The app
/// holds at most one of these at a time; dropping it releases the handle, so
/// there is no separate cleanup step to forget.
#[derive(Debug)]
pub struct Database {
    conn: Connection,
    path: PathBuf,
}

impl Database {
    /// Open an existing database file. Refuses paths that do not exist so a
    /// typo in the open prompt cannot silently create an empty database; use
    /// [`Database::create`] for that.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            bail!("no database file at {}", path.display());
        }
        Self::connect(path)
    }

    /// Create a new database at the given path, or open it if it already
    /// exists. SQLite creates the file lazily, so a freshly created database
    /// starts with zero tables.
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        Self::connect(path.as_ref())
    }

    fn connect(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("failed to open SQLite database at {}", path.display()))?;
        conn.execute("PRAGMA foreign_keys = ON", [])
            .context("failed to enable foreign keys")?;
        Ok(Self {
            conn,
            path: path.to_path_buf(),
        })
    }

    /// Borrow the underlying connection for queries.
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Path to the database file backing this connection.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Short file name for display in the footer.
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }

    /// Release the handle. Dropping does the same; the explicit form exists so
    /// the "close database" action reads as what it is.
    pub fn close(self) {}
}
