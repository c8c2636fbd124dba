// src/db/mod.rs

//! Recipe store: SQLite connection management and the recipe model

pub mod models;
pub mod schema;

pub use models::{Recipe, FIELDS};

use crate::error::Result;
use rusqlite::Connection;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Open the database, creating it (and its parent directory) if absent, and
/// apply any pending schema migrations.
pub fn open(db_path: &str) -> Result<Connection> {
    if let Some(parent) = Path::new(db_path).parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let conn = Connection::open(db_path)?;
    schema::migrate(&conn)?;
    debug!("Opened database at {}", db_path);
    Ok(conn)
}

/// Initialize the database at the given path
pub fn init(db_path: &str) -> Result<()> {
    open(db_path).map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_open_creates_parent_directory() {
        let temp = TempDir::new().unwrap();
        let db_path = temp.path().join("nested/dir/pantry.db");

        let conn = open(db_path.to_str().unwrap()).unwrap();
        assert!(db_path.exists());

        // Schema should be migrated on open
        assert_eq!(Recipe::count(&conn).unwrap(), 0);
    }

    #[test]
    fn test_init_is_idempotent() {
        let temp = TempDir::new().unwrap();
        let db_path = temp.path().join("pantry.db");
        let db_path = db_path.to_str().unwrap();

        init(db_path).unwrap();
        init(db_path).unwrap();

        let conn = open(db_path).unwrap();
        assert_eq!(Recipe::count(&conn).unwrap(), 0);
    }
}
