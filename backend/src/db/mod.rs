pub mod mapper;
pub mod report_mapper;
pub mod schema;
pub mod template_mapper;

use crate::db::schema::Schema;
use crate::error::Result;
use crate::platform;
use log::info;
use rusqlite::Connection;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Directory below the media root that uploads of this module are stored in.
pub const MODULE_MEDIA_DIR: &str = "Modules/Helper";

/// Location of the SQLite file. Every request opens its own connection.
#[derive(Debug, Clone)]
pub struct Database {
    path: PathBuf,
}

impl Database {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn connect(&self) -> Result<Connection> {
        let conn = Connection::open(&self.path)?;
        conn.pragma_update(None, "foreign_keys", true)?;
        conn.busy_timeout(Duration::from_secs(5))?;
        Ok(conn)
    }
}

/// Creates the platform and Helper tables and the module's media directory.
pub fn install(db: &Database, schema: &Schema, media_root: &Path) -> Result<()> {
    if let Some(parent) = db.path().parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let conn = db.connect()?;
    platform::account::install_tables(&conn)?;
    platform::media::install_tables(&conn)?;
    platform::tag::install_tables(&conn)?;
    conn.execute_batch(&schema.create_sql())?;

    fs::create_dir_all(media_root.join(MODULE_MEDIA_DIR))?;
    info!("Installed Helper tables in {}", db.path().display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_install_is_repeatable() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let db = Database::new(dir.path().join("data/helper.sqlite"));
        let schema = Schema::new();
        let media_root = dir.path().join("media");

        install(&db, &schema, &media_root).unwrap();
        install(&db, &schema, &media_root).unwrap();

        assert!(media_root.join(MODULE_MEDIA_DIR).is_dir());
        let conn = db.connect().unwrap();
        let tables: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name LIKE 'helper_%'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(tables, 3);
    }
}
