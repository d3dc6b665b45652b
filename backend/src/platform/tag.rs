use crate::db::Database;
use crate::error::Result;
use crate::platform::TagService;
use common::model::tag::Tag;
use common::requests::NewTag;
use rusqlite::{params, Connection};

const TABLES: &str = "
    CREATE TABLE IF NOT EXISTS tag (
        tag_id INTEGER PRIMARY KEY AUTOINCREMENT,
        tag_title TEXT NOT NULL,
        tag_color TEXT NOT NULL,
        tag_icon TEXT,
        tag_language TEXT NOT NULL,
        tag_owner INTEGER NOT NULL
    );
";

pub fn install_tables(conn: &Connection) -> Result<()> {
    conn.execute_batch(TABLES)?;
    Ok(())
}

pub struct SqliteTagService {
    db: Database,
}

impl SqliteTagService {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

impl TagService for SqliteTagService {
    fn create(&self, tag: &NewTag, account: i64) -> Result<Tag> {
        let conn = self.db.connect()?;
        conn.execute(
            "INSERT INTO tag (tag_title, tag_color, tag_icon, tag_language, tag_owner)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![tag.title, tag.color, tag.icon, tag.language, account],
        )?;
        Ok(Tag {
            id: conn.last_insert_rowid(),
            title: tag.title.clone(),
            color: tag.color.clone(),
            icon: tag.icon.clone(),
            language: tag.language.clone(),
        })
    }
}
