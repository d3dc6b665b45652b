use crate::db::Database;
use crate::error::{HelperError, Result};
use crate::platform::{MediaService, NewCollection, UploadedFile};
use chrono::Utc;
use common::model::media::{Collection, Media};
use common::model::reference::Ref;
use log::{debug, warn};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

const TABLES: &str = "
    CREATE TABLE IF NOT EXISTS media (
        media_id INTEGER PRIMARY KEY AUTOINCREMENT,
        media_name TEXT NOT NULL,
        media_extension TEXT NOT NULL,
        media_path TEXT NOT NULL,
        media_virtual TEXT NOT NULL,
        media_size INTEGER NOT NULL,
        media_checksum TEXT NOT NULL,
        media_created_by INTEGER NOT NULL,
        media_created INTEGER NOT NULL
    );
    CREATE TABLE IF NOT EXISTS media_collection (
        media_collection_id INTEGER PRIMARY KEY AUTOINCREMENT,
        media_collection_name TEXT NOT NULL,
        media_collection_desc TEXT NOT NULL,
        media_collection_path TEXT NOT NULL,
        media_collection_virtual TEXT NOT NULL,
        media_collection_created_by INTEGER NOT NULL,
        media_collection_created INTEGER NOT NULL
    );
    CREATE TABLE IF NOT EXISTS media_collection_rel (
        media_collection_rel_collection INTEGER NOT NULL
            REFERENCES media_collection (media_collection_id),
        media_collection_rel_media INTEGER NOT NULL REFERENCES media (media_id),
        media_collection_rel_order INTEGER NOT NULL
    );
";

const MAX_NAME_ATTEMPTS: u32 = 1000;

const MEDIA_COLUMNS: &str = "media_id, media_name, media_extension, media_path, media_virtual, \
                             media_size, media_checksum";

const COLLECTION_COLUMNS: &str = "media_collection_id, media_collection_name, \
                                  media_collection_desc, media_collection_path, \
                                  media_collection_virtual, media_collection_created_by";

pub fn install_tables(conn: &Connection) -> Result<()> {
    conn.execute_batch(TABLES)?;
    Ok(())
}

/// Files on disk below `root`, indexed in the `media` tables.
pub struct SqliteMediaService {
    db: Database,
    root: PathBuf,
}

fn media_from_row(row: &Row) -> rusqlite::Result<Media> {
    Ok(Media {
        id: row.get(0)?,
        name: row.get(1)?,
        extension: row.get(2)?,
        path: row.get(3)?,
        virtual_path: row.get(4)?,
        size: row.get(5)?,
        checksum: row.get(6)?,
    })
}

fn collection_from_row(row: &Row) -> rusqlite::Result<Collection> {
    Ok(Collection {
        id: row.get(0)?,
        name: row.get(1)?,
        description: row.get(2)?,
        path: row.get(3)?,
        virtual_path: row.get(4)?,
        created_by: Ref::Unresolved(row.get(5)?),
        sources: Vec::new(),
    })
}

/// Reduces an uploaded file name to its last path component.
fn safe_file_name(file_name: &str) -> Option<&str> {
    Path::new(file_name)
        .file_name()
        .and_then(|name| name.to_str())
        .filter(|name| !name.starts_with('.'))
}

impl SqliteMediaService {
    pub fn new(db: Database, root: impl Into<PathBuf>) -> Self {
        Self {
            db,
            root: root.into(),
        }
    }

    /// Moves `tmp` to `file_name` in `target_dir` without replacing an existing file.
    ///
    /// Files stored earlier under the same name stay untouched; later ones go to the
    /// numbered subdirectories `1/`, `2/`, ... and keep their name. Returns the path
    /// relative to `target_dir`.
    fn place(mut tmp: NamedTempFile, target_dir: &Path, file_name: &str) -> Result<String> {
        for attempt in 0..=MAX_NAME_ATTEMPTS {
            let relative = if attempt == 0 {
                file_name.to_string()
            } else {
                format!("{}/{}", attempt, file_name)
            };
            let target = target_dir.join(&relative);
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            match tmp.persist_noclobber(&target) {
                Ok(_) => return Ok(relative),
                Err(e) if e.error.kind() == io::ErrorKind::AlreadyExists => tmp = e.file,
                Err(e) => return Err(HelperError::Io(e.error)),
            }
        }
        Err(HelperError::Io(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("no free location for {} in {}", file_name, target_dir.display()),
        )))
    }

    fn store(&self, conn: &Connection, directory: &str, file: &UploadedFile, account: i64)
        -> Result<Media> {
        let file_name = safe_file_name(&file.file_name)
            .ok_or_else(|| HelperError::invalid_input(format!("bad file name {}", file.file_name)))?;
        let target_dir = self.root.join(directory);
        fs::create_dir_all(&target_dir)?;

        // Write next to the target and move into place once complete.
        let mut tmp = NamedTempFile::new_in(&target_dir)?;
        tmp.as_file_mut().write_all(&file.bytes)?;
        let relative = Self::place(tmp, &target_dir, file_name)?;

        let (name, extension) = Media::split_file_name(file_name);
        let mut media = Media {
            id: 0,
            name,
            extension,
            path: format!("{}/{}", directory.trim_end_matches('/'), relative),
            virtual_path: format!("/{}", directory.trim_matches('/')),
            size: file.bytes.len() as u64,
            checksum: format!("{:x}", md5::compute(&file.bytes)),
        };

        conn.execute(
            "INSERT INTO media (media_name, media_extension, media_path, media_virtual,
                                media_size, media_checksum, media_created_by, media_created)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                media.name,
                media.extension,
                media.path,
                media.virtual_path,
                media.size,
                media.checksum,
                account,
                Utc::now().timestamp_micros(),
            ],
        )?;
        media.id = conn.last_insert_rowid();
        debug!("stored media {} at {}", media.id, media.path);
        Ok(media)
    }

    fn find_media(conn: &Connection, id: i64) -> Result<Option<Media>> {
        let media = conn
            .query_row(
                &format!("SELECT {} FROM media WHERE media_id = ?1", MEDIA_COLUMNS),
                params![id],
                media_from_row,
            )
            .optional()?;
        Ok(media)
    }

    fn sources(conn: &Connection, collection: i64) -> Result<Vec<Media>> {
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM media
             JOIN media_collection_rel ON media_collection_rel_media = media_id
             WHERE media_collection_rel_collection = ?1
             ORDER BY media_collection_rel_order",
            MEDIA_COLUMNS
        ))?;
        let rows = stmt.query_map(params![collection], media_from_row)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }
}

impl MediaService for SqliteMediaService {
    fn upload_files(&self, directory: &str, files: &[UploadedFile], account: i64)
        -> Result<Vec<Media>> {
        let conn = self.db.connect()?;
        files
            .iter()
            .map(|file| self.store(&conn, directory, file, account))
            .collect()
    }

    fn create_collection(&self, collection: &NewCollection) -> Result<Collection> {
        let conn = self.db.connect()?;

        let mut sources = Vec::with_capacity(collection.media.len());
        for id in &collection.media {
            match Self::find_media(&conn, *id)? {
                Some(media) => sources.push(media),
                None => {
                    warn!("media {} does not exist, collection '{}' not created", id, collection.name);
                    return Err(HelperError::CollectionCreationFailed);
                }
            }
        }
        if sources.is_empty() {
            warn!("collection '{}' has no media", collection.name);
            return Err(HelperError::CollectionCreationFailed);
        }

        let tx = conn.unchecked_transaction()?;
        tx.execute(
            "INSERT INTO media_collection (media_collection_name, media_collection_desc,
                                           media_collection_path, media_collection_virtual,
                                           media_collection_created_by, media_collection_created)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                collection.name,
                collection.description,
                collection.path,
                collection.virtual_path,
                collection.account,
                Utc::now().timestamp_micros(),
            ],
        )?;
        let id = tx.last_insert_rowid();
        for (order, media) in sources.iter().enumerate() {
            tx.execute(
                "INSERT INTO media_collection_rel (media_collection_rel_collection,
                                                   media_collection_rel_media,
                                                   media_collection_rel_order)
                 VALUES (?1, ?2, ?3)",
                params![id, media.id, order as i64],
            )?;
        }
        tx.commit()?;

        Ok(Collection {
            id,
            name: collection.name.clone(),
            description: collection.description.clone(),
            path: collection.path.clone(),
            virtual_path: collection.virtual_path.clone(),
            created_by: Ref::Unresolved(collection.account),
            sources,
        })
    }

    fn get_collection(&self, id: i64) -> Result<Collection> {
        let conn = self.db.connect()?;
        let mut collection = conn
            .query_row(
                &format!(
                    "SELECT {} FROM media_collection WHERE media_collection_id = ?1",
                    COLLECTION_COLUMNS
                ),
                params![id],
                collection_from_row,
            )
            .optional()?
            .ok_or_else(|| HelperError::not_found(format!("collection {}", id)))?;
        collection.sources = Self::sources(&conn, id)?;
        Ok(collection)
    }

    fn get_media(&self, id: i64) -> Result<Media> {
        let conn = self.db.connect()?;
        Self::find_media(&conn, id)?.ok_or_else(|| HelperError::not_found(format!("media {}", id)))
    }

    fn collections_by_path(&self, virtual_path: &str) -> Result<Vec<Collection>> {
        let conn = self.db.connect()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM media_collection WHERE media_collection_virtual = ?1
             ORDER BY media_collection_name",
            COLLECTION_COLUMNS
        ))?;
        let rows = stmt.query_map(params![virtual_path], collection_from_row)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    fn read(&self, media: &Media) -> Result<Vec<u8>> {
        Ok(fs::read(self.root.join(&media.path))?)
    }
}
