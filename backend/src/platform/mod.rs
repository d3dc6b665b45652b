//! Services owned by other platform modules that Helper depends on.
//!
//! Helper only needs a narrow slice of each: permission checks and grants from the
//! account service, file storage and collections from the media service, and tag
//! creation from the tag service. Each is a trait so the application state can hold
//! any implementation; the SQLite-backed ones in the submodules make the server usable
//! on its own.

pub mod account;
pub mod media;
pub mod tag;

use crate::error::Result;
use common::model::media::{Collection, Media};
use common::model::permission::{AccountPermission, PermissionQuery};
use common::model::tag::Tag;
use common::requests::NewTag;

pub trait AccountService: Send + Sync {
    fn has_permission(&self, query: &PermissionQuery) -> Result<bool>;

    fn grant(&self, permission: &AccountPermission) -> Result<()>;
}

/// A file received in a multipart request.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadedFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Parameters of a collection to create from already stored media.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCollection {
    pub name: String,
    pub description: String,
    pub media: Vec<i64>,
    pub account: i64,
    /// Storage directory relative to the media root.
    pub path: String,
    pub virtual_path: String,
}

pub trait MediaService: Send + Sync {
    /// Stores `files` under `directory` (relative to the media root).
    fn upload_files(&self, directory: &str, files: &[UploadedFile], account: i64)
        -> Result<Vec<Media>>;

    /// Fails with `CollectionCreationFailed` when none of the media can be collected.
    fn create_collection(&self, collection: &NewCollection) -> Result<Collection>;

    /// The collection with its files in insertion order.
    fn get_collection(&self, id: i64) -> Result<Collection>;

    fn get_media(&self, id: i64) -> Result<Media>;

    fn collections_by_path(&self, virtual_path: &str) -> Result<Vec<Collection>>;

    fn read(&self, media: &Media) -> Result<Vec<u8>>;
}

pub trait TagService: Send + Sync {
    fn create(&self, tag: &NewTag, account: i64) -> Result<Tag>;
}
