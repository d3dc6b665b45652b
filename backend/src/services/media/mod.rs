//! Raw access to stored files, plus the collection step shared by the create endpoints.

mod get;

use crate::error::{HelperError, Result};
use crate::platform::account::AccountId;
use crate::platform::{NewCollection, UploadedFile};
use crate::services::{upload_directory, COLLECTION_VIRTUAL_PATH};
use crate::state::AppState;
use actix_web::web::{get, scope};
use actix_web::Scope;
use common::model::media::Collection;
use log::warn;

const API_PATH: &str = "/api/helper/media";

pub fn configure_routes() -> Scope {
    scope(API_PATH).route("/{id}", get().to(get::process))
}

/// Stores `files` and groups them with the already stored `existing` media into a new
/// collection. Fails with `CollectionCreationFailed` when there is nothing to collect or
/// an `existing` id is unknown; unknown ids are caught before anything is stored.
pub fn collect_files(
    state: &AppState,
    account: AccountId,
    name: &str,
    description: &str,
    files: &[UploadedFile],
    existing: &[i64],
) -> Result<Collection> {
    let directory = upload_directory(name)?;

    for id in existing {
        if let Err(HelperError::NotFound(_)) = state.media.get_media(*id) {
            warn!("media {} does not exist, nothing stored for '{}'", id, name);
            return Err(HelperError::CollectionCreationFailed);
        }
    }

    let mut media = Vec::new();
    if !files.is_empty() {
        media.extend(
            state
                .media
                .upload_files(&directory, files, account.0)?
                .into_iter()
                .map(|m| m.id),
        );
    }
    media.extend_from_slice(existing);

    state.media.create_collection(&NewCollection {
        name: name.to_string(),
        description: description.to_string(),
        media,
        account: account.0,
        path: directory,
        virtual_path: COLLECTION_VIRTUAL_PATH.to_string(),
    })
}
