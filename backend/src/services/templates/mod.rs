//! # Template Service Module
//!
//! Endpoints under `/api/helper/template`:
//!
//! *   **`POST /`**: `create::process`. Multipart template creation. Uploaded files and
//!     the ids listed in `media-list` become the template's new media collection; the
//!     creator receives owner permissions on the stored template.
//! *   **`GET /{id}`**: `get::process`. The template as JSON with its source collection.

mod create;
mod get;

use actix_web::web::{get, post, scope};
use actix_web::Scope;

const API_PATH: &str = "/api/helper/template";

pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("", post().to(create::process))
        .route("/{id}", get().to(get::process))
}
