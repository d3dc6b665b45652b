//! # Report Service Module
//!
//! *   **`POST /api/helper/report`**: `create::process`, multipart report creation for
//!     an existing template.
//! *   **`GET /api/helper/report/{id}`**: `get::process`.

mod create;
mod get;

use actix_web::web::{get, post, scope};
use actix_web::Scope;

const API_PATH: &str = "/api/helper/report";

pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("", post().to(create::process))
        .route("/{id}", get().to(get::process))
}
