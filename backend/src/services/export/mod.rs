//! # Export Service Module
//!
//! *   **`GET /api/helper/export?id=&type=&lang=`**: `download::process`. Renders a
//!     template, together with its newest report, into the requested format. Download
//!     formats are sent as attachments named after the template; JSON and the default
//!     HTML view are sent inline.

mod download;

use actix_web::web::{get, scope};
use actix_web::Scope;

const API_PATH: &str = "/api/helper/export";

pub fn configure_routes() -> Scope {
    scope(API_PATH).route("", get().to(download::process))
}
