//! # Backend Views
//!
//! Server-rendered pages under `/backend/helper`:
//!
//! *   **`GET /`**: `list::process`, templates and collections under `?path=`.
//! *   **`GET /single`**: `single::process`, one template with its newest report.
//! *   **`GET /template/create`**, **`GET /report/create`**: the create forms.

mod forms;
mod html;
mod list;
mod single;

use actix_web::web::{get, scope};
use actix_web::Scope;

pub fn configure_routes() -> Scope {
    scope(html::BACKEND_PATH)
        .route("", get().to(list::process))
        .route("/single", get().to(single::process))
        .route("/template/create", get().to(forms::template))
        .route("/report/create", get().to(forms::report))
}
