//! HTTP endpoints, grouped by area. Each area exposes `configure_routes() -> Scope`.

pub mod backend;
pub mod export;
pub mod media;
pub mod multipart;
pub mod reports;
pub mod templates;

use crate::db::MODULE_MEDIA_DIR;
use crate::error::{HelperError, Result};
use actix_web::{web, HttpResponse, ResponseError};
use log::{debug, error};
use regex::Regex;

/// Virtual path every collection created by this module is filed under.
pub const COLLECTION_VIRTUAL_PATH: &str = "/Modules/Helper";

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(templates::configure_routes())
        .service(reports::configure_routes())
        .service(export::configure_routes())
        .service(media::configure_routes())
        .service(backend::configure_routes());
}

/// Storage directory for the files of a new template or report named `name`.
///
/// The name is reduced to a single safe path component.
pub fn upload_directory(name: &str) -> Result<String> {
    let unsafe_chars = Regex::new(r"[^\w\s\-]")?;
    let cleaned = unsafe_chars.replace_all(name, "");
    let cleaned = cleaned.trim();
    let component = if cleaned.is_empty() { "untitled" } else { cleaned };
    Ok(format!("{}/{}", MODULE_MEDIA_DIR, component))
}

/// Logs a failed action and turns the error into its HTTP response.
pub fn failure(action: &str, err: HelperError) -> HttpResponse {
    if err.status_code().is_server_error() {
        error!("{} failed: {}", action, err);
    } else {
        debug!("{} rejected: {}", action, err);
    }
    err.error_response()
}

/// The `Accept-Language` header, if present and readable.
pub fn accept_language(req: &actix_web::HttpRequest) -> Option<&str> {
    req.headers()
        .get(actix_web::http::header::ACCEPT_LANGUAGE)
        .and_then(|value| value.to_str().ok())
}

#[cfg(test)]
pub(crate) mod test_support;
