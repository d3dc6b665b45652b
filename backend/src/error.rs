//! Error type shared by every handler, mapper and collaborator of the Helper module.

use crate::assets::Bucket;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum HelperError {
    #[error("Permission denied")]
    PermissionDenied,

    #[error("Couldn't create media collection")]
    CollectionCreationFailed,

    #[error("Template has no {0} renderer file")]
    MissingRendererFile(Bucket),

    #[error("Tag {0} does not exist")]
    InvalidTagReference(i64),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Multipart error: {0}")]
    Multipart(String),

    #[error("Render error: {0}")]
    Render(String),
}

pub type Result<T> = std::result::Result<T, HelperError>;

impl HelperError {
    pub fn not_found(msg: impl Into<String>) -> Self {
        HelperError::NotFound(msg.into())
    }

    pub fn invalid_input(msg: impl Into<String>) -> Self {
        HelperError::InvalidInput(msg.into())
    }

    pub fn render(msg: impl Into<String>) -> Self {
        HelperError::Render(msg.into())
    }
}

impl From<actix_multipart::MultipartError> for HelperError {
    fn from(err: actix_multipart::MultipartError) -> Self {
        HelperError::Multipart(err.to_string())
    }
}

impl From<genpdf::error::Error> for HelperError {
    fn from(err: genpdf::error::Error) -> Self {
        HelperError::Render(format!("pdf: {}", err))
    }
}

impl From<rust_xlsxwriter::XlsxError> for HelperError {
    fn from(err: rust_xlsxwriter::XlsxError) -> Self {
        HelperError::Render(format!("xlsx: {}", err))
    }
}

impl From<csv::Error> for HelperError {
    fn from(err: csv::Error) -> Self {
        HelperError::Render(format!("csv: {}", err))
    }
}

impl From<image::ImageError> for HelperError {
    fn from(err: image::ImageError) -> Self {
        HelperError::Render(format!("image: {}", err))
    }
}

impl From<png::EncodingError> for HelperError {
    fn from(err: png::EncodingError) -> Self {
        HelperError::Render(format!("png: {}", err))
    }
}

impl From<regex::Error> for HelperError {
    fn from(err: regex::Error) -> Self {
        HelperError::Render(format!("regex: {}", err))
    }
}

impl ResponseError for HelperError {
    fn status_code(&self) -> StatusCode {
        match self {
            HelperError::PermissionDenied | HelperError::CollectionCreationFailed => {
                StatusCode::FORBIDDEN
            }
            HelperError::InvalidTagReference(_)
            | HelperError::InvalidInput(_)
            | HelperError::Multipart(_) => StatusCode::BAD_REQUEST,
            HelperError::NotFound(_) => StatusCode::NOT_FOUND,
            HelperError::Database(_) => StatusCode::SERVICE_UNAVAILABLE,
            HelperError::MissingRendererFile(_)
            | HelperError::Io(_)
            | HelperError::Json(_)
            | HelperError::Render(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).body(self.to_string())
    }
}
