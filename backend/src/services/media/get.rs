use crate::error::Result;
use crate::platform::account::AccountId;
use crate::services::failure;
use crate::state::AppState;
use actix_web::{web, HttpResponse, Responder};
use common::model::permission::{PermissionState, PermissionType};

/// `GET /api/helper/media/{id}`: the stored bytes of one file.
pub async fn process(
    state: web::Data<AppState>,
    account: AccountId,
    id: web::Path<i64>,
) -> impl Responder {
    match media_file(&state, account, id.into_inner()) {
        Ok(response) => response,
        Err(e) => failure("Media download", e),
    }
}

fn media_file(state: &AppState, account: AccountId, id: i64) -> Result<HttpResponse> {
    state.require(account, PermissionType::READ, PermissionState::Template, None)?;
    let media = state.media.get_media(id)?;
    let bytes = state.media.read(&media)?;
    let mime = mime_guess::from_path(&media.path).first_or_octet_stream();
    Ok(HttpResponse::Ok().content_type(mime.as_ref()).body(bytes))
}
