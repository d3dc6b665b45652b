use crate::db::template_mapper::TemplateMapper;
use crate::error::Result;
use crate::platform::account::AccountId;
use crate::services::failure;
use crate::state::AppState;
use actix_web::{web, HttpResponse, Responder};
use common::model::permission::{PermissionState, PermissionType};
use common::model::reference::Ref;
use common::model::template::Template;

/// `GET /api/helper/template/{id}`
pub async fn process(
    state: web::Data<AppState>,
    account: AccountId,
    id: web::Path<i64>,
) -> impl Responder {
    match get_template(&state, account, id.into_inner()) {
        Ok(template) => HttpResponse::Ok().json(template),
        Err(e) => failure("Template lookup", e),
    }
}

/// Loads the template with its source collection resolved.
pub fn get_template(state: &AppState, account: AccountId, id: i64) -> Result<Template> {
    state.require(account, PermissionType::READ, PermissionState::Template, Some(id))?;

    let conn = state.db.connect()?;
    let mut template = TemplateMapper::new(&conn, &state.schema).get(id)?;
    if !template.source.is_null() {
        template.source = Ref::Resolved(state.media.get_collection(template.source.id())?);
    }
    Ok(template)
}
