//! # Template Creation
//!
//! `POST /api/helper/template` takes a multipart body with the fields `name`,
//! `description`, `standalone`, `expected` (JSON list of file names), `datatype`,
//! `virtualpath`, `tags` (JSON list of `{id}` or `{title, color, icon, language}`) and
//! `media-list` (JSON list of stored media ids), plus any number of files.
//!
//! The files are stored and collected first. Only once the collection exists is the
//! template built and persisted, after which its creator is granted owner permissions
//! on it. A collection that cannot be created ends the request with `403` and an
//! `ERROR` envelope before anything is persisted.

use crate::builders::build_template;
use crate::db::template_mapper::TemplateMapper;
use crate::error::{HelperError, Result};
use crate::platform::account::AccountId;
use crate::services::failure;
use crate::services::media::collect_files;
use crate::services::multipart::read_form;
use crate::state::AppState;
use actix_multipart::Multipart;
use actix_web::{web, HttpResponse, Responder};
use common::model::permission::{PermissionState, PermissionType};
use common::model::reference::Ref;
use common::model::template::Template;
use common::responses::Envelope;
use log::{info, warn};

const TITLE: &str = "Template";

pub async fn process(
    state: web::Data<AppState>,
    account: AccountId,
    payload: Multipart,
) -> impl Responder {
    match create_template(&state, account, payload).await {
        Ok(template) => HttpResponse::Ok().json(Envelope::ok(
            TITLE,
            "Template successfully created",
            template,
        )),
        Err(HelperError::CollectionCreationFailed) => {
            warn!("Template creation by account {} stored no files", account.0);
            HttpResponse::Forbidden().json(Envelope::<Template>::error(
                TITLE,
                "Couldn't create collection for template",
            ))
        }
        Err(e) => failure("Template creation", e),
    }
}

async fn create_template(
    state: &AppState,
    account: AccountId,
    payload: Multipart,
) -> Result<Template> {
    state.require(account, PermissionType::CREATE, PermissionState::Template, None)?;

    let form = read_form(payload, state.config.upload_limit).await?;
    let input = form.template_input()?;

    let collection = collect_files(
        state,
        account,
        input.name.as_deref().unwrap_or_default(),
        input.description.as_deref().unwrap_or_default(),
        &form.files,
        &input.media_list,
    )?;

    let mut template = build_template(
        &input,
        account.0,
        state.config.org_id,
        collection.id,
        state.tags.as_ref(),
    )?;
    let conn = state.db.connect()?;
    TemplateMapper::new(&conn, &state.schema).create(&mut template)?;
    state.grant_owner(account, PermissionState::Template, template.id)?;

    info!(
        "Account {} created template {} with collection {} ({} files)",
        account.0,
        template.id,
        collection.id,
        collection.sources.len()
    );
    template.source = Ref::Resolved(collection);
    Ok(template)
}
