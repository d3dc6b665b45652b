//! `POST /api/helper/report` with the fields `name`, `description` and `template`
//! plus the report's files. The same collect, build, persist and grant sequence as
//! template creation applies.

use crate::builders::build_report;
use crate::db::report_mapper::ReportMapper;
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
use common::model::report::Report;
use common::responses::Envelope;
use log::{info, warn};

const TITLE: &str = "Report";

pub async fn process(
    state: web::Data<AppState>,
    account: AccountId,
    payload: Multipart,
) -> impl Responder {
    match create_report(&state, account, payload).await {
        Ok(report) => HttpResponse::Ok().json(Envelope::ok(
            TITLE,
            "Report successfully created",
            report,
        )),
        Err(HelperError::CollectionCreationFailed) => {
            warn!("Report creation by account {} stored no files", account.0);
            HttpResponse::Forbidden().json(Envelope::<Report>::error(
                TITLE,
                "Couldn't create collection for report",
            ))
        }
        Err(e) => failure("Report creation", e),
    }
}

async fn create_report(state: &AppState, account: AccountId, payload: Multipart) -> Result<Report> {
    state.require(account, PermissionType::CREATE, PermissionState::Report, None)?;

    let form = read_form(payload, state.config.upload_limit).await?;
    let input = form.report_input()?;

    let conn = state.db.connect()?;
    // Fails with NotFound before any file is stored.
    TemplateMapper::new(&conn, &state.schema).get(input.template)?;

    let collection = collect_files(
        state,
        account,
        input.name.as_deref().unwrap_or_default(),
        input.description.as_deref().unwrap_or_default(),
        &form.files,
        &[],
    )?;

    let mut report = build_report(&input, account.0, collection.id);
    ReportMapper::new(&conn, &state.schema).create(&mut report)?;
    state.grant_owner(account, PermissionState::Report, report.id)?;

    info!(
        "Account {} created report {} for template {} with collection {}",
        account.0, report.id, input.template, collection.id
    );
    report.source = Ref::Resolved(collection);
    Ok(report)
}
