use crate::db::report_mapper::ReportMapper;
use crate::error::Result;
use crate::platform::account::AccountId;
use crate::services::failure;
use crate::state::AppState;
use actix_web::{web, HttpResponse, Responder};
use common::model::permission::{PermissionState, PermissionType};
use common::model::reference::Ref;
use common::model::report::Report;

/// `GET /api/helper/report/{id}`
pub async fn process(
    state: web::Data<AppState>,
    account: AccountId,
    id: web::Path<i64>,
) -> impl Responder {
    match get_report(&state, account, id.into_inner()) {
        Ok(report) => HttpResponse::Ok().json(report),
        Err(e) => failure("Report lookup", e),
    }
}

fn get_report(state: &AppState, account: AccountId, id: i64) -> Result<Report> {
    state.require(account, PermissionType::READ, PermissionState::Report, Some(id))?;

    let conn = state.db.connect()?;
    let mut report = ReportMapper::new(&conn, &state.schema).get(id)?;
    if !report.source.is_null() {
        report.source = Ref::Resolved(state.media.get_collection(report.source.id())?);
    }
    Ok(report)
}
