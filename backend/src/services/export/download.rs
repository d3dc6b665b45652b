use crate::assets::{classify, Variant};
use crate::db::report_mapper::ReportMapper;
use crate::db::template_mapper::TemplateMapper;
use crate::error::Result;
use crate::export::{assemble_context, resolve_export, ExportFormat};
use crate::platform::account::AccountId;
use crate::services::{accept_language, failure};
use crate::state::AppState;
use actix_web::http::header::{ContentDisposition, DispositionParam, DispositionType};
use actix_web::{web, HttpRequest, HttpResponse, Responder};
use common::model::permission::{PermissionState, PermissionType};
use common::requests::ExportQuery;
use log::info;

pub async fn process(
    state: web::Data<AppState>,
    account: AccountId,
    query: web::Query<ExportQuery>,
    req: HttpRequest,
) -> impl Responder {
    match export(&state, account, &query, accept_language(&req)) {
        Ok(response) => response,
        Err(e) => failure("Export", e),
    }
}

fn export(
    state: &AppState,
    account: AccountId,
    query: &ExportQuery,
    accept_language: Option<&str>,
) -> Result<HttpResponse> {
    let format = ExportFormat::parse(query.export_type.as_deref());

    state.require(account, PermissionType::READ, PermissionState::Template, Some(query.id))?;
    if format.requires_export_permission() {
        state.require(account, PermissionType::READ, PermissionState::Export, None)?;
    }

    let conn = state.db.connect()?;
    let template = TemplateMapper::new(&conn, &state.schema).get(query.id)?;
    let files = if template.source.is_null() {
        Vec::new()
    } else {
        state.media.get_collection(template.source.id())?.sources
    };
    let assets = classify(&files, Variant::Api);
    let directive = resolve_export(format, &assets, &template)?;

    let lang = state.language(query.lang.as_deref(), accept_language);
    let reports = ReportMapper::new(&conn, &state.schema);
    let context = assemble_context(
        template,
        assets,
        &lang,
        |id| reports.get_newest(id),
        |collection| Ok(state.media.get_collection(collection)?.sources),
    )?;

    let body = state.renderer.render(&directive, &context)?;
    info!(
        "Account {} exported template {} as {:?} ({} bytes)",
        account.0,
        query.id,
        format,
        body.len()
    );

    let mut response = HttpResponse::Ok();
    response.content_type(directive.content_type);
    if let Some(filename) = directive.filename {
        response.insert_header(ContentDisposition {
            disposition: DispositionType::Attachment,
            parameters: vec![DispositionParam::Filename(filename)],
        });
    }
    Ok(response.body(body))
}
