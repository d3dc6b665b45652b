//! Create forms. Both post multipart bodies straight to the API endpoints.

use crate::error::Result;
use crate::lang::{translate, Group};
use crate::platform::account::AccountId;
use crate::services::backend::html::{label, Page};
use crate::services::{accept_language, failure};
use crate::state::AppState;
use actix_web::{web, HttpRequest, HttpResponse, Responder};
use common::model::permission::{PermissionState, PermissionType};
use common::model::template::TemplateDataType;
use common::requests::FormQuery;

fn input(lang: &str, key: &str, field: &str, kind: &str) -> String {
    format!(
        "<label>{}<input type=\"{}\" name=\"{}\"></label>",
        label(lang, key),
        kind,
        field
    )
}

fn textarea(lang: &str, key: &str, field: &str) -> String {
    format!("<label>{}<textarea name=\"{}\"></textarea></label>", label(lang, key), field)
}

fn form(action: &str, fields: &[String], lang: &str) -> String {
    format!(
        "<form method=\"post\" action=\"{}\" enctype=\"multipart/form-data\">{}\
         <input type=\"file\" name=\"files\" multiple><button type=\"submit\">{}</button></form>",
        action,
        fields.concat(),
        label(lang, "Add")
    )
}

fn datatype_select(lang: &str) -> String {
    let options: String = [
        (TemplateDataType::Other, "Other"),
        (TemplateDataType::GlobalDb, "CentralizedDB"),
        (TemplateDataType::GlobalFile, "CentralizedFiles"),
        (TemplateDataType::IndividualDb, "IndividualDB"),
    ]
    .into_iter()
    .map(|(datatype, key)| {
        format!("<option value=\"{}\">{}</option>", i32::from(datatype), label(lang, key))
    })
    .collect();
    format!(
        "<label>{}<select name=\"datatype\">{}</select></label>",
        label(lang, "Type"),
        options
    )
}

fn template_form(
    state: &AppState,
    account: AccountId,
    query: &FormQuery,
    accept_language: Option<&str>,
) -> Result<HttpResponse> {
    state.require(account, PermissionType::CREATE, PermissionState::Template, None)?;
    let lang = state.language(query.lang.as_deref(), accept_language);

    let fields = [
        input(&lang, "Name", "name", "text"),
        textarea(&lang, "Description", "description"),
        input(&lang, "Standalone", "standalone", "checkbox"),
        input(&lang, "Expected", "expected", "text"),
        datatype_select(&lang),
        input(&lang, "MediaDirectory", "virtualpath", "text"),
        input(&lang, "Tags", "tags", "text"),
        input(&lang, "Media", "media-list", "text"),
    ];

    let mut page = Page::new(&lang, translate(&lang, Group::Navigation, "CreateTemplate"));
    page.raw(&form("/api/helper/template", &fields, &lang));
    Ok(page.response())
}

fn report_form(
    state: &AppState,
    account: AccountId,
    query: &FormQuery,
    accept_language: Option<&str>,
) -> Result<HttpResponse> {
    state.require(account, PermissionType::CREATE, PermissionState::Report, None)?;
    let lang = state.language(query.lang.as_deref(), accept_language);

    let fields = [
        input(&lang, "Title", "name", "text"),
        textarea(&lang, "Description", "description"),
        input(&lang, "Template", "template", "number"),
    ];

    let mut page = Page::new(&lang, translate(&lang, Group::Navigation, "CreateReport"));
    page.raw(&form("/api/helper/report", &fields, &lang));
    Ok(page.response())
}

/// `GET /backend/helper/template/create`
pub async fn template(
    state: web::Data<AppState>,
    account: AccountId,
    query: web::Query<FormQuery>,
    req: HttpRequest,
) -> impl Responder {
    match template_form(&state, account, &query, accept_language(&req)) {
        Ok(response) => response,
        Err(e) => failure("Template form", e),
    }
}

/// `GET /backend/helper/report/create`
pub async fn report(
    state: web::Data<AppState>,
    account: AccountId,
    query: web::Query<FormQuery>,
    req: HttpRequest,
) -> impl Responder {
    match report_form(&state, account, &query, accept_language(&req)) {
        Ok(response) => response,
        Err(e) => failure("Report form", e),
    }
}
