use crate::db::template_mapper::TemplateMapper;
use crate::error::Result;
use crate::lang::{translate, Group};
use crate::platform::account::AccountId;
use crate::render::escape_html;
use crate::services::backend::html::{link, Page, BACKEND_PATH};
use crate::services::{accept_language, failure};
use crate::state::AppState;
use actix_web::{web, HttpRequest, HttpResponse, Responder};
use common::model::permission::{PermissionState, PermissionType};
use common::requests::ListQuery;

/// `GET /backend/helper?path=`: templates and collections filed under one virtual path.
pub async fn process(
    state: web::Data<AppState>,
    account: AccountId,
    query: web::Query<ListQuery>,
    req: HttpRequest,
) -> impl Responder {
    match list(&state, account, &query, accept_language(&req)) {
        Ok(response) => response,
        Err(e) => failure("Template list", e),
    }
}

/// Trims the requested path to `/a/b` form. Empty means the root.
fn normalize(path: Option<&str>) -> String {
    let trimmed = path.unwrap_or_default().trim().trim_end_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{}", trimmed)
    }
}

fn parent(path: &str) -> Option<&str> {
    if path == "/" {
        return None;
    }
    match path.rsplit_once('/') {
        Some(("", _)) | None => Some("/"),
        Some((parent, _)) => Some(parent),
    }
}

fn list_href(path: &str, lang: &str) -> String {
    format!("{}?path={}&lang={}", BACKEND_PATH, path.replace(' ', "+"), lang)
}

fn list(
    state: &AppState,
    account: AccountId,
    query: &ListQuery,
    accept_language: Option<&str>,
) -> Result<HttpResponse> {
    state.require(account, PermissionType::READ, PermissionState::Template, None)?;

    let lang = state.language(query.lang.as_deref(), accept_language);
    let path = normalize(query.path.as_deref());

    let conn = state.db.connect()?;
    let templates = TemplateMapper::new(&conn, &state.schema).get_by_virtual_path(&path)?;
    let collections = state.media.collections_by_path(&path)?;

    let mut page = Page::new(&lang, translate(&lang, Group::Helper, "Helpers"));
    page.text(&path);
    if let Some(parent) = parent(&path) {
        page.raw(&format!("<p>{}</p>", link(&list_href(parent, &lang), "..")));
    }

    let rows: Vec<Vec<String>> = templates
        .iter()
        .map(|template| {
            vec![
                link(
                    &format!("{}/single?id={}&lang={}", BACKEND_PATH, template.id, lang),
                    &template.name,
                ),
                escape_html(&template.description_raw),
                template.created_by.id().to_string(),
                template.created_at.format("%Y-%m-%d").to_string(),
            ]
        })
        .collect();
    page.table(&["Name", "Description", "Creator", "Created"], &rows);

    if !collections.is_empty() {
        page.heading(translate(&lang, Group::Helper, "MediaDirectory"));
        let rows: Vec<Vec<String>> = collections
            .iter()
            .map(|collection| {
                let child = format!("{}/{}", path.trim_end_matches('/'), collection.name);
                vec![link(&list_href(&child, &lang), &collection.name)]
            })
            .collect();
        page.table(&["Name"], &rows);
    }

    Ok(page.response())
}
