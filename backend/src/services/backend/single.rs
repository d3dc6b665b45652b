//! `GET /backend/helper/single?id=&lang=`
//!
//! One template on screen: its classified files, expected report files, tags, the
//! export formats it can produce, the newest report with that report's files and the
//! earlier reports.

use crate::assets::{classify, AssetMap, Bucket, Entry, Variant};
use crate::db::template_mapper::TemplateMapper;
use crate::error::{HelperError, Result};
use crate::export::{assemble_context, media_url, ExportFormat};
use crate::lang::{translate, Group};
use crate::platform::account::AccountId;
use crate::render::escape_html;
use crate::services::backend::html::{label, link, Page};
use crate::services::{accept_language, failure};
use crate::state::AppState;
use actix_web::{web, HttpRequest, HttpResponse, Responder};
use common::model::permission::{PermissionState, PermissionType};
use common::requests::ViewQuery;

pub async fn process(
    state: web::Data<AppState>,
    account: AccountId,
    query: web::Query<ViewQuery>,
    req: HttpRequest,
) -> impl Responder {
    match single(&state, account, &query, accept_language(&req)) {
        Ok(response) => response,
        Err(e) => failure("Template view", e),
    }
}

fn asset_rows(assets: &AssetMap) -> Vec<Vec<String>> {
    let mut rows = Vec::new();
    for (bucket, entry) in assets.entries() {
        match entry {
            Entry::Single(asset) => rows.push(vec![
                bucket.key().to_string(),
                link(&media_url(asset.media.id), &asset.media.file_name()),
            ]),
            Entry::Named(files) => rows.extend(files.values().map(|asset| {
                vec![
                    bucket.key().to_string(),
                    link(&media_url(asset.media.id), &asset.media.file_name()),
                ]
            })),
        }
    }
    rows
}

fn single(
    state: &AppState,
    account: AccountId,
    query: &ViewQuery,
    accept_language: Option<&str>,
) -> Result<HttpResponse> {
    state.require(account, PermissionType::READ, PermissionState::Template, Some(query.id))?;

    let lang = state.language(query.lang.as_deref(), accept_language);
    let conn = state.db.connect()?;
    let templates = TemplateMapper::new(&conn, &state.schema);
    let mut template = templates.get(query.id)?;
    if !template.is_standalone {
        templates.load_reports(&mut template)?;
    }
    let files = if template.source.is_null() {
        Vec::new()
    } else {
        state.media.get_collection(template.source.id())?.sources
    };
    let assets = classify(&files, Variant::Backend);
    if !template.is_standalone && !assets.contains(Bucket::Template) {
        return Err(HelperError::MissingRendererFile(Bucket::Template));
    }

    let newest = template.newest_report().into_resolved();
    let context = assemble_context(
        template,
        assets,
        &lang,
        |_| Ok(newest),
        |collection| Ok(state.media.get_collection(collection)?.sources),
    )?;
    let template = &context.template;

    let mut page = Page::new(&lang, &template.name);
    page.raw(&format!("<div class=\"description\">{}</div>", template.description));
    page.table(
        &["Standalone", "Created", "Creator"],
        &[vec![
            label(&lang, if template.is_standalone { "Standalone" } else { "Report" }),
            template.created_at.format("%Y-%m-%d %H:%M").to_string(),
            template.created_by.id().to_string(),
        ]],
    );

    page.heading(translate(&lang, Group::Helper, "Files"));
    page.table(&["Type", "Name"], &asset_rows(&context.assets));

    if !template.expected.is_empty() {
        page.heading(translate(&lang, Group::Helper, "Expected"));
        let items: String = template
            .expected
            .iter()
            .map(|file| format!("<li>{}</li>", escape_html(file)))
            .collect();
        page.raw(&format!("<ul>{}</ul>", items));
    }

    if !template.tags.is_empty() {
        page.heading(translate(&lang, Group::Helper, "Tags"));
        let tags: Vec<String> = template.tags.iter().map(|tag| tag.id().to_string()).collect();
        page.text(&tags.join(", "));
    }

    let exports: Vec<String> = ExportFormat::ALL
        .into_iter()
        .filter(|format| context.assets.contains(format.bucket()))
        .map(|format| {
            link(
                &format!(
                    "/api/helper/export?id={}&type={}&lang={}",
                    template.id,
                    format.extension(),
                    lang
                ),
                format.extension(),
            )
        })
        .collect();
    if !exports.is_empty() {
        page.heading(translate(&lang, Group::Helper, "Export"));
        page.raw(&format!("<p>{}</p>", exports.join(" ")));
    }

    if let Some(report) = context.report.as_ref().and_then(|data| data.report.resolved()) {
        page.heading(translate(&lang, Group::Helper, "Report"));
        page.text(&report.title);
        page.raw(&format!("<div class=\"description\">{}</div>", report.description));
        let rows: Vec<Vec<String>> = context
            .report
            .iter()
            .flat_map(|data| data.files.iter())
            .map(|(name, media)| vec![link(&media_url(media.id), name)])
            .collect();
        page.table(&["Files"], &rows);
    }

    if template.reports.len() > 1 {
        page.heading(translate(&lang, Group::Helper, "Reports"));
        let rows: Vec<Vec<String>> = template
            .reports
            .iter()
            .map(|report| {
                vec![
                    escape_html(&report.title),
                    report.created_at.format("%Y-%m-%d %H:%M").to_string(),
                ]
            })
            .collect();
        page.table(&["Title", "Created"], &rows);
    }

    Ok(page.response())
}
