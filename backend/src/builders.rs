//! Turns validated create-request input into entities.
//!
//! Builders never persist anything, create collections or grant permissions; the
//! handlers orchestrate those around them. The one collaborator call is tag creation
//! for tags supplied inline.

use crate::error::{HelperError, Result};
use crate::platform::TagService;
use common::model::reference::Ref;
use common::model::report::Report;
use common::model::template::{Template, TemplateDataType};
use common::requests::{ReportInput, TagInput, TemplateInput};
use pulldown_cmark::{html, Event, Parser};

/// Name given to templates created without one.
pub const DEFAULT_TEMPLATE_NAME: &str = "Empty";

/// Renders the raw description markup to HTML. Embedded HTML is kept as escaped text.
pub fn render_markdown(input: &str) -> String {
    let parser = Parser::new(input).map(|event| match event {
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
        other => other,
    });
    let mut html_output = String::new();
    html::push_html(&mut html_output, parser);
    html_output
}

fn parse_expected(expected: Option<&str>) -> Result<Vec<String>> {
    match expected.map(str::trim) {
        None | Some("") => Ok(Vec::new()),
        Some(json) => serde_json::from_str(json)
            .map_err(|e| HelperError::invalid_input(format!("expected: {}", e))),
    }
}

fn parse_datatype(datatype: Option<i32>) -> Result<TemplateDataType> {
    match datatype {
        None => Ok(TemplateDataType::Other),
        Some(value) => TemplateDataType::try_from(value).map_err(HelperError::InvalidInput),
    }
}

/// Builds an unsaved template owned by `account` in `unit`.
///
/// `collection_id` is attached as the template's source only when a collection was
/// actually created (id > 0).
pub fn build_template(
    input: &TemplateInput,
    account: i64,
    unit: i64,
    collection_id: i64,
    tags: &dyn TagService,
) -> Result<Template> {
    let raw = input.description.clone().unwrap_or_default();

    let mut template = Template::new();
    template.name = input
        .name
        .clone()
        .unwrap_or_else(|| DEFAULT_TEMPLATE_NAME.to_string());
    template.description = render_markdown(&raw);
    template.description_raw = raw;
    template.is_standalone = input.standalone;
    template.expected = parse_expected(input.expected.as_deref())?;
    template.datatype = parse_datatype(input.datatype)?;
    template.virtual_path = input
        .virtual_path
        .clone()
        .unwrap_or_else(|| "/".to_string());
    template.created_by = Ref::Unresolved(account);
    template.unit = Ref::Unresolved(unit);

    if collection_id > 0 {
        template.source = Ref::Unresolved(collection_id);
    }

    for tag in &input.tags {
        match tag {
            TagInput::Existing { id } => template.add_tag(Ref::Unresolved(*id)),
            TagInput::New(new_tag) => template.add_tag(Ref::Resolved(tags.create(new_tag, account)?)),
        }
    }

    Ok(template)
}

pub fn build_report(input: &ReportInput, account: i64, collection_id: i64) -> Report {
    let raw = input.description.clone().unwrap_or_default();

    let mut report = Report::new();
    report.title = input.name.clone().unwrap_or_default();
    report.description = render_markdown(&raw);
    report.description_raw = raw;
    report.template = Ref::Unresolved(input.template);
    report.created_by = Ref::Unresolved(account);
    if collection_id > 0 {
        report.source = Ref::Unresolved(collection_id);
    }
    report
}
