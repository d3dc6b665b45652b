//! The rendering step behind an export.
//!
//! A renderer file is plain text with `{{ key }}` placeholders resolved from the
//! [`ExportContext`]. Values are HTML-escaped for HTML renderers and JSON-string-escaped
//! for JSON renderers.
//!
//! PDF and spreadsheet formats are then written from the substituted text. Both XLS and
//! XLSX are written as an OOXML workbook, which spreadsheet programs open under either
//! extension. Every other format, DOC/DOCX/PPT/PPTX included, is sent as the substituted
//! text itself, so a renderer for those formats has to produce the document markup the
//! target program reads (HTML, or Word/PowerPoint XML) rather than a binary container.

pub mod pdf;
pub mod xlsx;

use crate::error::{HelperError, Result};
use crate::export::{ExportContext, ExportFormat, RenderDirective};
use crate::platform::MediaService;
use log::debug;
use regex::{Captures, Regex};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

pub trait Renderer: Send + Sync {
    fn render(&self, directive: &RenderDirective, context: &ExportContext) -> Result<Vec<u8>>;
}

/// Escapes text for inclusion in HTML element content or attribute values.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Escapes text for inclusion inside a JSON string literal.
pub fn escape_json(text: &str) -> Result<String> {
    let quoted = serde_json::to_string(text)?;
    Ok(quoted[1..quoted.len() - 1].to_string())
}

/// How substituted values are escaped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Escape {
    None,
    Html,
    Json,
}

impl Escape {
    pub fn for_format(format: ExportFormat) -> Self {
        match format {
            ExportFormat::Html => Escape::Html,
            ExportFormat::Json => Escape::Json,
            _ => Escape::None,
        }
    }
}

/// Replaces every `{{ key }}` with its value from `context`. Unknown keys become empty.
pub fn substitute(text: &str, context: &ExportContext, escape: Escape) -> Result<String> {
    let re = Regex::new(r"\{\{\s*([\w.\-]+)\s*\}\}")?;
    let mut failed = None;
    let substituted = re.replace_all(text, |caps: &Captures| {
        let value = context.lookup(&caps[1]).unwrap_or_default();
        match escape {
            Escape::None => value,
            Escape::Html => escape_html(&value),
            Escape::Json => escape_json(&value).unwrap_or_else(|e| {
                failed = Some(e);
                String::new()
            }),
        }
    });
    match failed {
        Some(e) => Err(e),
        None => Ok(substituted.into_owned()),
    }
}

/// Renders from files stored through the media service.
pub struct FileRenderer {
    media: Arc<dyn MediaService>,
    fonts_dir: PathBuf,
}

impl FileRenderer {
    pub fn new(media: Arc<dyn MediaService>, fonts_dir: impl Into<PathBuf>) -> Self {
        Self {
            media,
            fonts_dir: fonts_dir.into(),
        }
    }

    /// Loads the report files named by `[img:...]` lines.
    fn images(&self, text: &str, context: &ExportContext) -> Result<HashMap<String, Vec<u8>>> {
        let Some(files) = context.report.as_ref().map(|data| &data.files) else {
            return Ok(HashMap::new());
        };
        let mut images = HashMap::new();
        for name in text.lines().filter_map(pdf::image_name) {
            if let Some(media) = files.get(name) {
                images.insert(name.to_string(), self.media.read(media)?);
            }
        }
        Ok(images)
    }
}

impl Renderer for FileRenderer {
    fn render(&self, directive: &RenderDirective, context: &ExportContext) -> Result<Vec<u8>> {
        let source = self.media.read(&directive.renderer.media)?;
        let source = String::from_utf8(source).map_err(|e| {
            HelperError::render(format!("{} is not UTF-8: {}", directive.renderer.media.path, e))
        })?;
        let text = substitute(&source, context, Escape::for_format(directive.format))?;
        debug!(
            "Rendering {:?} from {} ({} bytes)",
            directive.format,
            directive.renderer_path(),
            text.len()
        );

        match directive.format {
            ExportFormat::Pdf => {
                let images = self.images(&text, context)?;
                pdf::render(&text, &context.template.name, &self.fonts_dir, &images)
            }
            ExportFormat::Xls | ExportFormat::Xlsx => xlsx::render(&text, &context.template.name),
            ExportFormat::Csv
            | ExportFormat::Doc
            | ExportFormat::Docx
            | ExportFormat::Ppt
            | ExportFormat::Pptx
            | ExportFormat::Json
            | ExportFormat::Html => Ok(text.into_bytes()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::{classify, AssetMap, Variant};
    use crate::export::resolve_export;
    use crate::platform::{NewCollection, UploadedFile};
    use common::model::media::{Collection, Media};
    use common::model::template::Template;

    /// Serves every file with the same content.
    struct FixedMedia(&'static str);

    impl MediaService for FixedMedia {
        fn upload_files(&self, _: &str, _: &[UploadedFile], _: i64) -> Result<Vec<Media>> {
            unimplemented!()
        }
        fn create_collection(&self, _: &NewCollection) -> Result<Collection> {
            unimplemented!()
        }
        fn get_collection(&self, _: i64) -> Result<Collection> {
            unimplemented!()
        }
        fn get_media(&self, _: i64) -> Result<Media> {
            unimplemented!()
        }
        fn collections_by_path(&self, _: &str) -> Result<Vec<Collection>> {
            unimplemented!()
        }
        fn read(&self, _: &Media) -> Result<Vec<u8>> {
            Ok(self.0.as_bytes().to_vec())
        }
    }

    fn context(name: &str) -> ExportContext {
        let mut template = Template::new();
        template.id = 9;
        template.name = name.to_string();
        ExportContext {
            template,
            assets: AssetMap::default(),
            report: None,
            lang: "en".to_string(),
        }
    }

    fn media(path: &str) -> Media {
        Media {
            id: 1,
            name: path.to_string(),
            path: path.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_substitute() {
        let ctx = context("Invoice");
        let text = substitute("{{template.name}} #{{ template.id }} {{unknown}}!", &ctx, Escape::None).unwrap();
        assert_eq!(text, "Invoice #9 !");
    }

    #[test]
    fn test_substitute_escapes_html() {
        let ctx = context("<b>A&B</b>");
        let text = substitute("<h1>{{ template.name }}</h1>", &ctx, Escape::Html).unwrap();
        assert_eq!(text, "<h1>&lt;b&gt;A&amp;B&lt;/b&gt;</h1>");
    }

    #[test]
    fn test_text_formats_pass_through() {
        let renderer = FileRenderer::new(Arc::new(FixedMedia(r#"{"name": "{{ template.name }}"}"#)), "fonts");
        let ctx = context("T");
        let assets = classify(&[media("t/data.json.php")], Variant::Api);
        let directive = resolve_export(ExportFormat::Json, &assets, &ctx.template).unwrap();

        let body = renderer.render(&directive, &ctx).unwrap();
        assert_eq!(String::from_utf8(body).unwrap(), r#"{"name": "T"}"#);
    }

    #[test]
    fn test_json_values_are_escaped() {
        let renderer = FileRenderer::new(Arc::new(FixedMedia(r#"{"name": "{{ template.name }}"}"#)), "fonts");
        let ctx = context("Say \"hi\"\\\n<b>");
        let assets = classify(&[media("t/data.json.php")], Variant::Api);
        let directive = resolve_export(ExportFormat::Json, &assets, &ctx.template).unwrap();

        let body = renderer.render(&directive, &ctx).unwrap();
        let parsed: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(parsed["name"], "Say \"hi\"\\\n<b>");
    }

    #[test]
    fn test_office_text_formats_send_rendered_markup() {
        let source = "<w:document><w:t>{{ template.name }}</w:t></w:document>";
        let renderer = FileRenderer::new(Arc::new(FixedMedia(source)), "fonts");
        let ctx = context("A & B");
        let assets = classify(&[media("t/letter.docx.php")], Variant::Api);
        let directive = resolve_export(ExportFormat::Docx, &assets, &ctx.template).unwrap();

        let body = renderer.render(&directive, &ctx).unwrap();
        assert_eq!(
            String::from_utf8(body).unwrap(),
            "<w:document><w:t>A & B</w:t></w:document>"
        );
    }

    #[test]
    fn test_xls_is_written_as_workbook() {
        let renderer = FileRenderer::new(Arc::new(FixedMedia("a,b\n1,2\n")), "fonts");
        let ctx = context("Sheet");
        let assets = classify(&[media("t/data.xls.php")], Variant::Api);
        let directive = resolve_export(ExportFormat::Xls, &assets, &ctx.template).unwrap();

        let body = renderer.render(&directive, &ctx).unwrap();
        assert!(body.starts_with(b"PK"));
    }

    #[test]
    fn test_spreadsheet_export() {
        let renderer = FileRenderer::new(Arc::new(FixedMedia("a;b\n1;{{ template.id }}\n")), "fonts");
        let ctx = context("Sheet");
        let assets = classify(&[media("t/data.xlsx.php")], Variant::Api);
        let directive = resolve_export(ExportFormat::Xlsx, &assets, &ctx.template).unwrap();

        let body = renderer.render(&directive, &ctx).unwrap();
        assert!(body.starts_with(b"PK"));
    }
}
