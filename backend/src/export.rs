//! # Export Dispatcher
//!
//! Maps a requested output type onto the renderer file that produces it, the response
//! content type and, for downloadable formats, the attachment file name. The mapping is
//! a single exhaustive `match` so every format has to say what it uses.
//!
//! The dispatcher also assembles the data a renderer sees: the template, its classified
//! assets, the newest report of a non-standalone template with that report's files, and
//! the negotiated language.

use crate::assets::{classify, Asset, AssetMap, Bucket, Variant};
use crate::error::{HelperError, Result};
use common::model::media::Media;
use common::model::reference::Ref;
use common::model::report::Report;
use common::model::template::Template;
use log::debug;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportFormat {
    Pdf,
    Csv,
    Xls,
    Xlsx,
    Doc,
    Docx,
    Ppt,
    Pptx,
    Json,
    /// The default on-screen view.
    Html,
}

struct FormatSpec {
    extension: &'static str,
    bucket: Bucket,
    content_type: &'static str,
    download: bool,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 10] = [
        ExportFormat::Pdf,
        ExportFormat::Csv,
        ExportFormat::Xls,
        ExportFormat::Xlsx,
        ExportFormat::Doc,
        ExportFormat::Docx,
        ExportFormat::Ppt,
        ExportFormat::Pptx,
        ExportFormat::Json,
        ExportFormat::Html,
    ];

    /// Reads the `type` request parameter. Absent or unknown values select the HTML view.
    pub fn parse(requested: Option<&str>) -> Self {
        let requested = requested.map(str::trim).unwrap_or_default();
        Self::ALL
            .into_iter()
            .find(|format| format.extension().eq_ignore_ascii_case(requested))
            .unwrap_or(ExportFormat::Html)
    }

    const fn spec(self) -> FormatSpec {
        const XLSX: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";
        const DOCX: &str =
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
        const PPTX: &str =
            "application/vnd.openxmlformats-officedocument.presentationml.presentation";

        let (extension, bucket, content_type, download) = match self {
            ExportFormat::Pdf => ("pdf", Bucket::Pdf, "application/pdf", true),
            ExportFormat::Csv => ("csv", Bucket::Csv, "text/csv", true),
            ExportFormat::Xls => ("xls", Bucket::Excel, "application/vnd.ms-excel", true),
            ExportFormat::Xlsx => ("xlsx", Bucket::Excel, XLSX, true),
            ExportFormat::Doc => ("doc", Bucket::Word, "application/msword", true),
            ExportFormat::Docx => ("docx", Bucket::Word, DOCX, true),
            ExportFormat::Ppt => ("ppt", Bucket::Powerpoint, "application/vnd.ms-powerpoint", true),
            ExportFormat::Pptx => ("pptx", Bucket::Powerpoint, PPTX, true),
            ExportFormat::Json => ("json", Bucket::Json, "application/json", false),
            ExportFormat::Html => ("html", Bucket::Template, "text/html; charset=utf-8", false),
        };
        FormatSpec {
            extension,
            bucket,
            content_type,
            download,
        }
    }

    pub const fn extension(self) -> &'static str {
        self.spec().extension
    }

    /// The asset bucket holding this format's renderer file.
    pub const fn bucket(self) -> Bucket {
        self.spec().bucket
    }

    pub const fn content_type(self) -> &'static str {
        self.spec().content_type
    }

    /// Downloadable formats are sent as attachments named after the template.
    pub const fn is_download(self) -> bool {
        self.spec().download
    }

    /// Everything except the plain HTML view needs the EXPORT permission.
    pub fn requires_export_permission(self) -> bool {
        self != ExportFormat::Html
    }
}

/// What to render and how to send it.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderDirective {
    pub format: ExportFormat,
    pub content_type: &'static str,
    /// Attachment file name, `None` for inline responses.
    pub filename: Option<String>,
    pub renderer: Asset,
}

impl RenderDirective {
    /// The renderer file's path without its classifying suffix.
    pub fn renderer_path(&self) -> &str {
        self.renderer.renderer_path()
    }
}

/// Selects the renderer for `format` from the template's classified assets.
pub fn resolve_export(
    format: ExportFormat,
    assets: &AssetMap,
    template: &Template,
) -> Result<RenderDirective> {
    let bucket = format.bucket();
    let renderer = assets
        .get(bucket)
        .cloned()
        .ok_or(HelperError::MissingRendererFile(bucket))?;
    let filename = format
        .is_download()
        .then(|| format!("{}.{}", template.name, format.extension()));

    debug!(
        "Export of template {} as {:?} uses {}",
        template.id, format, renderer.media.path
    );
    Ok(RenderDirective {
        format,
        content_type: format.content_type(),
        filename,
        renderer,
    })
}

/// The newest report of a template together with its files.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportData {
    /// The null reference when the template has no report yet.
    pub report: Ref<Report>,
    pub assets: AssetMap,
    /// Report files keyed by `name.extension`.
    pub files: BTreeMap<String, Media>,
}

impl ReportData {
    fn null() -> Self {
        Self {
            report: Ref::null(),
            assets: AssetMap::default(),
            files: BTreeMap::new(),
        }
    }
}

/// Everything a renderer may reference.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportContext {
    pub template: Template,
    pub assets: AssetMap,
    /// Always `None` for standalone templates.
    pub report: Option<ReportData>,
    pub lang: String,
}

pub fn media_url(id: i64) -> String {
    format!("/api/helper/media/{}", id)
}

/// Builds the data context for `template`.
///
/// `newest` is asked for the latest report of the template and `files` for the media of
/// a collection; neither is called for a standalone template.
pub fn assemble_context<N, F>(
    template: Template,
    assets: AssetMap,
    lang: &str,
    newest: N,
    files: F,
) -> Result<ExportContext>
where
    N: FnOnce(i64) -> Result<Option<Report>>,
    F: FnOnce(i64) -> Result<Vec<Media>>,
{
    let report = if template.is_standalone {
        None
    } else {
        Some(match newest(template.id)? {
            Some(report) => {
                let media = if report.source.is_null() {
                    Vec::new()
                } else {
                    files(report.source.id())?
                };
                ReportData {
                    assets: classify(&media, Variant::Api),
                    files: media
                        .into_iter()
                        .map(|media| (media.file_name(), media))
                        .collect(),
                    report: Ref::Resolved(report),
                }
            }
            None => ReportData::null(),
        })
    };

    Ok(ExportContext {
        template,
        assets,
        report,
        lang: lang.to_string(),
    })
}

impl ExportContext {
    fn report(&self) -> Option<&Report> {
        self.report.as_ref().and_then(|data| data.report.resolved())
    }

    /// Resolves a placeholder key such as `template.name` or `report.file.data.csv`.
    pub fn lookup(&self, key: &str) -> Option<String> {
        match key {
            "lang" => return Some(self.lang.clone()),
            "template.id" => return Some(self.template.id.to_string()),
            "template.name" => return Some(self.template.name.clone()),
            "template.description" => return Some(self.template.description.clone()),
            "template.description_raw" => return Some(self.template.description_raw.clone()),
            "template.virtual_path" => return Some(self.template.virtual_path.clone()),
            "report.id" => {
                return Some(self.report().map(|r| r.id).unwrap_or_default().to_string())
            }
            "report.title" => return self.report().map(|r| r.title.clone()),
            "report.description" => return self.report().map(|r| r.description.clone()),
            "report.created_at" => return self.report().map(|r| r.created_at.to_rfc3339()),
            _ => {}
        }

        if let Some(file) = key.strip_prefix("report.file.") {
            return self
                .report
                .as_ref()
                .and_then(|data| data.files.get(file))
                .map(|media| media.path.clone());
        }

        let rest = key.strip_prefix("asset.")?;
        let asset = match rest.split_once('.') {
            Some((bucket, name)) => self.assets.named(Bucket::from_key(bucket)?)?.get(name),
            None => self.assets.get(Bucket::from_key(rest)?),
        };
        asset.map(|asset| media_url(asset.media.id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use common::model::reference::Identified;

    fn media(id: i64, path: &str) -> Media {
        let file_name = path.rsplit('/').next().unwrap_or(path);
        let (name, extension) = Media::split_file_name(file_name);
        Media {
            id,
            name,
            extension,
            path: path.to_string(),
            ..Default::default()
        }
    }

    fn template(name: &str) -> Template {
        let mut template = Template::new();
        template.id = 3;
        template.name = name.to_string();
        template
    }

    #[test]
    fn test_parse_format() {
        assert_eq!(ExportFormat::parse(Some("pdf")), ExportFormat::Pdf);
        assert_eq!(ExportFormat::parse(Some("XLSX")), ExportFormat::Xlsx);
        assert_eq!(ExportFormat::parse(Some("json")), ExportFormat::Json);
        assert_eq!(ExportFormat::parse(None), ExportFormat::Html);
        assert_eq!(ExportFormat::parse(Some("")), ExportFormat::Html);
        assert_eq!(ExportFormat::parse(Some("odt")), ExportFormat::Html);
    }

    #[test]
    fn test_lookup_table() {
        let cases = [
            (ExportFormat::Pdf, Bucket::Pdf, "application/pdf", true),
            (ExportFormat::Csv, Bucket::Csv, "text/csv", true),
            (ExportFormat::Xls, Bucket::Excel, "application/vnd.ms-excel", true),
            (ExportFormat::Doc, Bucket::Word, "application/msword", true),
            (ExportFormat::Ppt, Bucket::Powerpoint, "application/vnd.ms-powerpoint", true),
            (ExportFormat::Json, Bucket::Json, "application/json", false),
            (ExportFormat::Html, Bucket::Template, "text/html; charset=utf-8", false),
        ];
        for (format, bucket, content_type, download) in cases {
            assert_eq!(format.bucket(), bucket, "{:?}", format);
            assert_eq!(format.content_type(), content_type, "{:?}", format);
            assert_eq!(format.is_download(), download, "{:?}", format);
        }
        assert!(ExportFormat::Docx.content_type().contains("wordprocessingml"));
        assert!(ExportFormat::Pptx.content_type().contains("presentationml"));
        assert!(ExportFormat::Xlsx.content_type().contains("spreadsheetml"));
    }

    #[test]
    fn test_export_permission() {
        for format in ExportFormat::ALL {
            assert_eq!(
                format.requires_export_permission(),
                format != ExportFormat::Html
            );
        }
    }

    #[test]
    fn test_resolve_pdf() {
        let assets = classify(&[media(1, "Modules/Helper/inv/X.pdf.php")], Variant::Api);
        let directive = resolve_export(ExportFormat::Pdf, &assets, &template("Invoice")).unwrap();

        assert_eq!(directive.content_type, "application/pdf");
        assert_eq!(directive.filename.as_deref(), Some("Invoice.pdf"));
        assert_eq!(directive.renderer_path(), "Modules/Helper/inv/X");
    }

    #[test]
    fn test_resolve_xls_strips_matched_suffix() {
        let assets = classify(&[media(1, "t/sheet.xls.php")], Variant::Api);
        let directive = resolve_export(ExportFormat::Xls, &assets, &template("T")).unwrap();
        assert_eq!(directive.renderer_path(), "t/sheet");
        assert_eq!(directive.filename.as_deref(), Some("T.xls"));

        let directive = resolve_export(ExportFormat::Xlsx, &assets, &template("T")).unwrap();
        assert_eq!(directive.filename.as_deref(), Some("T.xlsx"));
    }

    #[test]
    fn test_json_is_never_an_attachment() {
        let assets = classify(&[media(1, "t/data.json.php")], Variant::Api);
        let directive = resolve_export(ExportFormat::Json, &assets, &template("T")).unwrap();
        assert_eq!(directive.content_type, "application/json");
        assert!(directive.filename.is_none());
    }

    #[test]
    fn test_default_view_uses_template_bucket() {
        let assets = classify(&[media(1, "report.tpl.php")], Variant::Api);
        let format = ExportFormat::parse(None);
        let directive = resolve_export(format, &assets, &template("T")).unwrap();

        assert_eq!(directive.content_type, "text/html; charset=utf-8");
        assert_eq!(directive.renderer_path(), "report");
        assert!(directive.filename.is_none());
    }

    #[test]
    fn test_missing_renderer() {
        let assets = classify(&[media(1, "a.css")], Variant::Api);
        let err = resolve_export(ExportFormat::Pdf, &assets, &template("T")).unwrap_err();
        assert!(matches!(err, HelperError::MissingRendererFile(Bucket::Pdf)));
    }

    #[test]
    fn test_standalone_never_fetches_report() {
        let mut standalone = template("Static");
        standalone.is_standalone = true;

        let context = assemble_context(
            standalone,
            AssetMap::default(),
            "en",
            |_| panic!("standalone templates must not look up reports"),
            |_| panic!("standalone templates must not load report files"),
        )
        .unwrap();

        assert!(context.report.is_none());
        assert_eq!(context.lookup("report.id").as_deref(), Some("0"));
        assert_eq!(context.lookup("report.title"), None);
    }

    #[test]
    fn test_missing_report_uses_null_report() {
        let context = assemble_context(
            template("T"),
            AssetMap::default(),
            "de",
            |_| Ok(None),
            |_| panic!("no report, no files"),
        )
        .unwrap();

        let data = context.report.as_ref().unwrap();
        assert!(data.report.is_null());
        assert!(data.files.is_empty());
        assert_eq!(context.lookup("report.id").as_deref(), Some("0"));
        assert_eq!(context.lookup("lang").as_deref(), Some("de"));
    }

    #[test]
    fn test_newest_report_and_files() {
        let mut report = Report::new();
        report.id = 11;
        report.title = "Q3".to_string();
        report.source = Ref::Unresolved(21);
        report.created_at = Utc::now() - Duration::days(1);

        let context = assemble_context(
            template("T"),
            AssetMap::default(),
            "en",
            |template_id| {
                assert_eq!(template_id, 3);
                Ok(Some(report.clone()))
            },
            |collection| {
                assert_eq!(collection, 21);
                Ok(vec![media(5, "Modules/Helper/q3/data.csv"), media(6, "q3/style.css")])
            },
        )
        .unwrap();

        let data = context.report.as_ref().unwrap();
        assert_eq!(data.report.id(), 11);
        assert!(data.assets.named(Bucket::Css).is_some());
        assert_eq!(context.lookup("report.title").as_deref(), Some("Q3"));
        assert_eq!(
            context.lookup("report.file.data.csv").as_deref(),
            Some("Modules/Helper/q3/data.csv")
        );
        assert_eq!(context.lookup("report.file.missing.csv"), None);
        assert_eq!(context.template.id(), 3);
    }

    #[test]
    fn test_asset_lookup() {
        let assets = classify(
            &[media(1, "t/report.tpl.php"), media(2, "t/style.css")],
            Variant::Api,
        );
        let context = ExportContext {
            template: template("T"),
            assets,
            report: None,
            lang: "en".to_string(),
        };

        assert_eq!(
            context.lookup("asset.template").as_deref(),
            Some("/api/helper/media/1")
        );
        assert_eq!(
            context.lookup("asset.css.style").as_deref(),
            Some("/api/helper/media/2")
        );
        assert_eq!(context.lookup("asset.css"), None);
        assert_eq!(context.lookup("asset.pdf"), None);
        assert_eq!(context.lookup("nothing"), None);
    }
}
