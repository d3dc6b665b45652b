//! Reading the multipart bodies of the create endpoints.

use crate::error::{HelperError, Result};
use crate::platform::UploadedFile;
use actix_multipart::Multipart;
use common::requests::{ReportInput, TagInput, TemplateInput};
use futures_util::StreamExt;
use std::collections::HashMap;

/// Text fields and uploaded files of one multipart request.
#[derive(Debug, Default)]
pub struct Form {
    pub fields: HashMap<String, String>,
    pub files: Vec<UploadedFile>,
}

/// Collects every part of `payload`, failing once more than `limit` bytes arrived.
pub async fn read_form(mut payload: Multipart, limit: usize) -> Result<Form> {
    let mut form = Form::default();
    let mut total = 0usize;

    while let Some(item) = payload.next().await {
        let mut field = item?;
        let name = field
            .content_disposition()
            .and_then(|cd| cd.get_name().map(|n| n.to_string()));
        let file_name = field
            .content_disposition()
            .and_then(|cd| cd.get_filename().map(|f| f.to_string()));

        let mut bytes = Vec::new();
        while let Some(chunk) = field.next().await {
            let chunk = chunk?;
            total += chunk.len();
            if total > limit {
                return Err(HelperError::Multipart(format!(
                    "request body exceeds {} bytes",
                    limit
                )));
            }
            bytes.extend_from_slice(&chunk);
        }

        match (name, file_name) {
            (_, Some(file_name)) if !file_name.is_empty() => {
                form.files.push(UploadedFile { file_name, bytes })
            }
            (Some(name), _) => {
                let value = String::from_utf8(bytes)
                    .map_err(|_| HelperError::invalid_input(format!("{} is not UTF-8", name)))?;
                form.fields.insert(name, value);
            }
            _ => {}
        }
    }

    Ok(form)
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "on" | "yes"
    )
}

impl Form {
    fn text(&self, name: &str) -> Option<String> {
        self.fields.get(name).cloned()
    }

    fn json<T: serde::de::DeserializeOwned>(&self, name: &str) -> Result<Option<T>> {
        match self.fields.get(name).map(|v| v.trim()) {
            None | Some("") => Ok(None),
            Some(json) => serde_json::from_str(json)
                .map(Some)
                .map_err(|e| HelperError::invalid_input(format!("{}: {}", name, e))),
        }
    }

    /// Fields of `POST /api/helper/template`.
    pub fn template_input(&self) -> Result<TemplateInput> {
        let datatype = match self.fields.get("datatype").map(|v| v.trim()) {
            None | Some("") => None,
            Some(value) => Some(
                value
                    .parse::<i32>()
                    .map_err(|_| HelperError::invalid_input(format!("datatype: {}", value)))?,
            ),
        };

        Ok(TemplateInput {
            name: self.text("name"),
            description: self.text("description"),
            standalone: self.fields.get("standalone").is_some_and(|v| parse_flag(v)),
            expected: self.text("expected"),
            datatype,
            virtual_path: self.text("virtualpath"),
            tags: self.json::<Vec<TagInput>>("tags")?.unwrap_or_default(),
            media_list: self.json::<Vec<i64>>("media-list")?.unwrap_or_default(),
        })
    }

    /// Fields of `POST /api/helper/report`.
    pub fn report_input(&self) -> Result<ReportInput> {
        let template = self
            .fields
            .get("template")
            .and_then(|v| v.trim().parse::<i64>().ok())
            .filter(|id| *id > 0)
            .ok_or_else(|| HelperError::invalid_input("template id is required"))?;

        Ok(ReportInput {
            name: self.text("name"),
            description: self.text("description"),
            template,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(fields: &[(&str, &str)]) -> Form {
        Form {
            fields: fields
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            files: Vec::new(),
        }
    }

    #[test]
    fn test_template_input() {
        let input = form(&[
            ("name", "Invoice"),
            ("standalone", "true"),
            ("expected", r#"["a.csv"]"#),
            ("datatype", "3"),
            ("virtualpath", "/finance"),
            ("tags", r#"[{"id": 5}]"#),
            ("media-list", "[1, 2]"),
        ])
        .template_input()
        .unwrap();

        assert_eq!(input.name.as_deref(), Some("Invoice"));
        assert!(input.standalone);
        assert_eq!(input.expected.as_deref(), Some(r#"["a.csv"]"#));
        assert_eq!(input.datatype, Some(3));
        assert_eq!(input.virtual_path.as_deref(), Some("/finance"));
        assert_eq!(input.tags, vec![TagInput::Existing { id: 5 }]);
        assert_eq!(input.media_list, vec![1, 2]);
    }

    #[test]
    fn test_empty_template_input() {
        let input = form(&[]).template_input().unwrap();
        assert_eq!(input, TemplateInput::default());
    }

    #[test]
    fn test_bad_fields() {
        assert!(form(&[("datatype", "x")]).template_input().is_err());
        assert!(form(&[("tags", "{")]).template_input().is_err());
        assert!(form(&[("standalone", "0")]).template_input().is_ok());
    }

    #[test]
    fn test_report_input() {
        let input = form(&[("name", "Q3"), ("template", "4")]).report_input().unwrap();
        assert_eq!(input.template, 4);
        assert_eq!(input.name.as_deref(), Some("Q3"));

        let err = form(&[("name", "Q3")]).report_input().unwrap_err();
        assert!(matches!(err, HelperError::InvalidInput(_)));
    }
}
