use serde::Deserialize;

/// Query of `GET /api/helper/export`.
#[derive(Debug, Clone, Deserialize)]
pub struct ExportQuery {
    /// Template id.
    pub id: i64,
    /// Requested output format. Absent or unknown renders the HTML view.
    #[serde(rename = "type")]
    pub export_type: Option<String>,
    /// Language override for the rendered output.
    pub lang: Option<String>,
}

/// A tag attached during template creation: either an existing tag or one to create.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum TagInput {
    Existing { id: i64 },
    New(NewTag),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NewTag {
    pub title: String,
    pub color: String,
    #[serde(default)]
    pub icon: Option<String>,
    pub language: String,
}

/// Form fields of `POST /api/helper/template`, already split out of the multipart body.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TemplateInput {
    pub name: Option<String>,
    pub description: Option<String>,
    pub standalone: bool,
    /// JSON array of file names, kept raw until the template is built.
    pub expected: Option<String>,
    pub datatype: Option<i32>,
    pub virtual_path: Option<String>,
    pub tags: Vec<TagInput>,
    /// Ids of already stored media to include in the template's collection.
    pub media_list: Vec<i64>,
}

/// Form fields of `POST /api/helper/report`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReportInput {
    pub name: Option<String>,
    pub description: Option<String>,
    pub template: i64,
}

/// Query of the backend template list.
#[derive(Debug, Clone, Deserialize)]
pub struct ListQuery {
    pub path: Option<String>,
    pub lang: Option<String>,
}

/// Query of the backend single-template view.
#[derive(Debug, Clone, Deserialize)]
pub struct ViewQuery {
    pub id: i64,
    pub lang: Option<String>,
}

/// Query of the backend create forms.
#[derive(Debug, Clone, Deserialize)]
pub struct FormQuery {
    pub lang: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_input_by_id() {
        let tags: Vec<TagInput> = serde_json::from_str(r#"[{"id": 5}]"#).unwrap();
        assert_eq!(tags, vec![TagInput::Existing { id: 5 }]);
    }

    #[test]
    fn test_tag_input_inline() {
        let tags: Vec<TagInput> =
            serde_json::from_str(r##"[{"title":"T","color":"#fff","language":"en"}]"##).unwrap();
        assert_eq!(
            tags,
            vec![TagInput::New(NewTag {
                title: "T".to_string(),
                color: "#fff".to_string(),
                icon: None,
                language: "en".to_string(),
            })]
        );
    }
}
