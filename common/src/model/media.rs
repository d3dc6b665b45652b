use crate::model::account::Account;
use crate::model::reference::{Identified, Ref};
use serde::Serialize;

/// A single stored file.
///
/// `name` is the display name without the final extension, so `report.tpl.php` is stored
/// as name `report.tpl` and extension `php`. `path` is relative to the media root.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Media {
    pub id: i64,
    pub name: String,
    pub extension: String,
    pub path: String,
    pub virtual_path: String,
    pub size: u64,
    pub checksum: String,
}

impl Media {
    /// Splits an uploaded file name into display name and extension.
    pub fn split_file_name(file_name: &str) -> (String, String) {
        match file_name.rsplit_once('.') {
            Some((name, ext)) if !name.is_empty() => (name.to_string(), ext.to_string()),
            _ => (file_name.to_string(), String::new()),
        }
    }

    /// `name.extension`, or just the name for files without an extension.
    pub fn file_name(&self) -> String {
        if self.extension.is_empty() {
            self.name.clone()
        } else {
            format!("{}.{}", self.name, self.extension)
        }
    }
}

/// An ordered group of media files owned by a template or report.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Collection {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub path: String,
    pub virtual_path: String,
    pub created_by: Ref<Account>,
    pub sources: Vec<Media>,
}

impl Identified for Media {
    fn id(&self) -> i64 {
        self.id
    }
}

impl Identified for Collection {
    fn id(&self) -> i64 {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_file_name_keeps_inner_suffixes() {
        assert_eq!(
            Media::split_file_name("report.tpl.php"),
            ("report.tpl".to_string(), "php".to_string())
        );
        assert_eq!(
            Media::split_file_name("README"),
            ("README".to_string(), String::new())
        );
        assert_eq!(
            Media::split_file_name(".hidden"),
            (".hidden".to_string(), String::new())
        );
    }

    #[test]
    fn test_file_name_joins_extension() {
        let media = Media {
            name: "styles".to_string(),
            extension: "css".to_string(),
            ..Default::default()
        };
        assert_eq!(media.file_name(), "styles.css");
    }
}
