use crate::model::account::Account;
use crate::model::media::Collection;
use crate::model::reference::{Identified, Ref};
use crate::model::template::{HelperStatus, Template};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// One generated data instance of a template, with its own attached files.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub id: i64,
    pub status: HelperStatus,
    pub title: String,
    pub description: String,
    pub description_raw: String,
    pub source: Ref<Collection>,
    pub template: Ref<Template>,
    pub created_at: DateTime<Utc>,
    pub created_by: Ref<Account>,
}

impl Report {
    pub fn new() -> Self {
        Self {
            id: 0,
            status: HelperStatus::default(),
            title: String::new(),
            description: String::new(),
            description_raw: String::new(),
            source: Ref::null(),
            template: Ref::null(),
            created_at: Utc::now(),
            created_by: Ref::null(),
        }
    }
}

impl Default for Report {
    fn default() -> Self {
        Self::new()
    }
}

impl Identified for Report {
    fn id(&self) -> i64 {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default() {
        let report = Report::new();
        assert_eq!(report.id, 0);
        assert_eq!(report.status, HelperStatus::Inactive);
        assert_eq!(report.title, "");
        assert!(report.source.is_null());
        assert!(report.template.is_null());
        assert!(report.created_by.is_null());
        assert_eq!(report.created_at.date_naive(), Utc::now().date_naive());
    }

    #[test]
    fn test_template_reference() {
        let mut report = Report::new();
        report.template = Ref::Unresolved(11);
        assert_eq!(report.template.id(), 11);

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["template"], serde_json::json!({ "id": 11 }));
        assert_eq!(json["status"], 2);
    }
}
