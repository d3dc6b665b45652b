use crate::model::account::{Account, Unit};
use crate::model::media::Collection;
use crate::model::reference::{Identified, Ref};
use crate::model::report::Report;
use crate::model::tag::Tag;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle state shared by templates and reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(into = "i32", try_from = "i32")]
pub enum HelperStatus {
    Active = 1,
    #[default]
    Inactive = 2,
}

/// Where the data a template renders is expected to live.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(into = "i32", try_from = "i32")]
pub enum TemplateDataType {
    #[default]
    Other = 0,
    GlobalDb = 1,
    GlobalFile = 2,
    IndividualDb = 3,
}

impl From<HelperStatus> for i32 {
    fn from(status: HelperStatus) -> Self {
        status as i32
    }
}

impl TryFrom<i32> for HelperStatus {
    type Error = String;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(HelperStatus::Active),
            2 => Ok(HelperStatus::Inactive),
            other => Err(format!("unknown status {}", other)),
        }
    }
}

impl From<TemplateDataType> for i32 {
    fn from(datatype: TemplateDataType) -> Self {
        datatype as i32
    }
}

impl TryFrom<i32> for TemplateDataType {
    type Error = String;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(TemplateDataType::Other),
            1 => Ok(TemplateDataType::GlobalDb),
            2 => Ok(TemplateDataType::GlobalFile),
            3 => Ok(TemplateDataType::IndividualDb),
            other => Err(format!("unknown template data type {}", other)),
        }
    }
}

/// A reusable document definition: the files in `source` are the layout, styles and
/// per-format renderers, and `expected` names the files a generated report must provide.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    pub id: i64,
    pub unit: Ref<Unit>,
    pub status: HelperStatus,
    pub datatype: TemplateDataType,
    /// A standalone template renders without any report.
    #[serde(rename = "standalone")]
    pub is_standalone: bool,
    pub name: String,
    pub description: String,
    pub description_raw: String,
    pub created_at: DateTime<Utc>,
    pub created_by: Ref<Account>,
    pub source: Ref<Collection>,
    pub expected: Vec<String>,
    #[serde(skip)]
    pub reports: Vec<Report>,
    pub tags: Vec<Ref<Tag>>,
    pub virtual_path: String,
}

impl Template {
    pub fn new() -> Self {
        Self {
            id: 0,
            unit: Ref::null(),
            status: HelperStatus::default(),
            datatype: TemplateDataType::default(),
            is_standalone: false,
            name: String::new(),
            description: String::new(),
            description_raw: String::new(),
            created_at: Utc::now(),
            created_by: Ref::null(),
            source: Ref::null(),
            expected: Vec::new(),
            reports: Vec::new(),
            tags: Vec::new(),
            virtual_path: "/".to_string(),
        }
    }

    pub fn add_expected(&mut self, file: impl Into<String>) {
        self.expected.push(file.into());
    }

    pub fn add_tag(&mut self, tag: Ref<Tag>) {
        self.tags.push(tag);
    }

    /// The loaded report with the latest creation time, or the null report. Equal
    /// creation times go to the higher id.
    pub fn newest_report(&self) -> Ref<Report> {
        self.reports
            .iter()
            .max_by_key(|report| (report.created_at, report.id))
            .cloned()
            .map(Ref::Resolved)
            .unwrap_or_default()
    }
}

impl Default for Template {
    fn default() -> Self {
        Self::new()
    }
}

impl Identified for Template {
    fn id(&self) -> i64 {
        self.id
    }
}
