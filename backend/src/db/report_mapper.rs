use crate::db::mapper::{
    enum_column, reference_column, reference_value, timestamp_column, Filter, Mapper,
};
use crate::db::schema::Schema;
use crate::error::{HelperError, Result};
use common::model::report::Report;
use rusqlite::types::Value;
use rusqlite::{Connection, Row};

pub struct ReportMapper<'a> {
    conn: &'a Connection,
    schema: &'a Schema,
}

fn from_row(row: &Row<'_>) -> rusqlite::Result<Report> {
    Ok(Report {
        id: row.get("helper_report_id")?,
        status: enum_column(row, "helper_report_status")?,
        title: row.get("helper_report_title")?,
        description: row.get("helper_report_desc")?,
        description_raw: row.get("helper_report_desc_raw")?,
        source: reference_column(row, "helper_report_media")?,
        template: reference_column(row, "helper_report_template")?,
        created_at: timestamp_column(row, "helper_report_created")?,
        created_by: reference_column(row, "helper_report_creator")?,
    })
}

impl<'a> ReportMapper<'a> {
    pub fn new(conn: &'a Connection, schema: &'a Schema) -> Self {
        Self { conn, schema }
    }

    fn mapper(&self) -> Mapper<'a> {
        Mapper::new(self.conn, &self.schema.report)
    }

    /// Persists `report` and stores the assigned id on it.
    pub fn create(&self, report: &mut Report) -> Result<i64> {
        let id = self.mapper().insert(&[
            ("helper_report_status", Value::Integer(i32::from(report.status).into())),
            ("helper_report_title", Value::Text(report.title.clone())),
            ("helper_report_desc", Value::Text(report.description.clone())),
            ("helper_report_desc_raw", Value::Text(report.description_raw.clone())),
            ("helper_report_media", reference_value(&report.source)),
            ("helper_report_template", reference_value(&report.template)),
            ("helper_report_creator", reference_value(&report.created_by)),
            ("helper_report_created", Value::Integer(report.created_at.timestamp_micros())),
        ])?;
        report.id = id;
        Ok(id)
    }

    pub fn get(&self, id: i64) -> Result<Report> {
        self.mapper()
            .get(id, from_row)?
            .ok_or_else(|| HelperError::not_found(format!("report {}", id)))
    }

    /// The report of `template_id` created last, if there is any.
    pub fn get_newest(&self, template_id: i64) -> Result<Option<Report>> {
        let filter = Filter::eq("helper_report_template", Value::Integer(template_id))
            .newest_first()
            .limit(1);
        Ok(self.mapper().find(filter, from_row)?.into_iter().next())
    }

    pub fn for_template(&self, template_id: i64) -> Result<Vec<Report>> {
        let filter =
            Filter::eq("helper_report_template", Value::Integer(template_id)).newest_first();
        self.mapper().find(filter, from_row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::template_mapper::TemplateMapper;
    use crate::db::{install, Database};
    use chrono::{Duration, Utc};
    use common::model::reference::Ref;
    use common::model::template::Template;
    use tempfile::TempDir;

    fn setup() -> (Database, Schema, TempDir) {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let db = Database::new(dir.path().join("helper.sqlite"));
        let schema = Schema::new();
        install(&db, &schema, &dir.path().join("media")).unwrap();
        (db, schema, dir)
    }

    fn stored_template(conn: &Connection, schema: &Schema) -> i64 {
        let mut template = Template::new();
        template.name = "Invoice".to_string();
        TemplateMapper::new(conn, schema).create(&mut template).unwrap()
    }

    #[test]
    fn test_create_and_get() {
        let (db, schema, _dir) = setup();
        let conn = db.connect().unwrap();
        let template_id = stored_template(&conn, &schema);
        let mapper = ReportMapper::new(&conn, &schema);

        let mut report = Report::new();
        report.title = "Q3".to_string();
        report.template = Ref::Unresolved(template_id);
        report.created_by = Ref::Unresolved(7);
        let id = mapper.create(&mut report).unwrap();
        assert_eq!(report.id, id);

        let loaded = mapper.get(id).unwrap();
        assert_eq!(loaded.title, "Q3");
        assert_eq!(loaded.template.id(), template_id);
        assert_eq!(loaded.created_by.id(), 7);
        assert!(loaded.source.is_null());
        assert_eq!(
            loaded.created_at.timestamp_micros(),
            report.created_at.timestamp_micros()
        );
    }

    #[test]
    fn test_get_newest() {
        let (db, schema, _dir) = setup();
        let conn = db.connect().unwrap();
        let template_id = stored_template(&conn, &schema);
        let mapper = ReportMapper::new(&conn, &schema);

        assert!(mapper.get_newest(template_id).unwrap().is_none());

        let now = Utc::now();
        for (title, age) in [("old", 10), ("new", 0), ("middle", 5)] {
            let mut report = Report::new();
            report.title = title.to_string();
            report.template = Ref::Unresolved(template_id);
            report.created_at = now - Duration::minutes(age);
            mapper.create(&mut report).unwrap();
        }

        let newest = mapper.get_newest(template_id).unwrap().unwrap();
        assert_eq!(newest.title, "new");
        assert_eq!(mapper.for_template(template_id).unwrap().len(), 3);
        assert!(mapper.get_newest(template_id + 1).unwrap().is_none());
    }

    #[test]
    fn test_missing_report() {
        let (db, schema, _dir) = setup();
        let conn = db.connect().unwrap();
        let err = ReportMapper::new(&conn, &schema).get(99).unwrap_err();
        assert!(matches!(err, HelperError::NotFound(_)));
    }
}
