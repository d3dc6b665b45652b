use crate::db::mapper::{
    enum_column, json_column, reference_column, reference_value, timestamp_column, Filter, Mapper,
};
use crate::db::report_mapper::ReportMapper;
use crate::db::schema::Schema;
use crate::error::{HelperError, Result};
use common::model::reference::Ref;
use common::model::tag::Tag;
use common::model::template::Template;
use log::debug;
use rusqlite::types::Value;
use rusqlite::{params, Connection, Row};

pub struct TemplateMapper<'a> {
    conn: &'a Connection,
    schema: &'a Schema,
}

fn from_row(row: &Row<'_>) -> rusqlite::Result<Template> {
    let standalone: bool = row.get("helper_template_standalone")?;
    Ok(Template {
        id: row.get("helper_template_id")?,
        unit: reference_column(row, "helper_template_unit")?,
        status: enum_column(row, "helper_template_status")?,
        datatype: enum_column(row, "helper_template_datatype")?,
        is_standalone: standalone,
        name: row.get("helper_template_title")?,
        description: row.get("helper_template_desc")?,
        description_raw: row.get("helper_template_desc_raw")?,
        created_at: timestamp_column(row, "helper_template_created")?,
        created_by: reference_column(row, "helper_template_creator")?,
        source: reference_column(row, "helper_template_media")?,
        expected: json_column(row, "helper_template_expected")?,
        reports: Vec::new(),
        tags: Vec::new(),
        virtual_path: row.get("helper_template_virtual")?,
    })
}

fn is_foreign_key_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _)
            if e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_FOREIGNKEY
    )
}

impl<'a> TemplateMapper<'a> {
    pub fn new(conn: &'a Connection, schema: &'a Schema) -> Self {
        Self { conn, schema }
    }

    /// Persists `template` together with its tag relations and stores the assigned id on it.
    ///
    /// A tag id that does not exist aborts the whole insert with `InvalidTagReference`.
    pub fn create(&self, template: &mut Template) -> Result<i64> {
        let tx = self.conn.unchecked_transaction()?;
        let id = Mapper::new(&tx, &self.schema.template).insert(&[
            ("helper_template_status", Value::Integer(i32::from(template.status).into())),
            ("helper_template_datatype", Value::Integer(i32::from(template.datatype).into())),
            ("helper_template_standalone", Value::Integer(template.is_standalone.into())),
            ("helper_template_title", Value::Text(template.name.clone())),
            ("helper_template_desc", Value::Text(template.description.clone())),
            ("helper_template_desc_raw", Value::Text(template.description_raw.clone())),
            ("helper_template_media", reference_value(&template.source)),
            ("helper_template_expected", Value::Text(serde_json::to_string(&template.expected)?)),
            ("helper_template_virtual", Value::Text(template.virtual_path.clone())),
            ("helper_template_unit", reference_value(&template.unit)),
            ("helper_template_creator", reference_value(&template.created_by)),
            ("helper_template_created", Value::Integer(template.created_at.timestamp_micros())),
        ])?;

        let relation = &self.schema.template_tags;
        let sql = format!(
            "INSERT OR IGNORE INTO {} ({}, {}) VALUES (?1, ?2)",
            relation.table, relation.owner.name, relation.target.name
        );
        for tag in &template.tags {
            let tag_id = tag.id();
            tx.execute(&sql, params![id, tag_id]).map_err(|e| {
                if is_foreign_key_violation(&e) {
                    HelperError::InvalidTagReference(tag_id)
                } else {
                    HelperError::Database(e)
                }
            })?;
        }

        tx.commit()?;
        template.id = id;
        debug!("Created template {} with {} tags", id, template.tags.len());
        Ok(id)
    }

    /// The template with its tag references. Reports are not loaded.
    pub fn get(&self, id: i64) -> Result<Template> {
        let mut template = Mapper::new(self.conn, &self.schema.template)
            .get(id, from_row)?
            .ok_or_else(|| HelperError::not_found(format!("template {}", id)))?;
        template.tags = self.tags(id)?;
        Ok(template)
    }

    pub fn get_by_virtual_path(&self, virtual_path: &str) -> Result<Vec<Template>> {
        let filter = Filter::eq("helper_template_virtual", Value::Text(virtual_path.to_string()))
            .newest_first();
        let mut templates = Mapper::new(self.conn, &self.schema.template).find(filter, from_row)?;
        for template in &mut templates {
            template.tags = self.tags(template.id)?;
        }
        Ok(templates)
    }

    /// Fills `template.reports`, newest first.
    pub fn load_reports(&self, template: &mut Template) -> Result<()> {
        template.reports = ReportMapper::new(self.conn, self.schema).for_template(template.id)?;
        Ok(())
    }

    fn tags(&self, template_id: i64) -> Result<Vec<Ref<Tag>>> {
        let relation = &self.schema.template_tags;
        let sql = format!(
            "SELECT {} FROM {} WHERE {} = ?1 ORDER BY {}",
            relation.target.name, relation.table, relation.owner.name, relation.target.name
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map([template_id], |row| row.get::<_, i64>(0))?;
        let ids = rows.collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(ids.into_iter().map(Ref::Unresolved).collect())
    }
}
