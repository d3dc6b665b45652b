//! Table descriptions for the Helper entities.
//!
//! A [`Schema`] is built once at startup and handed by reference to the mappers, which
//! derive their SQL from it instead of hard-coding column lists.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Integer,
    Boolean,
    Text,
    /// JSON document stored as text.
    Json,
    /// Microseconds since the Unix epoch.
    Timestamp,
}

impl ColumnKind {
    fn sql_type(self) -> &'static str {
        match self {
            ColumnKind::Integer | ColumnKind::Boolean | ColumnKind::Timestamp => "INTEGER",
            ColumnKind::Text | ColumnKind::Json => "TEXT",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForeignKey {
    pub table: &'static str,
    pub column: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub name: &'static str,
    pub kind: ColumnKind,
    pub nullable: bool,
    pub references: Option<ForeignKey>,
}

impl Column {
    pub fn new(name: &'static str, kind: ColumnKind) -> Self {
        Self {
            name,
            kind,
            nullable: false,
            references: None,
        }
    }

    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    pub fn references(mut self, table: &'static str, column: &'static str) -> Self {
        self.references = Some(ForeignKey { table, column });
        self
    }

    fn definition(&self) -> String {
        let mut sql = format!("{} {}", self.name, self.kind.sql_type());
        if !self.nullable {
            sql.push_str(" NOT NULL");
        }
        if let Some(fk) = self.references {
            sql.push_str(&format!(" REFERENCES {} ({})", fk.table, fk.column));
        }
        sql
    }
}

/// An entity table with an integer primary key and a creation timestamp column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSchema {
    pub table: &'static str,
    pub primary: &'static str,
    pub created_at: &'static str,
    pub columns: Vec<Column>,
}

impl TableSchema {
    pub fn has_column(&self, name: &str) -> bool {
        name == self.primary || self.columns.iter().any(|column| column.name == name)
    }

    /// Primary key followed by every column, comma separated.
    pub fn select_list(&self) -> String {
        std::iter::once(self.primary)
            .chain(self.columns.iter().map(|column| column.name))
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn create_sql(&self) -> String {
        let mut definitions = vec![format!("{} INTEGER PRIMARY KEY AUTOINCREMENT", self.primary)];
        definitions.extend(self.columns.iter().map(Column::definition));
        format!(
            "CREATE TABLE IF NOT EXISTS {} (\n    {}\n);",
            self.table,
            definitions.join(",\n    ")
        )
    }
}

/// A many-to-many link table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationSchema {
    pub table: &'static str,
    pub owner: Column,
    pub target: Column,
}

impl RelationSchema {
    pub fn create_sql(&self) -> String {
        format!(
            "CREATE TABLE IF NOT EXISTS {} (\n    {},\n    {},\n    PRIMARY KEY ({}, {})\n);",
            self.table,
            self.owner.definition(),
            self.target.definition(),
            self.owner.name,
            self.target.name
        )
    }
}

/// Everything the Helper module persists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    pub template: TableSchema,
    pub report: TableSchema,
    pub template_tags: RelationSchema,
}

impl Schema {
    pub fn new() -> Self {
        use ColumnKind::*;

        let template = TableSchema {
            table: "helper_template",
            primary: "helper_template_id",
            created_at: "helper_template_created",
            columns: vec![
                Column::new("helper_template_status", Integer),
                Column::new("helper_template_datatype", Integer),
                Column::new("helper_template_standalone", Boolean),
                Column::new("helper_template_title", Text),
                Column::new("helper_template_desc", Text),
                Column::new("helper_template_desc_raw", Text),
                Column::new("helper_template_media", Integer)
                    .nullable()
                    .references("media_collection", "media_collection_id"),
                Column::new("helper_template_expected", Json),
                Column::new("helper_template_virtual", Text),
                Column::new("helper_template_unit", Integer).nullable(),
                Column::new("helper_template_creator", Integer).nullable(),
                Column::new("helper_template_created", Timestamp),
            ],
        };

        let report = TableSchema {
            table: "helper_report",
            primary: "helper_report_id",
            created_at: "helper_report_created",
            columns: vec![
                Column::new("helper_report_status", Integer),
                Column::new("helper_report_title", Text),
                Column::new("helper_report_desc", Text),
                Column::new("helper_report_desc_raw", Text),
                Column::new("helper_report_media", Integer)
                    .nullable()
                    .references("media_collection", "media_collection_id"),
                Column::new("helper_report_template", Integer)
                    .nullable()
                    .references("helper_template", "helper_template_id"),
                Column::new("helper_report_creator", Integer).nullable(),
                Column::new("helper_report_created", Timestamp),
            ],
        };

        let template_tags = RelationSchema {
            table: "helper_template_tag_rel",
            owner: Column::new("helper_template_tag_rel_template", Integer)
                .references("helper_template", "helper_template_id"),
            target: Column::new("helper_template_tag_rel_tag", Integer).references("tag", "tag_id"),
        };

        Self {
            template,
            report,
            template_tags,
        }
    }

    /// DDL for every Helper table, safe to run repeatedly.
    pub fn create_sql(&self) -> String {
        [
            self.template.create_sql(),
            self.report.create_sql(),
            self.template_tags.create_sql(),
        ]
        .join("\n")
    }
}

impl Default for Schema {
    fn default() -> Self {
        Self::new()
    }
}
