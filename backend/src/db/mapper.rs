//! Generic row access driven by a [`TableSchema`].

use crate::db::schema::TableSchema;
use crate::error::Result;
use chrono::{DateTime, Utc};
use common::model::reference::Ref;
use rusqlite::types::{Type, Value};
use rusqlite::{params_from_iter, Connection, OptionalExtension, Row};
use serde::de::DeserializeOwned;

/// Restricts a [`Mapper::find`] to rows where `column` equals `value`.
#[derive(Debug, Clone)]
pub struct Filter<'q> {
    column: &'q str,
    value: Value,
    newest_first: bool,
    limit: Option<u32>,
}

impl<'q> Filter<'q> {
    pub fn eq(column: &'q str, value: Value) -> Self {
        Self {
            column,
            value,
            newest_first: false,
            limit: None,
        }
    }

    /// Orders by creation time, latest first. Ties go to the higher id.
    pub fn newest_first(mut self) -> Self {
        self.newest_first = true;
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }
}

pub struct Mapper<'a> {
    conn: &'a Connection,
    schema: &'a TableSchema,
}

impl<'a> Mapper<'a> {
    pub fn new(conn: &'a Connection, schema: &'a TableSchema) -> Self {
        Self { conn, schema }
    }

    fn check_column(&self, column: &str) -> Result<()> {
        if self.schema.has_column(column) {
            Ok(())
        } else {
            Err(rusqlite::Error::InvalidColumnName(format!("{}.{}", self.schema.table, column)).into())
        }
    }

    /// Inserts one row and returns its new primary key.
    pub fn insert(&self, values: &[(&str, Value)]) -> Result<i64> {
        for (column, _) in values {
            self.check_column(column)?;
        }
        let columns: Vec<&str> = values.iter().map(|(column, _)| *column).collect();
        let placeholders: Vec<String> = (1..=values.len()).map(|i| format!("?{}", i)).collect();
        let sql = format!(
            "INSERT INTO {} ({}) VALUES ({})",
            self.schema.table,
            columns.join(", "),
            placeholders.join(", ")
        );
        self.conn
            .execute(&sql, params_from_iter(values.iter().map(|(_, value)| value)))?;
        Ok(self.conn.last_insert_rowid())
    }

    pub fn get<T, F>(&self, id: i64, map: F) -> Result<Option<T>>
    where
        F: FnOnce(&Row<'_>) -> rusqlite::Result<T>,
    {
        let sql = format!(
            "SELECT {} FROM {} WHERE {} = ?1",
            self.schema.select_list(),
            self.schema.table,
            self.schema.primary
        );
        Ok(self.conn.query_row(&sql, [id], map).optional()?)
    }

    pub fn find<T, F>(&self, filter: Filter<'_>, map: F) -> Result<Vec<T>>
    where
        F: FnMut(&Row<'_>) -> rusqlite::Result<T>,
    {
        self.check_column(filter.column)?;
        let mut sql = format!(
            "SELECT {} FROM {} WHERE {} = ?1",
            self.schema.select_list(),
            self.schema.table,
            filter.column
        );
        if filter.newest_first {
            sql.push_str(&format!(
                " ORDER BY {} DESC, {} DESC",
                self.schema.created_at, self.schema.primary
            ));
        } else {
            sql.push_str(&format!(" ORDER BY {}", self.schema.primary));
        }
        if let Some(limit) = filter.limit {
            sql.push_str(&format!(" LIMIT {}", limit));
        }

        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map([filter.value], map)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }
}

/// Null references are stored as SQL `NULL`.
pub fn reference_value<T: common::model::reference::Identified>(reference: &Ref<T>) -> Value {
    if reference.is_null() {
        Value::Null
    } else {
        Value::Integer(reference.id())
    }
}

pub fn reference_column<T>(row: &Row<'_>, column: &str) -> rusqlite::Result<Ref<T>> {
    let id: Option<i64> = row.get(column)?;
    Ok(id.map(Ref::Unresolved).unwrap_or_default())
}

pub fn timestamp_column(row: &Row<'_>, column: &str) -> rusqlite::Result<DateTime<Utc>> {
    let micros: i64 = row.get(column)?;
    DateTime::from_timestamp_micros(micros).ok_or_else(|| {
        let index = row.as_ref().column_index(column).unwrap_or_default();
        rusqlite::Error::IntegralValueOutOfRange(index, micros)
    })
}

/// Reads an integer column into one of the model's integer-backed enums.
pub fn enum_column<T: TryFrom<i32>>(row: &Row<'_>, column: &str) -> rusqlite::Result<T> {
    let value: i32 = row.get(column)?;
    T::try_from(value).map_err(|_| {
        let index = row.as_ref().column_index(column).unwrap_or_default();
        rusqlite::Error::IntegralValueOutOfRange(index, value as i64)
    })
}

pub fn json_column<T: DeserializeOwned>(row: &Row<'_>, column: &str) -> rusqlite::Result<T> {
    let text: String = row.get(column)?;
    serde_json::from_str(&text).map_err(|e| {
        let index = row.as_ref().column_index(column).unwrap_or_default();
        rusqlite::Error::FromSqlConversionFailure(index, Type::Text, Box::new(e))
    })
}
