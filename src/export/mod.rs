// Export module: CSV serialization of tables for download
// Author: Gabriel Demetrios Lafis

mod labels;
mod tabular;

pub use labels::ColumnLabels;
pub use tabular::{from_dataset, to_dataset, FromRow, Tabular};

use std::io;

use log::debug;
use serde::Serialize;
use thiserror::Error;

use crate::data::{
    parse_flag, DataError, DataSet, DataType, Field, Project, Row, Schema, SchemaValidator, Value,
};

/// Suggested file name for the filtered project download
pub const FILTERED_PROJECTS_FILENAME: &str = "filtered_research_projects.csv";

/// MIME type of every export
pub const CSV_MIME: &str = "text/csv";

/// Errors raised while writing or reading exported tables
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("CSV error: {0}")]
    Csv(#[from] ::csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid exported data: {0}")]
    Data(#[from] DataError),

    #[error("Missing column '{0}' in exported data")]
    MissingColumn(String),

    #[error("Invalid value '{value}' in column '{column}'")]
    InvalidValue { column: String, value: String },
}

/// Bytes of an export together with how they should be offered for download
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportPayload {
    pub filename: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl ExportPayload {
    pub fn csv(filename: impl Into<String>, bytes: Vec<u8>) -> Self {
        ExportPayload {
            filename: filename.into(),
            mime: CSV_MIME.to_string(),
            bytes,
        }
    }
}

fn format_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Boolean(true) => "Yes".to_string(),
        Value::Boolean(false) => "No".to_string(),
        Value::Integer(i) => i.to_string(),
        Value::String(s) => s.clone(),
    }
}

/// Serialize a table to CSV.
///
/// The header row carries the schema's field names, so relabel the table
/// first for human-readable headers. Nulls are written as empty fields and
/// flags as `Yes`/`No`.
pub fn export(table: &DataSet) -> Result<Vec<u8>, ExportError> {
    let mut writer = ::csv::WriterBuilder::new().from_writer(Vec::new());

    writer.write_record(table.schema.field_names())?;

    for row in &table.data {
        writer.write_record(row.values.iter().map(format_value))?;
    }

    writer.flush()?;
    let bytes = writer.into_inner().map_err(|e| ExportError::Io(e.into_error()))?;

    debug!("Exported {} row(s) as {} byte(s) of CSV", table.len(), bytes.len());
    Ok(bytes)
}

fn parse_cell(field: &Field, raw: &str) -> Result<Value, ExportError> {
    if raw.is_empty() {
        return match (field.nullable, field.data_type) {
            (true, _) => Ok(Value::Null),
            (false, DataType::String) => Ok(Value::String(String::new())),
            (false, _) => Err(DataError::ValidationError(format!(
                "Field '{}' cannot be null",
                field.name
            ))
            .into()),
        };
    }

    let invalid = || ExportError::InvalidValue {
        column: field.name.clone(),
        value: raw.to_string(),
    };

    match field.data_type {
        DataType::String => Ok(Value::String(raw.to_string())),
        DataType::Integer => raw.trim().parse::<i64>().map(Value::Integer).map_err(|_| invalid()),
        DataType::Boolean => parse_flag(raw).map(Value::Boolean).ok_or_else(invalid),
    }
}

/// Parse CSV produced by [`export`] back into a table of `schema`.
///
/// Columns are matched by header name; columns the schema does not name are
/// ignored. Empty text in a nullable column reads back as null.
pub fn import(bytes: &[u8], schema: &Schema) -> Result<DataSet, ExportError> {
    let mut reader = ::csv::ReaderBuilder::new().from_reader(bytes);
    let headers = reader.headers()?.clone();

    let positions = schema
        .fields
        .iter()
        .map(|field| {
            headers
                .iter()
                .position(|h| h == field.name)
                .ok_or_else(|| ExportError::MissingColumn(field.name.clone()))
        })
        .collect::<Result<Vec<usize>, ExportError>>()?;

    let mut table = DataSet::new(schema.clone());

    for record in reader.records() {
        let record = record?;
        let values = schema
            .fields
            .iter()
            .zip(&positions)
            .map(|(field, &position)| parse_cell(field, record.get(position).unwrap_or("")))
            .collect::<Result<Vec<Value>, ExportError>>()?;

        let row = Row::new(values);
        SchemaValidator::validate_row(&row, schema)?;
        table.add_row(row)?;
    }

    Ok(table)
}

/// Export projects with their display labels under the download file name
pub fn export_projects(projects: &[Project]) -> Result<ExportPayload, ExportError> {
    let table = ColumnLabels::projects().relabel(&to_dataset(projects));
    let bytes = export(&table)?;
    Ok(ExportPayload::csv(FILTERED_PROJECTS_FILENAME, bytes))
}

/// Read projects back from an export produced by [`export_projects`]
pub fn import_projects(bytes: &[u8]) -> Result<Vec<Project>, ExportError> {
    let labels = ColumnLabels::projects();
    let labelled = labels.label_schema(&<Project as Tabular>::schema());
    let table = labels.unlabel(&import(bytes, &labelled)?);
    Ok(from_dataset(&table)?)
}
