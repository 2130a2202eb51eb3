// Conversion of typed records and aggregates into plain tables
// Author: Gabriel Demetrios Lafis

use crate::data::{DataError, DataSet, Project, Row, Schema, SchemaBuilder, Status, Value};
use crate::processing::{CrossTabCell, GroupCount, LeaderboardEntry, TrendPoint, YearCount};

/// A type that can be laid out as one row of a fixed schema
pub trait Tabular {
    fn schema() -> Schema;
    fn to_row(&self) -> Row;
}

/// A type that can be rebuilt from a row of a named schema
pub trait FromRow: Sized {
    fn from_row(row: &Row, schema: &Schema) -> Result<Self, DataError>;
}

/// Lay out `records` as a dataset, preserving their order
pub fn to_dataset<T: Tabular>(records: &[T]) -> DataSet {
    DataSet {
        schema: T::schema(),
        data: records.iter().map(Tabular::to_row).collect(),
    }
}

/// Rebuild typed records from every row of `table`
pub fn from_dataset<T: FromRow>(table: &DataSet) -> Result<Vec<T>, DataError> {
    table
        .data
        .iter()
        .map(|row| T::from_row(row, &table.schema))
        .collect()
}

impl Tabular for Project {
    fn schema() -> Schema {
        SchemaBuilder::new()
            .add_integer("project_id", false)
            .add_integer("student_id", true)
            .add_integer("supervisor_id", true)
            .add_string("title", false)
            .add_string("category", true)
            .add_string("status", true)
            .add_integer("year_published", true)
            .add_boolean("dataset_available", true)
            .build()
    }

    fn to_row(&self) -> Row {
        Row::new(vec![
            self.project_id.into(),
            self.student_id.into(),
            self.supervisor_id.into(),
            self.title.as_str().into(),
            self.category.clone().into(),
            self.status.map(|s| s.as_str()).into(),
            self.year_published.into(),
            self.dataset_available.into(),
        ])
    }
}

fn cell<'r>(row: &'r Row, schema: &Schema, name: &str) -> Result<&'r Value, DataError> {
    schema
        .index_of(name)
        .and_then(|index| row.get(index))
        .ok_or_else(|| DataError::ValidationError(format!("Missing column '{}'", name)))
}

fn optional_integer(row: &Row, schema: &Schema, name: &str) -> Result<Option<i64>, DataError> {
    match cell(row, schema, name)? {
        Value::Null => Ok(None),
        Value::Integer(i) => Ok(Some(*i)),
        other => Err(DataError::ValidationError(format!(
            "Column '{}' expects an integer, got {:?}",
            name, other
        ))),
    }
}

fn optional_string(row: &Row, schema: &Schema, name: &str) -> Result<Option<String>, DataError> {
    match cell(row, schema, name)? {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s.clone())),
        other => Err(DataError::ValidationError(format!(
            "Column '{}' expects text, got {:?}",
            name, other
        ))),
    }
}

fn optional_year(row: &Row, schema: &Schema, name: &str) -> Result<Option<i32>, DataError> {
    optional_integer(row, schema, name)?
        .map(|year| {
            i32::try_from(year).map_err(|_| {
                DataError::ValidationError(format!("Column '{}' is out of range: {}", name, year))
            })
        })
        .transpose()
}

impl FromRow for Project {
    fn from_row(row: &Row, schema: &Schema) -> Result<Self, DataError> {
        let project_id = optional_integer(row, schema, "project_id")?
            .ok_or_else(|| DataError::ValidationError("Field 'project_id' cannot be null".into()))?;

        let dataset_available = match cell(row, schema, "dataset_available")? {
            Value::Null => None,
            Value::Boolean(b) => Some(*b),
            other => {
                return Err(DataError::ValidationError(format!(
                    "Column 'dataset_available' expects a flag, got {:?}",
                    other
                )))
            }
        };

        Ok(Project {
            project_id,
            student_id: optional_integer(row, schema, "student_id")?,
            supervisor_id: optional_integer(row, schema, "supervisor_id")?,
            title: optional_string(row, schema, "title")?.unwrap_or_default(),
            category: optional_string(row, schema, "category")?,
            status: optional_string(row, schema, "status")?
                .map(|s| s.parse::<Status>())
                .transpose()?,
            year_published: optional_year(row, schema, "year_published")?,
            dataset_available,
        })
    }
}

impl Tabular for GroupCount {
    fn schema() -> Schema {
        SchemaBuilder::new()
            .add_string("key", true)
            .add_integer("count", false)
            .build()
    }

    fn to_row(&self) -> Row {
        let key = match &self.key {
            Value::Null => Value::Null,
            other => Value::String(other.to_string()),
        };
        Row::new(vec![key, self.count.into()])
    }
}

impl Tabular for YearCount {
    fn schema() -> Schema {
        SchemaBuilder::new()
            .add_integer("year", true)
            .add_integer("count", false)
            .build()
    }

    fn to_row(&self) -> Row {
        Row::new(vec![self.year.into(), self.count.into()])
    }
}

impl Tabular for LeaderboardEntry {
    fn schema() -> Schema {
        SchemaBuilder::new()
            .add_integer("rank", false)
            .add_integer("supervisor_id", false)
            .add_string("name", false)
            .add_integer("count", false)
            .build()
    }

    fn to_row(&self) -> Row {
        Row::new(vec![
            self.rank.into(),
            self.supervisor_id.into(),
            self.name.as_str().into(),
            self.count.into(),
        ])
    }
}

impl Tabular for TrendPoint {
    fn schema() -> Schema {
        SchemaBuilder::new()
            .add_integer("supervisor_id", false)
            .add_string("name", false)
            .add_integer("year", true)
            .add_integer("count", false)
            .build()
    }

    fn to_row(&self) -> Row {
        Row::new(vec![
            self.supervisor_id.into(),
            self.name.as_str().into(),
            self.year.into(),
            self.count.into(),
        ])
    }
}

impl Tabular for CrossTabCell {
    fn schema() -> Schema {
        SchemaBuilder::new()
            .add_string("row", true)
            .add_string("column", true)
            .add_integer("count", false)
            .build()
    }

    fn to_row(&self) -> Row {
        let text = |value: &Value| match value {
            Value::Null => Value::Null,
            other => Value::String(other.to_string()),
        };
        Row::new(vec![text(&self.row), text(&self.column), self.count.into()])
    }
}
