// Human-readable column labels for exported tables
// Author: Gabriel Demetrios Lafis

use crate::data::{DataSet, Field, Schema};

/// Fixed mapping between internal field names and column labels
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnLabels {
    pairs: Vec<(&'static str, &'static str)>,
}

impl ColumnLabels {
    pub fn new(pairs: Vec<(&'static str, &'static str)>) -> Self {
        ColumnLabels { pairs }
    }

    /// Labels of the project view
    pub fn projects() -> Self {
        Self::new(vec![
            ("project_id", "Project ID"),
            ("student_id", "Student ID"),
            ("supervisor_id", "Supervisor ID"),
            ("title", "Title"),
            ("category", "Category"),
            ("status", "Status"),
            ("year_published", "Year Published"),
            ("dataset_available", "Dataset Available"),
        ])
    }

    /// Label for a field name; unmapped names are kept as they are
    pub fn label<'a>(&self, name: &'a str) -> &'a str {
        self.pairs
            .iter()
            .find(|(field, _)| *field == name)
            .map_or(name, |(_, label)| *label)
    }

    /// Field name for a label; unmapped labels are kept as they are
    pub fn field<'a>(&self, label: &'a str) -> &'a str {
        self.pairs
            .iter()
            .find(|(_, l)| *l == label)
            .map_or(label, |(field, _)| *field)
    }

    /// Schema with field names replaced by labels
    pub fn label_schema(&self, schema: &Schema) -> Schema {
        self.rename_schema(schema, |name| self.label(name))
    }

    /// Schema with labels replaced by field names
    pub fn unlabel_schema(&self, schema: &Schema) -> Schema {
        self.rename_schema(schema, |label| self.field(label))
    }

    /// Dataset with column labels in place of field names
    pub fn relabel(&self, table: &DataSet) -> DataSet {
        DataSet {
            schema: self.label_schema(&table.schema),
            data: table.data.clone(),
        }
    }

    /// Dataset with field names restored from column labels
    pub fn unlabel(&self, table: &DataSet) -> DataSet {
        DataSet {
            schema: self.unlabel_schema(&table.schema),
            data: table.data.clone(),
        }
    }

    fn rename_schema<'s, F>(&self, schema: &'s Schema, rename: F) -> Schema
    where
        F: Fn(&'s str) -> &'s str,
    {
        Schema::new(
            schema
                .fields
                .iter()
                .map(|f| Field::new(rename(f.name.as_str()), f.data_type, f.nullable))
                .collect(),
        )
    }
}
