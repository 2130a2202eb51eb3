// Plain tabular results handed to the presentation layer
// Author: Gabriel Demetrios Lafis

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{DataError, Schema};

/// Represents a dataset with schema and data
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DataSet {
    pub schema: Schema,
    pub data: Vec<Row>,
}

impl DataSet {
    /// Create a new empty dataset
    pub fn new(schema: Schema) -> Self {
        DataSet {
            schema,
            data: Vec::new(),
        }
    }

    /// Add a row to the dataset
    pub fn add_row(&mut self, row: Row) -> Result<(), DataError> {
        if row.values.len() != self.schema.fields.len() {
            return Err(DataError::SchemaMismatch {
                expected: self.schema.fields.len(),
                found: row.values.len(),
            });
        }

        self.data.push(row);
        Ok(())
    }

    /// Get the number of rows in the dataset
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if the dataset is empty
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Get a reference to a row by index
    pub fn get_row(&self, index: usize) -> Option<&Row> {
        self.data.get(index)
    }

    /// Iterate over the values of one column
    pub fn column<'a>(&'a self, name: &str) -> Option<impl Iterator<Item = &'a Value> + 'a> {
        let index = self.schema.index_of(name)?;
        Some(self.data.iter().map(move |row| &row.values[index]))
    }
}

/// Represents a row in a dataset
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Row {
    pub values: Vec<Value>,
}

impl Row {
    /// Create a new row with the given values
    pub fn new(values: Vec<Value>) -> Self {
        Row { values }
    }

    /// Get a reference to a value by index
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }
}

/// Represents a value in a row.
///
/// Variant order gives the ordering used for grouped output, so `Null`
/// (the unspecified group) sorts ahead of every concrete value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Boolean(bool),
    Integer(i64),
    String(String),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Boolean(b) => write!(f, "{}", b),
            Value::Integer(i) => write!(f, "{}", i),
            Value::String(s) => f.write_str(s),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Integer(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Integer(i64::from(i))
    }
}

impl From<usize> for Value {
    fn from(n: usize) -> Self {
        Value::Integer(n as i64)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}
