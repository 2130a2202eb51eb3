// Named fields and borrowed field access for typed records
// Author: Gabriel Demetrios Lafis

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{DataError, Value};

/// A named field that predicates and aggregations can address
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterField {
    ProjectId,
    PublicationId,
    StudentId,
    SupervisorId,
    Title,
    Category,
    Status,
    YearPublished,
    DatasetAvailable,
    Name,
    Program,
    YearOfStudy,
    SupervisorTitle,
    Specialization,
    Author,
    SupervisorName,
}

impl FilterField {
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterField::ProjectId => "project_id",
            FilterField::PublicationId => "publication_id",
            FilterField::StudentId => "student_id",
            FilterField::SupervisorId => "supervisor_id",
            FilterField::Title => "title",
            FilterField::Category => "category",
            FilterField::Status => "status",
            FilterField::YearPublished => "year_published",
            FilterField::DatasetAvailable => "dataset_available",
            FilterField::Name => "name",
            FilterField::Program => "program",
            FilterField::YearOfStudy => "year_of_study",
            FilterField::SupervisorTitle => "supervisor_title",
            FilterField::Specialization => "specialization",
            FilterField::Author => "author",
            FilterField::SupervisorName => "supervisor",
        }
    }
}

impl fmt::Display for FilterField {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FilterField {
    type Err = DataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        const FIELDS: [FilterField; 16] = [
            FilterField::ProjectId,
            FilterField::PublicationId,
            FilterField::StudentId,
            FilterField::SupervisorId,
            FilterField::Title,
            FilterField::Category,
            FilterField::Status,
            FilterField::YearPublished,
            FilterField::DatasetAvailable,
            FilterField::Name,
            FilterField::Program,
            FilterField::YearOfStudy,
            FilterField::SupervisorTitle,
            FilterField::Specialization,
            FilterField::Author,
            FilterField::SupervisorName,
        ];

        let wanted = s.trim().to_lowercase();
        FIELDS
            .iter()
            .copied()
            .find(|field| field.as_str() == wanted)
            .ok_or_else(|| DataError::ParseError(format!("Unknown field: {}", s)))
    }
}

/// Borrowed view of a single field of a record
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue<'a> {
    Null,
    Text(&'a str),
    Integer(i64),
    Boolean(bool),
}

impl<'a> FieldValue<'a> {
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            FieldValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Owned copy, used as a grouping key
    pub fn to_value(&self) -> Value {
        match self {
            FieldValue::Null => Value::Null,
            FieldValue::Text(s) => Value::String((*s).to_string()),
            FieldValue::Integer(i) => Value::Integer(*i),
            FieldValue::Boolean(b) => Value::Boolean(*b),
        }
    }

    /// Exact equality against a selected option. Null only equals an explicit null option.
    pub fn equals(&self, option: &Value) -> bool {
        match (self, option) {
            (FieldValue::Null, Value::Null) => true,
            (FieldValue::Text(a), Value::String(b)) => *a == b.as_str(),
            (FieldValue::Integer(a), Value::Integer(b)) => a == b,
            (FieldValue::Boolean(a), Value::Boolean(b)) => a == b,
            _ => false,
        }
    }

    /// Case-insensitive substring match; `needle` must already be lowercase
    pub fn contains_lowercase(&self, needle: &str) -> bool {
        match self {
            FieldValue::Text(s) => s.to_lowercase().contains(needle),
            FieldValue::Integer(i) => i.to_string().contains(needle),
            FieldValue::Null | FieldValue::Boolean(_) => false,
        }
    }
}

impl<'a, T> From<Option<T>> for FieldValue<'a>
where
    T: Into<FieldValue<'a>>,
{
    fn from(value: Option<T>) -> Self {
        value.map_or(FieldValue::Null, Into::into)
    }
}

impl<'a> From<&'a str> for FieldValue<'a> {
    fn from(s: &'a str) -> Self {
        FieldValue::Text(s)
    }
}

impl<'a> From<&'a String> for FieldValue<'a> {
    fn from(s: &'a String) -> Self {
        FieldValue::Text(s.as_str())
    }
}

impl From<i64> for FieldValue<'_> {
    fn from(i: i64) -> Self {
        FieldValue::Integer(i)
    }
}

impl From<i32> for FieldValue<'_> {
    fn from(i: i32) -> Self {
        FieldValue::Integer(i64::from(i))
    }
}

impl From<bool> for FieldValue<'_> {
    fn from(b: bool) -> Self {
        FieldValue::Boolean(b)
    }
}

/// A fixed-shape row whose fields can be read by name.
///
/// Fields a record type does not carry read as `FieldValue::Null`.
pub trait Record {
    fn field(&self, field: FilterField) -> FieldValue<'_>;
}
