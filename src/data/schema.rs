// Schema definition and validation
// Author: Gabriel Demetrios Lafis

use serde::Serialize;

use super::{DataError, Row, Value};

/// Represents a schema for a dataset
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Schema {
    pub fields: Vec<Field>,
}

impl Schema {
    /// Create a new schema with the given fields
    pub fn new(fields: Vec<Field>) -> Self {
        Schema { fields }
    }

    /// Get a reference to a field by name
    pub fn get_field_by_name(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Get the position of a field by name
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }

    /// Field names in column order
    pub fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.name.as_str()).collect()
    }
}

/// Represents a field in a schema
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Field {
    pub name: String,
    pub data_type: DataType,
    pub nullable: bool,
}

impl Field {
    /// Create a new field
    pub fn new(name: impl Into<String>, data_type: DataType, nullable: bool) -> Self {
        Field {
            name: name.into(),
            data_type,
            nullable,
        }
    }
}

/// Represents a data type for a field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    Boolean,
    Integer,
    String,
}

/// Schema validator for ensuring data conforms to a schema
pub struct SchemaValidator;

impl SchemaValidator {
    /// Validate a value against a data type
    pub fn validate_value(value: &Value, data_type: DataType) -> Result<(), DataError> {
        match (value, data_type) {
            (Value::Null, _) => Ok(()),
            (Value::Boolean(_), DataType::Boolean) => Ok(()),
            (Value::Integer(_), DataType::Integer) => Ok(()),
            (Value::String(_), DataType::String) => Ok(()),
            _ => Err(DataError::ValidationError(format!(
                "Value type mismatch: expected {:?}, got {:?}",
                data_type, value
            ))),
        }
    }

    /// Validate a row against a schema
    pub fn validate_row(row: &Row, schema: &Schema) -> Result<(), DataError> {
        if row.values.len() != schema.fields.len() {
            return Err(DataError::SchemaMismatch {
                expected: schema.fields.len(),
                found: row.values.len(),
            });
        }

        for (field, value) in schema.fields.iter().zip(&row.values) {
            if !field.nullable && value.is_null() {
                return Err(DataError::ValidationError(format!(
                    "Field '{}' cannot be null",
                    field.name
                )));
            }

            Self::validate_value(value, field.data_type)?;
        }

        Ok(())
    }
}

/// Schema builder for creating schemas
#[derive(Debug, Default)]
pub struct SchemaBuilder {
    fields: Vec<Field>,
}

impl SchemaBuilder {
    /// Create a new schema builder
    pub fn new() -> Self {
        SchemaBuilder { fields: Vec::new() }
    }

    /// Add a field to the schema
    pub fn add_field(mut self, name: &str, data_type: DataType, nullable: bool) -> Self {
        self.fields.push(Field::new(name, data_type, nullable));
        self
    }

    /// Add a boolean field
    pub fn add_boolean(self, name: &str, nullable: bool) -> Self {
        self.add_field(name, DataType::Boolean, nullable)
    }

    /// Add an integer field
    pub fn add_integer(self, name: &str, nullable: bool) -> Self {
        self.add_field(name, DataType::Integer, nullable)
    }

    /// Add a string field
    pub fn add_string(self, name: &str, nullable: bool) -> Self {
        self.add_field(name, DataType::String, nullable)
    }

    /// Build the schema
    pub fn build(self) -> Schema {
        Schema::new(self.fields)
    }
}
