// Data module for entity tables, tabular results and table sources
// Author: Gabriel Demetrios Lafis

mod csv;
mod entity;
mod field;
mod memory;
mod schema;
mod snapshot;
mod table;

pub use self::csv::*;
pub use entity::*;
pub use field::*;
pub use memory::*;
pub use schema::*;
pub use snapshot::*;
pub use table::*;

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Source of the entity tables for one session.
///
/// Each call is a single blocking fetch of the whole table. Implementations
/// may read flat files, query a store or hold the rows in memory; the engine
/// only ever sees the typed records they return.
pub trait TableSource {
    /// Load the `projects` fact table
    fn load_projects(&self) -> Result<Vec<Project>, DataError>;

    /// Load the `students` dimension table
    fn load_students(&self) -> Result<Vec<Student>, DataError>;

    /// Load the `supervisors` dimension table
    fn load_supervisors(&self) -> Result<Vec<Supervisor>, DataError>;

    /// Load the denormalized `publications` table
    fn load_publications(&self) -> Result<Vec<Publication>, DataError>;

    /// Get the source name
    fn name(&self) -> &str;
}

/// Names of the tables a source can provide
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Projects,
    Students,
    Supervisors,
    Publications,
}

impl EntityKind {
    pub const ALL: [EntityKind; 4] = [
        EntityKind::Projects,
        EntityKind::Students,
        EntityKind::Supervisors,
        EntityKind::Publications,
    ];

    /// Table name as used by sources and log messages
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Projects => "projects",
            EntityKind::Students => "students",
            EntityKind::Supervisors => "supervisors",
            EntityKind::Publications => "publications",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Represents an error in the data module
#[derive(Debug, Error)]
pub enum DataError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Schema mismatch: expected {expected} values, found {found}")]
    SchemaMismatch { expected: usize, found: usize },

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Duplicate key {key} in {entity} table")]
    DuplicateKey { entity: EntityKind, key: i64 },

    #[error("Table '{0}' is not available from this source")]
    NotFound(EntityKind),
}
