// CSV table source implementation
// Author: Gabriel Demetrios Lafis

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use log::debug;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::{DataError, EntityKind, Project, Publication, Student, Supervisor, TableSource};

/// File names of each table inside a source directory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceFiles {
    pub projects: String,
    pub students: String,
    pub supervisors: String,
    pub publications: String,
}

impl Default for SourceFiles {
    fn default() -> Self {
        SourceFiles {
            projects: "research_projects.csv".to_string(),
            students: "students.csv".to_string(),
            supervisors: "supervisors.csv".to_string(),
            publications: "publications.csv".to_string(),
        }
    }
}

impl SourceFiles {
    /// Get the file name for a table
    pub fn file_name(&self, kind: EntityKind) -> &str {
        match kind {
            EntityKind::Projects => &self.projects,
            EntityKind::Students => &self.students,
            EntityKind::Supervisors => &self.supervisors,
            EntityKind::Publications => &self.publications,
        }
    }
}

/// CSV table source reading one file per table from a directory
pub struct CsvSource {
    dir: PathBuf,
    files: SourceFiles,
    delimiter: u8,
    name: String,
}

impl CsvSource {
    /// Create a new CSV source with the default file names
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self::with_files(dir, SourceFiles::default())
    }

    /// Create a new CSV source with custom file names
    pub fn with_files<P: AsRef<Path>>(dir: P, files: SourceFiles) -> Self {
        let dir = dir.as_ref().to_path_buf();
        CsvSource {
            name: dir.to_string_lossy().to_string(),
            dir,
            files,
            delimiter: b',',
        }
    }

    /// Use a delimiter other than a comma
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Get the path of a table file
    pub fn path_for(&self, kind: EntityKind) -> PathBuf {
        self.dir.join(self.files.file_name(kind))
    }

    fn read_table<T: DeserializeOwned>(&self, kind: EntityKind) -> Result<Vec<T>, DataError> {
        let path = self.path_for(kind);
        debug!("Reading {} table from {}", kind, path.display());

        let file = File::open(&path)?;
        read_records(BufReader::new(file), kind, self.delimiter)
    }
}

impl TableSource for CsvSource {
    fn load_projects(&self) -> Result<Vec<Project>, DataError> {
        self.read_table(EntityKind::Projects)
    }

    fn load_students(&self) -> Result<Vec<Student>, DataError> {
        self.read_table(EntityKind::Students)
    }

    fn load_supervisors(&self) -> Result<Vec<Supervisor>, DataError> {
        self.read_table(EntityKind::Supervisors)
    }

    fn load_publications(&self) -> Result<Vec<Publication>, DataError> {
        self.read_table(EntityKind::Publications)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Deserialize every record of a headed CSV stream into typed rows
pub fn read_records<T, R>(reader: R, kind: EntityKind, delimiter: u8) -> Result<Vec<T>, DataError>
where
    T: DeserializeOwned,
    R: Read,
{
    let mut csv_reader = ::csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .trim(::csv::Trim::All)
        .from_reader(reader);

    let mut rows = Vec::new();
    for result in csv_reader.deserialize() {
        let row: T = result
            .map_err(|e| DataError::ParseError(format!("{} table: {}", kind, e)))?;
        rows.push(row);
    }

    Ok(rows)
}
