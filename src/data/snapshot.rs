// Immutable snapshot of the loaded entity tables
// Author: Gabriel Demetrios Lafis

use std::collections::HashMap;
use std::time::Instant;

use chrono::{DateTime, Utc};
use log::info;

use super::{
    DataError, EntityKind, Project, Publication, Student, StudentId, Supervisor, SupervisorId,
    TableSource,
};
use crate::utils::{index_unique_keys, validate_year};

/// The projects, students and supervisors of one session.
///
/// Rows are validated once when the snapshot is built and never change
/// afterwards; reloading produces a new snapshot.
#[derive(Debug, Clone)]
pub struct EntityTables {
    projects: Vec<Project>,
    students: Vec<Student>,
    supervisors: Vec<Supervisor>,
    student_index: HashMap<StudentId, usize>,
    supervisor_index: HashMap<SupervisorId, usize>,
    loaded_at: DateTime<Utc>,
}

impl EntityTables {
    /// Build a snapshot from already loaded rows.
    ///
    /// Blank optional text is stored as null, the way the CSV source reads
    /// empty cells.
    pub fn new(
        mut projects: Vec<Project>,
        mut students: Vec<Student>,
        mut supervisors: Vec<Supervisor>,
    ) -> Result<Self, DataError> {
        for project in &mut projects {
            clear_blank(&mut project.category);
        }
        for student in &mut students {
            clear_blank(&mut student.program);
        }
        for supervisor in &mut supervisors {
            clear_blank(&mut supervisor.title);
            clear_blank(&mut supervisor.specialization);
        }

        index_unique_keys(EntityKind::Projects, projects.iter().map(|p| p.project_id))?;
        for project in &projects {
            validate_year(EntityKind::Projects, project.project_id, project.year_published)?;
        }

        let student_index =
            index_unique_keys(EntityKind::Students, students.iter().map(|s| s.student_id))?;
        for student in &students {
            validate_year(EntityKind::Students, student.student_id, student.year_of_study)?;
        }

        let supervisor_index = index_unique_keys(
            EntityKind::Supervisors,
            supervisors.iter().map(|s| s.supervisor_id),
        )?;

        Ok(EntityTables {
            projects,
            students,
            supervisors,
            student_index,
            supervisor_index,
            loaded_at: Utc::now(),
        })
    }

    /// Load all three tables from a source
    pub fn load<S: TableSource + ?Sized>(source: &S) -> Result<Self, DataError> {
        let started = Instant::now();

        let projects = source.load_projects()?;
        let students = source.load_students()?;
        let supervisors = source.load_supervisors()?;
        let tables = Self::new(projects, students, supervisors)?;

        info!(
            "Loaded {} projects, {} students and {} supervisors from {} in {:?}",
            tables.projects.len(),
            tables.students.len(),
            tables.supervisors.len(),
            source.name(),
            started.elapsed()
        );

        Ok(tables)
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn students(&self) -> &[Student] {
        &self.students
    }

    pub fn supervisors(&self) -> &[Supervisor] {
        &self.supervisors
    }

    /// Look up a student by id
    pub fn student(&self, id: StudentId) -> Option<&Student> {
        self.student_index.get(&id).map(|&i| &self.students[i])
    }

    /// Look up a supervisor by id
    pub fn supervisor(&self, id: SupervisorId) -> Option<&Supervisor> {
        self.supervisor_index.get(&id).map(|&i| &self.supervisors[i])
    }

    /// Position of a supervisor in the table, used as the natural order
    pub fn supervisor_position(&self, id: SupervisorId) -> Option<usize> {
        self.supervisor_index.get(&id).copied()
    }

    /// When this snapshot was built
    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }
}

/// Snapshot of the denormalized publications table
#[derive(Debug, Clone)]
pub struct PublicationTable {
    publications: Vec<Publication>,
    loaded_at: DateTime<Utc>,
}

impl PublicationTable {
    /// Build a snapshot from already loaded rows
    pub fn new(mut publications: Vec<Publication>) -> Result<Self, DataError> {
        for publication in &mut publications {
            clear_blank(&mut publication.category);
            clear_blank(&mut publication.author);
            clear_blank(&mut publication.program);
            clear_blank(&mut publication.supervisor);
        }

        index_unique_keys(
            EntityKind::Publications,
            publications.iter().map(|p| p.publication_id),
        )?;
        for publication in &publications {
            validate_year(
                EntityKind::Publications,
                publication.publication_id,
                publication.year_published,
            )?;
        }

        Ok(PublicationTable {
            publications,
            loaded_at: Utc::now(),
        })
    }

    /// Load the publications table from a source
    pub fn load<S: TableSource + ?Sized>(source: &S) -> Result<Self, DataError> {
        let table = Self::new(source.load_publications()?)?;
        info!(
            "Loaded {} publications from {}",
            table.publications.len(),
            source.name()
        );
        Ok(table)
    }

    pub fn publications(&self) -> &[Publication] {
        &self.publications
    }

    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }
}

fn clear_blank(value: &mut Option<String>) {
    if value.as_deref().map_or(false, |text| text.trim().is_empty()) {
        *value = None;
    }
}
