// In-memory table source
// Author: Gabriel Demetrios Lafis

use super::{DataError, EntityKind, Project, Publication, Student, Supervisor, TableSource};

/// Table source holding its rows in memory.
///
/// Tables that were never set are reported as missing, like an absent file.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    projects: Option<Vec<Project>>,
    students: Option<Vec<Student>>,
    supervisors: Option<Vec<Supervisor>>,
    publications: Option<Vec<Publication>>,
}

impl MemorySource {
    /// Create a new empty memory source
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_projects(mut self, projects: Vec<Project>) -> Self {
        self.projects = Some(projects);
        self
    }

    pub fn with_students(mut self, students: Vec<Student>) -> Self {
        self.students = Some(students);
        self
    }

    pub fn with_supervisors(mut self, supervisors: Vec<Supervisor>) -> Self {
        self.supervisors = Some(supervisors);
        self
    }

    pub fn with_publications(mut self, publications: Vec<Publication>) -> Self {
        self.publications = Some(publications);
        self
    }
}

fn cloned<T: Clone>(table: &Option<Vec<T>>, kind: EntityKind) -> Result<Vec<T>, DataError> {
    table.clone().ok_or(DataError::NotFound(kind))
}

impl TableSource for MemorySource {
    fn load_projects(&self) -> Result<Vec<Project>, DataError> {
        cloned(&self.projects, EntityKind::Projects)
    }

    fn load_students(&self) -> Result<Vec<Student>, DataError> {
        cloned(&self.students, EntityKind::Students)
    }

    fn load_supervisors(&self) -> Result<Vec<Supervisor>, DataError> {
        cloned(&self.supervisors, EntityKind::Supervisors)
    }

    fn load_publications(&self) -> Result<Vec<Publication>, DataError> {
        cloned(&self.publications, EntityKind::Publications)
    }

    fn name(&self) -> &str {
        "memory"
    }
}
