// Foreign-key resolution between projects and their dimension tables
// Author: Gabriel Demetrios Lafis

use log::{debug, warn};
use serde::Serialize;

use crate::data::{
    EntityTables, FilterField, Project, ProjectId, Student, StudentId, Supervisor, SupervisorId,
};
use super::{filter, Predicate};

/// Projects whose foreign keys do not resolve
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OrphanReport {
    pub missing_supervisor: Vec<ProjectId>,
    pub missing_student: Vec<ProjectId>,
}

impl OrphanReport {
    pub fn is_empty(&self) -> bool {
        self.missing_supervisor.is_empty() && self.missing_student.is_empty()
    }
}

/// Resolves project foreign keys against the snapshot's dimension tables.
///
/// Every join is many-to-one: a project maps to at most one supervisor and
/// one student, so joins never duplicate project rows.
#[derive(Debug, Clone, Copy)]
pub struct JoinResolver<'a> {
    tables: &'a EntityTables,
}

impl<'a> JoinResolver<'a> {
    pub fn new(tables: &'a EntityTables) -> Self {
        JoinResolver { tables }
    }

    pub fn tables(&self) -> &'a EntityTables {
        self.tables
    }

    /// Ids of every supervisor whose name is selected, in table order.
    ///
    /// A name shared by several supervisors resolves to all of their ids.
    pub fn supervisor_ids_for_names(&self, names: &[String]) -> Vec<SupervisorId> {
        let ids: Vec<SupervisorId> = self
            .tables
            .supervisors()
            .iter()
            .filter(|s| names.contains(&s.name))
            .map(|s| s.supervisor_id)
            .collect();

        if ids.len() > names.len() {
            debug!(
                "Supervisor names {:?} are shared by several supervisors, matched ids {:?}",
                names, ids
            );
        }

        ids
    }

    /// Ids of every student enrolled in one of the selected programs
    pub fn student_ids_for_programs(&self, programs: &[Option<String>]) -> Vec<StudentId> {
        let predicate = Predicate::new().one_of(FilterField::Program, programs.iter().cloned());

        filter::apply_refs(self.tables.students(), &predicate)
            .into_iter()
            .map(|s| s.student_id)
            .collect()
    }

    pub fn supervisor_of(&self, project: &Project) -> Option<&'a Supervisor> {
        project.supervisor_id.and_then(|id| self.tables.supervisor(id))
    }

    pub fn student_of(&self, project: &Project) -> Option<&'a Student> {
        project.student_id.and_then(|id| self.tables.student(id))
    }

    /// Natural order of a supervisor, used to break ranking ties
    pub fn supervisor_position(&self, id: SupervisorId) -> Option<usize> {
        self.tables.supervisor_position(id)
    }

    /// Inner join of projects to their supervisors
    pub fn join_supervisors<'p>(
        &self,
        projects: &'p [Project],
    ) -> Vec<(&'p Project, &'a Supervisor)> {
        projects
            .iter()
            .filter_map(|p| self.supervisor_of(p).map(|s| (p, s)))
            .collect()
    }

    /// Inner join of projects to their students
    pub fn join_students<'p>(&self, projects: &'p [Project]) -> Vec<(&'p Project, &'a Student)> {
        projects
            .iter()
            .filter_map(|p| self.student_of(p).map(|s| (p, s)))
            .collect()
    }

    /// Find projects whose supervisor or student does not resolve.
    ///
    /// Orphans are logged, never raised.
    pub fn orphans(&self, projects: &[Project]) -> OrphanReport {
        let mut report = OrphanReport::default();

        for project in projects {
            if self.supervisor_of(project).is_none() {
                report.missing_supervisor.push(project.project_id);
            }
            if self.student_of(project).is_none() {
                report.missing_student.push(project.project_id);
            }
        }

        if !report.is_empty() {
            warn!(
                "{} project(s) reference a missing supervisor and {} a missing student",
                report.missing_supervisor.len(),
                report.missing_student.len()
            );
        }

        report
    }
}
