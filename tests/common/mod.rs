// Shared fixtures for the integration tests
// Author: Gabriel Demetrios Lafis

#![allow(dead_code, clippy::too_many_arguments)]

use research_tracker_engine::data::{EntityTables, Project, Status, Student, Supervisor};

pub fn project(
    project_id: i64,
    student_id: Option<i64>,
    supervisor_id: Option<i64>,
    title: &str,
    category: Option<&str>,
    status: Option<Status>,
    year_published: Option<i32>,
    dataset_available: Option<bool>,
) -> Project {
    Project {
        project_id,
        student_id,
        supervisor_id,
        title: title.to_string(),
        category: category.map(str::to_string),
        status,
        year_published,
        dataset_available,
    }
}

/// A project carrying only the fields a test cares about
pub fn bare_project(project_id: i64, supervisor_id: Option<i64>, year: Option<i32>) -> Project {
    project(
        project_id,
        None,
        supervisor_id,
        &format!("Project {}", project_id),
        None,
        None,
        year,
        None,
    )
}

pub fn student(student_id: i64, name: &str, program: Option<&str>, year: Option<i32>) -> Student {
    Student {
        student_id,
        name: name.to_string(),
        program: program.map(str::to_string),
        year_of_study: year,
    }
}

pub fn supervisor(supervisor_id: i64, name: &str, title: Option<&str>) -> Supervisor {
    Supervisor {
        supervisor_id,
        name: name.to_string(),
        title: title.map(str::to_string),
        specialization: None,
    }
}

pub fn supervisors() -> Vec<Supervisor> {
    vec![
        supervisor(1, "Alice Mwangi", Some("Prof.")),
        supervisor(2, "Brian Otieno", Some("Dr.")),
        supervisor(3, "Carol Njeri", Some("Dr.")),
        // same display name as supervisor 1
        supervisor(4, "Alice Mwangi", Some("Dr.")),
        supervisor(5, "David Kim", None),
    ]
}

pub fn students() -> Vec<Student> {
    vec![
        student(10, "Grace Achieng", Some("MD"), Some(2022)),
        student(11, "Peter Kamau", Some("BMLS"), Some(2023)),
        student(12, "Mary Wanjiku", Some("MSc Hematology"), Some(2021)),
        student(13, "John Doe", None, None),
    ]
}

/// Six projects: one without category or year, one whose student is
/// missing (105) and one whose supervisor is missing (106)
pub fn projects() -> Vec<Project> {
    vec![
        project(101, Some(10), Some(1), "Sickle cell outcomes", Some("Hematology"), Some(Status::Ongoing), Some(2021), Some(true)),
        project(102, Some(11), Some(2), "Malaria diagnostics", Some("Microbiology"), Some(Status::Completed), Some(2021), Some(false)),
        project(103, Some(12), Some(1), "Anaemia in pregnancy", Some("Hematology"), Some(Status::Completed), Some(2023), Some(true)),
        project(104, Some(10), Some(3), "Blood transfusion safety", None, Some(Status::Ongoing), None, None),
        project(105, Some(99), Some(4), "Leukemia markers", Some("Hematology"), Some(Status::Ongoing), Some(2022), Some(false)),
        project(106, Some(11), Some(42), "TB screening", Some("Microbiology"), Some(Status::Completed), Some(2024), Some(true)),
    ]
}

pub fn tables() -> EntityTables {
    EntityTables::new(projects(), students(), supervisors()).unwrap()
}

pub fn ids(projects: &[Project]) -> Vec<i64> {
    projects.iter().map(|p| p.project_id).collect()
}
