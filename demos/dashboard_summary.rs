// Dashboard summary example
// Author: Gabriel Demetrios Lafis

use research_tracker_engine::{
    data::{EntityTables, MemorySource, Project, Status, Student, Supervisor},
    export,
    processing::{DashboardReport, ReportOptions, Selection, YearRange},
};

fn project(
    id: i64,
    student: i64,
    supervisor: i64,
    title: &str,
    category: &str,
    status: Status,
    year: i32,
) -> Project {
    Project {
        project_id: id,
        student_id: Some(student),
        supervisor_id: Some(supervisor),
        title: title.to_string(),
        category: Some(category.to_string()),
        status: Some(status),
        year_published: Some(year),
        dataset_available: Some(id % 2 == 0),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let supervisors = vec![
        Supervisor {
            supervisor_id: 1,
            name: "Alice Mwangi".to_string(),
            title: Some("Prof.".to_string()),
            specialization: Some("Hematology".to_string()),
        },
        Supervisor {
            supervisor_id: 2,
            name: "Brian Otieno".to_string(),
            title: Some("Dr.".to_string()),
            specialization: Some("Microbiology".to_string()),
        },
    ];

    let students = vec![
        Student {
            student_id: 10,
            name: "Grace Achieng".to_string(),
            program: Some("MD".to_string()),
            year_of_study: Some(2022),
        },
        Student {
            student_id: 11,
            name: "Peter Kamau".to_string(),
            program: Some("BMLS".to_string()),
            year_of_study: Some(2023),
        },
    ];

    let projects = vec![
        project(1, 10, 1, "Sickle cell outcomes", "Hematology", Status::Ongoing, 2021),
        project(2, 11, 2, "Malaria diagnostics", "Microbiology", Status::Completed, 2021),
        project(3, 10, 1, "Anaemia in pregnancy", "Hematology", Status::Completed, 2023),
        project(4, 11, 1, "Transfusion safety", "Hematology", Status::Ongoing, 2024),
    ];

    // Load through a table source the way a server session would
    let source = MemorySource::new()
        .with_projects(projects)
        .with_students(students)
        .with_supervisors(supervisors);
    let tables = EntityTables::load(&source)?;

    let selection = Selection {
        categories: vec![Some("Hematology".to_string())],
        year_published: Some(YearRange::new(2021, 2023)),
        ..Selection::default()
    };
    let report = DashboardReport::build(&tables, &selection, &ReportOptions::default());

    println!("Selected projects: {}", report.metrics.total_projects);
    println!("  Ongoing:   {}", report.metrics.ongoing);
    println!("  Completed: {}", report.metrics.completed);
    println!("  Students:  {}", report.metrics.total_students);

    println!("\nProjects per category:");
    for group in &report.category_distribution {
        println!("  {:<15} {}", group.key.to_string(), group.count);
    }

    println!("\nTop supervisors:");
    for entry in &report.leaderboard {
        println!("  {}. {} ({})", entry.rank, entry.name, entry.count);
    }

    println!("\nCategory by program:");
    for cell in &report.category_by_program {
        println!(
            "  {:<15} {:<6} {}",
            cell.row.to_string(),
            cell.column.to_string(),
            cell.count
        );
    }

    let payload = export::export_projects(&report.projects)?;
    println!("\n{} ({} bytes):", payload.filename, payload.bytes.len());
    println!("{}", String::from_utf8_lossy(&payload.bytes));

    Ok(())
}
