// Research Tracker Engine
// Author: Gabriel Demetrios Lafis

//! # Research Tracker Engine
//!
//! Filter, join, aggregate and export engine behind a research project
//! dashboard.
//!
//! ## Features
//!
//! - Loading projects, students, supervisors and publications from CSV
//! - Multi-select, range and text-search filtering with cross-entity selections
//! - Many-to-one joins with orphan detection
//! - Distributions, time series, supervisor leaderboards and cross-tabulations
//! - CSV export with human-readable column labels
//! - REST API for remote access
//!
//! ## Example
//!
//! ```rust
//! use research_tracker_engine::{
//!     data::{EntityTables, Project, Status, Student, Supervisor},
//!     processing::{DashboardReport, ReportOptions, Selection, YearRange},
//! };
//!
//! let supervisors = vec![Supervisor {
//!     supervisor_id: 1,
//!     name: "Ada".to_string(),
//!     title: Some("Prof.".to_string()),
//!     specialization: None,
//! }];
//! let students = vec![Student {
//!     student_id: 10,
//!     name: "Grace".to_string(),
//!     program: Some("MD".to_string()),
//!     year_of_study: Some(2022),
//! }];
//! let projects = vec![Project {
//!     project_id: 100,
//!     student_id: Some(10),
//!     supervisor_id: Some(1),
//!     title: "Anaemia in pregnancy".to_string(),
//!     category: Some("Hematology".to_string()),
//!     status: Some(Status::Ongoing),
//!     year_published: Some(2022),
//!     dataset_available: Some(true),
//! }];
//!
//! let tables = EntityTables::new(projects, students, supervisors)?;
//!
//! let selection = Selection {
//!     statuses: vec![Some(Status::Ongoing)],
//!     year_published: Some(YearRange::new(2021, 2024)),
//!     ..Selection::default()
//! };
//!
//! let report = DashboardReport::build(&tables, &selection, &ReportOptions::default());
//! assert_eq!(report.metrics.ongoing, 1);
//! assert_eq!(report.leaderboard[0].name, "Ada");
//! # Ok::<(), research_tracker_engine::data::DataError>(())
//! ```

pub mod api;
pub mod data;
pub mod export;
pub mod processing;
pub mod utils;

// Re-export main types
pub use api::Server;
pub use data::{CsvSource, EntityTables, Project, Student, Supervisor, TableSource};
pub use export::{export_projects, ExportPayload};
pub use processing::{DashboardReport, Predicate, ReportOptions, Selection};
pub use utils::Config;
