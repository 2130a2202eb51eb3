// Table loading, validation and configuration tests
// Author: Gabriel Demetrios Lafis

mod common;

use std::fs;
use std::io;
use std::path::Path;

use mockall::mock;
use research_tracker_engine::{
    data::{
        parse_flag, CsvSource, DataError, EntityKind, EntityTables, MemorySource, Project,
        Publication, PublicationTable, SourceFiles, Status, Student, Supervisor, TableSource,
    },
    processing::ChartScope,
    utils::{Config, ConfigError},
};
use tempfile::tempdir;

const PROJECTS_CSV: &str = "\
project_id,student_id,supervisor_id,title,category,status,year_published,dataset_available
1,10,1,Sickle cell outcomes,Hematology,Ongoing,2021,Yes
2,11,,Malaria diagnostics,,Completed,,No
3,10,2, Anaemia in pregnancy ,Hematology,Not Published,2023,
";

const STUDENTS_CSV: &str = "\
student_id,name,program,year_of_study
10,Grace Achieng,MD,2022
11,Peter Kamau,,
";

const SUPERVISORS_CSV: &str = "\
supervisor_id,name,title,specialization
1,Alice Mwangi,Prof.,Hematology
2,Brian Otieno,Dr.,
";

fn write_tables(dir: &Path, projects: &str) {
    fs::write(dir.join("research_projects.csv"), projects).unwrap();
    fs::write(dir.join("students.csv"), STUDENTS_CSV).unwrap();
    fs::write(dir.join("supervisors.csv"), SUPERVISORS_CSV).unwrap();
}

#[test]
fn test_load_csv_tables() {
    let dir = tempdir().unwrap();
    write_tables(dir.path(), PROJECTS_CSV);

    let tables = EntityTables::load(&CsvSource::new(dir.path())).unwrap();

    assert_eq!(tables.projects().len(), 3);
    assert_eq!(tables.students().len(), 2);
    assert_eq!(tables.supervisors().len(), 2);

    let first = &tables.projects()[0];
    assert_eq!(first.status, Some(Status::Ongoing));
    assert_eq!(first.dataset_available, Some(true));

    let second = &tables.projects()[1];
    assert_eq!(second.supervisor_id, None);
    assert_eq!(second.category, None);
    assert_eq!(second.year_published, None);
    assert_eq!(second.dataset_available, Some(false));

    let third = &tables.projects()[2];
    assert_eq!(third.title, "Anaemia in pregnancy");
    assert_eq!(third.status, Some(Status::NotPublished));
    assert_eq!(third.dataset_available, None);

    let peter = tables.student(11).unwrap();
    assert_eq!(peter.program, None);
    assert_eq!(peter.year_of_study_date(), None);
    assert_eq!(
        tables.student(10).and_then(Student::year_of_study_date),
        chrono::NaiveDate::from_ymd_opt(2022, 1, 1)
    );
    assert_eq!(tables.supervisor(1).unwrap().display_name(), "Prof. Alice Mwangi");
}

#[test]
fn test_missing_file_is_a_load_error() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("research_projects.csv"), PROJECTS_CSV).unwrap();

    let result = EntityTables::load(&CsvSource::new(dir.path()));
    assert!(matches!(result, Err(DataError::IoError(_))));
}

#[test]
fn test_duplicate_project_key_is_rejected() {
    let dir = tempdir().unwrap();
    let duplicated = format!("{}1,11,2,Again,,,2022,No\n", PROJECTS_CSV);
    write_tables(dir.path(), &duplicated);

    let result = EntityTables::load(&CsvSource::new(dir.path()));
    assert!(matches!(
        result,
        Err(DataError::DuplicateKey {
            entity: EntityKind::Projects,
            key: 1
        })
    ));
}

#[test]
fn test_malformed_rows_are_parse_errors() {
    let dir = tempdir().unwrap();
    let malformed = format!("{}four,10,1,Bad id,,,,\n", PROJECTS_CSV);
    write_tables(dir.path(), &malformed);

    let result = EntityTables::load(&CsvSource::new(dir.path()));
    assert!(matches!(result, Err(DataError::ParseError(_))));
}

#[test]
fn test_two_digit_year_is_rejected() {
    let dir = tempdir().unwrap();
    let short_year = format!("{}4,10,1,Short year,,,21,\n", PROJECTS_CSV);
    write_tables(dir.path(), &short_year);

    let result = EntityTables::load(&CsvSource::new(dir.path()));
    assert!(matches!(result, Err(DataError::ValidationError(_))));
}

#[test]
fn test_custom_file_names_and_delimiter() {
    let dir = tempdir().unwrap();
    fs::write(
        dir.path().join("pubs.csv"),
        "publication_id;title;category;status;year_published;author;program;supervisor;dataset_available\n\
         1;Iron deficiency;Hematology;Published;2022;Grace Achieng;MD;Alice Mwangi;1\n\
         2;Stool microscopy;Microbiology;not published;2023;Peter Kamau;BMLS;Brian Otieno;0\n",
    )
    .unwrap();

    let files = SourceFiles {
        publications: "pubs.csv".to_string(),
        ..SourceFiles::default()
    };
    let source = CsvSource::with_files(dir.path(), files).with_delimiter(b';');
    assert_eq!(source.path_for(EntityKind::Publications), dir.path().join("pubs.csv"));

    let table = PublicationTable::load(&source).unwrap();
    let publications = table.publications();

    assert_eq!(publications.len(), 2);
    assert_eq!(publications[0].dataset_available, Some(true));
    assert_eq!(publications[1].status, Some(Status::NotPublished));
    assert_eq!(publications[1].supervisor.as_deref(), Some("Brian Otieno"));
}

#[test]
fn test_memory_source() {
    let source = MemorySource::new()
        .with_projects(common::projects())
        .with_students(common::students())
        .with_supervisors(common::supervisors());

    let tables = EntityTables::load(&source).unwrap();
    assert_eq!(tables.projects().len(), 6);
    assert_eq!(source.name(), "memory");

    assert!(matches!(
        PublicationTable::load(&source),
        Err(DataError::NotFound(EntityKind::Publications))
    ));
}

mock! {
    pub Source {}

    impl TableSource for Source {
        fn load_projects(&self) -> Result<Vec<Project>, DataError>;
        fn load_students(&self) -> Result<Vec<Student>, DataError>;
        fn load_supervisors(&self) -> Result<Vec<Supervisor>, DataError>;
        fn load_publications(&self) -> Result<Vec<Publication>, DataError>;
        fn name(&self) -> &str;
    }
}

#[test]
fn test_each_table_is_fetched_once() {
    let mut source = MockSource::new();
    source
        .expect_load_projects()
        .times(1)
        .returning(|| Ok(common::projects()));
    source
        .expect_load_students()
        .times(1)
        .returning(|| Ok(common::students()));
    source
        .expect_load_supervisors()
        .times(1)
        .returning(|| Ok(common::supervisors()));
    source.expect_name().return_const("mock".to_string());

    let tables = EntityTables::load(&source).unwrap();
    assert_eq!(tables.supervisors().len(), 5);
}

#[test]
fn test_load_failure_stops_immediately() {
    let mut source = MockSource::new();
    source.expect_load_projects().times(1).returning(|| {
        Err(DataError::IoError(io::Error::new(
            io::ErrorKind::ConnectionRefused,
            "source unreachable",
        )))
    });
    source.expect_name().return_const("mock".to_string());

    // students and supervisors have no expectations, so fetching them would panic
    let result = EntityTables::load(&source);
    assert!(matches!(result, Err(DataError::IoError(_))));
}

#[test]
fn test_flag_and_status_parsing() {
    assert_eq!(parse_flag("Yes"), Some(true));
    assert_eq!(parse_flag(" no "), Some(false));
    assert_eq!(parse_flag("maybe"), None);

    assert_eq!("ongoing".parse::<Status>().unwrap(), Status::Ongoing);
    assert_eq!("Not-Published".parse::<Status>().unwrap(), Status::NotPublished);
    assert!("archived".parse::<Status>().is_err());
}

#[test]
fn test_yaml_config() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.yaml");
    fs::write(
        &path,
        "server:\n  port: 9090\n\
         source:\n  path: /srv/research\n  files:\n    projects: projects.csv\n\
         logging:\n  level: debug\n\
         dashboard:\n  top_n: 3\n  default_year_range: [2020, 2025]\n  chart_scope: filtered\n",
    )
    .unwrap();

    let config = Config::from_file(&path).unwrap();

    assert_eq!(config.server.port, 9090);
    assert_eq!(config.server.host, "127.0.0.1");
    assert_eq!(config.source.files.projects, "projects.csv");
    assert_eq!(config.source.files.students, "students.csv");
    assert_eq!(config.log_level_filter(), log::LevelFilter::Debug);

    let options = config.report_options();
    assert_eq!(options.top_n, 3);
    assert_eq!(options.chart_scope, ChartScope::Filtered);
    assert_eq!(options.default_years, (2020, 2025));
}

#[test]
fn test_json_config_defaults() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.json");
    fs::write(&path, r#"{"server": {"enable_cors": true}}"#).unwrap();

    let config = Config::from_file(&path).unwrap();

    assert!(config.server.enable_cors);
    assert_eq!(config.dashboard.top_n, 5);
    assert_eq!(config.dashboard.default_year_range, (2021, 2024));
    assert_eq!(config.report_options().chart_scope, ChartScope::Full);
}

#[test]
fn test_invalid_configs() {
    let dir = tempdir().unwrap();

    let toml = dir.path().join("config.toml");
    fs::write(&toml, "port = 1").unwrap();
    assert!(matches!(
        Config::from_file(&toml),
        Err(ConfigError::UnsupportedFormat(_))
    ));

    let zero = dir.path().join("zero.json");
    fs::write(&zero, r#"{"dashboard": {"top_n": 0}}"#).unwrap();
    assert!(matches!(Config::from_file(&zero), Err(ConfigError::Invalid(_))));

    let reversed = dir.path().join("reversed.yml");
    fs::write(&reversed, "dashboard:\n  default_year_range: [2024, 2021]\n").unwrap();
    assert!(matches!(
        Config::from_file(&reversed),
        Err(ConfigError::Invalid(_))
    ));

    assert!(matches!(
        Config::from_file(dir.path().join("absent.yaml")),
        Err(ConfigError::Io(_))
    ));
}

#[test]
fn test_default_year_range_must_hold_four_digit_years() {
    let dir = tempdir().unwrap();

    let huge = dir.path().join("huge.json");
    fs::write(
        &huge,
        r#"{"dashboard": {"default_year_range": [-2000000000, 2000000000]}}"#,
    )
    .unwrap();
    assert!(matches!(Config::from_file(&huge), Err(ConfigError::Invalid(_))));

    let mut config = Config::default();
    config.dashboard.default_year_range = (999, 2024);
    assert!(config.validate().is_err());

    config.dashboard.default_year_range = (2021, 10000);
    assert!(config.validate().is_err());

    config.dashboard.default_year_range = (1000, 9999);
    assert!(config.validate().is_ok());
}

