// Export adapter tests
// Author: Gabriel Demetrios Lafis

mod common;

use common::{project, tables};
use research_tracker_engine::{
    data::{DataSet, DataType, EntityTables, Schema, SchemaBuilder, Status, Value},
    export::{
        self, to_dataset, ColumnLabels, ExportError, Tabular, CSV_MIME,
        FILTERED_PROJECTS_FILENAME,
    },
    processing::{aggregate, filter_projects, FilterOptions, JoinResolver, Selection},
};

#[test]
fn test_project_export_uses_labels_and_download_name() {
    let tables = tables();
    let payload = export::export_projects(&tables.projects()[..2]).unwrap();

    assert_eq!(payload.filename, FILTERED_PROJECTS_FILENAME);
    assert_eq!(payload.filename, "filtered_research_projects.csv");
    assert_eq!(payload.mime, CSV_MIME);

    let text = String::from_utf8(payload.bytes).unwrap();
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(
        lines[0],
        "Project ID,Student ID,Supervisor ID,Title,Category,Status,Year Published,Dataset Available"
    );
    assert_eq!(
        lines[1],
        "101,10,1,Sickle cell outcomes,Hematology,Ongoing,2021,Yes"
    );
    assert_eq!(lines[2], "102,11,2,Malaria diagnostics,Microbiology,Completed,2021,No");
    assert_eq!(lines.len(), 3);
}

#[test]
fn test_nulls_are_written_as_empty_fields() {
    let tables = tables();
    let blood = &tables.projects()[3..4];
    let payload = export::export_projects(blood).unwrap();
    let text = String::from_utf8(payload.bytes).unwrap();

    assert_eq!(
        text.lines().nth(1),
        Some("104,10,3,Blood transfusion safety,,Ongoing,,")
    );
}

#[test]
fn test_filtered_view_round_trips() {
    let tables = tables();
    let selection = Selection {
        categories: vec![Some("Hematology".to_string()), None],
        ..Selection::default()
    };
    let options = FilterOptions::from_tables(&tables, (2021, 2024));
    let view = filter_projects(&tables, &options, &selection);

    let payload = export::export_projects(&view).unwrap();
    let restored = export::import_projects(&payload.bytes).unwrap();

    assert_eq!(restored, view);
}

#[test]
fn test_round_trip_preserves_quoting() {
    let projects = vec![project(
        7,
        None,
        None,
        "Malaria, \"severe\" cases",
        Some("Infectious Disease"),
        Some(Status::NotPublished),
        Some(2022),
        Some(false),
    )];

    let payload = export::export_projects(&projects).unwrap();
    assert_eq!(export::import_projects(&payload.bytes).unwrap(), projects);
}

#[test]
fn test_blank_category_round_trips_through_the_snapshot() {
    let projects = vec![
        project(1, None, None, "Untitled", Some(""), None, Some(2022), None),
        project(2, None, None, "Spaces", Some("  "), None, None, Some(true)),
        project(3, None, None, "Kept", Some("Histology"), None, None, None),
    ];
    let tables = EntityTables::new(projects, Vec::new(), Vec::new()).unwrap();
    let options = FilterOptions::from_tables(&tables, (2021, 2024));
    let view = filter_projects(&tables, &options, &Selection::default());

    assert_eq!(view[0].category, None);
    assert_eq!(view[1].category, None);
    assert_eq!(view[2].category.as_deref(), Some("Histology"));

    let payload = export::export_projects(&view).unwrap();
    let restored = export::import_projects(&payload.bytes).unwrap();
    assert_eq!(restored, view);
}

#[test]
fn test_empty_view_exports_header_only() {
    let payload = export::export_projects(&[]).unwrap();
    let text = String::from_utf8(payload.bytes.clone()).unwrap();

    assert_eq!(text.lines().count(), 1);
    assert!(export::import_projects(&payload.bytes).unwrap().is_empty());
}

#[test]
fn test_labels_map_both_ways() {
    let labels = ColumnLabels::projects();

    assert_eq!(labels.label("year_published"), "Year Published");
    assert_eq!(labels.field("Dataset Available"), "dataset_available");
    assert_eq!(labels.label("unmapped"), "unmapped");

    let schema = <research_tracker_engine::data::Project as Tabular>::schema();
    let labelled = labels.label_schema(&schema);
    assert_eq!(labelled.field_names()[0], "Project ID");
    assert_eq!(labels.unlabel_schema(&labelled), schema);
}

#[test]
fn test_generic_table_export() {
    let tables = tables();
    let resolver = JoinResolver::new(&tables);
    let leaderboard = aggregate::supervisor_leaderboard(tables.projects(), &resolver, 2);

    let bytes = export::export(&to_dataset(&leaderboard)).unwrap();
    let text = String::from_utf8(bytes).unwrap();

    assert_eq!(
        text,
        "rank,supervisor_id,name,count\n1,1,Alice Mwangi,2\n2,2,Brian Otieno,1\n"
    );
}

fn sample_schema() -> Schema {
    SchemaBuilder::new()
        .add_integer("id", false)
        .add_string("name", false)
        .add_boolean("active", true)
        .build()
}

#[test]
fn test_import_matches_columns_by_name() {
    let bytes = b"active,extra,name,id\nYes,ignored,Ada,1\n,ignored,,2\n";
    let table = export::import(bytes, &sample_schema()).unwrap();

    assert_eq!(table.len(), 2);
    assert_eq!(
        table.data[0].values,
        vec![Value::Integer(1), Value::from("Ada"), Value::Boolean(true)]
    );
    // empty text in a non-null string column reads back as an empty string
    assert_eq!(
        table.data[1].values,
        vec![Value::Integer(2), Value::from(""), Value::Null]
    );
}

#[test]
fn test_import_rejects_bad_input() {
    let missing = export::import(b"id,name\n1,Ada\n", &sample_schema());
    assert!(matches!(missing, Err(ExportError::MissingColumn(column)) if column == "active"));

    let invalid = export::import(b"id,name,active\nx,Ada,Yes\n", &sample_schema());
    assert!(matches!(invalid, Err(ExportError::InvalidValue { .. })));

    let null_key = export::import(b"id,name,active\n,Ada,Yes\n", &sample_schema());
    assert!(matches!(null_key, Err(ExportError::Data(_))));
}

#[test]
fn test_dataset_columns() {
    let tables = tables();
    let table: DataSet = to_dataset(tables.projects());

    assert_eq!(table.len(), 6);
    assert_eq!(
        table.schema.get_field_by_name("dataset_available").map(|f| f.data_type),
        Some(DataType::Boolean)
    );
    let years: Vec<&Value> = table.column("year_published").unwrap().collect();
    assert_eq!(years[3], &Value::Null);
}
