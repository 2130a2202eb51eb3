// HTTP API tests
// Author: Gabriel Demetrios Lafis

mod common;

use std::sync::Arc;

use actix_web::http::{header, StatusCode};
use actix_web::{test, web, App};
use serde_json::{json, Value};

use research_tracker_engine::{
    api::{configure, ApiError, AppState},
    processing::ReportOptions,
};

fn state() -> web::Data<AppState> {
    web::Data::new(AppState::new(
        Arc::new(common::tables()),
        ReportOptions::default(),
    ))
}

#[actix_web::test]
async fn test_health_check() {
    let app = test::init_service(App::new().app_data(state()).configure(configure)).await;

    let req = test::TestRequest::get().uri("/api/v1/health").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["status"], "ok");
    assert_eq!(body["projects"], 6);
}

#[actix_web::test]
async fn test_filter_options() {
    let app = test::init_service(App::new().app_data(state()).configure(configure)).await;

    let req = test::TestRequest::get().uri("/api/v1/options").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["categories"], json!(["Hematology", "Microbiology"]));
    assert_eq!(body["statuses"], json!(["Ongoing", "Completed"]));
    assert_eq!(body["year_bounds"], json!([2021, 2024]));
}

#[actix_web::test]
async fn test_filter_projects() {
    let app = test::init_service(App::new().app_data(state()).configure(configure)).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/projects/filter")
        .set_json(json!({
            "categories": ["Hematology"],
            "year_published": {"lo": 2021, "hi": 2022}
        }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["total"], 6);
    assert_eq!(body["matched"], 2);
    assert_eq!(body["metrics"]["ongoing"], 2);
    assert_eq!(body["projects"][0]["project_id"], 101);
    assert_eq!(body["projects"][1]["project_id"], 105);
}

#[actix_web::test]
async fn test_dashboard_report() {
    let app = test::init_service(App::new().app_data(state()).configure(configure)).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/dashboard")
        .set_json(json!({
            "selection": {"statuses": ["Completed"]},
            "top_n": 2
        }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["metrics"]["completed"], 3);
    assert_eq!(body["leaderboard"].as_array().map(Vec::len), Some(2));
    assert_eq!(body["leaderboard"][0]["name"], "Alice Mwangi");
    assert_eq!(body["orphans"]["missing_supervisor"], json!([106]));
}

#[actix_web::test]
async fn test_dashboard_rejects_empty_leaderboard() {
    let app = test::init_service(App::new().app_data(state()).configure(configure)).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/dashboard")
        .set_json(json!({"top_n": 0}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], 400);
}

#[actix_web::test]
async fn test_malformed_selection_is_a_bad_request() {
    let app = test::init_service(App::new().app_data(state()).configure(configure)).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/projects/filter")
        .set_json(json!({"statuses": ["Archived"]}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_export_download() {
    let app = test::init_service(App::new().app_data(state()).configure(configure)).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/projects/export")
        .set_json(json!({"statuses": ["Completed"]}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers().get(header::CONTENT_TYPE).unwrap(),
        "text/csv"
    );
    let disposition = resp
        .headers()
        .get(header::CONTENT_DISPOSITION)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(disposition.contains("filtered_research_projects.csv"));

    let body = test::read_body(resp).await;
    let text = std::str::from_utf8(&body).unwrap();
    assert!(text.starts_with("Project ID,Student ID,"));
    assert_eq!(text.lines().count(), 4);
}

#[actix_web::test]
async fn test_non_numeric_year_bound_is_ignored() {
    let app = test::init_service(App::new().app_data(state()).configure(configure)).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/projects/filter")
        .set_json(json!({"year_published": {"lo": true, "hi": 2021.0}}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["matched"], 6);
}

#[actix_web::test]
async fn test_get_project_with_its_people() {
    let app = test::init_service(App::new().app_data(state()).configure(configure)).await;

    let req = test::TestRequest::get().uri("/api/v1/projects/101").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["project"]["title"], "Sickle cell outcomes");
    assert_eq!(body["supervisor"]["name"], "Alice Mwangi");
    assert_eq!(body["student"]["student_id"], 10);

    let req = test::TestRequest::get().uri("/api/v1/projects/106").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["supervisor"], Value::Null);
}

#[actix_web::test]
async fn test_unknown_project_is_not_found() {
    let app = test::init_service(App::new().app_data(state()).configure(configure)).await;

    let req = test::TestRequest::get().uri("/api/v1/projects/999").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], 404);
    assert_eq!(body["error"], "Not found: Project 999 not found");
}

#[actix_web::test]
async fn test_error_status_codes() {
    use actix_web::ResponseError;

    assert_eq!(
        ApiError::ValidationError("bad".into()).status_code(),
        StatusCode::BAD_REQUEST
    );
    assert_eq!(
        ApiError::NotFound("project".into()).status_code(),
        StatusCode::NOT_FOUND
    );
}
