// API request handlers
// Author: Gabriel Demetrios Lafis

use actix_web::http::header::{ContentDisposition, DispositionParam, DispositionType};
use actix_web::{web, HttpResponse, Responder};
use log::info;

use crate::export;
use crate::processing::{self, DashboardReport, JoinResolver, Selection};
use super::{ApiError, AppState, DashboardRequest, FilterResponse, ProjectDetail};

/// List the option values available for each selection
pub async fn filter_options(state: web::Data<AppState>) -> Result<impl Responder, ApiError> {
    Ok(HttpResponse::Ok().json(&state.filter_options))
}

/// Filter the projects table
pub async fn filter_projects(
    state: web::Data<AppState>,
    payload: web::Json<Selection>,
) -> Result<impl Responder, ApiError> {
    let selection = payload.into_inner();
    let projects =
        processing::filter_projects(&state.tables, &state.filter_options, &selection);

    Ok(HttpResponse::Ok().json(FilterResponse {
        total: state.tables.projects().len(),
        matched: projects.len(),
        metrics: processing::project_metrics(&projects, &state.tables),
        projects,
    }))
}

/// Get one project with its supervisor and student
pub async fn get_project(
    state: web::Data<AppState>,
    path: web::Path<i64>,
) -> Result<impl Responder, ApiError> {
    let project_id = path.into_inner();

    let project = state
        .tables
        .projects()
        .iter()
        .find(|p| p.project_id == project_id)
        .ok_or_else(|| ApiError::NotFound(format!("Project {} not found", project_id)))?;

    let resolver = JoinResolver::new(&state.tables);
    Ok(HttpResponse::Ok().json(ProjectDetail {
        project: project.clone(),
        supervisor: resolver.supervisor_of(project).cloned(),
        student: resolver.student_of(project).cloned(),
    }))
}

/// Build the full dashboard report
pub async fn dashboard(
    state: web::Data<AppState>,
    payload: web::Json<DashboardRequest>,
) -> Result<impl Responder, ApiError> {
    let request = payload.into_inner();
    let options = request.report_options(&state.report_options);

    if options.top_n == 0 {
        return Err(ApiError::ValidationError(
            "top_n must be at least 1".to_string(),
        ));
    }

    let report = DashboardReport::build_with_options(
        &state.tables,
        &state.filter_options,
        &request.selection,
        &options,
    );
    Ok(HttpResponse::Ok().json(report))
}

/// Download the filtered projects as CSV
pub async fn export_projects(
    state: web::Data<AppState>,
    payload: web::Json<Selection>,
) -> Result<impl Responder, ApiError> {
    let selection = payload.into_inner();
    let projects =
        processing::filter_projects(&state.tables, &state.filter_options, &selection);

    let payload = export::export_projects(&projects)?;
    info!(
        "Exported {} project(s) as {}",
        projects.len(),
        payload.filename
    );

    let disposition = ContentDisposition {
        disposition: DispositionType::Attachment,
        parameters: vec![DispositionParam::Filename(payload.filename)],
    };

    Ok(HttpResponse::Ok()
        .content_type(payload.mime)
        .insert_header(disposition)
        .body(payload.bytes))
}
