// API routes configuration
// Author: Gabriel Demetrios Lafis

use actix_web::{web, HttpResponse, Responder};

use super::{handlers, AppState};

/// Configure API routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            // Health check
            .route("/health", web::get().to(health_check))
            .route("/options", web::get().to(handlers::filter_options))
            .route("/dashboard", web::post().to(handlers::dashboard))
            // Projects
            .service(
                web::scope("/projects")
                    .route("/filter", web::post().to(handlers::filter_projects))
                    .route("/export", web::post().to(handlers::export_projects))
                    .route("/{project_id}", web::get().to(handlers::get_project)),
            ),
    );
}

/// Health check handler
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "projects": state.tables.projects().len(),
        "loaded_at": state.tables.loaded_at().to_rfc3339(),
    }))
}
