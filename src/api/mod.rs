// API module for exposing the dashboard engine via HTTP
// Author: Gabriel Demetrios Lafis

mod handlers;
mod models;
mod routes;
mod server;

pub use handlers::*;
pub use models::*;
pub use routes::*;
pub use server::*;

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde_json::json;
use thiserror::Error;

use crate::export::ExportError;

/// Represents an error in the API module
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Export error: {0}")]
    ExportError(#[from] ExportError),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Not found: {0}")]
    NotFound(String),
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::ValidationError(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::ExportError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        HttpResponse::build(status).json(json!({
            "error": self.to_string(),
            "status": status.as_u16(),
        }))
    }
}
