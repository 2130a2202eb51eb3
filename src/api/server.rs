// API server implementation
// Author: Gabriel Demetrios Lafis

use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use log::info;

use crate::data::EntityTables;
use crate::processing::{FilterOptions, ReportOptions};
use crate::utils::ServerConfig;
use super::routes;

/// State shared by every worker: the loaded snapshot and the defaults
#[derive(Debug, Clone)]
pub struct AppState {
    pub tables: Arc<EntityTables>,
    pub filter_options: FilterOptions,
    pub report_options: ReportOptions,
}

impl AppState {
    pub fn new(tables: Arc<EntityTables>, report_options: ReportOptions) -> Self {
        let filter_options = FilterOptions::from_tables(&tables, report_options.default_years);
        AppState {
            tables,
            filter_options,
            report_options,
        }
    }
}

/// API server
pub struct Server {
    config: ServerConfig,
    state: AppState,
}

impl Server {
    /// Create a new API server over a loaded snapshot
    pub fn new(tables: Arc<EntityTables>, report_options: ReportOptions, config: ServerConfig) -> Self {
        Server {
            config,
            state: AppState::new(tables, report_options),
        }
    }

    /// Run the API server
    pub async fn run(&self) -> std::io::Result<()> {
        let host = self.config.host.clone();
        let port = self.config.port;
        let workers = self.config.workers.unwrap_or_else(num_cpus::get);
        let enable_cors = self.config.enable_cors;
        let state = web::Data::new(self.state.clone());

        info!(
            "Starting server at http://{}:{} with {} worker(s)",
            host, port, workers
        );

        HttpServer::new(move || {
            let cors = if enable_cors {
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600)
            } else {
                Cors::default()
            };

            App::new()
                .app_data(state.clone())
                .wrap(cors)
                .configure(routes::configure)
        })
        .workers(workers)
        .bind((host.as_str(), port))?
        .run()
        .await
    }
}
