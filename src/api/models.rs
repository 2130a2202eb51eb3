// API request and response models
// Author: Gabriel Demetrios Lafis

use serde::{Deserialize, Serialize};

use crate::data::{Project, Student, Supervisor};
use crate::processing::{ChartScope, ProjectMetrics, ReportOptions, Selection};

/// Request for a dashboard report
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DashboardRequest {
    pub selection: Selection,
    pub top_n: Option<usize>,
    pub chart_scope: Option<ChartScope>,
    pub include_empty_years: Option<bool>,
}

impl DashboardRequest {
    /// Apply the request's overrides on top of the server defaults
    pub fn report_options(&self, defaults: &ReportOptions) -> ReportOptions {
        let mut options = *defaults;
        if let Some(top_n) = self.top_n {
            options.top_n = top_n;
        }
        if let Some(scope) = self.chart_scope {
            options.chart_scope = scope;
        }
        if let Some(include) = self.include_empty_years {
            options.time_series.include_empty_years = include;
        }
        options
    }
}

/// Filtered projects with their headline counts
#[derive(Debug, Clone, Serialize)]
pub struct FilterResponse {
    pub total: usize,
    pub matched: usize,
    pub metrics: ProjectMetrics,
    pub projects: Vec<Project>,
}

/// A project with the supervisor and student it refers to, when present
#[derive(Debug, Clone, Serialize)]
pub struct ProjectDetail {
    pub project: Project,
    pub supervisor: Option<Supervisor>,
    pub student: Option<Student>,
}
