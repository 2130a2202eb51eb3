// Dashboard metrics and the combined dashboard report
// Author: Gabriel Demetrios Lafis

use std::collections::HashSet;

use log::info;
use serde::{Deserialize, Serialize};

use crate::data::{EntityTables, FilterField, Project, Status};
use super::aggregate::{
    self, CrossTabCell, GroupCount, LeaderboardEntry, TimeSeriesOptions, TrendPoint, YearCount,
    YearLeaderboard,
};
use super::{
    filter, FilterOptions, JoinResolver, OrphanReport, Predicate, PredicateBuilder, Selection,
};

/// Headline counts shown above the charts
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProjectMetrics {
    pub total_projects: usize,
    pub ongoing: usize,
    pub completed: usize,
    pub published: usize,
    pub not_published: usize,
    pub total_students: usize,
    pub orphaned_supervisor: usize,
    pub orphaned_student: usize,
}

/// Compute the headline counts.
///
/// Status counts and totals cover `projects` (usually the filtered view),
/// orphans included. The student total is the number of unique students in
/// the whole snapshot.
pub fn project_metrics(projects: &[Project], tables: &EntityTables) -> ProjectMetrics {
    let orphans = JoinResolver::new(tables).orphans(projects);
    metrics_with_orphans(projects, tables, &orphans)
}

fn metrics_with_orphans(
    projects: &[Project],
    tables: &EntityTables,
    orphans: &OrphanReport,
) -> ProjectMetrics {
    let count_status = |status: Status| {
        projects
            .iter()
            .filter(|p| p.status == Some(status))
            .count()
    };

    let unique_students: HashSet<i64> = tables.students().iter().map(|s| s.student_id).collect();

    ProjectMetrics {
        total_projects: projects.len(),
        ongoing: count_status(Status::Ongoing),
        completed: count_status(Status::Completed),
        published: count_status(Status::Published),
        not_published: count_status(Status::NotPublished),
        total_students: unique_students.len(),
        orphaned_supervisor: orphans.missing_supervisor.len(),
        orphaned_student: orphans.missing_student.len(),
    }
}

/// Which rows the dashboard charts are computed from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartScope {
    /// Every loaded project, regardless of the selection
    #[default]
    Full,
    /// Only the projects matching the selection
    Filtered,
}

/// Options controlling the dashboard report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportOptions {
    pub top_n: usize,
    pub chart_scope: ChartScope,
    pub time_series: TimeSeriesOptions,
    pub default_years: (i32, i32),
}

impl Default for ReportOptions {
    fn default() -> Self {
        ReportOptions {
            top_n: 5,
            chart_scope: ChartScope::Full,
            time_series: TimeSeriesOptions::default(),
            default_years: (2021, 2024),
        }
    }
}

/// Every derived view of the dashboard for one selection
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardReport {
    pub selection: Selection,
    pub metrics: ProjectMetrics,
    pub program_distribution: Vec<GroupCount>,
    pub category_distribution: Vec<GroupCount>,
    pub yearly_trend: Vec<YearCount>,
    pub supervisor_totals: Vec<LeaderboardEntry>,
    pub leaderboard: Vec<LeaderboardEntry>,
    pub leaderboard_trends: Vec<TrendPoint>,
    pub yearly_leaderboards: Vec<YearLeaderboard>,
    pub completed_leaderboard: Vec<LeaderboardEntry>,
    pub category_by_program: Vec<CrossTabCell>,
    pub orphans: OrphanReport,
    pub projects: Vec<Project>,
}

impl DashboardReport {
    /// Filter the snapshot with the selection and derive every view
    pub fn build(tables: &EntityTables, selection: &Selection, options: &ReportOptions) -> Self {
        let filter_options = FilterOptions::from_tables(tables, options.default_years);
        Self::build_with_options(tables, &filter_options, selection, options)
    }

    /// Same as [`DashboardReport::build`], reusing option values collected once per snapshot
    pub fn build_with_options(
        tables: &EntityTables,
        filter_options: &FilterOptions,
        selection: &Selection,
        options: &ReportOptions,
    ) -> Self {
        let filtered = filter_projects(tables, filter_options, selection);
        let resolver = JoinResolver::new(tables);

        let chart_rows: &[Project] = match options.chart_scope {
            ChartScope::Full => tables.projects(),
            ChartScope::Filtered => &filtered,
        };

        let leaderboard = aggregate::supervisor_leaderboard(chart_rows, &resolver, options.top_n);
        let leaderboard_trends = aggregate::leaderboard_trends(chart_rows, &leaderboard);

        let completed = filter::apply(
            chart_rows,
            &Predicate::new().one_of(FilterField::Status, [Status::Completed.as_str()]),
        );

        let orphans = resolver.orphans(&filtered);

        let report = DashboardReport {
            selection: selection.clone(),
            metrics: metrics_with_orphans(&filtered, tables, &orphans),
            program_distribution: aggregate::students_per_program(tables.students()),
            category_distribution: aggregate::projects_per_category(chart_rows),
            yearly_trend: aggregate::yearly_counts(
                chart_rows,
                FilterField::YearPublished,
                &options.time_series,
            ),
            supervisor_totals: aggregate::supervisor_totals(chart_rows, &resolver),
            leaderboard,
            leaderboard_trends,
            yearly_leaderboards: aggregate::yearly_leaderboards(
                chart_rows,
                &resolver,
                options.top_n,
            ),
            completed_leaderboard: aggregate::supervisor_leaderboard(
                &completed,
                &resolver,
                options.top_n,
            ),
            category_by_program: aggregate::category_by_program(chart_rows, &resolver),
            orphans,
            projects: filtered,
        };

        info!(
            "Built dashboard report: {} of {} project(s) selected",
            report.projects.len(),
            tables.projects().len()
        );

        report
    }
}

/// Apply a selection to the projects table of a snapshot.
///
/// `options` must have been collected from the same snapshot.
pub fn filter_projects(
    tables: &EntityTables,
    options: &FilterOptions,
    selection: &Selection,
) -> Vec<Project> {
    let predicate = PredicateBuilder::new(tables, options).build(selection);
    filter::apply(tables.projects(), &predicate)
}
