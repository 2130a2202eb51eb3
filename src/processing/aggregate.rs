// Aggregate operations for entity tables
// Author: Gabriel Demetrios Lafis

use std::collections::{BTreeMap, BTreeSet, HashMap};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::data::{FilterField, Project, Record, Student, SupervisorId, Value};
use super::JoinResolver;

/// Number of rows (or distinct keys) in one group
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupCount {
    pub key: Value,
    pub count: usize,
}

impl GroupCount {
    pub fn new(key: impl Into<Value>, count: usize) -> Self {
        GroupCount {
            key: key.into(),
            count,
        }
    }
}

/// Count rows per value of `field`, most frequent first.
///
/// Ties keep ascending key order. Null values form their own group.
pub fn count_by<R: Record>(rows: &[R], field: FilterField) -> Vec<GroupCount> {
    let mut groups: BTreeMap<Value, usize> = BTreeMap::new();

    for row in rows {
        *groups.entry(row.field(field).to_value()).or_insert(0) += 1;
    }

    let mut counts: Vec<GroupCount> = groups
        .into_iter()
        .map(|(key, count)| GroupCount { key, count })
        .collect();
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts
}

/// Count distinct non-null values of `key` per value of `group`, in key order
pub fn count_distinct_by<R: Record>(
    rows: &[R],
    group: FilterField,
    key: FilterField,
) -> Vec<GroupCount> {
    let mut groups: BTreeMap<Value, BTreeSet<Value>> = BTreeMap::new();

    for row in rows {
        let members = groups.entry(row.field(group).to_value()).or_default();
        let value = row.field(key);
        if !value.is_null() {
            members.insert(value.to_value());
        }
    }

    groups
        .into_iter()
        .map(|(key, members)| GroupCount {
            key,
            count: members.len(),
        })
        .collect()
}

/// Unique students per program
pub fn students_per_program(students: &[Student]) -> Vec<GroupCount> {
    count_distinct_by(students, FilterField::Program, FilterField::StudentId)
}

/// Projects per research category, largest first
pub fn projects_per_category(projects: &[Project]) -> Vec<GroupCount> {
    count_by(projects, FilterField::Category)
}

/// Number of rows for one year; `year` is `None` for rows without a year
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct YearCount {
    pub year: Option<i32>,
    pub count: usize,
}

/// Options for per-year series
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeSeriesOptions {
    /// Emit zero-count years between the first and last year
    pub include_empty_years: bool,
    /// Widen the zero-filled span to at least these years
    pub bounds: Option<(i32, i32)>,
}

/// Count rows per year in ascending year order.
///
/// Years with no rows are omitted unless `include_empty_years` is set. Rows
/// without a year are reported last as a `None` group.
pub fn yearly_counts<R: Record>(
    rows: &[R],
    field: FilterField,
    options: &TimeSeriesOptions,
) -> Vec<YearCount> {
    let mut counts: BTreeMap<i32, usize> = BTreeMap::new();
    let mut unspecified = 0;

    for row in rows {
        match row.field(field).as_i64().and_then(|y| i32::try_from(y).ok()) {
            Some(year) => *counts.entry(year).or_insert(0) += 1,
            None => unspecified += 1,
        }
    }

    if options.include_empty_years {
        let observed = counts.keys().next().copied().zip(counts.keys().last().copied());
        if let Some((first, last)) = observed {
            let (lo, hi) = match options.bounds {
                Some((lo, hi)) => (lo.min(first), hi.max(last)),
                None => (first, last),
            };
            for year in lo..=hi {
                counts.entry(year).or_insert(0);
            }
        }
    }

    let mut series: Vec<YearCount> = counts
        .into_iter()
        .map(|(year, count)| YearCount {
            year: Some(year),
            count,
        })
        .collect();

    if unspecified > 0 {
        series.push(YearCount {
            year: None,
            count: unspecified,
        });
    }

    series
}

/// One supervisor's place in a ranking
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LeaderboardEntry {
    pub rank: usize,
    pub supervisor_id: SupervisorId,
    pub name: String,
    pub count: usize,
}

fn rank_supervisors<'p, I>(projects: I, resolver: &JoinResolver<'_>) -> Vec<LeaderboardEntry>
where
    I: IntoIterator<Item = &'p Project>,
{
    let mut counts: HashMap<SupervisorId, usize> = HashMap::new();
    let mut orphaned = 0;

    for project in projects {
        match resolver.supervisor_of(project) {
            Some(supervisor) => *counts.entry(supervisor.supervisor_id).or_insert(0) += 1,
            None => orphaned += 1,
        }
    }

    if orphaned > 0 {
        debug!(
            "Excluded {} orphaned project(s) from the supervisor breakdown",
            orphaned
        );
    }

    let mut ranked: Vec<(usize, SupervisorId, usize)> = counts
        .into_iter()
        .filter_map(|(id, count)| resolver.supervisor_position(id).map(|pos| (pos, id, count)))
        .collect();
    ranked.sort_by(|a, b| b.2.cmp(&a.2).then(a.0.cmp(&b.0)));

    ranked
        .into_iter()
        .enumerate()
        .map(|(i, (position, id, count))| LeaderboardEntry {
            rank: i + 1,
            supervisor_id: id,
            name: resolver.tables().supervisors()[position].name.clone(),
            count,
        })
        .collect()
}

/// Every supervisor with at least one project, by project count descending.
///
/// Ties follow the order of the supervisors table. Projects whose supervisor
/// does not resolve are left out.
pub fn supervisor_totals(projects: &[Project], resolver: &JoinResolver<'_>) -> Vec<LeaderboardEntry> {
    rank_supervisors(projects, resolver)
}

/// The `n` supervisors with the most projects
pub fn supervisor_leaderboard(
    projects: &[Project],
    resolver: &JoinResolver<'_>,
    n: usize,
) -> Vec<LeaderboardEntry> {
    let mut ranked = rank_supervisors(projects, resolver);
    ranked.truncate(n);
    ranked
}

/// Leaderboard of a single year
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct YearLeaderboard {
    pub year: i32,
    pub entries: Vec<LeaderboardEntry>,
}

/// Top `n` supervisors for every year that has projects
pub fn yearly_leaderboards(
    projects: &[Project],
    resolver: &JoinResolver<'_>,
    n: usize,
) -> Vec<YearLeaderboard> {
    let mut by_year: BTreeMap<i32, Vec<&Project>> = BTreeMap::new();
    for project in projects {
        if let Some(year) = project.year_published {
            by_year.entry(year).or_default().push(project);
        }
    }

    by_year
        .into_iter()
        .map(|(year, projects)| {
            let mut entries = rank_supervisors(projects, resolver);
            entries.truncate(n);
            YearLeaderboard { year, entries }
        })
        .collect()
}

/// Project count of one leaderboard supervisor in one year
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrendPoint {
    pub supervisor_id: SupervisorId,
    pub name: String,
    pub year: Option<i32>,
    pub count: usize,
}

/// Re-aggregate projects of the leaderboard supervisors per (supervisor, year).
///
/// Points are ordered by leaderboard rank, then ascending year with the
/// `None` year last.
pub fn leaderboard_trends(projects: &[Project], leaders: &[LeaderboardEntry]) -> Vec<TrendPoint> {
    let mut groups: BTreeMap<(usize, bool, Option<i32>), usize> = BTreeMap::new();

    for project in projects {
        let leader = project
            .supervisor_id
            .and_then(|id| leaders.iter().position(|l| l.supervisor_id == id));

        if let Some(index) = leader {
            let year = project.year_published;
            *groups.entry((index, year.is_none(), year)).or_insert(0) += 1;
        }
    }

    groups
        .into_iter()
        .map(|((index, _, year), count)| TrendPoint {
            supervisor_id: leaders[index].supervisor_id,
            name: leaders[index].name.clone(),
            year,
            count,
        })
        .collect()
}

/// Dimension table a cross-tabulation joins to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    Student,
    Supervisor,
}

/// Count of projects for one pair of categorical values
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CrossTabCell {
    pub row: Value,
    pub column: Value,
    pub count: usize,
}

/// Group projects by a project field and a field of the joined dimension.
///
/// Only observed pairs are returned, in key order. Projects whose foreign
/// key does not resolve are excluded.
pub fn cross_tabulate(
    projects: &[Project],
    resolver: &JoinResolver<'_>,
    project_field: FilterField,
    dimension: Dimension,
    dimension_field: FilterField,
) -> Vec<CrossTabCell> {
    let mut groups: BTreeMap<(Value, Value), usize> = BTreeMap::new();

    for project in projects {
        let column = match dimension {
            Dimension::Student => resolver
                .student_of(project)
                .map(|s| s.field(dimension_field).to_value()),
            Dimension::Supervisor => resolver
                .supervisor_of(project)
                .map(|s| s.field(dimension_field).to_value()),
        };

        if let Some(column) = column {
            let row = project.field(project_field).to_value();
            *groups.entry((row, column)).or_insert(0) += 1;
        }
    }

    groups
        .into_iter()
        .map(|((row, column), count)| CrossTabCell { row, column, count })
        .collect()
}

/// Research categories broken down by student program
pub fn category_by_program(projects: &[Project], resolver: &JoinResolver<'_>) -> Vec<CrossTabCell> {
    cross_tabulate(
        projects,
        resolver,
        FilterField::Category,
        Dimension::Student,
        FilterField::Program,
    )
}
