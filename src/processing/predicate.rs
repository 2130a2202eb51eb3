// Predicates over entity records and the builder that derives them from user selections
// Author: Gabriel Demetrios Lafis

use std::collections::btree_map;
use std::collections::BTreeMap;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::data::{EntityTables, FieldValue, FilterField, Record, Status, Value};
use super::JoinResolver;

/// A single constraint on one field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Constraint {
    /// Value is one of the options; null only matches an explicit null option
    OneOf { values: Vec<Value> },
    /// Integer value within `[lo, hi]`; empty when `lo > hi`
    Between { lo: i64, hi: i64 },
    /// Case-insensitive substring; `needle` is stored lowercase
    Contains { needle: String },
}

impl Constraint {
    pub fn one_of<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Constraint::OneOf {
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    pub fn between(lo: i64, hi: i64) -> Self {
        Constraint::Between { lo, hi }
    }

    pub fn contains(text: &str) -> Self {
        Constraint::Contains {
            needle: text.to_lowercase(),
        }
    }

    /// Check one field value against this constraint
    pub fn matches(&self, value: FieldValue<'_>) -> bool {
        match self {
            Constraint::OneOf { values } => values.iter().any(|option| value.equals(option)),
            Constraint::Between { lo, hi } => value
                .as_i64()
                .map_or(false, |v| *lo <= v && v <= *hi),
            Constraint::Contains { needle } => value.contains_lowercase(needle),
        }
    }
}

/// Conjunction of per-field constraints
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Predicate {
    constraints: BTreeMap<FilterField, Constraint>,
}

impl Predicate {
    /// Create a predicate with no constraints, matching every row
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the constraint for a field, replacing any previous one
    pub fn with(mut self, field: FilterField, constraint: Constraint) -> Self {
        self.constraints.insert(field, constraint);
        self
    }

    /// Membership constraint following selection semantics: an empty
    /// selection leaves the field unconstrained.
    pub fn one_of<I, V>(self, field: FilterField, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let values: Vec<Value> = values.into_iter().map(Into::into).collect();
        if values.is_empty() {
            return self;
        }
        self.with(field, Constraint::OneOf { values })
    }

    pub fn between(self, field: FilterField, lo: i64, hi: i64) -> Self {
        self.with(field, Constraint::between(lo, hi))
    }

    /// Substring constraint; blank text leaves the field unconstrained
    pub fn contains(self, field: FilterField, text: &str) -> Self {
        let text = text.trim();
        if text.is_empty() {
            return self;
        }
        self.with(field, Constraint::contains(text))
    }

    pub fn get(&self, field: FilterField) -> Option<&Constraint> {
        self.constraints.get(&field)
    }

    pub fn len(&self) -> usize {
        self.constraints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.constraints.is_empty()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, FilterField, Constraint> {
        self.constraints.iter()
    }

    /// True when the record satisfies every constraint
    pub fn matches<R: Record + ?Sized>(&self, record: &R) -> bool {
        self.constraints
            .iter()
            .all(|(field, constraint)| constraint.matches(record.field(*field)))
    }
}

/// Bound of a year range as received from the presentation layer.
///
/// Any JSON value is accepted so that a malformed bound degrades the range
/// instead of rejecting the whole selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Bound {
    Year(i64),
    Text(String),
    Other(serde_json::Value),
}

impl Bound {
    /// Numeric value of the bound, if it has one
    pub fn resolve(&self) -> Option<i64> {
        match self {
            Bound::Year(year) => Some(*year),
            Bound::Text(text) => text.trim().parse().ok(),
            Bound::Other(_) => None,
        }
    }
}

/// Inclusive year range; a missing bound leaves that side open
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct YearRange {
    pub lo: Option<Bound>,
    pub hi: Option<Bound>,
}

impl YearRange {
    pub fn new(lo: i32, hi: i32) -> Self {
        YearRange {
            lo: Some(Bound::Year(i64::from(lo))),
            hi: Some(Bound::Year(i64::from(hi))),
        }
    }

    /// Numeric bounds, or `None` when the range should not constrain.
    ///
    /// A bound that is present but not numeric degrades the whole range to
    /// no constraint.
    pub fn normalize(&self) -> Option<(i64, i64)> {
        if self.lo.is_none() && self.hi.is_none() {
            return None;
        }

        let lo = match &self.lo {
            Some(bound) => bound.resolve()?,
            None => i64::MIN,
        };
        let hi = match &self.hi {
            Some(bound) => bound.resolve()?,
            None => i64::MAX,
        };

        Some((lo, hi))
    }
}

/// The user's current filter selections
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Selection {
    pub categories: Vec<Option<String>>,
    pub programs: Vec<Option<String>>,
    pub statuses: Vec<Option<Status>>,
    pub year_published: Option<YearRange>,
    pub supervisors: Vec<String>,
    pub title_search: Option<String>,
    pub id_search: Option<String>,
    pub dataset_available: Option<bool>,
}

/// Distinct option values present in the loaded tables
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterOptions {
    pub categories: Vec<String>,
    pub programs: Vec<String>,
    pub statuses: Vec<Status>,
    pub supervisors: Vec<String>,
    pub year_bounds: (i32, i32),
}

impl FilterOptions {
    /// Collect options in first-seen order.
    ///
    /// `default_years` is only used as the slider range when no project has
    /// a year.
    pub fn from_tables(tables: &EntityTables, default_years: (i32, i32)) -> Self {
        let projects = tables.projects();

        let years = projects.iter().filter_map(|p| p.year_published);
        let year_bounds = match (years.clone().min(), years.max()) {
            (Some(lo), Some(hi)) => (lo, hi),
            _ => default_years,
        };

        FilterOptions {
            categories: distinct(projects.iter().filter_map(|p| p.category.clone())),
            programs: distinct(tables.students().iter().filter_map(|s| s.program.clone())),
            statuses: distinct(projects.iter().filter_map(|p| p.status)),
            supervisors: distinct(tables.supervisors().iter().map(|s| s.name.clone())),
            year_bounds,
        }
    }
}

fn distinct<T: PartialEq>(values: impl Iterator<Item = T>) -> Vec<T> {
    let mut seen = Vec::new();
    for value in values {
        if !seen.contains(&value) {
            seen.push(value);
        }
    }
    seen
}

/// Builds project predicates from selections.
///
/// Cross-entity selections (supervisor names, student programs) are resolved
/// to foreign-key ids through the Join Resolver.
pub struct PredicateBuilder<'a> {
    resolver: JoinResolver<'a>,
    options: &'a FilterOptions,
}

impl<'a> PredicateBuilder<'a> {
    pub fn new(tables: &'a EntityTables, options: &'a FilterOptions) -> Self {
        PredicateBuilder {
            resolver: JoinResolver::new(tables),
            options,
        }
    }

    /// Translate a selection into a predicate over the projects table
    pub fn build(&self, selection: &Selection) -> Predicate {
        self.report_unknown_options(selection);

        let mut predicate = Predicate::new()
            .one_of(FilterField::Category, selection.categories.iter().cloned())
            .one_of(
                FilterField::Status,
                selection.statuses.iter().map(|s| s.map(|s| s.as_str())),
            );

        if let Some(range) = &selection.year_published {
            match range.normalize() {
                Some((lo, hi)) => {
                    predicate = predicate.between(FilterField::YearPublished, lo, hi);
                }
                None if range.lo.is_some() || range.hi.is_some() => {
                    warn!("Ignoring malformed year range {:?}", range);
                }
                None => {}
            }
        }

        if !selection.supervisors.is_empty() {
            let ids = self.resolver.supervisor_ids_for_names(&selection.supervisors);
            predicate = predicate.with(FilterField::SupervisorId, Constraint::one_of(ids));
        }

        if !selection.programs.is_empty() {
            let ids = self.resolver.student_ids_for_programs(&selection.programs);
            predicate = predicate.with(FilterField::StudentId, Constraint::one_of(ids));
        }

        if let Some(text) = &selection.title_search {
            predicate = predicate.contains(FilterField::Title, text);
        }
        if let Some(text) = &selection.id_search {
            predicate = predicate.contains(FilterField::ProjectId, text);
        }
        if let Some(flag) = selection.dataset_available {
            predicate = predicate.with(FilterField::DatasetAvailable, Constraint::one_of([flag]));
        }

        debug!("Built predicate with {} constraint(s)", predicate.len());
        predicate
    }

    fn report_unknown_options(&self, selection: &Selection) {
        let unknown_categories = selection
            .categories
            .iter()
            .flatten()
            .filter(|c| !self.options.categories.contains(*c));
        let unknown_supervisors = selection
            .supervisors
            .iter()
            .filter(|s| !self.options.supervisors.contains(*s));

        for value in unknown_categories.chain(unknown_supervisors) {
            debug!("Selected option '{}' is not present in the loaded tables", value);
        }
    }
}
