// Entity records for projects, students, supervisors and publications
// Author: Gabriel Demetrios Lafis

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{DataError, FieldValue, FilterField, Record};

pub type ProjectId = i64;
pub type StudentId = i64;
pub type SupervisorId = i64;
pub type PublicationId = i64;

/// Project status, covering both the project and the publication datasets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Status {
    Ongoing,
    Completed,
    Published,
    NotPublished,
}

impl Status {
    pub const ALL: [Status; 4] = [
        Status::Ongoing,
        Status::Completed,
        Status::Published,
        Status::NotPublished,
    ];

    /// Label as it appears in the source files
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Ongoing => "Ongoing",
            Status::Completed => "Completed",
            Status::Published => "Published",
            Status::NotPublished => "Not Published",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = DataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| c.is_alphanumeric())
            .flat_map(char::to_lowercase)
            .collect();

        match normalized.as_str() {
            "ongoing" => Ok(Status::Ongoing),
            "completed" => Ok(Status::Completed),
            "published" => Ok(Status::Published),
            "notpublished" => Ok(Status::NotPublished),
            _ => Err(DataError::ParseError(format!("Unknown status: {}", s))),
        }
    }
}

impl TryFrom<String> for Status {
    type Error = DataError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Status> for String {
    fn from(status: Status) -> Self {
        status.as_str().to_string()
    }
}

/// Parse a yes/no flag as written in the source files
pub fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_lowercase().as_str() {
        "yes" | "y" | "true" | "1" => Some(true),
        "no" | "n" | "false" | "0" => Some(false),
        _ => None,
    }
}

mod flag {
    use serde::de::{self, Deserializer};
    use serde::Deserialize;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawFlag {
        Bool(bool),
        Int(i64),
        Text(String),
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<RawFlag>::deserialize(deserializer)? {
            None => Ok(None),
            Some(RawFlag::Bool(b)) => Ok(Some(b)),
            Some(RawFlag::Int(0)) => Ok(Some(false)),
            Some(RawFlag::Int(1)) => Ok(Some(true)),
            Some(RawFlag::Int(i)) => Err(de::Error::custom(format!("invalid flag: {}", i))),
            Some(RawFlag::Text(s)) if s.trim().is_empty() => Ok(None),
            Some(RawFlag::Text(s)) => super::parse_flag(&s)
                .map(Some)
                .ok_or_else(|| de::Error::custom(format!("invalid flag: {}", s))),
        }
    }
}

/// A research project (fact table row)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub project_id: ProjectId,
    #[serde(default)]
    pub student_id: Option<StudentId>,
    #[serde(default)]
    pub supervisor_id: Option<SupervisorId>,
    pub title: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub status: Option<Status>,
    #[serde(default)]
    pub year_published: Option<i32>,
    #[serde(default, deserialize_with = "flag::deserialize")]
    pub dataset_available: Option<bool>,
}

impl Record for Project {
    fn field(&self, field: FilterField) -> FieldValue<'_> {
        match field {
            FilterField::ProjectId => self.project_id.into(),
            FilterField::StudentId => self.student_id.into(),
            FilterField::SupervisorId => self.supervisor_id.into(),
            FilterField::Title => self.title.as_str().into(),
            FilterField::Category => self.category.as_ref().into(),
            FilterField::Status => self
                .status
                .map_or(FieldValue::Null, |s| FieldValue::Text(s.as_str())),
            FilterField::YearPublished => self.year_published.into(),
            FilterField::DatasetAvailable => self.dataset_available.into(),
            _ => FieldValue::Null,
        }
    }
}

/// A student (dimension table row)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    pub student_id: StudentId,
    pub name: String,
    #[serde(default)]
    pub program: Option<String>,
    #[serde(default)]
    pub year_of_study: Option<i32>,
}

impl Student {
    /// Year of study as a date (January 1st) for display on time axes
    pub fn year_of_study_date(&self) -> Option<NaiveDate> {
        self.year_of_study
            .and_then(|year| NaiveDate::from_ymd_opt(year, 1, 1))
    }
}

impl Record for Student {
    fn field(&self, field: FilterField) -> FieldValue<'_> {
        match field {
            FilterField::StudentId => self.student_id.into(),
            FilterField::Name => self.name.as_str().into(),
            FilterField::Program => self.program.as_ref().into(),
            FilterField::YearOfStudy => self.year_of_study.into(),
            _ => FieldValue::Null,
        }
    }
}

/// A supervisor (dimension table row)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Supervisor {
    pub supervisor_id: SupervisorId,
    pub name: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub specialization: Option<String>,
}

impl Supervisor {
    /// Name prefixed with the title, e.g. "Prof. Ada Lovelace"
    pub fn display_name(&self) -> String {
        match &self.title {
            Some(title) => format!("{} {}", title, self.name),
            None => self.name.clone(),
        }
    }
}

impl Record for Supervisor {
    fn field(&self, field: FilterField) -> FieldValue<'_> {
        match field {
            FilterField::SupervisorId => self.supervisor_id.into(),
            FilterField::Name => self.name.as_str().into(),
            FilterField::SupervisorTitle => self.title.as_ref().into(),
            FilterField::Specialization => self.specialization.as_ref().into(),
            _ => FieldValue::Null,
        }
    }
}

/// A row of the denormalized publications table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Publication {
    pub publication_id: PublicationId,
    pub title: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub status: Option<Status>,
    #[serde(default)]
    pub year_published: Option<i32>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub program: Option<String>,
    #[serde(default)]
    pub supervisor: Option<String>,
    #[serde(default, deserialize_with = "flag::deserialize")]
    pub dataset_available: Option<bool>,
}

impl Record for Publication {
    fn field(&self, field: FilterField) -> FieldValue<'_> {
        match field {
            FilterField::PublicationId => self.publication_id.into(),
            FilterField::Title => self.title.as_str().into(),
            FilterField::Category => self.category.as_ref().into(),
            FilterField::Status => self
                .status
                .map_or(FieldValue::Null, |s| FieldValue::Text(s.as_str())),
            FilterField::YearPublished => self.year_published.into(),
            FilterField::Author => self.author.as_ref().into(),
            FilterField::Program => self.program.as_ref().into(),
            FilterField::SupervisorName => self.supervisor.as_ref().into(),
            FilterField::DatasetAvailable => self.dataset_available.into(),
            _ => FieldValue::Null,
        }
    }
}
