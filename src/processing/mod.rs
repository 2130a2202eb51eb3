// Processing module: predicates, filtering, joins and aggregation
// Author: Gabriel Demetrios Lafis

//! Every operation here is a pure function of an immutable
//! [`EntityTables`](crate::data::EntityTables) snapshot and its arguments,
//! so callers may run them repeatedly or from several threads at once.

pub mod aggregate;
pub mod filter;
mod join;
mod predicate;
mod report;

pub use aggregate::{
    CrossTabCell, Dimension, GroupCount, LeaderboardEntry, TimeSeriesOptions, TrendPoint,
    YearCount, YearLeaderboard,
};
pub use join::*;
pub use predicate::*;
pub use report::*;
