// Validation utilities applied when tables are loaded
// Author: Gabriel Demetrios Lafis

use std::collections::HashMap;

use crate::data::{DataError, EntityKind};

/// Smallest year accepted in any year column
pub const MIN_YEAR: i32 = 1000;

/// Largest year accepted in any year column
pub const MAX_YEAR: i32 = 9999;

/// Index primary keys by row position, rejecting duplicates
pub fn index_unique_keys<I>(entity: EntityKind, keys: I) -> Result<HashMap<i64, usize>, DataError>
where
    I: IntoIterator<Item = i64>,
{
    let mut index = HashMap::new();

    for (position, key) in keys.into_iter().enumerate() {
        if index.insert(key, position).is_some() {
            return Err(DataError::DuplicateKey { entity, key });
        }
    }

    Ok(index)
}

/// Validate that a year, when present, is a four-digit year
pub fn validate_year(entity: EntityKind, key: i64, year: Option<i32>) -> Result<(), DataError> {
    match year {
        Some(year) if !(MIN_YEAR..=MAX_YEAR).contains(&year) => {
            Err(DataError::ValidationError(format!(
                "{} row {} has year {}, expected a four-digit year",
                entity, key, year
            )))
        }
        _ => Ok(()),
    }
}
