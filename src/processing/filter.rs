// Filter operations for entity tables
// Author: Gabriel Demetrios Lafis

use log::trace;

use crate::data::Record;
use super::Predicate;

/// Keep the rows that satisfy every constraint of the predicate.
///
/// Row order is preserved and the input table is left untouched.
pub fn apply<R: Record + Clone>(table: &[R], predicate: &Predicate) -> Vec<R> {
    apply_refs(table, predicate).into_iter().cloned().collect()
}

/// Like [`apply`], but borrows the matching rows instead of copying them
pub fn apply_refs<'t, R: Record>(table: &'t [R], predicate: &Predicate) -> Vec<&'t R> {
    if predicate.is_empty() {
        return table.iter().collect();
    }

    let result: Vec<&R> = table.iter().filter(|row| predicate.matches(*row)).collect();

    trace!(
        "Filtered {} row(s) down to {} with {} constraint(s)",
        table.len(),
        result.len(),
        predicate.len()
    );

    result
}

/// Count the rows that satisfy the predicate
pub fn count_matching<R: Record>(table: &[R], predicate: &Predicate) -> usize {
    table.iter().filter(|row| predicate.matches(*row)).count()
}
