//! Structural grid editing: diffing an event's existing timeslot set
//! against a newly requested one, and the date-edit lateness rule.
//!
//! Slot identity is the natural key of the timeslot: the naive timestamp
//! for date events, or the `(weekday, time)` pair for weekday events. Both
//! are `Ord`, so the diff works over `BTreeSet`s and yields deterministic,
//! sorted add/delete lists.

use std::collections::BTreeSet;

use chrono::NaiveDate;

use crate::errors::{GridError, GridResult};

/// The result of diffing an existing timeslot set against a requested one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridDiff<K> {
    /// Slots present on the event but absent from the new bounds.
    pub to_delete: Vec<K>,
    /// Slots required by the new bounds but not yet present.
    pub to_add: Vec<K>,
}

impl<K> GridDiff<K> {
    pub fn is_unchanged(&self) -> bool {
        self.to_delete.is_empty() && self.to_add.is_empty()
    }
}

/// Computes the symmetric difference between the existing and requested
/// timeslot identity sets.
pub fn diff_slots<K: Ord + Clone>(
    existing: &BTreeSet<K>,
    requested: &BTreeSet<K>,
) -> GridDiff<K> {
    GridDiff {
        to_delete: existing.difference(requested).cloned().collect(),
        to_add: requested.difference(existing).cloned().collect(),
    }
}

/// Validates the new start date of a date-event edit.
///
/// If the event's current start date is already in the past, it cannot be
/// moved any earlier than its current value; otherwise it cannot be moved
/// earlier than today. `today` is the current date in the creator's time
/// zone.
pub fn validate_start_date_edit(
    existing_start: NaiveDate,
    new_start: NaiveDate,
    today: NaiveDate,
) -> GridResult<()> {
    if existing_start < today {
        if new_start < existing_start {
            return Err(GridError::Validation(
                "Start date cannot be moved earlier than the event's current start date."
                    .to_string(),
            ));
        }
    } else if new_start < today {
        return Err(GridError::Validation(
            "Start date cannot be earlier than today.".to_string(),
        ));
    }
    Ok(())
}
