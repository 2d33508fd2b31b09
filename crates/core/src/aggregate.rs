//! Aggregation of availability across all participants of an event.
//!
//! Output shape is a 3D grid: outer = days, middle = timeslots within the
//! day, inner = display names of the participants available at that slot.

use std::collections::BTreeMap;

use crate::grid::GridShape;

/// One availability row joined with its timeslot identity and the owning
/// participant's display name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotEntry<K> {
    pub slot: K,
    pub display_name: String,
    pub is_available: bool,
}

/// The aggregation grid for an event with no participants: correct shape,
/// every innermost name list empty.
pub fn empty_grid(shape: GridShape) -> Vec<Vec<Vec<String>>> {
    vec![vec![Vec::new(); shape.num_slots]; shape.num_days]
}

/// Groups availability entries by timeslot and partitions the groups into
/// days.
///
/// `entries` must be sorted by (slot, display name) ascending; names are
/// collected in that order, so within each slot the available names come
/// out name-ascending. `day_of` extracts the day component of a slot key
/// (the date, or the weekday); a new day starts whenever it changes between
/// consecutive slots, which reproduces the day-major grouping the grid was
/// built with.
pub fn group_availability<K, D>(
    entries: &[SlotEntry<K>],
    day_of: impl Fn(&K) -> D,
) -> Vec<Vec<Vec<String>>>
where
    K: Ord + Clone,
    D: PartialEq,
{
    // Every entry registers its slot, so slots where nobody is available
    // still produce an (empty) group.
    let mut by_slot: BTreeMap<K, Vec<String>> = BTreeMap::new();
    for entry in entries {
        let names = by_slot.entry(entry.slot.clone()).or_default();
        if entry.is_available {
            names.push(entry.display_name.clone());
        }
    }

    let mut days: Vec<Vec<Vec<String>>> = Vec::new();
    let mut current_day: Vec<Vec<String>> = Vec::new();
    let mut last_day: Option<D> = None;
    for (slot, names) in by_slot {
        let day = day_of(&slot);
        if let Some(prev) = &last_day {
            if *prev != day {
                days.push(std::mem::take(&mut current_day));
            }
        }
        last_day = Some(day);
        current_day.push(names);
    }
    if !current_day.is_empty() {
        days.push(current_day);
    }
    days
}
