//! Validation and linearization of availability submissions.
//!
//! A submission is a 2D boolean grid, outer = days, inner = timeslots within
//! the day. It is validated against the event's grid shape, then flattened
//! day-major so it zips 1:1 against the ordered timeslot sequence from
//! [`crate::grid`].

use crate::errors::{GridError, GridResult};
use crate::grid::GridShape;

/// Checks that a submitted availability grid matches the event's shape.
/// Error messages name the expected and actual counts.
pub fn validate_shape(availability: &[Vec<bool>], shape: GridShape) -> GridResult<()> {
    if availability.len() != shape.num_days {
        return Err(GridError::Validation(format!(
            "Invalid availability days. Expected {}, got {}.",
            shape.num_days,
            availability.len()
        )));
    }
    for day in availability {
        if day.len() != shape.num_slots {
            return Err(GridError::Validation(format!(
                "Invalid availability timeslots. Expected {}, got {}.",
                shape.num_slots,
                day.len()
            )));
        }
    }
    Ok(())
}

/// Flattens a 2D availability grid day-major, matching the timeslot
/// ordering contract.
pub fn flatten(availability: &[Vec<bool>]) -> Vec<bool> {
    availability.iter().flatten().copied().collect()
}

/// Rebuilds a 2D availability grid from a day-major flat sequence. The flat
/// length must equal the grid size; a mismatch means the stored rows no
/// longer line up with the timeslot set and is reported as an integrity
/// fault.
pub fn unflatten(flat: &[bool], shape: GridShape) -> GridResult<Vec<Vec<bool>>> {
    if flat.len() != shape.len() {
        return Err(GridError::GridDimension(format!(
            "Availability rows do not match grid size. Expected {}, got {}.",
            shape.len(),
            flat.len()
        )));
    }
    Ok(flat
        .chunks(shape.num_slots)
        .map(|day| day.to_vec())
        .collect())
}
