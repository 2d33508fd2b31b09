//! Timeslot grid construction and shape derivation.
//!
//! An event's grid is the cartesian product of a day range (calendar dates
//! or weekdays) and a time range at 15-minute granularity. Slot ordering is
//! always day-major, then time-ascending; that ordering is the contract for
//! how flattened 2D availability submissions map onto timeslot rows.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike, Utc};
use chrono_tz::Tz;

use crate::errors::{GridError, GridResult};

/// Granularity of the grid. Every slot starts on a 15-minute boundary.
pub const SLOT_MINUTES: u32 = 15;

/// Dimensions of an event's timeslot grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridShape {
    /// Number of days (or weekdays) the grid spans, inclusive.
    pub num_days: usize,
    /// Number of timeslots within each day.
    pub num_slots: usize,
}

impl GridShape {
    /// Total number of timeslots in the grid.
    pub fn len(&self) -> usize {
        self.num_days * self.num_slots
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Returns the inclusive sequence of dates from `start` to `end`.
pub fn date_range(start: NaiveDate, end: NaiveDate) -> GridResult<Vec<NaiveDate>> {
    if end < start {
        return Err(GridError::Validation(
            "End date must not be before start date.".to_string(),
        ));
    }
    Ok(start.iter_days().take_while(|d| *d <= end).collect())
}

/// Returns the sequence of 15-minute slot start times from `start_hour:00`
/// up to but excluding `end_hour:00`. An `end_hour` of 24 runs through
/// `23:45`.
pub fn time_range(start_hour: u8, end_hour: u8) -> GridResult<Vec<NaiveTime>> {
    if start_hour > 24 || end_hour > 24 {
        return Err(GridError::Validation(
            "Hours must be between 0 and 24.".to_string(),
        ));
    }
    if start_hour >= end_hour {
        return Err(GridError::Validation(
            "Start hour must be before end hour.".to_string(),
        ));
    }

    let end_minutes = u32::from(end_hour) * 60;
    let mut times = Vec::new();
    let mut minutes = u32::from(start_hour) * 60;
    while minutes < end_minutes {
        let time = NaiveTime::from_hms_opt(minutes / 60, minutes % 60, 0)
            .ok_or_else(|| GridError::Validation(format!("Invalid time of day: {minutes} minutes")))?;
        times.push(time);
        minutes += SLOT_MINUTES;
    }
    Ok(times)
}

/// Builds the full timeslot sequence for a date event, day-major and
/// time-ascending.
pub fn date_slots(
    start_date: NaiveDate,
    end_date: NaiveDate,
    start_hour: u8,
    end_hour: u8,
) -> GridResult<Vec<NaiveDateTime>> {
    let dates = date_range(start_date, end_date)?;
    let times = time_range(start_hour, end_hour)?;

    let mut slots = Vec::with_capacity(dates.len() * times.len());
    for date in &dates {
        for time in &times {
            slots.push(date.and_time(*time));
        }
    }
    Ok(slots)
}

/// Builds the full timeslot sequence for a weekday event. Weekdays are
/// numbered 0 (Monday) through 6 (Sunday), `i16` to match their storage
/// representation.
pub fn weekday_slots(
    start_weekday: u8,
    end_weekday: u8,
    start_hour: u8,
    end_hour: u8,
) -> GridResult<Vec<(i16, NaiveTime)>> {
    if start_weekday > 6 || end_weekday > 6 {
        return Err(GridError::Validation(
            "Weekdays must be between 0 and 6.".to_string(),
        ));
    }
    if start_weekday > end_weekday {
        return Err(GridError::Validation(
            "Start weekday must not be after end weekday.".to_string(),
        ));
    }
    let times = time_range(start_hour, end_hour)?;

    let mut slots = Vec::new();
    for weekday in start_weekday..=end_weekday {
        for time in &times {
            slots.push((i16::from(weekday), *time));
        }
    }
    Ok(slots)
}

/// Derives the grid shape from a date event's timeslots, which must be
/// sorted ascending. Fails with `GridDimension` if the slots do not form a
/// perfect rectangle.
pub fn date_grid_shape(slots: &[NaiveDateTime]) -> GridResult<GridShape> {
    let (first, last) = match (slots.first(), slots.last()) {
        (Some(first), Some(last)) => (first, last),
        _ => {
            return Err(GridError::GridDimension(
                "Event has no timeslots.".to_string(),
            ))
        }
    };
    let num_days = (last.date() - first.date()).num_days() + 1;
    shape_from(slots.len(), num_days)
}

/// Derives the grid shape from a weekday event's timeslots, which must be
/// sorted by (weekday, time) ascending.
pub fn weekday_grid_shape(slots: &[(i16, NaiveTime)]) -> GridResult<GridShape> {
    let (first, last) = match (slots.first(), slots.last()) {
        (Some(first), Some(last)) => (first, last),
        _ => {
            return Err(GridError::GridDimension(
                "Event has no timeslots.".to_string(),
            ))
        }
    };
    let num_days = i64::from(last.0) - i64::from(first.0) + 1;
    shape_from(slots.len(), num_days)
}

fn shape_from(count: usize, num_days: i64) -> GridResult<GridShape> {
    if num_days <= 0 {
        return Err(GridError::GridDimension(
            "Event timeslots are not sorted.".to_string(),
        ));
    }
    let num_days = num_days as usize;
    if count % num_days != 0 {
        return Err(GridError::GridDimension(
            "Event timeslots are not evenly distributed across days.".to_string(),
        ));
    }
    Ok(GridShape {
        num_days,
        num_slots: count / num_days,
    })
}

/// Recovers the hour bounds of a grid from its first and last slot times.
/// The end hour is the boundary after the last slot, so a last slot of
/// `23:45` maps back to an end hour of 24.
pub fn hour_bounds(first: NaiveTime, last: NaiveTime) -> (u8, u8) {
    let end_minutes = last.hour() * 60 + last.minute() + SLOT_MINUTES;
    (first.hour() as u8, (end_minutes / 60) as u8)
}

/// Resolves an IANA time zone name, failing with a validation error for
/// unknown zones.
pub fn resolve_time_zone(name: &str) -> GridResult<Tz> {
    name.parse::<Tz>()
        .map_err(|_| GridError::Validation(format!("Invalid time zone: {name}")))
}

/// The current date in the given time zone.
pub fn today_in_zone(tz: &Tz) -> NaiveDate {
    Utc::now().with_timezone(tz).date_naive()
}
