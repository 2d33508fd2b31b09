use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Whether an event's timeslots are anchored to specific calendar dates or
/// to a generic weekday pattern. Immutable after creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GridKind {
    #[serde(rename = "SPECIFIC_DATES")]
    SpecificDates,
    #[serde(rename = "GENERIC_WEEKDAYS")]
    GenericWeekdays,
}

impl GridKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            GridKind::SpecificDates => "SPECIFIC_DATES",
            GridKind::GenericWeekdays => "GENERIC_WEEKDAYS",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value {
            "SPECIFIC_DATES" => Some(GridKind::SpecificDates),
            "GENERIC_WEEKDAYS" => Some(GridKind::GenericWeekdays),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateDateEventRequest {
    pub title: String,
    pub duration: Option<i16>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub start_hour: u8,
    pub end_hour: u8,
    pub time_zone: String,
    pub custom_code: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateWeekEventRequest {
    pub title: String,
    pub duration: Option<i16>,
    pub start_weekday: u8,
    pub end_weekday: u8,
    pub start_hour: u8,
    pub end_hour: u8,
    pub time_zone: String,
    pub custom_code: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateEventResponse {
    pub event_code: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EditDateEventRequest {
    pub event_code: String,
    pub title: String,
    pub duration: Option<i16>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub start_hour: u8,
    pub end_hour: u8,
    pub time_zone: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EditWeekEventRequest {
    pub event_code: String,
    pub title: String,
    pub duration: Option<i16>,
    pub start_weekday: u8,
    pub end_weekday: u8,
    pub start_hour: u8,
    pub end_hour: u8,
    pub time_zone: String,
}

/// Event detail. Bounds are derived from the stored timeslots: the date
/// pair is set for date grids, the weekday pair for weekday grids.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetEventResponse {
    pub title: String,
    pub grid_kind: GridKind,
    pub duration: Option<i16>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub start_weekday: Option<i16>,
    pub end_weekday: Option<i16>,
    pub start_hour: u8,
    pub end_hour: u8,
    pub time_zone: String,
    pub participants: Vec<String>,
    pub event_code: String,
    pub is_creator: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}
