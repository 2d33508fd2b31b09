use chrono::{NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbEvent {
    pub id: Uuid,
    pub actor_id: Uuid,
    pub title: String,
    pub grid_kind: String,
    pub duration: Option<i16>,
    pub time_zone: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbUrlCode {
    pub url_code: String,
    pub event_id: Uuid,
    pub last_used: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbDateTimeslot {
    pub id: Uuid,
    pub event_id: Uuid,
    pub slot: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbWeekdayTimeslot {
    pub id: Uuid,
    pub event_id: Uuid,
    pub weekday: i16,
    pub slot: NaiveTime,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbParticipant {
    pub id: Uuid,
    pub event_id: Uuid,
    pub actor_id: Uuid,
    pub display_name: String,
    pub time_zone: String,
}

/// A participant's own availability row joined with its date timeslot,
/// ordered by slot.
#[derive(Debug, Clone, FromRow)]
pub struct DbSelfDateAvailability {
    pub slot: NaiveDateTime,
    pub is_available: bool,
}

#[derive(Debug, Clone, FromRow)]
pub struct DbSelfWeekdayAvailability {
    pub weekday: i16,
    pub slot: NaiveTime,
    pub is_available: bool,
}

/// An availability row for the "view all" aggregation, joined with its
/// timeslot and participant display name.
#[derive(Debug, Clone, FromRow)]
pub struct DbEventDateAvailability {
    pub slot: NaiveDateTime,
    pub display_name: String,
    pub is_available: bool,
}

#[derive(Debug, Clone, FromRow)]
pub struct DbEventWeekdayAvailability {
    pub weekday: i16,
    pub slot: NaiveTime,
    pub display_name: String,
    pub is_available: bool,
}
