use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddAvailabilityRequest {
    pub event_code: String,
    pub display_name: String,
    pub time_zone: String,
    /// Outer = days, inner = timeslots within the day.
    pub availability: Vec<Vec<bool>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddAvailabilityResponse {
    /// Whether this submission created a new participant (as opposed to
    /// updating an existing one).
    pub created: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckDisplayNameRequest {
    pub event_code: String,
    pub display_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventCodeQuery {
    pub event_code: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelfAvailabilityResponse {
    pub availability: Vec<Vec<bool>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AllAvailabilityResponse {
    pub is_creator: bool,
    /// Display names of all participants, name-ascending.
    pub participants: Vec<String>,
    /// Outer = days, middle = timeslots, inner = names available at that
    /// slot.
    pub availability: Vec<Vec<Vec<String>>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoveParticipantRequest {
    pub event_code: String,
    pub display_name: String,
}
