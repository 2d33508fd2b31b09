//! # Availability Handlers
//!
//! Handlers for submitting and reading per-timeslot availability.
//!
//! ## Reconciliation
//!
//! A submission is a 2D boolean grid (outer = days, inner = timeslots
//! within the day). Inside one transaction the handler:
//!
//! 1. Resolves the event by its URL code
//! 2. Rejects display names held by a different actor in this event
//! 3. Derives the grid shape from the event's timeslots and validates the
//!    submission against it
//! 4. Upserts the participant keyed by (event, actor), overwriting display
//!    name and time zone
//! 5. Replaces the participant's availability rows wholesale: the grid is
//!    flattened day-major and zipped 1:1 against the ordered timeslots
//!
//! A failure at any step rolls back every prior write.
//!
//! ## Aggregation
//!
//! The "view all" read groups availability rows by timeslot across all
//! participants and partitions the groups into days, producing a 3D grid
//! of display names per slot. Reads run outside any transaction; snapshot
//! reads are enough.

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::{NaiveDateTime, NaiveTime};
use gridmeet_core::{
    aggregate::{self, SlotEntry},
    errors::GridError,
    grid,
    models::{
        availability::{
            AddAvailabilityRequest, AddAvailabilityResponse, AllAvailabilityResponse,
            CheckDisplayNameRequest, EventCodeQuery, RemoveParticipantRequest,
            SelfAvailabilityResponse,
        },
        event::{GridKind, MessageResponse},
    },
    reconcile,
};
use gridmeet_db::{
    models::DbEvent,
    repositories::{
        availability as availability_repo, event as event_repo,
        participant as participant_repo, timeslot as timeslot_repo,
    },
};
use tracing::debug;
use uuid::Uuid;

use crate::{
    middleware::{actor::Actor, error_handling::AppError},
    ApiState,
};

const MAX_DISPLAY_NAME_LENGTH: usize = 25;

fn validate_display_name(display_name: &str) -> Result<(), GridError> {
    if display_name.trim().is_empty() {
        return Err(GridError::Validation(
            "Display name must not be empty.".to_string(),
        ));
    }
    if display_name.chars().count() > MAX_DISPLAY_NAME_LENGTH {
        return Err(GridError::Validation(format!(
            "Display name must be {MAX_DISPLAY_NAME_LENGTH} characters or less."
        )));
    }
    Ok(())
}

fn grid_kind_of(event: &DbEvent) -> Result<GridKind, GridError> {
    GridKind::from_str(&event.grid_kind).ok_or_else(|| {
        GridError::GridDimension(format!("Unknown grid kind: {}", event.grid_kind))
    })
}

/// Adds availability for the current actor to an event. Supports both grid
/// kinds. If the actor already submitted for this event, their data is
/// overwritten in full.
#[axum::debug_handler]
pub async fn add_availability(
    State(state): State<Arc<ApiState>>,
    Actor(actor_id): Actor,
    Json(payload): Json<AddAvailabilityRequest>,
) -> Result<Json<AddAvailabilityResponse>, AppError> {
    validate_display_name(&payload.display_name)?;
    grid::resolve_time_zone(&payload.time_zone)?;

    let mut tx = state
        .db_pool
        .begin()
        .await
        .map_err(|e| GridError::Database(e.into()))?;

    let event = event_repo::find_event_by_code(&mut *tx, &payload.event_code)
        .await?
        .ok_or_else(|| GridError::NotFound("Event not found.".to_string()))?;
    let grid_kind = grid_kind_of(&event)?;

    // A name held by a different actor in this event is off limits; the
    // actor's own name may be kept or changed freely.
    if let Some(holder) =
        participant_repo::find_participant_by_name(&mut *tx, event.id, &payload.display_name)
            .await?
    {
        if holder.actor_id != actor_id {
            return Err(AppError(GridError::NameTaken));
        }
    }

    let created = match grid_kind {
        GridKind::SpecificDates => {
            let slot_rows = timeslot_repo::get_date_slots(&mut *tx, event.id).await?;
            let keys: Vec<NaiveDateTime> = slot_rows.iter().map(|row| row.slot).collect();
            let shape = grid::date_grid_shape(&keys)?;
            reconcile::validate_shape(&payload.availability, shape)?;

            let (participant, created) = participant_repo::upsert_participant(
                &mut tx,
                event.id,
                actor_id,
                &payload.display_name,
                &payload.time_zone,
            )
            .await?;

            availability_repo::delete_date_availability(&mut *tx, participant.id).await?;

            let flat = reconcile::flatten(&payload.availability);
            let rows: Vec<(Uuid, bool)> = slot_rows
                .iter()
                .zip(flat)
                .map(|(row, is_available)| (row.id, is_available))
                .collect();
            availability_repo::insert_date_availability(&mut *tx, participant.id, &rows)
                .await?;

            created
        }
        GridKind::GenericWeekdays => {
            let slot_rows = timeslot_repo::get_weekday_slots(&mut *tx, event.id).await?;
            let keys: Vec<(i16, NaiveTime)> =
                slot_rows.iter().map(|row| (row.weekday, row.slot)).collect();
            let shape = grid::weekday_grid_shape(&keys)?;
            reconcile::validate_shape(&payload.availability, shape)?;

            let (participant, created) = participant_repo::upsert_participant(
                &mut tx,
                event.id,
                actor_id,
                &payload.display_name,
                &payload.time_zone,
            )
            .await?;

            availability_repo::delete_weekday_availability(&mut *tx, participant.id).await?;

            let flat = reconcile::flatten(&payload.availability);
            let rows: Vec<(Uuid, bool)> = slot_rows
                .iter()
                .zip(flat)
                .map(|(row, is_available)| (row.id, is_available))
                .collect();
            availability_repo::insert_weekday_availability(&mut *tx, participant.id, &rows)
                .await?;

            created
        }
    };

    event_repo::touch_url_code(&mut *tx, &payload.event_code).await?;

    tx.commit()
        .await
        .map_err(|e| GridError::Database(e.into()))?;

    debug!(
        "Availability {} for event with code: {}",
        if created { "added" } else { "updated" },
        payload.event_code
    );
    Ok(Json(AddAvailabilityResponse { created }))
}

/// Checks if a display name is available for an event. A name already held
/// by the current actor counts as available. Calling this before
/// submitting avoids a rejected submission.
#[axum::debug_handler]
pub async fn check_display_name(
    State(state): State<Arc<ApiState>>,
    Actor(actor_id): Actor,
    Json(payload): Json<CheckDisplayNameRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    let event = event_repo::find_event_by_code(&state.db_pool, &payload.event_code)
        .await?
        .ok_or_else(|| GridError::NotFound("Event not found.".to_string()))?;

    let holder =
        participant_repo::find_participant_by_name(&state.db_pool, event.id, &payload.display_name)
            .await?;

    match holder {
        Some(participant) if participant.actor_id != actor_id => {
            Err(AppError(GridError::NameTaken))
        }
        _ => Ok(Json(MessageResponse {
            message: "Name is available.".to_string(),
        })),
    }
}

/// Gets the availability submitted by the current actor, as a 2D boolean
/// grid of the event's shape. Slots the participant has no row for read as
/// unavailable.
#[axum::debug_handler]
pub async fn get_self_availability(
    State(state): State<Arc<ApiState>>,
    Actor(actor_id): Actor,
    Query(query): Query<EventCodeQuery>,
) -> Result<Json<SelfAvailabilityResponse>, AppError> {
    let event = event_repo::find_event_by_code(&state.db_pool, &query.event_code)
        .await?
        .ok_or_else(|| GridError::NotFound("Event not found.".to_string()))?;
    let grid_kind = grid_kind_of(&event)?;

    let participant = participant_repo::find_participant(&state.db_pool, event.id, actor_id)
        .await?
        .ok_or_else(|| {
            GridError::NotFound("User has not participated in this event.".to_string())
        })?;

    let availability = match grid_kind {
        GridKind::SpecificDates => {
            let keys: Vec<NaiveDateTime> =
                timeslot_repo::get_date_slots(&state.db_pool, event.id)
                    .await?
                    .into_iter()
                    .map(|row| row.slot)
                    .collect();
            let shape = grid::date_grid_shape(&keys)?;

            let by_slot: HashMap<NaiveDateTime, bool> =
                availability_repo::get_self_date_availability(&state.db_pool, participant.id)
                    .await?
                    .into_iter()
                    .map(|row| (row.slot, row.is_available))
                    .collect();

            let flat: Vec<bool> = keys
                .iter()
                .map(|key| by_slot.get(key).copied().unwrap_or(false))
                .collect();
            reconcile::unflatten(&flat, shape)?
        }
        GridKind::GenericWeekdays => {
            let keys: Vec<(i16, NaiveTime)> =
                timeslot_repo::get_weekday_slots(&state.db_pool, event.id)
                    .await?
                    .into_iter()
                    .map(|row| (row.weekday, row.slot))
                    .collect();
            let shape = grid::weekday_grid_shape(&keys)?;

            let by_slot: HashMap<(i16, NaiveTime), bool> =
                availability_repo::get_self_weekday_availability(&state.db_pool, participant.id)
                    .await?
                    .into_iter()
                    .map(|row| ((row.weekday, row.slot), row.is_available))
                    .collect();

            let flat: Vec<bool> = keys
                .iter()
                .map(|key| by_slot.get(key).copied().unwrap_or(false))
                .collect();
            reconcile::unflatten(&flat, shape)?
        }
    };

    Ok(Json(SelfAvailabilityResponse { availability }))
}

/// Gets the availability submitted by all event participants.
///
/// The response is a 3D grid: outer = days, middle = timeslots, inner =
/// display names of the participants available at that slot. An event with
/// no participants still yields a grid of the correct shape with every
/// innermost list empty.
#[axum::debug_handler]
pub async fn get_all_availability(
    State(state): State<Arc<ApiState>>,
    Actor(actor_id): Actor,
    Query(query): Query<EventCodeQuery>,
) -> Result<Json<AllAvailabilityResponse>, AppError> {
    let event = event_repo::find_event_by_code(&state.db_pool, &query.event_code)
        .await?
        .ok_or_else(|| GridError::NotFound("Event not found.".to_string()))?;
    let grid_kind = grid_kind_of(&event)?;
    let is_creator = event.actor_id == actor_id;

    let participants = participant_repo::get_participants(&state.db_pool, event.id).await?;
    let names: Vec<String> = participants
        .iter()
        .map(|p| p.display_name.clone())
        .collect();

    let availability = match grid_kind {
        GridKind::SpecificDates => {
            if participants.is_empty() {
                let keys: Vec<NaiveDateTime> =
                    timeslot_repo::get_date_slots(&state.db_pool, event.id)
                        .await?
                        .into_iter()
                        .map(|row| row.slot)
                        .collect();
                aggregate::empty_grid(grid::date_grid_shape(&keys)?)
            } else {
                let entries: Vec<SlotEntry<NaiveDateTime>> =
                    availability_repo::get_event_date_availability(&state.db_pool, event.id)
                        .await?
                        .into_iter()
                        .map(|row| SlotEntry {
                            slot: row.slot,
                            display_name: row.display_name,
                            is_available: row.is_available,
                        })
                        .collect();
                aggregate::group_availability(&entries, |slot| slot.date())
            }
        }
        GridKind::GenericWeekdays => {
            if participants.is_empty() {
                let keys: Vec<(i16, NaiveTime)> =
                    timeslot_repo::get_weekday_slots(&state.db_pool, event.id)
                        .await?
                        .into_iter()
                        .map(|row| (row.weekday, row.slot))
                        .collect();
                aggregate::empty_grid(grid::weekday_grid_shape(&keys)?)
            } else {
                let entries: Vec<SlotEntry<(i16, NaiveTime)>> =
                    availability_repo::get_event_weekday_availability(&state.db_pool, event.id)
                        .await?
                        .into_iter()
                        .map(|row| SlotEntry {
                            slot: (row.weekday, row.slot),
                            display_name: row.display_name,
                            is_available: row.is_available,
                        })
                        .collect();
                aggregate::group_availability(&entries, |slot| slot.0)
            }
        }
    };

    Ok(Json(AllAvailabilityResponse {
        is_creator,
        participants: names,
        availability,
    }))
}

/// Removes the current actor's availability for an event. The participant
/// row is deleted and its availability rows cascade with it.
#[axum::debug_handler]
pub async fn remove_self_availability(
    State(state): State<Arc<ApiState>>,
    Actor(actor_id): Actor,
    Json(payload): Json<EventCodeQuery>,
) -> Result<Json<MessageResponse>, AppError> {
    let event = event_repo::find_event_by_code(&state.db_pool, &payload.event_code)
        .await?
        .ok_or_else(|| GridError::NotFound("Event not found.".to_string()))?;

    let participant = participant_repo::find_participant(&state.db_pool, event.id, actor_id)
        .await?
        .ok_or_else(|| {
            GridError::NotFound("User has not participated in this event.".to_string())
        })?;

    participant_repo::delete_participant(&state.db_pool, participant.id).await?;

    Ok(Json(MessageResponse {
        message: "Availability removed successfully.".to_string(),
    }))
}

/// Removes the specified participant's availability for an event,
/// identified by display name. Only the event creator may do this.
#[axum::debug_handler]
pub async fn remove_participant(
    State(state): State<Arc<ApiState>>,
    Actor(actor_id): Actor,
    Json(payload): Json<RemoveParticipantRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    let event = event_repo::find_event_by_code(&state.db_pool, &payload.event_code)
        .await?
        .ok_or_else(|| GridError::NotFound("Event not found.".to_string()))?;

    if event.actor_id != actor_id {
        return Err(AppError(GridError::Authorization(
            "User must be event creator.".to_string(),
        )));
    }

    let participant =
        participant_repo::find_participant_by_name(&state.db_pool, event.id, &payload.display_name)
            .await?
            .ok_or_else(|| GridError::NotFound("Event participant not found.".to_string()))?;

    participant_repo::delete_participant(&state.db_pool, participant.id).await?;

    Ok(Json(MessageResponse {
        message: "Availability removed successfully.".to_string(),
    }))
}
