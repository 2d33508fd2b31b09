//! # Event Handlers
//!
//! Handlers for creating and editing event grids.
//!
//! Creation builds the full timeslot rectangle from the requested bounds
//! and writes the event, its URL code and its timeslots in one
//! transaction, so an event never partially exists.
//!
//! Editing diffs the existing timeslot identity set against the set the
//! new bounds produce: removed slots are deleted (availability rows cascade
//! with them), added slots are inserted and then backfilled with
//! `is_available = false` rows for every existing participant, so
//! participants must explicitly opt in to new slots by resubmitting.

use std::collections::BTreeSet;
use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::{NaiveDateTime, NaiveTime};
use gridmeet_core::{
    edit, errors::GridError, grid,
    models::{
        availability::EventCodeQuery,
        event::{
            CreateDateEventRequest, CreateEventResponse, CreateWeekEventRequest,
            EditDateEventRequest, EditWeekEventRequest, GetEventResponse, GridKind,
            MessageResponse,
        },
    },
};
use gridmeet_db::repositories::{
    event as event_repo, participant as participant_repo, timeslot as timeslot_repo,
};
use tracing::debug;

use crate::{
    codes,
    middleware::{actor::Actor, error_handling::AppError},
    ApiState,
};

const MAX_TITLE_LENGTH: usize = 50;
const ALLOWED_DURATIONS: [i16; 4] = [15, 30, 45, 60];

fn validate_title(title: &str) -> Result<(), GridError> {
    if title.trim().is_empty() {
        return Err(GridError::Validation("Title must not be empty.".to_string()));
    }
    if title.chars().count() > MAX_TITLE_LENGTH {
        return Err(GridError::Validation(format!(
            "Title must be {MAX_TITLE_LENGTH} characters or less."
        )));
    }
    Ok(())
}

fn validate_duration(duration: Option<i16>) -> Result<(), GridError> {
    match duration {
        Some(d) if !ALLOWED_DURATIONS.contains(&d) => Err(GridError::Validation(
            "Duration must be one of 15, 30, 45 or 60 minutes.".to_string(),
        )),
        _ => Ok(()),
    }
}

#[axum::debug_handler]
pub async fn create_date_event(
    State(state): State<Arc<ApiState>>,
    Actor(actor_id): Actor,
    Json(payload): Json<CreateDateEventRequest>,
) -> Result<Json<CreateEventResponse>, AppError> {
    validate_title(&payload.title)?;
    validate_duration(payload.duration)?;
    let tz = grid::resolve_time_zone(&payload.time_zone)?;

    let today = grid::today_in_zone(&tz);
    if payload.start_date < today {
        return Err(AppError(GridError::Validation(
            "Start date cannot be in the past.".to_string(),
        )));
    }

    // Reject oversized spans before materializing any slots
    let span_days = (payload.end_date - payload.start_date).num_days() + 1;
    if span_days > state.config.max_event_days as i64 {
        return Err(AppError(GridError::Validation(format!(
            "Events must not span more than {} days.",
            state.config.max_event_days
        ))));
    }

    // Validates date ordering and hour bounds as a side effect
    let slots = grid::date_slots(
        payload.start_date,
        payload.end_date,
        payload.start_hour,
        payload.end_hour,
    )?;

    let mut tx = state
        .db_pool
        .begin()
        .await
        .map_err(|e| GridError::Database(e.into()))?;

    let event = event_repo::create_event(
        &mut *tx,
        actor_id,
        &payload.title,
        GridKind::SpecificDates.as_str(),
        payload.duration,
        &payload.time_zone,
    )
    .await?;

    let event_code = codes::claim_code(
        &mut tx,
        event.id,
        payload.custom_code.as_deref(),
        state.config.url_code_exp_seconds,
    )
    .await?;

    timeslot_repo::insert_date_slots(&mut *tx, event.id, &slots).await?;

    tx.commit()
        .await
        .map_err(|e| GridError::Database(e.into()))?;

    debug!("Date event created with code: {}", event_code);
    Ok(Json(CreateEventResponse { event_code }))
}

#[axum::debug_handler]
pub async fn create_week_event(
    State(state): State<Arc<ApiState>>,
    Actor(actor_id): Actor,
    Json(payload): Json<CreateWeekEventRequest>,
) -> Result<Json<CreateEventResponse>, AppError> {
    validate_title(&payload.title)?;
    validate_duration(payload.duration)?;
    grid::resolve_time_zone(&payload.time_zone)?;

    // Validates weekday ordering and hour bounds as a side effect
    let slots = grid::weekday_slots(
        payload.start_weekday,
        payload.end_weekday,
        payload.start_hour,
        payload.end_hour,
    )?;

    let mut tx = state
        .db_pool
        .begin()
        .await
        .map_err(|e| GridError::Database(e.into()))?;

    let event = event_repo::create_event(
        &mut *tx,
        actor_id,
        &payload.title,
        GridKind::GenericWeekdays.as_str(),
        payload.duration,
        &payload.time_zone,
    )
    .await?;

    let event_code = codes::claim_code(
        &mut tx,
        event.id,
        payload.custom_code.as_deref(),
        state.config.url_code_exp_seconds,
    )
    .await?;

    timeslot_repo::insert_weekday_slots(&mut *tx, event.id, &slots).await?;

    tx.commit()
        .await
        .map_err(|e| GridError::Database(e.into()))?;

    debug!("Week event created with code: {}", event_code);
    Ok(Json(CreateEventResponse { event_code }))
}

#[axum::debug_handler]
pub async fn edit_date_event(
    State(state): State<Arc<ApiState>>,
    Actor(actor_id): Actor,
    Json(payload): Json<EditDateEventRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    validate_title(&payload.title)?;
    validate_duration(payload.duration)?;
    let tz = grid::resolve_time_zone(&payload.time_zone)?;

    // Reject oversized spans before materializing any slots
    let span_days = (payload.end_date - payload.start_date).num_days() + 1;
    if span_days > state.config.max_event_days as i64 {
        return Err(AppError(GridError::Validation(format!(
            "Events must not span more than {} days.",
            state.config.max_event_days
        ))));
    }

    let requested = grid::date_slots(
        payload.start_date,
        payload.end_date,
        payload.start_hour,
        payload.end_hour,
    )?;

    let mut tx = state
        .db_pool
        .begin()
        .await
        .map_err(|e| GridError::Database(e.into()))?;

    let event = event_repo::find_event_by_code(&mut *tx, &payload.event_code)
        .await?
        .ok_or_else(|| GridError::NotFound("Event not found.".to_string()))?;

    if event.actor_id != actor_id {
        return Err(AppError(GridError::Authorization(
            "User must be event creator.".to_string(),
        )));
    }
    if GridKind::from_str(&event.grid_kind) != Some(GridKind::SpecificDates) {
        return Err(AppError(GridError::Validation(
            "Event does not use a date grid.".to_string(),
        )));
    }

    let existing_rows = timeslot_repo::get_date_slots(&mut *tx, event.id).await?;

    // The lateness rule compares against the grid's current first day
    if let Some(first) = existing_rows.first() {
        edit::validate_start_date_edit(
            first.slot.date(),
            payload.start_date,
            grid::today_in_zone(&tz),
        )?;
    }

    event_repo::update_event(
        &mut *tx,
        event.id,
        &payload.title,
        payload.duration,
        &payload.time_zone,
    )
    .await?;

    let existing: BTreeSet<NaiveDateTime> = existing_rows.iter().map(|row| row.slot).collect();
    let requested: BTreeSet<NaiveDateTime> = requested.into_iter().collect();
    let diff = edit::diff_slots(&existing, &requested);

    timeslot_repo::delete_date_slots(&mut *tx, event.id, &diff.to_delete).await?;
    timeslot_repo::insert_date_slots(&mut *tx, event.id, &diff.to_add).await?;

    // New slots default to unavailable for pre-existing participants
    if !diff.to_add.is_empty() {
        let participants = participant_repo::get_participants(&mut *tx, event.id).await?;
        if !participants.is_empty() {
            let added: BTreeSet<NaiveDateTime> = diff.to_add.iter().copied().collect();
            let added_ids: Vec<(uuid::Uuid, bool)> =
                timeslot_repo::get_date_slots(&mut *tx, event.id)
                    .await?
                    .into_iter()
                    .filter(|row| added.contains(&row.slot))
                    .map(|row| (row.id, false))
                    .collect();

            for participant in &participants {
                gridmeet_db::repositories::availability::insert_date_availability(
                    &mut *tx,
                    participant.id,
                    &added_ids,
                )
                .await?;
            }
        }
    }

    event_repo::touch_url_code(&mut *tx, &payload.event_code).await?;

    tx.commit()
        .await
        .map_err(|e| GridError::Database(e.into()))?;

    debug!("Date event edited with code: {}", payload.event_code);
    Ok(Json(MessageResponse {
        message: "Event updated successfully.".to_string(),
    }))
}

#[axum::debug_handler]
pub async fn edit_week_event(
    State(state): State<Arc<ApiState>>,
    Actor(actor_id): Actor,
    Json(payload): Json<EditWeekEventRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    validate_title(&payload.title)?;
    validate_duration(payload.duration)?;
    grid::resolve_time_zone(&payload.time_zone)?;

    let requested = grid::weekday_slots(
        payload.start_weekday,
        payload.end_weekday,
        payload.start_hour,
        payload.end_hour,
    )?;

    let mut tx = state
        .db_pool
        .begin()
        .await
        .map_err(|e| GridError::Database(e.into()))?;

    let event = event_repo::find_event_by_code(&mut *tx, &payload.event_code)
        .await?
        .ok_or_else(|| GridError::NotFound("Event not found.".to_string()))?;

    if event.actor_id != actor_id {
        return Err(AppError(GridError::Authorization(
            "User must be event creator.".to_string(),
        )));
    }
    if GridKind::from_str(&event.grid_kind) != Some(GridKind::GenericWeekdays) {
        return Err(AppError(GridError::Validation(
            "Event does not use a weekday grid.".to_string(),
        )));
    }

    let existing_rows = timeslot_repo::get_weekday_slots(&mut *tx, event.id).await?;

    event_repo::update_event(
        &mut *tx,
        event.id,
        &payload.title,
        payload.duration,
        &payload.time_zone,
    )
    .await?;

    let existing: BTreeSet<(i16, NaiveTime)> = existing_rows
        .iter()
        .map(|row| (row.weekday, row.slot))
        .collect();
    let requested: BTreeSet<(i16, NaiveTime)> = requested.into_iter().collect();
    let diff = edit::diff_slots(&existing, &requested);

    timeslot_repo::delete_weekday_slots(&mut *tx, event.id, &diff.to_delete).await?;
    timeslot_repo::insert_weekday_slots(&mut *tx, event.id, &diff.to_add).await?;

    // New slots default to unavailable for pre-existing participants
    if !diff.to_add.is_empty() {
        let participants = participant_repo::get_participants(&mut *tx, event.id).await?;
        if !participants.is_empty() {
            let added: BTreeSet<(i16, NaiveTime)> = diff.to_add.iter().copied().collect();
            let added_ids: Vec<(uuid::Uuid, bool)> =
                timeslot_repo::get_weekday_slots(&mut *tx, event.id)
                    .await?
                    .into_iter()
                    .filter(|row| added.contains(&(row.weekday, row.slot)))
                    .map(|row| (row.id, false))
                    .collect();

            for participant in &participants {
                gridmeet_db::repositories::availability::insert_weekday_availability(
                    &mut *tx,
                    participant.id,
                    &added_ids,
                )
                .await?;
            }
        }
    }

    event_repo::touch_url_code(&mut *tx, &payload.event_code).await?;

    tx.commit()
        .await
        .map_err(|e| GridError::Database(e.into()))?;

    debug!("Week event edited with code: {}", payload.event_code);
    Ok(Json(MessageResponse {
        message: "Event updated successfully.".to_string(),
    }))
}

/// Event detail, including the grid bounds recovered from the stored
/// timeslots so any participant can reconstruct the grid shape for a
/// submission.
#[axum::debug_handler]
pub async fn get_event(
    State(state): State<Arc<ApiState>>,
    Actor(actor_id): Actor,
    Query(query): Query<EventCodeQuery>,
) -> Result<Json<GetEventResponse>, AppError> {
    let event = event_repo::find_event_by_code(&state.db_pool, &query.event_code)
        .await?
        .ok_or_else(|| GridError::NotFound("Event not found.".to_string()))?;

    let grid_kind = GridKind::from_str(&event.grid_kind).ok_or_else(|| {
        GridError::GridDimension(format!("Unknown grid kind: {}", event.grid_kind))
    })?;

    let mut response = GetEventResponse {
        title: event.title,
        grid_kind,
        duration: event.duration,
        start_date: None,
        end_date: None,
        start_weekday: None,
        end_weekday: None,
        start_hour: 0,
        end_hour: 0,
        time_zone: event.time_zone,
        participants: Vec::new(),
        event_code: query.event_code,
        is_creator: event.actor_id == actor_id,
    };

    match grid_kind {
        GridKind::SpecificDates => {
            let slot_rows = timeslot_repo::get_date_slots(&state.db_pool, event.id).await?;
            let (first, last) = match (slot_rows.first(), slot_rows.last()) {
                (Some(first), Some(last)) => (first, last),
                _ => {
                    return Err(AppError(GridError::GridDimension(
                        "Event has no timeslots.".to_string(),
                    )))
                }
            };
            response.start_date = Some(first.slot.date());
            response.end_date = Some(last.slot.date());
            let (start_hour, end_hour) = grid::hour_bounds(first.slot.time(), last.slot.time());
            response.start_hour = start_hour;
            response.end_hour = end_hour;
        }
        GridKind::GenericWeekdays => {
            let slot_rows = timeslot_repo::get_weekday_slots(&state.db_pool, event.id).await?;
            let (first, last) = match (slot_rows.first(), slot_rows.last()) {
                (Some(first), Some(last)) => (first, last),
                _ => {
                    return Err(AppError(GridError::GridDimension(
                        "Event has no timeslots.".to_string(),
                    )))
                }
            };
            response.start_weekday = Some(first.weekday);
            response.end_weekday = Some(last.weekday);
            let (start_hour, end_hour) = grid::hour_bounds(first.slot, last.slot);
            response.start_hour = start_hour;
            response.end_hour = end_hour;
        }
    }

    let participants = participant_repo::get_participants(&state.db_pool, event.id).await?;
    response.participants = participants.into_iter().map(|p| p.display_name).collect();

    Ok(Json(response))
}
