use chrono::{NaiveDateTime, NaiveTime};
use gridmeet_api::middleware::error_handling::AppError;
use gridmeet_core::{
    aggregate::{self, SlotEntry},
    errors::GridError,
    grid,
    models::availability::{AddAvailabilityResponse, AllAvailabilityResponse},
    reconcile,
};
use gridmeet_db::models::{DbDateTimeslot, DbWeekdayTimeslot};
use mockall::predicate;
use pretty_assertions::assert_eq;
use uuid::Uuid;

use crate::test_utils::{self, TestContext};

fn weekday_slot_rows(event_id: Uuid) -> Vec<DbWeekdayTimeslot> {
    grid::weekday_slots(0, 1, 9, 10)
        .unwrap()
        .into_iter()
        .map(|(weekday, slot)| DbWeekdayTimeslot {
            id: Uuid::new_v4(),
            event_id,
            weekday,
            slot,
        })
        .collect()
}

fn date_slot_rows(event_id: Uuid) -> Vec<DbDateTimeslot> {
    let start = chrono::NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
    let end = chrono::NaiveDate::from_ymd_opt(2024, 6, 2).unwrap();
    grid::date_slots(start, end, 9, 10)
        .unwrap()
        .into_iter()
        .map(|slot| DbDateTimeslot {
            id: Uuid::new_v4(),
            event_id,
            slot,
        })
        .collect()
}

/// Drives the weekday submission flow against the mocks, step for step as
/// the handler does inside its transaction.
async fn submit_weekday_availability(
    ctx: &TestContext,
    actor_id: Uuid,
    event_code: &'static str,
    display_name: &'static str,
    availability: Vec<Vec<bool>>,
) -> Result<AddAvailabilityResponse, AppError> {
    let event = ctx
        .event_repo
        .find_event_by_code(event_code)
        .await?
        .ok_or_else(|| GridError::NotFound("Event not found.".to_string()))?;

    if let Some(holder) = ctx
        .participant_repo
        .find_participant_by_name(event.id, display_name)
        .await?
    {
        if holder.actor_id != actor_id {
            return Err(AppError(GridError::NameTaken));
        }
    }

    let slot_rows = ctx.timeslot_repo.get_weekday_slots(event.id).await?;
    let keys: Vec<(i16, NaiveTime)> = slot_rows
        .iter()
        .map(|row| (row.weekday, row.slot))
        .collect();
    let shape = grid::weekday_grid_shape(&keys)?;
    reconcile::validate_shape(&availability, shape)?;

    let (participant, created) = ctx
        .participant_repo
        .upsert_participant(event.id, actor_id, display_name, "UTC")
        .await?;

    ctx.availability_repo
        .delete_weekday_availability(participant.id)
        .await?;

    let flat = reconcile::flatten(&availability);
    let rows: Vec<(Uuid, bool)> = slot_rows
        .iter()
        .zip(flat)
        .map(|(row, is_available)| (row.id, is_available))
        .collect();
    ctx.availability_repo
        .insert_weekday_availability(participant.id, rows)
        .await?;

    Ok(AddAvailabilityResponse { created })
}

/// Drives the "view all" read path against the mocks for a weekday event.
async fn all_weekday_availability(
    ctx: &TestContext,
    actor_id: Uuid,
    event_code: &'static str,
) -> Result<AllAvailabilityResponse, AppError> {
    let event = ctx
        .event_repo
        .find_event_by_code(event_code)
        .await?
        .ok_or_else(|| GridError::NotFound("Event not found.".to_string()))?;
    let is_creator = event.actor_id == actor_id;

    let participants = ctx.participant_repo.get_participants(event.id).await?;
    let names: Vec<String> = participants
        .iter()
        .map(|p| p.display_name.clone())
        .collect();

    let availability = if participants.is_empty() {
        let keys: Vec<(i16, NaiveTime)> = ctx
            .timeslot_repo
            .get_weekday_slots(event.id)
            .await?
            .into_iter()
            .map(|row| (row.weekday, row.slot))
            .collect();
        aggregate::empty_grid(grid::weekday_grid_shape(&keys)?)
    } else {
        let entries: Vec<SlotEntry<(i16, NaiveTime)>> = ctx
            .availability_repo
            .get_event_weekday_availability(event.id)
            .await?
            .into_iter()
            .map(|row| SlotEntry {
                slot: (row.weekday, row.slot),
                display_name: row.display_name,
                is_available: row.is_available,
            })
            .collect();
        aggregate::group_availability(&entries, |slot| slot.0)
    };

    Ok(AllAvailabilityResponse {
        is_creator,
        participants: names,
        availability,
    })
}

#[tokio::test]
async fn test_submit_availability_creates_participant() {
    let mut ctx = TestContext::new();
    let actor_id = Uuid::new_v4();
    let event = test_utils::weekday_event(Uuid::new_v4());
    let event_id = event.id;
    let slot_rows = weekday_slot_rows(event_id);
    let slot_ids: Vec<Uuid> = slot_rows.iter().map(|row| row.id).collect();
    let alice = test_utils::participant(event_id, actor_id, "Alice");
    let participant_id = alice.id;

    ctx.event_repo
        .expect_find_event_by_code()
        .with(predicate::eq("monday-sync"))
        .times(1)
        .returning(move |_| Ok(Some(event.clone())));
    ctx.participant_repo
        .expect_find_participant_by_name()
        .with(predicate::eq(event_id), predicate::eq("Alice"))
        .times(1)
        .returning(|_, _| Ok(None));
    ctx.timeslot_repo
        .expect_get_weekday_slots()
        .with(predicate::eq(event_id))
        .times(1)
        .returning(move |_| Ok(slot_rows.clone()));
    ctx.participant_repo
        .expect_upsert_participant()
        .times(1)
        .returning(move |_, _, _, _| Ok((alice.clone(), true)));
    ctx.availability_repo
        .expect_delete_weekday_availability()
        .with(predicate::eq(participant_id))
        .times(1)
        .returning(|_| Ok(()));
    ctx.availability_repo
        .expect_insert_weekday_availability()
        .withf(move |id, rows| {
            let expected_flags = [true, false, false, true, false, false, true, false];
            *id == participant_id
                && rows.len() == 8
                && rows
                    .iter()
                    .zip(slot_ids.iter().zip(expected_flags))
                    .all(|((row_id, flag), (slot_id, expected))| {
                        row_id == slot_id && *flag == expected
                    })
        })
        .times(1)
        .returning(|_, _| Ok(()));

    let availability = vec![
        vec![true, false, false, true],
        vec![false, false, true, false],
    ];
    let response = submit_weekday_availability(&ctx, actor_id, "monday-sync", "Alice", availability)
        .await
        .unwrap();

    assert!(response.created);
}

#[tokio::test]
async fn test_submit_availability_overwrites_previous_submission() {
    let mut ctx = TestContext::new();
    let actor_id = Uuid::new_v4();
    let event = test_utils::weekday_event(Uuid::new_v4());
    let event_id = event.id;
    let slot_rows = weekday_slot_rows(event_id);
    let alice = test_utils::participant(event_id, actor_id, "Alice");
    let alice_for_lookup = alice.clone();
    let participant_id = alice.id;

    ctx.event_repo
        .expect_find_event_by_code()
        .times(1)
        .returning(move |_| Ok(Some(event.clone())));
    // The actor already holds this name; resubmitting is allowed
    ctx.participant_repo
        .expect_find_participant_by_name()
        .times(1)
        .returning(move |_, _| Ok(Some(alice_for_lookup.clone())));
    ctx.timeslot_repo
        .expect_get_weekday_slots()
        .times(1)
        .returning(move |_| Ok(slot_rows.clone()));
    ctx.participant_repo
        .expect_upsert_participant()
        .times(1)
        .returning(move |_, _, _, _| Ok((alice.clone(), false)));
    ctx.availability_repo
        .expect_delete_weekday_availability()
        .with(predicate::eq(participant_id))
        .times(1)
        .returning(|_| Ok(()));
    ctx.availability_repo
        .expect_insert_weekday_availability()
        .times(1)
        .returning(|_, _| Ok(()));

    let availability = vec![vec![false; 4], vec![true; 4]];
    let response = submit_weekday_availability(&ctx, actor_id, "monday-sync", "Alice", availability)
        .await
        .unwrap();

    assert!(!response.created);
}

#[tokio::test]
async fn test_submit_availability_rejects_taken_name() {
    let mut ctx = TestContext::new();
    let actor_id = Uuid::new_v4();
    let event = test_utils::weekday_event(Uuid::new_v4());
    let event_id = event.id;
    let holder = test_utils::participant(event_id, Uuid::new_v4(), "Alice");

    ctx.event_repo
        .expect_find_event_by_code()
        .times(1)
        .returning(move |_| Ok(Some(event.clone())));
    ctx.participant_repo
        .expect_find_participant_by_name()
        .times(1)
        .returning(move |_, _| Ok(Some(holder.clone())));

    let availability = vec![vec![true; 4], vec![true; 4]];
    let err = submit_weekday_availability(&ctx, actor_id, "monday-sync", "Alice", availability)
        .await
        .unwrap_err();

    assert!(matches!(err.0, GridError::NameTaken));
}

#[tokio::test]
async fn test_submit_availability_rejects_shape_mismatch() {
    let mut ctx = TestContext::new();
    let actor_id = Uuid::new_v4();
    let event = test_utils::weekday_event(Uuid::new_v4());
    let event_id = event.id;
    let slot_rows = weekday_slot_rows(event_id);

    ctx.event_repo
        .expect_find_event_by_code()
        .times(1)
        .returning(move |_| Ok(Some(event.clone())));
    ctx.participant_repo
        .expect_find_participant_by_name()
        .times(1)
        .returning(|_, _| Ok(None));
    ctx.timeslot_repo
        .expect_get_weekday_slots()
        .times(1)
        .returning(move |_| Ok(slot_rows.clone()));

    // One day instead of two; the upsert must never be reached
    let availability = vec![vec![true, false, false, true]];
    let err = submit_weekday_availability(&ctx, actor_id, "monday-sync", "Alice", availability)
        .await
        .unwrap_err();

    match err.0 {
        GridError::Validation(message) => {
            assert_eq!(message, "Invalid availability days. Expected 2, got 1.");
        }
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_submit_availability_unknown_event() {
    let mut ctx = TestContext::new();
    let actor_id = Uuid::new_v4();

    ctx.event_repo
        .expect_find_event_by_code()
        .with(predicate::eq("no-such-event"))
        .times(1)
        .returning(|_| Ok(None));

    let err = submit_weekday_availability(&ctx, actor_id, "no-such-event", "Alice", vec![])
        .await
        .unwrap_err();

    assert!(matches!(err.0, GridError::NotFound(_)));
}

#[tokio::test]
async fn test_all_availability_no_participants_yields_empty_grid() {
    let mut ctx = TestContext::new();
    let creator_id = Uuid::new_v4();
    let event = test_utils::weekday_event(creator_id);
    let event_id = event.id;
    let slot_rows = weekday_slot_rows(event_id);

    ctx.event_repo
        .expect_find_event_by_code()
        .times(1)
        .returning(move |_| Ok(Some(event.clone())));
    ctx.participant_repo
        .expect_get_participants()
        .with(predicate::eq(event_id))
        .times(1)
        .returning(|_| Ok(Vec::new()));
    ctx.timeslot_repo
        .expect_get_weekday_slots()
        .times(1)
        .returning(move |_| Ok(slot_rows.clone()));

    let response = all_weekday_availability(&ctx, creator_id, "monday-sync")
        .await
        .unwrap();

    assert!(response.is_creator);
    assert!(response.participants.is_empty());
    let empty_day: Vec<Vec<String>> = vec![Vec::new(); 4];
    assert_eq!(
        response.availability,
        vec![empty_day.clone(), empty_day]
    );
}

#[tokio::test]
async fn test_all_availability_groups_names_per_slot() {
    let mut ctx = TestContext::new();
    let creator_id = Uuid::new_v4();
    let event = test_utils::weekday_event(creator_id);
    let event_id = event.id;
    let alice = test_utils::participant(event_id, Uuid::new_v4(), "Alice");
    let bob = test_utils::participant(event_id, Uuid::new_v4(), "Bob");

    // Rows as the query returns them: ordered by slot, then display name
    let keys = grid::weekday_slots(0, 1, 9, 10).unwrap();
    let alice_flags = [true, false, false, true, false, false, true, false];
    let bob_flags = [false, false, false, false, true, true, true, true];
    let mut rows = Vec::new();
    for (i, (weekday, slot)) in keys.iter().enumerate() {
        rows.push(gridmeet_db::models::DbEventWeekdayAvailability {
            weekday: *weekday,
            slot: *slot,
            display_name: "Alice".to_string(),
            is_available: alice_flags[i],
        });
        rows.push(gridmeet_db::models::DbEventWeekdayAvailability {
            weekday: *weekday,
            slot: *slot,
            display_name: "Bob".to_string(),
            is_available: bob_flags[i],
        });
    }

    ctx.event_repo
        .expect_find_event_by_code()
        .times(1)
        .returning(move |_| Ok(Some(event.clone())));
    ctx.participant_repo
        .expect_get_participants()
        .times(1)
        .returning(move |_| Ok(vec![alice.clone(), bob.clone()]));
    ctx.availability_repo
        .expect_get_event_weekday_availability()
        .with(predicate::eq(event_id))
        .times(1)
        .returning(move |_| Ok(rows.clone()));

    let viewer_id = Uuid::new_v4();
    let response = all_weekday_availability(&ctx, viewer_id, "monday-sync")
        .await
        .unwrap();

    let names = |list: &[&str]| -> Vec<String> { list.iter().map(|s| s.to_string()).collect() };
    assert!(!response.is_creator);
    assert_eq!(response.participants, vec!["Alice", "Bob"]);
    assert_eq!(
        response.availability,
        vec![
            vec![names(&["Alice"]), names(&[]), names(&[]), names(&["Alice"])],
            vec![
                names(&["Bob"]),
                names(&["Bob"]),
                names(&["Alice", "Bob"]),
                names(&["Bob"]),
            ],
        ]
    );
}

#[tokio::test]
async fn test_self_availability_missing_rows_read_unavailable() {
    // A participant with rows for only some slots reads as unavailable
    // everywhere else, the same way the self-view handler fills its grid.
    let event_id = Uuid::new_v4();
    let slot_rows = date_slot_rows(event_id);
    let keys: Vec<NaiveDateTime> = slot_rows.iter().map(|row| row.slot).collect();
    let shape = grid::date_grid_shape(&keys).unwrap();

    let by_slot: std::collections::HashMap<NaiveDateTime, bool> =
        [(keys[0], true), (keys[5], true)].into_iter().collect();
    let flat: Vec<bool> = keys
        .iter()
        .map(|key| by_slot.get(key).copied().unwrap_or(false))
        .collect();
    let availability = reconcile::unflatten(&flat, shape).unwrap();

    assert_eq!(
        availability,
        vec![
            vec![true, false, false, false],
            vec![false, true, false, false],
        ]
    );
}
