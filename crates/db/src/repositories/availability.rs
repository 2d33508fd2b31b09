use crate::models::{
    DbEventDateAvailability, DbEventWeekdayAvailability, DbSelfDateAvailability,
    DbSelfWeekdayAvailability,
};
use eyre::Result;
use sqlx::{PgExecutor, Postgres, QueryBuilder};
use uuid::Uuid;

pub async fn delete_date_availability(
    executor: impl PgExecutor<'_>,
    participant_id: Uuid,
) -> Result<()> {
    sqlx::query(
        r#"
        DELETE FROM event_date_availability WHERE participant_id = $1
        "#,
    )
    .bind(participant_id)
    .execute(executor)
    .await?;

    Ok(())
}

pub async fn delete_weekday_availability(
    executor: impl PgExecutor<'_>,
    participant_id: Uuid,
) -> Result<()> {
    sqlx::query(
        r#"
        DELETE FROM event_weekday_availability WHERE participant_id = $1
        "#,
    )
    .bind(participant_id)
    .execute(executor)
    .await?;

    Ok(())
}

/// Bulk-inserts one availability row per (timeslot id, flag) pair for the
/// participant.
pub async fn insert_date_availability(
    executor: impl PgExecutor<'_>,
    participant_id: Uuid,
    rows: &[(Uuid, bool)],
) -> Result<()> {
    if rows.is_empty() {
        return Ok(());
    }

    let mut builder = QueryBuilder::<Postgres>::new(
        "INSERT INTO event_date_availability (id, participant_id, timeslot_id, is_available) ",
    );
    builder.push_values(rows, |mut row, (timeslot_id, is_available)| {
        row.push_bind(Uuid::new_v4())
            .push_bind(participant_id)
            .push_bind(*timeslot_id)
            .push_bind(*is_available);
    });
    builder.build().execute(executor).await?;

    Ok(())
}

pub async fn insert_weekday_availability(
    executor: impl PgExecutor<'_>,
    participant_id: Uuid,
    rows: &[(Uuid, bool)],
) -> Result<()> {
    if rows.is_empty() {
        return Ok(());
    }

    let mut builder = QueryBuilder::<Postgres>::new(
        "INSERT INTO event_weekday_availability (id, participant_id, timeslot_id, is_available) ",
    );
    builder.push_values(rows, |mut row, (timeslot_id, is_available)| {
        row.push_bind(Uuid::new_v4())
            .push_bind(participant_id)
            .push_bind(*timeslot_id)
            .push_bind(*is_available);
    });
    builder.build().execute(executor).await?;

    Ok(())
}

pub async fn get_self_date_availability(
    executor: impl PgExecutor<'_>,
    participant_id: Uuid,
) -> Result<Vec<DbSelfDateAvailability>> {
    let rows = sqlx::query_as::<_, DbSelfDateAvailability>(
        r#"
        SELECT t.slot, a.is_available
        FROM event_date_availability a
        JOIN event_date_timeslots t ON t.id = a.timeslot_id
        WHERE a.participant_id = $1
        ORDER BY t.slot ASC
        "#,
    )
    .bind(participant_id)
    .fetch_all(executor)
    .await?;

    Ok(rows)
}

pub async fn get_self_weekday_availability(
    executor: impl PgExecutor<'_>,
    participant_id: Uuid,
) -> Result<Vec<DbSelfWeekdayAvailability>> {
    let rows = sqlx::query_as::<_, DbSelfWeekdayAvailability>(
        r#"
        SELECT t.weekday, t.slot, a.is_available
        FROM event_weekday_availability a
        JOIN event_weekday_timeslots t ON t.id = a.timeslot_id
        WHERE a.participant_id = $1
        ORDER BY t.weekday ASC, t.slot ASC
        "#,
    )
    .bind(participant_id)
    .fetch_all(executor)
    .await?;

    Ok(rows)
}

/// Availability rows for every participant of the event, ordered by
/// timeslot then display name. The ordering is the aggregation contract.
pub async fn get_event_date_availability(
    executor: impl PgExecutor<'_>,
    event_id: Uuid,
) -> Result<Vec<DbEventDateAvailability>> {
    let rows = sqlx::query_as::<_, DbEventDateAvailability>(
        r#"
        SELECT t.slot, p.display_name, a.is_available
        FROM event_date_availability a
        JOIN event_date_timeslots t ON t.id = a.timeslot_id
        JOIN event_participants p ON p.id = a.participant_id
        WHERE p.event_id = $1
        ORDER BY t.slot ASC, p.display_name ASC
        "#,
    )
    .bind(event_id)
    .fetch_all(executor)
    .await?;

    Ok(rows)
}

pub async fn get_event_weekday_availability(
    executor: impl PgExecutor<'_>,
    event_id: Uuid,
) -> Result<Vec<DbEventWeekdayAvailability>> {
    let rows = sqlx::query_as::<_, DbEventWeekdayAvailability>(
        r#"
        SELECT t.weekday, t.slot, p.display_name, a.is_available
        FROM event_weekday_availability a
        JOIN event_weekday_timeslots t ON t.id = a.timeslot_id
        JOIN event_participants p ON p.id = a.participant_id
        WHERE p.event_id = $1
        ORDER BY t.weekday ASC, t.slot ASC, p.display_name ASC
        "#,
    )
    .bind(event_id)
    .fetch_all(executor)
    .await?;

    Ok(rows)
}
