use crate::models::{DbDateTimeslot, DbWeekdayTimeslot};
use chrono::{NaiveDateTime, NaiveTime};
use eyre::Result;
use sqlx::{PgExecutor, Postgres, QueryBuilder};
use uuid::Uuid;

pub async fn insert_date_slots(
    executor: impl PgExecutor<'_>,
    event_id: Uuid,
    slots: &[NaiveDateTime],
) -> Result<()> {
    if slots.is_empty() {
        return Ok(());
    }

    let mut builder =
        QueryBuilder::<Postgres>::new("INSERT INTO event_date_timeslots (id, event_id, slot) ");
    builder.push_values(slots, |mut row, slot| {
        row.push_bind(Uuid::new_v4())
            .push_bind(event_id)
            .push_bind(*slot);
    });
    builder.build().execute(executor).await?;

    Ok(())
}

pub async fn insert_weekday_slots(
    executor: impl PgExecutor<'_>,
    event_id: Uuid,
    slots: &[(i16, NaiveTime)],
) -> Result<()> {
    if slots.is_empty() {
        return Ok(());
    }

    let mut builder = QueryBuilder::<Postgres>::new(
        "INSERT INTO event_weekday_timeslots (id, event_id, weekday, slot) ",
    );
    builder.push_values(slots, |mut row, (weekday, slot)| {
        row.push_bind(Uuid::new_v4())
            .push_bind(event_id)
            .push_bind(*weekday)
            .push_bind(*slot);
    });
    builder.build().execute(executor).await?;

    Ok(())
}

pub async fn get_date_slots(
    executor: impl PgExecutor<'_>,
    event_id: Uuid,
) -> Result<Vec<DbDateTimeslot>> {
    let slots = sqlx::query_as::<_, DbDateTimeslot>(
        r#"
        SELECT id, event_id, slot
        FROM event_date_timeslots
        WHERE event_id = $1
        ORDER BY slot ASC
        "#,
    )
    .bind(event_id)
    .fetch_all(executor)
    .await?;

    Ok(slots)
}

pub async fn get_weekday_slots(
    executor: impl PgExecutor<'_>,
    event_id: Uuid,
) -> Result<Vec<DbWeekdayTimeslot>> {
    let slots = sqlx::query_as::<_, DbWeekdayTimeslot>(
        r#"
        SELECT id, event_id, weekday, slot
        FROM event_weekday_timeslots
        WHERE event_id = $1
        ORDER BY weekday ASC, slot ASC
        "#,
    )
    .bind(event_id)
    .fetch_all(executor)
    .await?;

    Ok(slots)
}

/// Deletes the given date timeslots. Availability rows on them go with
/// them via the foreign-key cascade.
pub async fn delete_date_slots(
    executor: impl PgExecutor<'_>,
    event_id: Uuid,
    slots: &[NaiveDateTime],
) -> Result<()> {
    if slots.is_empty() {
        return Ok(());
    }

    sqlx::query(
        r#"
        DELETE FROM event_date_timeslots
        WHERE event_id = $1 AND slot = ANY($2)
        "#,
    )
    .bind(event_id)
    .bind(slots)
    .execute(executor)
    .await?;

    Ok(())
}

pub async fn delete_weekday_slots(
    executor: impl PgExecutor<'_>,
    event_id: Uuid,
    slots: &[(i16, NaiveTime)],
) -> Result<()> {
    if slots.is_empty() {
        return Ok(());
    }

    let (weekdays, times): (Vec<i16>, Vec<NaiveTime>) = slots.iter().copied().unzip();

    sqlx::query(
        r#"
        DELETE FROM event_weekday_timeslots t
        USING UNNEST($2::smallint[], $3::time[]) AS d(weekday, slot)
        WHERE t.event_id = $1 AND t.weekday = d.weekday AND t.slot = d.slot
        "#,
    )
    .bind(event_id)
    .bind(&weekdays)
    .bind(&times)
    .execute(executor)
    .await?;

    Ok(())
}
