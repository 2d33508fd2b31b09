use crate::models::DbParticipant;
use eyre::Result;
use sqlx::{PgConnection, PgExecutor};
use uuid::Uuid;

pub async fn find_participant(
    executor: impl PgExecutor<'_>,
    event_id: Uuid,
    actor_id: Uuid,
) -> Result<Option<DbParticipant>> {
    let participant = sqlx::query_as::<_, DbParticipant>(
        r#"
        SELECT id, event_id, actor_id, display_name, time_zone
        FROM event_participants
        WHERE event_id = $1 AND actor_id = $2
        "#,
    )
    .bind(event_id)
    .bind(actor_id)
    .fetch_optional(executor)
    .await?;

    Ok(participant)
}

pub async fn find_participant_by_name(
    executor: impl PgExecutor<'_>,
    event_id: Uuid,
    display_name: &str,
) -> Result<Option<DbParticipant>> {
    let participant = sqlx::query_as::<_, DbParticipant>(
        r#"
        SELECT id, event_id, actor_id, display_name, time_zone
        FROM event_participants
        WHERE event_id = $1 AND display_name = $2
        "#,
    )
    .bind(event_id)
    .bind(display_name)
    .fetch_optional(executor)
    .await?;

    Ok(participant)
}

/// Creates the participant for (event, actor) or overwrites its display
/// name and time zone. Returns the row and whether it was newly created.
pub async fn upsert_participant(
    conn: &mut PgConnection,
    event_id: Uuid,
    actor_id: Uuid,
    display_name: &str,
    time_zone: &str,
) -> Result<(DbParticipant, bool)> {
    if let Some(existing) = find_participant(&mut *conn, event_id, actor_id).await? {
        let updated = sqlx::query_as::<_, DbParticipant>(
            r#"
            UPDATE event_participants
            SET display_name = $2, time_zone = $3
            WHERE id = $1
            RETURNING id, event_id, actor_id, display_name, time_zone
            "#,
        )
        .bind(existing.id)
        .bind(display_name)
        .bind(time_zone)
        .fetch_one(&mut *conn)
        .await?;

        return Ok((updated, false));
    }

    let created = sqlx::query_as::<_, DbParticipant>(
        r#"
        INSERT INTO event_participants (id, event_id, actor_id, display_name, time_zone)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id, event_id, actor_id, display_name, time_zone
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(event_id)
    .bind(actor_id)
    .bind(display_name)
    .bind(time_zone)
    .fetch_one(&mut *conn)
    .await?;

    Ok((created, true))
}

pub async fn get_participants(
    executor: impl PgExecutor<'_>,
    event_id: Uuid,
) -> Result<Vec<DbParticipant>> {
    let participants = sqlx::query_as::<_, DbParticipant>(
        r#"
        SELECT id, event_id, actor_id, display_name, time_zone
        FROM event_participants
        WHERE event_id = $1
        ORDER BY display_name ASC
        "#,
    )
    .bind(event_id)
    .fetch_all(executor)
    .await?;

    Ok(participants)
}

/// Deletes a participant. Its availability rows go with it via the
/// foreign-key cascade.
pub async fn delete_participant(executor: impl PgExecutor<'_>, id: Uuid) -> Result<()> {
    sqlx::query(
        r#"
        DELETE FROM event_participants WHERE id = $1
        "#,
    )
    .bind(id)
    .execute(executor)
    .await?;

    Ok(())
}
