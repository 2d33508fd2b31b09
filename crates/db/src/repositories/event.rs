use crate::models::{DbEvent, DbUrlCode};
use eyre::Result;
use sqlx::PgExecutor;
use uuid::Uuid;

pub async fn create_event(
    executor: impl PgExecutor<'_>,
    actor_id: Uuid,
    title: &str,
    grid_kind: &str,
    duration: Option<i16>,
    time_zone: &str,
) -> Result<DbEvent> {
    let id = Uuid::new_v4();

    let event = sqlx::query_as::<_, DbEvent>(
        r#"
        INSERT INTO user_events (id, actor_id, title, grid_kind, duration, time_zone, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, NOW(), NOW())
        RETURNING id, actor_id, title, grid_kind, duration, time_zone, created_at, updated_at
        "#,
    )
    .bind(id)
    .bind(actor_id)
    .bind(title)
    .bind(grid_kind)
    .bind(duration)
    .bind(time_zone)
    .fetch_one(executor)
    .await?;

    Ok(event)
}

pub async fn find_event_by_code(
    executor: impl PgExecutor<'_>,
    code: &str,
) -> Result<Option<DbEvent>> {
    let event = sqlx::query_as::<_, DbEvent>(
        r#"
        SELECT e.id, e.actor_id, e.title, e.grid_kind, e.duration, e.time_zone, e.created_at, e.updated_at
        FROM user_events e
        JOIN url_codes c ON c.event_id = e.id
        WHERE c.url_code = $1
        "#,
    )
    .bind(code)
    .fetch_optional(executor)
    .await?;

    Ok(event)
}

pub async fn update_event(
    executor: impl PgExecutor<'_>,
    id: Uuid,
    title: &str,
    duration: Option<i16>,
    time_zone: &str,
) -> Result<()> {
    sqlx::query(
        r#"
        UPDATE user_events
        SET title = $2, duration = $3, time_zone = $4, updated_at = NOW()
        WHERE id = $1
        "#,
    )
    .bind(id)
    .bind(title)
    .bind(duration)
    .bind(time_zone)
    .execute(executor)
    .await?;

    Ok(())
}

pub async fn find_url_code(
    executor: impl PgExecutor<'_>,
    code: &str,
) -> Result<Option<DbUrlCode>> {
    let url_code = sqlx::query_as::<_, DbUrlCode>(
        r#"
        SELECT url_code, event_id, last_used
        FROM url_codes
        WHERE url_code = $1
        "#,
    )
    .bind(code)
    .fetch_optional(executor)
    .await?;

    Ok(url_code)
}

pub async fn create_url_code(
    executor: impl PgExecutor<'_>,
    code: &str,
    event_id: Uuid,
) -> Result<DbUrlCode> {
    let url_code = sqlx::query_as::<_, DbUrlCode>(
        r#"
        INSERT INTO url_codes (url_code, event_id, last_used)
        VALUES ($1, $2, NOW())
        RETURNING url_code, event_id, last_used
        "#,
    )
    .bind(code)
    .bind(event_id)
    .fetch_one(executor)
    .await?;

    Ok(url_code)
}

/// Refreshes the inactivity clock on a code. Called on write paths that
/// resolved the event through it.
pub async fn touch_url_code(executor: impl PgExecutor<'_>, code: &str) -> Result<()> {
    sqlx::query(
        r#"
        UPDATE url_codes SET last_used = NOW() WHERE url_code = $1
        "#,
    )
    .bind(code)
    .execute(executor)
    .await?;

    Ok(())
}

pub async fn delete_url_code(executor: impl PgExecutor<'_>, code: &str) -> Result<()> {
    sqlx::query(
        r#"
        DELETE FROM url_codes WHERE url_code = $1
        "#,
    )
    .bind(code)
    .execute(executor)
    .await?;

    Ok(())
}
