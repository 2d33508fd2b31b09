use eyre::Result;
use sqlx::{Pool, Postgres};
use tracing::info;

pub async fn initialize_database(pool: &Pool<Postgres>) -> Result<()> {
    info!("Initializing database schema...");

    // Create user_events table. Timestamps are stored without time zone;
    // the grid is time-zone naive and the event records its canonical zone
    // separately.
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS user_events (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            actor_id UUID NOT NULL,
            title VARCHAR(50) NOT NULL,
            grid_kind VARCHAR(20) NOT NULL,
            duration SMALLINT NULL,
            time_zone VARCHAR(64) NOT NULL,
            created_at TIMESTAMP NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMP NOT NULL DEFAULT NOW(),
            CONSTRAINT valid_grid_kind CHECK (grid_kind IN ('SPECIFIC_DATES', 'GENERIC_WEEKDAYS'))
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create url_codes table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS url_codes (
            url_code VARCHAR(255) PRIMARY KEY,
            event_id UUID NOT NULL UNIQUE REFERENCES user_events(id) ON DELETE CASCADE,
            last_used TIMESTAMP NOT NULL DEFAULT NOW()
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create event_date_timeslots table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS event_date_timeslots (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            event_id UUID NOT NULL REFERENCES user_events(id) ON DELETE CASCADE,
            slot TIMESTAMP NOT NULL,
            CONSTRAINT unique_date_timeslot_per_event UNIQUE (event_id, slot)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create event_weekday_timeslots table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS event_weekday_timeslots (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            event_id UUID NOT NULL REFERENCES user_events(id) ON DELETE CASCADE,
            weekday SMALLINT NOT NULL CHECK (weekday BETWEEN 0 AND 6),
            slot TIME NOT NULL,
            CONSTRAINT unique_weekday_timeslot_per_event UNIQUE (event_id, weekday, slot)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create event_participants table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS event_participants (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            event_id UUID NOT NULL REFERENCES user_events(id) ON DELETE CASCADE,
            actor_id UUID NOT NULL,
            display_name VARCHAR(25) NOT NULL,
            time_zone VARCHAR(64) NOT NULL,
            CONSTRAINT unique_event_participant UNIQUE (event_id, actor_id),
            CONSTRAINT unique_display_name_per_event UNIQUE (event_id, display_name)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create event_date_availability table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS event_date_availability (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            participant_id UUID NOT NULL REFERENCES event_participants(id) ON DELETE CASCADE,
            timeslot_id UUID NOT NULL REFERENCES event_date_timeslots(id) ON DELETE CASCADE,
            is_available BOOLEAN NOT NULL,
            CONSTRAINT unique_participant_date_timeslot UNIQUE (participant_id, timeslot_id)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create event_weekday_availability table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS event_weekday_availability (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            participant_id UUID NOT NULL REFERENCES event_participants(id) ON DELETE CASCADE,
            timeslot_id UUID NOT NULL REFERENCES event_weekday_timeslots(id) ON DELETE CASCADE,
            is_available BOOLEAN NOT NULL,
            CONSTRAINT unique_participant_weekday_timeslot UNIQUE (participant_id, timeslot_id)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create indexes
    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS idx_user_events_actor ON user_events(actor_id);
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS idx_date_timeslots_event ON event_date_timeslots(event_id, slot);
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS idx_weekday_timeslots_event ON event_weekday_timeslots(event_id, weekday, slot);
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS idx_date_availability_participant ON event_date_availability(participant_id);
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS idx_weekday_availability_participant ON event_weekday_availability(participant_id);
        "#,
    )
    .execute(pool)
    .await?;

    info!("Database schema initialized");
    Ok(())
}
