//! URL code allocation for events.
//!
//! Every event is reachable through a short code. Codes are either chosen
//! by the creator (validated here) or randomly generated. A code belonging
//! to an event that has been inactive longer than the configured expiry is
//! considered reclaimable.

use chrono::{Duration, Utc};
use eyre::eyre;
use gridmeet_core::errors::{GridError, GridResult};
use rand::{distributions::Alphanumeric, Rng};
use sqlx::PgConnection;
use uuid::Uuid;

use gridmeet_db::repositories::event as event_repo;

pub const RAND_URL_CODE_LENGTH: usize = 8;
pub const RAND_URL_CODE_ATTEMPTS: usize = 16;

/// Checks the format of a creator-supplied custom code.
pub fn validate_custom_code(code: &str) -> GridResult<()> {
    if code.is_empty() || code.len() > 255 {
        return Err(GridError::Validation(
            "Code must be between 1 and 255 characters.".to_string(),
        ));
    }
    if !code
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-')
    {
        return Err(GridError::Validation(
            "Code must contain only alphanumeric characters and dashes.".to_string(),
        ));
    }
    Ok(())
}

fn random_code() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(RAND_URL_CODE_LENGTH)
        .map(char::from)
        .collect()
}

/// Returns whether `code` can be claimed, deleting it first if it expired
/// from inactivity.
async fn code_available(
    conn: &mut PgConnection,
    code: &str,
    exp_seconds: i64,
) -> GridResult<bool> {
    let Some(existing) = event_repo::find_url_code(&mut *conn, code).await? else {
        return Ok(true);
    };

    let cutoff = Utc::now().naive_utc() - Duration::seconds(exp_seconds);
    if existing.last_used < cutoff {
        event_repo::delete_url_code(&mut *conn, code).await?;
        return Ok(true);
    }

    Ok(false)
}

/// Claims a URL code for a new event, inside the caller's transaction.
///
/// A custom code is validated and claimed as-is; otherwise random codes are
/// tried until an available one is found.
pub async fn claim_code(
    conn: &mut PgConnection,
    event_id: Uuid,
    custom_code: Option<&str>,
    exp_seconds: i64,
) -> GridResult<String> {
    if let Some(code) = custom_code {
        validate_custom_code(code)?;
        if !code_available(&mut *conn, code, exp_seconds).await? {
            return Err(GridError::Validation("Code unavailable.".to_string()));
        }
        event_repo::create_url_code(&mut *conn, code, event_id).await?;
        return Ok(code.to_string());
    }

    for _ in 0..RAND_URL_CODE_ATTEMPTS {
        let code = random_code();
        if code_available(&mut *conn, &code, exp_seconds).await? {
            event_repo::create_url_code(&mut *conn, &code, event_id).await?;
            return Ok(code);
        }
    }

    Err(GridError::Database(eyre!(
        "Failed to generate a unique URL code."
    )))
}
