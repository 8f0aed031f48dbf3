use std::collections::HashMap;

use axum::http::StatusCode;
use sqlx::{SqliteConnection, SqlitePool};
use thiserror::Error;
use tracing::info;

use crate::database::{activities_repo, activity_participants_repo};
use crate::models::{ActivityCatalog, ActivityDetails};

/// Reasons a signup or unregister is refused. Everything except `Storage`
/// is reported back to the caller as a `detail` message.
#[derive(Debug, Error)]
pub enum ActivityCommandError {
    #[error("Activity not found")]
    NotFound,
    #[error("Student is already signed up")]
    AlreadySignedUp,
    #[error("Student is not registered for this activity")]
    NotRegistered,
    #[error("Activity is full")]
    ActivityFull,
    #[error("Email is required")]
    MissingEmail,
    #[error("storage error: {0}")]
    Storage(#[from] sqlx::Error),
}

impl ActivityCommandError {
    pub fn status(&self) -> StatusCode {
        match self {
            ActivityCommandError::NotFound => StatusCode::NOT_FOUND,
            ActivityCommandError::AlreadySignedUp
            | ActivityCommandError::NotRegistered
            | ActivityCommandError::ActivityFull
            | ActivityCommandError::MissingEmail => StatusCode::BAD_REQUEST,
            ActivityCommandError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Text safe to show to the user; storage details stay in the logs.
    pub fn detail(&self) -> String {
        match self {
            ActivityCommandError::Storage(_) => "Internal server error".to_string(),
            other => other.to_string(),
        }
    }

    pub fn is_storage(&self) -> bool {
        matches!(self, ActivityCommandError::Storage(_))
    }
}

/// All activities in catalog order, each with its participants in join order.
pub async fn list_activities(pool: &SqlitePool) -> sqlx::Result<ActivityCatalog> {
    let rows = activities_repo::list_activities(pool).await?;
    let participant_rows = activities_repo::list_participants(pool).await?;

    let mut participants_by_activity: HashMap<String, Vec<String>> = HashMap::new();
    for p in participant_rows {
        participants_by_activity
            .entry(p.activity_name)
            .or_default()
            .push(p.email);
    }

    let entries = rows
        .into_iter()
        .map(|row| {
            let participants = participants_by_activity
                .remove(&row.name)
                .unwrap_or_default();
            let details = ActivityDetails {
                description: row.description,
                schedule: row.schedule,
                max_participants: row.max_participants,
                participants,
            };
            (row.name, details)
        })
        .collect();
    Ok(ActivityCatalog(entries))
}

pub async fn signup(
    pool: &SqlitePool,
    activity_name: &str,
    email: &str,
) -> Result<String, ActivityCommandError> {
    let email = normalize_email(email)?;
    let mut conn = pool.acquire().await?;

    let inserted =
        activity_participants_repo::insert_participant_if_open(&mut conn, activity_name, email)
            .await?;
    if inserted == 0 {
        return Err(explain_refused_signup(&mut conn, activity_name, email).await?);
    }

    info!(activity = %activity_name, email = %email, "participant signed up");
    Ok(format!("Signed up {} for {}", email, activity_name))
}

async fn explain_refused_signup(
    conn: &mut SqliteConnection,
    activity_name: &str,
    email: &str,
) -> sqlx::Result<ActivityCommandError> {
    if activities_repo::load_activity_by_name(&mut *conn, activity_name)
        .await?
        .is_none()
    {
        return Ok(ActivityCommandError::NotFound);
    }
    if activity_participants_repo::is_participant(&mut *conn, activity_name, email).await? {
        return Ok(ActivityCommandError::AlreadySignedUp);
    }
    Ok(ActivityCommandError::ActivityFull)
}

pub async fn unregister(
    pool: &SqlitePool,
    activity_name: &str,
    email: &str,
) -> Result<String, ActivityCommandError> {
    let email = normalize_email(email)?;
    let mut conn = pool.acquire().await?;

    let removed =
        activity_participants_repo::delete_participant(&mut conn, activity_name, email).await?;
    if removed == 0 {
        let known = activities_repo::load_activity_by_name(&mut conn, activity_name)
            .await?
            .is_some();
        return Err(if known {
            ActivityCommandError::NotRegistered
        } else {
            ActivityCommandError::NotFound
        });
    }

    info!(activity = %activity_name, email = %email, "participant unregistered");
    Ok(format!("Unregistered {} from {}", email, activity_name))
}

fn normalize_email(email: &str) -> Result<&str, ActivityCommandError> {
    let email = email.trim();
    if email.is_empty() {
        return Err(ActivityCommandError::MissingEmail);
    }
    Ok(email)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_errors_map_to_client_statuses() {
        assert_eq!(ActivityCommandError::NotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ActivityCommandError::AlreadySignedUp.status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ActivityCommandError::ActivityFull.status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ActivityCommandError::NotRegistered.detail(),
            "Student is not registered for this activity"
        );
    }

    #[test]
    fn storage_errors_hide_their_cause() {
        let err = ActivityCommandError::from(sqlx::Error::RowNotFound);
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.detail(), "Internal server error");
        assert!(err.is_storage());
    }

    #[test]
    fn blank_email_is_rejected() {
        assert!(matches!(
            normalize_email("   "),
            Err(ActivityCommandError::MissingEmail)
        ));
        assert_eq!(normalize_email(" a@b.edu ").unwrap(), "a@b.edu");
    }
}
