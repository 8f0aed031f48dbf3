use sqlx::{SqliteConnection, SqlitePool};

use crate::models::{ActivitiesRow, ActivityParticipantsRow};

const SQL_LIST_ACTIVITIES: &str = r#"
SELECT
  name,
  description,
  schedule,
  max_participants,
  position
FROM activities
ORDER BY position ASC, name ASC
"#;

pub async fn list_activities(pool: &SqlitePool) -> sqlx::Result<Vec<ActivitiesRow>> {
    sqlx::query_as::<_, ActivitiesRow>(SQL_LIST_ACTIVITIES)
        .fetch_all(pool)
        .await
}

// rowid keeps join order stable when two signups share a timestamp.
const SQL_LIST_PARTICIPANTS: &str = r#"
SELECT
  ap.activity_name,
  ap.email,
  ap.joined_at
FROM activity_participants ap
JOIN activities a ON a.name = ap.activity_name
ORDER BY a.position ASC, ap.rowid ASC
"#;

pub async fn list_participants(pool: &SqlitePool) -> sqlx::Result<Vec<ActivityParticipantsRow>> {
    sqlx::query_as::<_, ActivityParticipantsRow>(SQL_LIST_PARTICIPANTS)
        .fetch_all(pool)
        .await
}

const SQL_LOAD_ACTIVITY_BY_NAME: &str = r#"
SELECT
  name,
  description,
  schedule,
  max_participants,
  position
FROM activities
WHERE name = ?
LIMIT 1
"#;

pub async fn load_activity_by_name(
    conn: &mut SqliteConnection,
    name: &str,
) -> sqlx::Result<Option<ActivitiesRow>> {
    sqlx::query_as::<_, ActivitiesRow>(SQL_LOAD_ACTIVITY_BY_NAME)
        .bind(name)
        .fetch_optional(conn)
        .await
}
