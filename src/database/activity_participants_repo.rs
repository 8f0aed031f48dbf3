use sqlx::SqliteConnection;

const SQL_IS_PARTICIPANT: &str = r#"
SELECT EXISTS (
  SELECT 1
  FROM activity_participants
  WHERE activity_name = ?
    AND email = ?
)
"#;

pub async fn is_participant(
    conn: &mut SqliteConnection,
    activity_name: &str,
    email: &str,
) -> sqlx::Result<bool> {
    sqlx::query_scalar(SQL_IS_PARTICIPANT)
        .bind(activity_name)
        .bind(email)
        .fetch_one(conn)
        .await
}

// Duplicate and capacity checks live in the statement itself so concurrent
// signups never need to upgrade a read lock.
const SQL_INSERT_PARTICIPANT_IF_OPEN: &str = r#"
INSERT INTO activity_participants (activity_name, email)
SELECT a.name, ?
FROM activities a
WHERE a.name = ?
  AND NOT EXISTS (
    SELECT 1
    FROM activity_participants ap
    WHERE ap.activity_name = a.name
      AND ap.email = ?
  )
  AND (
    SELECT COUNT(*)
    FROM activity_participants ap
    WHERE ap.activity_name = a.name
  ) < a.max_participants
"#;

/// Returns 0 when the activity is unknown, the email is already present, or
/// the activity is full.
pub async fn insert_participant_if_open(
    conn: &mut SqliteConnection,
    activity_name: &str,
    email: &str,
) -> sqlx::Result<u64> {
    let res = sqlx::query(SQL_INSERT_PARTICIPANT_IF_OPEN)
        .bind(email)
        .bind(activity_name)
        .bind(email)
        .execute(conn)
        .await?;
    Ok(res.rows_affected())
}

const SQL_DELETE_PARTICIPANT: &str = r#"
DELETE FROM activity_participants
WHERE activity_name = ?
  AND email = ?
"#;

pub async fn delete_participant(
    conn: &mut SqliteConnection,
    activity_name: &str,
    email: &str,
) -> sqlx::Result<u64> {
    let res = sqlx::query(SQL_DELETE_PARTICIPANT)
        .bind(activity_name)
        .bind(email)
        .execute(conn)
        .await?;
    Ok(res.rows_affected())
}
