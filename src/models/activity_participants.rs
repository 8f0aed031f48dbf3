// One row per (activity, email) signup.
#[allow(dead_code)]
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ActivityParticipantsRow {
    pub activity_name: String,
    pub email: String,
    pub joined_at: Option<String>,
}
