use sqlx::SqlitePool;
use tracing::info;

const SQL_CREATE_ACTIVITIES: &str = r#"
CREATE TABLE IF NOT EXISTS activities (
  name TEXT PRIMARY KEY NOT NULL,
  description TEXT NOT NULL,
  schedule TEXT NOT NULL,
  max_participants INTEGER NOT NULL CHECK (max_participants >= 0),
  position INTEGER NOT NULL DEFAULT 0
)
"#;

const SQL_CREATE_ACTIVITY_PARTICIPANTS: &str = r#"
CREATE TABLE IF NOT EXISTS activity_participants (
  activity_name TEXT NOT NULL REFERENCES activities(name) ON DELETE CASCADE,
  email TEXT NOT NULL,
  joined_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now')),
  UNIQUE (activity_name, email)
)
"#;

const SQL_COUNT_ACTIVITIES: &str = "SELECT COUNT(*) FROM activities";

const SQL_INSERT_ACTIVITY: &str = r#"
INSERT INTO activities (name, description, schedule, max_participants, position)
VALUES (?, ?, ?, ?, ?)
"#;

const SQL_INSERT_SEED_PARTICIPANT: &str = r#"
INSERT INTO activity_participants (activity_name, email)
VALUES (?, ?)
"#;

pub struct SeedActivity {
    pub name: &'static str,
    pub description: &'static str,
    pub schedule: &'static str,
    pub max_participants: i64,
    pub participants: &'static [&'static str],
}

pub const SEED_ACTIVITIES: &[SeedActivity] = &[
    SeedActivity {
        name: "Chess Club",
        description: "Learn strategies and compete in chess tournaments",
        schedule: "Fridays, 3:30 PM - 5:00 PM",
        max_participants: 12,
        participants: &["michael@mergington.edu", "daniel@mergington.edu"],
    },
    SeedActivity {
        name: "Programming Class",
        description: "Learn programming fundamentals and build software projects",
        schedule: "Tuesdays and Thursdays, 3:30 PM - 4:30 PM",
        max_participants: 20,
        participants: &["emma@mergington.edu", "sophia@mergington.edu"],
    },
    SeedActivity {
        name: "Gym Class",
        description: "Physical education and sports activities",
        schedule: "Mondays, Wednesdays, Fridays, 2:00 PM - 3:00 PM",
        max_participants: 30,
        participants: &["john@mergington.edu", "olivia@mergington.edu"],
    },
    SeedActivity {
        name: "Soccer Team",
        description: "Join the school soccer team for training and interschool matches",
        schedule: "Mondays and Thursdays, 4:00 PM - 6:00 PM",
        max_participants: 25,
        participants: &["liam@mergington.edu"],
    },
    SeedActivity {
        name: "Track & Field",
        description: "Running, jumping and throwing events training",
        schedule: "Tuesdays and Fridays, 4:00 PM - 5:30 PM",
        max_participants: 20,
        participants: &["ava@mergington.edu"],
    },
    SeedActivity {
        name: "Art Club",
        description: "Painting, drawing and mixed-media workshops",
        schedule: "Wednesdays, 3:30 PM - 5:00 PM",
        max_participants: 18,
        participants: &["noah@mergington.edu"],
    },
    SeedActivity {
        name: "Drama Club",
        description: "Acting, improvisation and stage production",
        schedule: "Thursdays, 5:00 PM - 7:00 PM",
        max_participants: 22,
        participants: &["sophia@mergington.edu"],
    },
    SeedActivity {
        name: "Debate Team",
        description: "Practice public speaking and debate skills; compete regionally",
        schedule: "Mondays, 5:00 PM - 6:30 PM",
        max_participants: 16,
        participants: &["oliver@mergington.edu"],
    },
    SeedActivity {
        name: "Science Club",
        description: "Hands-on experiments, science fair projects and guest lectures",
        schedule: "Fridays, 3:30 PM - 5:00 PM",
        max_participants: 20,
        participants: &["isabella@mergington.edu"],
    },
];

pub async fn ensure_schema(pool: &SqlitePool) -> sqlx::Result<()> {
    sqlx::query(SQL_CREATE_ACTIVITIES).execute(pool).await?;
    sqlx::query(SQL_CREATE_ACTIVITY_PARTICIPANTS)
        .execute(pool)
        .await?;
    Ok(())
}

/// Inserts the default catalog when `activities` is empty. Returns whether it did.
pub async fn seed_activities_if_empty(pool: &SqlitePool) -> sqlx::Result<bool> {
    let mut tx = pool.begin().await?;

    let existing: i64 = sqlx::query_scalar(SQL_COUNT_ACTIVITIES)
        .fetch_one(&mut *tx)
        .await?;
    if existing > 0 {
        return Ok(false);
    }

    for (position, seed) in SEED_ACTIVITIES.iter().enumerate() {
        sqlx::query(SQL_INSERT_ACTIVITY)
            .bind(seed.name)
            .bind(seed.description)
            .bind(seed.schedule)
            .bind(seed.max_participants)
            .bind(position as i64)
            .execute(&mut *tx)
            .await?;
        for email in seed.participants {
            sqlx::query(SQL_INSERT_SEED_PARTICIPANT)
                .bind(seed.name)
                .bind(*email)
                .execute(&mut *tx)
                .await?;
        }
    }

    tx.commit().await?;
    info!(activities = SEED_ACTIVITIES.len(), "seeded activity catalog");
    Ok(true)
}
