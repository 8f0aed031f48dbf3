use std::env;

/// Server settings read from the environment (after `.env` is loaded).
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub assets_dir: String,
    pub seed_activities: bool,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://activities.db?mode=rwc".to_string()),
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),
            assets_dir: env::var("ASSETS_DIR").unwrap_or_else(|_| "assets".to_string()),
            seed_activities: env::var("SEED_ACTIVITIES")
                .map(|v| parse_flag(&v))
                .unwrap_or(true),
        }
    }
}

/// Base URL the CLI talks to.
pub fn api_base_url() -> String {
    env::var("ACTIVITIES_API_URL").unwrap_or_else(|_| "http://127.0.0.1:3000".to_string())
}

fn parse_flag(value: &str) -> bool {
    !matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "0" | "false" | "no" | "off"
    )
}
