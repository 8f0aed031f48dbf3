use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use tracing::{error, warn};

use crate::models::{ActivityCatalog, ActivityDetails};
use crate::services::activities_service::{self, ActivityCommandError};

/// Seconds a board message stays visible before it hides itself.
pub const MESSAGE_HIDE_AFTER_SECS: u64 = 5;

pub const LOAD_FAILED_TEXT: &str = "Falha ao carregar atividades. Tente novamente mais tarde.";
pub const SIGNUP_FAILED_TEXT: &str = "Falha ao se inscrever. Tente novamente.";
pub const UNREGISTER_FAILED_TEXT: &str = "Falha ao remover participante. Tente novamente.";
pub const GENERIC_ERROR_TEXT: &str = "An error occurred";

/// One rendered activity card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityCardView {
    pub name: String,
    pub description: String,
    pub schedule: String,
    pub max_participants: i64,
    pub participants_count: i64,
    pub spots_left: i64,
    pub participants: Vec<String>,
}

impl ActivityCardView {
    pub fn from_details(name: &str, details: &ActivityDetails) -> Self {
        let participants_count = details.participants.len() as i64;
        Self {
            name: name.to_string(),
            description: details.description.clone(),
            schedule: details.schedule.clone(),
            max_participants: details.max_participants,
            participants_count,
            spots_left: compute_spots_left(details.max_participants, participants_count),
            participants: details.participants.clone(),
        }
    }

    pub fn has_participants(&self) -> bool {
        !self.participants.is_empty()
    }
}

pub fn build_cards(catalog: &ActivityCatalog) -> Vec<ActivityCardView> {
    catalog
        .0
        .iter()
        .map(|(name, details)| ActivityCardView::from_details(name, details))
        .collect()
}

fn compute_spots_left(max: i64, current: i64) -> i64 {
    max.saturating_sub(current).max(0)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    Success,
    Error,
}

impl MessageKind {
    pub fn as_str(self) -> &'static str {
        match self {
            MessageKind::Success => "success",
            MessageKind::Error => "error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardMessage {
    pub kind: MessageKind,
    pub text: String,
}

impl BoardMessage {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            kind: MessageKind::Success,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: MessageKind::Error,
            text: text.into(),
        }
    }

    /// Error message built from a server `detail`, falling back to a generic text.
    pub fn from_detail(detail: Option<&str>) -> Self {
        let text = detail
            .map(|d| d.trim())
            .filter(|d| !d.is_empty())
            .unwrap_or(GENERIC_ERROR_TEXT);
        Self::error(text)
    }

    pub fn is_success(&self) -> bool {
        self.kind == MessageKind::Success
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardAction {
    Signup,
    Unregister,
}

impl BoardAction {
    /// Shown when the action could not complete at all.
    pub fn failure_text(self) -> &'static str {
        match self {
            BoardAction::Signup => SIGNUP_FAILED_TEXT,
            BoardAction::Unregister => UNREGISTER_FAILED_TEXT,
        }
    }
}

pub fn message_for_result(
    action: BoardAction,
    result: &Result<String, ActivityCommandError>,
) -> BoardMessage {
    match result {
        Ok(message) => BoardMessage::success(message.clone()),
        Err(e) if e.is_storage() => BoardMessage::error(action.failure_text()),
        Err(e) => BoardMessage::from_detail(Some(&e.detail())),
    }
}

pub async fn run_board_action(
    pool: &SqlitePool,
    action: BoardAction,
    activity_name: &str,
    email: &str,
) -> BoardMessage {
    let result = match action {
        BoardAction::Signup => activities_service::signup(pool, activity_name, email).await,
        BoardAction::Unregister => activities_service::unregister(pool, activity_name, email).await,
    };

    match &result {
        Err(e) if e.is_storage() => {
            error!(?action, activity = %activity_name, "board action failed: {}", e)
        }
        Err(e) => warn!(?action, activity = %activity_name, "board action refused: {}", e),
        Ok(_) => {}
    }

    message_for_result(action, &result)
}

pub struct BoardPage {
    pub cards: Vec<ActivityCardView>,
    pub load_error: Option<&'static str>,
    pub message: Option<BoardMessage>,
}

impl BoardPage {
    pub fn activity_names(&self) -> Vec<&str> {
        self.cards.iter().map(|c| c.name.as_str()).collect()
    }
}

/// Fresh projection of the catalog. A failed load still yields a page,
/// with the load-failure text in place of the cards.
pub async fn build_board_page(pool: &SqlitePool, message: Option<BoardMessage>) -> BoardPage {
    match activities_service::list_activities(pool).await {
        Ok(activities) => BoardPage {
            cards: build_cards(&activities),
            load_error: None,
            message,
        },
        Err(e) => {
            error!("Error fetching activities: {}", e);
            BoardPage {
                cards: vec![],
                load_error: Some(LOAD_FAILED_TEXT),
                message,
            }
        }
    }
}
