//! HTTP client for the activities API, driving the same fetch, mutate and
//! re-render flow as the board page.

pub mod render;

use reqwest::{StatusCode, Url};
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{error, warn};

use crate::models::ActivityCatalog;
use crate::services::activity_board_service::{
    build_cards, BoardAction, BoardMessage, BoardPage, LOAD_FAILED_TEXT,
};

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid base url: {0}")]
    InvalidUrl(String),
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("unexpected status {0}")]
    Status(StatusCode),
}

/// Either field may be missing; `detail` may also be a non-string on
/// validation failures.
#[derive(Debug, Default, Deserialize)]
struct MutationBody {
    message: Option<String>,
    detail: Option<Value>,
}

/// Result of one board action: the message to show and, after a
/// successful mutation, the freshly re-fetched board.
pub struct ActionOutcome {
    pub message: BoardMessage,
    pub page: Option<BoardPage>,
}

#[derive(Clone)]
pub struct ActivitiesClient {
    http: reqwest::Client,
    base_url: Url,
}

impl ActivitiesClient {
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(http: reqwest::Client, base_url: &str) -> Result<Self, ClientError> {
        let base_url =
            Url::parse(base_url).map_err(|e| ClientError::InvalidUrl(format!("{base_url}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::InvalidUrl(base_url.to_string()));
        }
        Ok(Self { http, base_url })
    }

    /// Appends percent-encoded path segments to the base url.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ClientError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    pub async fn fetch_activities(&self) -> Result<ActivityCatalog, ClientError> {
        let url = self.endpoint(&["activities"])?;
        let resp = self.http.get(url).send().await?;
        if !resp.status().is_success() {
            return Err(ClientError::Status(resp.status()));
        }
        Ok(resp.json::<ActivityCatalog>().await?)
    }

    pub async fn signup(&self, activity_name: &str, email: &str) -> BoardMessage {
        self.mutate(BoardAction::Signup, activity_name, email).await
    }

    pub async fn unregister(&self, activity_name: &str, email: &str) -> BoardMessage {
        self.mutate(BoardAction::Unregister, activity_name, email).await
    }

    /// Fetch-and-render step. A failed fetch yields the load-failure text.
    pub async fn load_board(&self, message: Option<BoardMessage>) -> BoardPage {
        match self.fetch_activities().await {
            Ok(catalog) => BoardPage {
                cards: build_cards(&catalog),
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

    /// Runs one mutation; re-fetches the board only when it succeeded.
    pub async fn apply(
        &self,
        action: BoardAction,
        activity_name: &str,
        email: &str,
    ) -> ActionOutcome {
        let message = self.mutate(action, activity_name, email).await;
        let page = if message.is_success() {
            Some(self.load_board(Some(message.clone())).await)
        } else {
            None
        };
        ActionOutcome { message, page }
    }

    async fn mutate(&self, action: BoardAction, activity_name: &str, email: &str) -> BoardMessage {
        match self.send_mutation(action, activity_name, email).await {
            Ok(message) => message,
            Err(e) => {
                warn!(?action, activity = %activity_name, "board action failed: {}", e);
                BoardMessage::error(action.failure_text())
            }
        }
    }

    async fn send_mutation(
        &self,
        action: BoardAction,
        activity_name: &str,
        email: &str,
    ) -> Result<BoardMessage, ClientError> {
        let verb = match action {
            BoardAction::Signup => "signup",
            BoardAction::Unregister => "unregister",
        };
        let mut url = self.endpoint(&["activities", activity_name, verb])?;
        url.query_pairs_mut().append_pair("email", email);

        let resp = self.http.post(url).send().await?;
        let status = resp.status();
        let body = resp.json::<MutationBody>().await?;

        if status.is_success() {
            Ok(BoardMessage::success(body.message.unwrap_or_default()))
        } else {
            let detail = body.detail.as_ref().and_then(Value::as_str);
            Ok(BoardMessage::from_detail(detail))
        }
    }
}
