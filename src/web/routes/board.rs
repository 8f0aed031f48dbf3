use askama::Template;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use tracing::error;

use crate::services::activity_board_service::{
    self, BoardAction, BoardMessage, BoardPage, MESSAGE_HIDE_AFTER_SECS,
};

pub const BOARD_PATH: &str = "/static/index.html";

#[derive(Template)]
#[template(path = "index.html")]
pub struct BoardTemplate {
    pub page: BoardPage,
    pub hide_after_secs: u64,
    pub build_id: &'static str,
    pub form_activity: String,
    pub form_email: String,
}

/// Message carried across the post/redirect/get round trip. A refused
/// signup also carries the submitted values so the form keeps them.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct BoardNotice {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub activity: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl BoardNotice {
    fn message(&self) -> Option<BoardMessage> {
        let text = self.notice.as_deref()?.trim().to_string();
        if text.is_empty() {
            return None;
        }
        match self.kind.as_deref() {
            Some("success") => Some(BoardMessage::success(text)),
            _ => Some(BoardMessage::error(text)),
        }
    }
}

impl From<&BoardMessage> for BoardNotice {
    fn from(m: &BoardMessage) -> Self {
        Self {
            notice: Some(m.text.clone()),
            kind: Some(m.kind.as_str().to_string()),
            activity: None,
            email: None,
        }
    }
}

pub async fn board_page_handler(
    Query(notice): Query<BoardNotice>,
    State(pool): State<SqlitePool>,
) -> Response {
    let page = activity_board_service::build_board_page(&pool, notice.message()).await;
    let template = BoardTemplate {
        page,
        hide_after_secs: MESSAGE_HIDE_AFTER_SECS,
        build_id: env!("ACTIVITIES_BUILD_ID"),
        form_activity: notice.activity.unwrap_or_default(),
        form_email: notice.email.unwrap_or_default(),
    };
    match template.render() {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            error!("board template render failed: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct BoardCommandForm {
    pub activity: String,
    #[serde(default)]
    pub email: String,
}

pub async fn board_signup_handler(
    State(pool): State<SqlitePool>,
    Form(form): Form<BoardCommandForm>,
) -> Redirect {
    let message = activity_board_service::run_board_action(
        &pool,
        BoardAction::Signup,
        &form.activity,
        &form.email,
    )
    .await;
    let mut notice = BoardNotice::from(&message);
    if !message.is_success() {
        notice.activity = Some(form.activity);
        notice.email = Some(form.email);
    }
    redirect_with_notice(notice)
}

pub async fn board_unregister_handler(
    State(pool): State<SqlitePool>,
    Form(form): Form<BoardCommandForm>,
) -> Redirect {
    let message = activity_board_service::run_board_action(
        &pool,
        BoardAction::Unregister,
        &form.activity,
        &form.email,
    )
    .await;
    redirect_with_notice(BoardNotice::from(&message))
}

fn redirect_with_notice(notice: BoardNotice) -> Redirect {
    match serde_urlencoded::to_string(notice) {
        Ok(query) => Redirect::to(&format!("{}?{}", BOARD_PATH, query)),
        Err(e) => {
            error!("board notice encoding failed: {}", e);
            Redirect::to(BOARD_PATH)
        }
    }
}
