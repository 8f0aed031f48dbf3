use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use sqlx::SqlitePool;
use tracing::{error, warn};

use crate::models::{ActivityCatalog, DetailBody, MessageBody};
use crate::services::activities_service::{self, ActivityCommandError};

#[derive(Debug, Deserialize, Default)]
pub struct EmailQuery {
    #[serde(default)]
    pub email: String,
}

/// `ActivityCommandError` rendered as `{detail}` with its status code.
pub struct ApiError(ActivityCommandError);

impl From<ActivityCommandError> for ApiError {
    fn from(e: ActivityCommandError) -> Self {
        Self(e)
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(e: sqlx::Error) -> Self {
        Self(ActivityCommandError::Storage(e))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.0.is_storage() {
            error!("activities api storage failure: {}", self.0);
        }
        let body = DetailBody {
            detail: self.0.detail(),
        };
        (self.0.status(), Json(body)).into_response()
    }
}

pub async fn list_activities_handler(
    State(pool): State<SqlitePool>,
) -> Result<Json<ActivityCatalog>, ApiError> {
    let catalog = activities_service::list_activities(&pool).await?;
    Ok(Json(catalog))
}

pub async fn signup_handler(
    Path(activity_name): Path<String>,
    Query(query): Query<EmailQuery>,
    State(pool): State<SqlitePool>,
) -> Result<Json<MessageBody>, ApiError> {
    let message = activities_service::signup(&pool, &activity_name, &query.email)
        .await
        .inspect_err(|e| {
            if !e.is_storage() {
                warn!(activity = %activity_name, "signup refused: {}", e)
            }
        })?;
    Ok(Json(MessageBody { message }))
}

pub async fn unregister_handler(
    Path(activity_name): Path<String>,
    Query(query): Query<EmailQuery>,
    State(pool): State<SqlitePool>,
) -> Result<Json<MessageBody>, ApiError> {
    let message = activities_service::unregister(&pool, &activity_name, &query.email)
        .await
        .inspect_err(|e| {
            if !e.is_storage() {
                warn!(activity = %activity_name, "unregister refused: {}", e)
            }
        })?;
    Ok(Json(MessageBody { message }))
}
