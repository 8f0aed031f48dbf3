pub mod routes;

use axum::{
    response::Redirect,
    routing::{get, get_service, post},
    Router,
};
use http::header::{HeaderValue, CACHE_CONTROL};
use sqlx::SqlitePool;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::services::ServeDir;
use tower_http::set_header::SetResponseHeaderLayer;

use routes::{activities_api, board};

pub fn router(pool: SqlitePool, assets_dir: &str) -> Router {
    Router::new()
        .route("/", get(|| async { Redirect::temporary(board::BOARD_PATH) }))
        // JSON API
        .route("/activities", get(activities_api::list_activities_handler))
        .route(
            "/activities/:activity_name/signup",
            post(activities_api::signup_handler),
        )
        .route(
            "/activities/:activity_name/unregister",
            post(activities_api::unregister_handler),
        )
        // Board
        .route(board::BOARD_PATH, get(board::board_page_handler))
        .route("/board/signup", post(board::board_signup_handler))
        .route("/board/unregister", post(board::board_unregister_handler))
        // Static files
        .nest_service(
            "/assets",
            get_service(ServeDir::new(assets_dir)).layer(SetResponseHeaderLayer::if_not_present(
                CACHE_CONTROL,
                HeaderValue::from_static("no-store"),
            )),
        )
        // Layers
        .layer(SetResponseHeaderLayer::if_not_present(
            CACHE_CONTROL,
            HeaderValue::from_static("no-store"),
        ))
        .layer(CatchPanicLayer::new())
        .with_state(pool)
}
