use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use watchlog_core::error::ApiError;

use crate::error::AppError;
use crate::state::AppState;

pub mod media;
pub mod media_translations;
pub mod media_visualizations;
pub mod tv_show_episode_translations;
pub mod tv_show_episode_visualizations;
pub mod tv_show_episodes;
pub mod yt_channels;
pub mod yt_playlist_videos;
pub mod yt_playlists;
pub mod yt_video_visualizations;
pub mod yt_videos;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .nest("/api/v1", api_router())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// One sub-router per entity. Each module registers its own full paths, so
/// static segments (`/media/translations`) and id captures (`/media/{id}`)
/// can coexist in the merged tree.
fn api_router() -> Router<AppState> {
    Router::new()
        .merge(media::router())
        .merge(media_translations::router())
        .merge(media_visualizations::router())
        .merge(tv_show_episodes::router())
        .merge(tv_show_episode_translations::router())
        .merge(tv_show_episode_visualizations::router())
        .merge(yt_channels::router())
        .merge(yt_videos::router())
        .merge(yt_video_visualizations::router())
        .merge(yt_playlists::router())
        .merge(yt_playlist_videos::router())
}

#[derive(Serialize)]
struct HealthResponse {
    status: String,
}

async fn health(State(state): State<AppState>) -> Result<Json<HealthResponse>, AppError> {
    sqlx::query("SELECT 1")
        .execute(&state.db)
        .await
        .map_err(|e| ApiError::Storage(format!("database check failed: {e}")))?;

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
    }))
}
