use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use watchlog_core::error::ApiError;
use watchlog_db::repo::yt_playlist_videos::{self, YtPlaylistVideoRow};

use crate::error::AppError;
use crate::patch::double_option;
use crate::state::AppState;
use crate::validate::{check_page, DEFAULT_LIMIT};

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/youtube/playlists_videos",
            get(list_links).post(create_link),
        )
        .route(
            "/youtube/playlists_videos/{link_id}",
            get(get_link).put(update_link).delete(delete_link),
        )
}

// ---------------------------------------------------------------------------
// Shapes
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct YtPlaylistVideoPublic {
    pub id: i64,
    pub playlist_id: String,
    pub video_id: String,
    pub position: Option<i64>,
}

impl From<YtPlaylistVideoRow> for YtPlaylistVideoPublic {
    fn from(r: YtPlaylistVideoRow) -> Self {
        Self {
            id: r.id,
            playlist_id: r.playlist_id,
            video_id: r.video_id,
            position: r.position,
        }
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct ListQuery {
    #[serde(default)]
    offset: i64,
    limit: Option<i64>,
}

async fn list_links(
    State(state): State<AppState>,
    Query(q): Query<ListQuery>,
) -> Result<Json<Vec<YtPlaylistVideoPublic>>, AppError> {
    let limit = q.limit.unwrap_or(DEFAULT_LIMIT);
    check_page(q.offset, limit)?;

    let rows = yt_playlist_videos::list_links(&state.db, q.offset, limit).await?;
    Ok(Json(rows.into_iter().map(Into::into).collect()))
}

async fn get_link(
    State(state): State<AppState>,
    Path(link_id): Path<i64>,
) -> Result<Json<YtPlaylistVideoPublic>, AppError> {
    let row = yt_playlist_videos::get_link(&state.db, link_id)
        .await?
        .ok_or_else(|| not_found(link_id))?;
    Ok(Json(row.into()))
}

#[derive(Debug, Deserialize)]
struct YtPlaylistVideoCreate {
    playlist_id: String,
    video_id: String,
    position: Option<i64>,
}

async fn create_link(
    State(state): State<AppState>,
    Json(body): Json<YtPlaylistVideoCreate>,
) -> Result<(StatusCode, Json<YtPlaylistVideoPublic>), AppError> {
    let row = yt_playlist_videos::insert_link(
        &state.db,
        &body.playlist_id,
        &body.video_id,
        body.position,
    )
    .await?;

    Ok((StatusCode::CREATED, Json(row.into())))
}

#[derive(Debug, Deserialize)]
struct YtPlaylistVideoUpdate {
    playlist_id: Option<String>,
    video_id: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    position: Option<Option<i64>>,
}

async fn update_link(
    State(state): State<AppState>,
    Path(link_id): Path<i64>,
    Json(body): Json<YtPlaylistVideoUpdate>,
) -> Result<Json<YtPlaylistVideoPublic>, AppError> {
    let mut row = yt_playlist_videos::get_link(&state.db, link_id)
        .await?
        .ok_or_else(|| not_found(link_id))?;

    if let Some(playlist_id) = body.playlist_id {
        row.playlist_id = playlist_id;
    }
    if let Some(video_id) = body.video_id {
        row.video_id = video_id;
    }
    // explicit null detaches the link from any fixed position
    if let Some(position) = body.position {
        row.position = position;
    }

    yt_playlist_videos::update_link(&state.db, &row).await?;

    let refreshed = yt_playlist_videos::get_link(&state.db, link_id)
        .await?
        .ok_or_else(|| not_found(link_id))?;
    Ok(Json(refreshed.into()))
}

async fn delete_link(
    State(state): State<AppState>,
    Path(link_id): Path<i64>,
) -> Result<StatusCode, AppError> {
    let deleted = yt_playlist_videos::delete_link(&state.db, link_id).await?;
    if !deleted {
        return Err(not_found(link_id).into());
    }
    Ok(StatusCode::NO_CONTENT)
}

fn not_found(link_id: i64) -> ApiError {
    ApiError::NotFound(format!("playlist-video link with ID {link_id} not found"))
}
