use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use watchlog_core::error::ApiError;
use watchlog_core::views::YtPlaylistView;
use watchlog_db::repo::yt_playlists::{self, YtPlaylistRow};
use watchlog_db::repo::{yt_channels, yt_playlist_videos};

use crate::error::AppError;
use crate::routes::yt_channels::YtChannelPublic;
use crate::routes::yt_videos::YtVideoPublic;
use crate::state::AppState;
use crate::validate::{check_page, DEFAULT_LIMIT};

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/youtube/playlists",
            get(list_playlists).post(create_playlist),
        )
        .route(
            "/youtube/playlists/{playlist_id}",
            get(get_playlist)
                .put(update_playlist)
                .delete(delete_playlist),
        )
}

// ---------------------------------------------------------------------------
// Shapes
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct YtPlaylistPublic {
    pub id: String,
    pub channel_id: String,
    pub title: String,
    pub url: String,
}

impl From<YtPlaylistRow> for YtPlaylistPublic {
    fn from(r: YtPlaylistRow) -> Self {
        Self {
            id: r.id,
            channel_id: r.channel_id,
            title: r.title,
            url: r.url,
        }
    }
}

/// A video inside a playlist, carrying the link's position.
#[derive(Debug, Serialize)]
pub struct YtPlaylistVideoEntry {
    pub video: YtVideoPublic,
    pub position: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct YtPlaylistWithChannel {
    #[serde(flatten)]
    pub playlist: YtPlaylistPublic,
    pub channel: YtChannelPublic,
}

#[derive(Debug, Serialize)]
pub struct YtPlaylistWithVideos {
    #[serde(flatten)]
    pub playlist: YtPlaylistPublic,
    pub videos: Vec<YtPlaylistVideoEntry>,
}

#[derive(Debug, Serialize)]
pub struct YtPlaylistFull {
    #[serde(flatten)]
    pub playlist: YtPlaylistPublic,
    pub channel: YtChannelPublic,
    pub videos: Vec<YtPlaylistVideoEntry>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum YtPlaylistDetail {
    Basic(YtPlaylistPublic),
    WithChannel(YtPlaylistWithChannel),
    WithVideos(YtPlaylistWithVideos),
    Full(YtPlaylistFull),
}

async fn load_channel(
    db: &SqlitePool,
    playlist: &YtPlaylistRow,
) -> Result<YtChannelPublic, AppError> {
    let channel = yt_channels::get_channel(db, &playlist.channel_id)
        .await?
        .ok_or_else(|| {
            ApiError::Storage(format!(
                "channel {} missing for playlist {}",
                playlist.channel_id, playlist.id
            ))
        })?;
    Ok(channel.into())
}

async fn load_videos(
    db: &SqlitePool,
    playlist_id: &str,
) -> Result<Vec<YtPlaylistVideoEntry>, AppError> {
    let rows = yt_playlist_videos::list_videos_for_playlist(db, playlist_id).await?;
    Ok(rows
        .into_iter()
        .map(|(video, position)| YtPlaylistVideoEntry {
            video: video.into(),
            position,
        })
        .collect())
}

async fn shape_playlist(
    db: &SqlitePool,
    row: YtPlaylistRow,
    view: YtPlaylistView,
) -> Result<YtPlaylistDetail, AppError> {
    let detail = match view {
        YtPlaylistView::Basic => YtPlaylistDetail::Basic(row.into()),
        YtPlaylistView::WithChannel => {
            let channel = load_channel(db, &row).await?;
            YtPlaylistDetail::WithChannel(YtPlaylistWithChannel {
                playlist: row.into(),
                channel,
            })
        }
        YtPlaylistView::WithVideos => {
            let videos = load_videos(db, &row.id).await?;
            YtPlaylistDetail::WithVideos(YtPlaylistWithVideos {
                playlist: row.into(),
                videos,
            })
        }
        YtPlaylistView::Full => {
            let channel = load_channel(db, &row).await?;
            let videos = load_videos(db, &row.id).await?;
            YtPlaylistDetail::Full(YtPlaylistFull {
                playlist: row.into(),
                channel,
                videos,
            })
        }
    };
    Ok(detail)
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct ListQuery {
    #[serde(default)]
    offset: i64,
    limit: Option<i64>,
    #[serde(default)]
    view: YtPlaylistView,
    channel_id: Option<String>,
}

async fn list_playlists(
    State(state): State<AppState>,
    Query(q): Query<ListQuery>,
) -> Result<Json<Vec<YtPlaylistDetail>>, AppError> {
    let limit = q.limit.unwrap_or(DEFAULT_LIMIT);
    check_page(q.offset, limit)?;

    let rows =
        yt_playlists::list_playlists(&state.db, q.channel_id.as_deref(), q.offset, limit).await?;

    let mut items = Vec::with_capacity(rows.len());
    for row in rows {
        items.push(shape_playlist(&state.db, row, q.view).await?);
    }
    Ok(Json(items))
}

#[derive(Debug, Deserialize)]
struct GetQuery {
    #[serde(default)]
    view: YtPlaylistView,
}

async fn get_playlist(
    State(state): State<AppState>,
    Path(playlist_id): Path<String>,
    Query(q): Query<GetQuery>,
) -> Result<Json<YtPlaylistDetail>, AppError> {
    let row = yt_playlists::get_playlist(&state.db, &playlist_id)
        .await?
        .ok_or_else(|| not_found(&playlist_id))?;

    Ok(Json(shape_playlist(&state.db, row, q.view).await?))
}

#[derive(Debug, Deserialize)]
struct YtPlaylistCreate {
    id: String,
    channel_id: String,
    title: String,
    url: String,
}

async fn create_playlist(
    State(state): State<AppState>,
    Json(body): Json<YtPlaylistCreate>,
) -> Result<(StatusCode, Json<YtPlaylistPublic>), AppError> {
    let row = YtPlaylistRow {
        id: body.id,
        channel_id: body.channel_id,
        title: body.title,
        url: body.url,
    };
    yt_playlists::insert_playlist(&state.db, &row).await?;

    Ok((StatusCode::CREATED, Json(row.into())))
}

#[derive(Debug, Deserialize)]
struct YtPlaylistUpdate {
    channel_id: Option<String>,
    title: Option<String>,
    url: Option<String>,
}

async fn update_playlist(
    State(state): State<AppState>,
    Path(playlist_id): Path<String>,
    Json(body): Json<YtPlaylistUpdate>,
) -> Result<Json<YtPlaylistPublic>, AppError> {
    let mut row = yt_playlists::get_playlist(&state.db, &playlist_id)
        .await?
        .ok_or_else(|| not_found(&playlist_id))?;

    if let Some(channel_id) = body.channel_id {
        row.channel_id = channel_id;
    }
    if let Some(title) = body.title {
        row.title = title;
    }
    if let Some(url) = body.url {
        row.url = url;
    }

    yt_playlists::update_playlist(&state.db, &row).await?;

    let refreshed = yt_playlists::get_playlist(&state.db, &playlist_id)
        .await?
        .ok_or_else(|| not_found(&playlist_id))?;
    Ok(Json(refreshed.into()))
}

async fn delete_playlist(
    State(state): State<AppState>,
    Path(playlist_id): Path<String>,
) -> Result<StatusCode, AppError> {
    let deleted = yt_playlists::delete_playlist(&state.db, &playlist_id).await?;
    if !deleted {
        return Err(not_found(&playlist_id).into());
    }
    Ok(StatusCode::NO_CONTENT)
}

fn not_found(playlist_id: &str) -> ApiError {
    ApiError::NotFound(format!("YouTube playlist with ID {playlist_id} not found"))
}
