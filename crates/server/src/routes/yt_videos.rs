use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use watchlog_core::error::ApiError;
use watchlog_core::types::SortOrder;
use watchlog_core::views::YtVideoView;
use watchlog_db::repo::yt_videos::{self, YtVideoRow};
use watchlog_db::repo::{yt_channels, yt_playlist_videos, yt_video_visualizations};

use crate::error::AppError;
use crate::patch::double_option;
use crate::routes::yt_channels::YtChannelPublic;
use crate::routes::yt_playlists::YtPlaylistPublic;
use crate::routes::yt_video_visualizations::YtVideoVisualizationPublic;
use crate::state::AppState;
use crate::validate::{check_opt_date, check_page, DEFAULT_LIMIT};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/youtube/videos", get(list_videos).post(create_video))
        .route(
            "/youtube/videos/{video_id}",
            get(get_video).put(update_video).delete(delete_video),
        )
}

// ---------------------------------------------------------------------------
// Shapes
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct YtVideoPublic {
    pub id: String,
    pub channel_id: String,
    pub title: String,
    pub published_at: Option<String>,
    pub description: Option<String>,
    pub url: Option<String>,
}

impl From<YtVideoRow> for YtVideoPublic {
    fn from(r: YtVideoRow) -> Self {
        Self {
            id: r.id,
            channel_id: r.channel_id,
            title: r.title,
            published_at: r.published_at,
            description: r.description,
            url: r.url,
        }
    }
}

/// A playlist membership of a video, carrying the link's position.
#[derive(Debug, Serialize)]
pub struct YtVideoPlaylistEntry {
    pub playlist: YtPlaylistPublic,
    pub position: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct YtVideoWithChannel {
    #[serde(flatten)]
    pub video: YtVideoPublic,
    pub channel: YtChannelPublic,
}

#[derive(Debug, Serialize)]
pub struct YtVideoWithVisualizations {
    #[serde(flatten)]
    pub video: YtVideoPublic,
    pub visualizations: Vec<YtVideoVisualizationPublic>,
}

#[derive(Debug, Serialize)]
pub struct YtVideoWithPlaylists {
    #[serde(flatten)]
    pub video: YtVideoPublic,
    pub playlists: Vec<YtVideoPlaylistEntry>,
}

#[derive(Debug, Serialize)]
pub struct YtVideoFull {
    #[serde(flatten)]
    pub video: YtVideoPublic,
    pub channel: YtChannelPublic,
    pub visualizations: Vec<YtVideoVisualizationPublic>,
    pub playlists: Vec<YtVideoPlaylistEntry>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum YtVideoDetail {
    Basic(YtVideoPublic),
    WithChannel(YtVideoWithChannel),
    WithVisualizations(YtVideoWithVisualizations),
    WithPlaylists(YtVideoWithPlaylists),
    Full(YtVideoFull),
}

async fn load_channel(db: &SqlitePool, video: &YtVideoRow) -> Result<YtChannelPublic, AppError> {
    let channel = yt_channels::get_channel(db, &video.channel_id)
        .await?
        .ok_or_else(|| {
            ApiError::Storage(format!(
                "channel {} missing for video {}",
                video.channel_id, video.id
            ))
        })?;
    Ok(channel.into())
}

fn playlist_entries(rows: Vec<(watchlog_db::repo::yt_playlists::YtPlaylistRow, Option<i64>)>) -> Vec<YtVideoPlaylistEntry> {
    rows.into_iter()
        .map(|(playlist, position)| YtVideoPlaylistEntry {
            playlist: playlist.into(),
            position,
        })
        .collect()
}

async fn shape_video(
    db: &SqlitePool,
    row: YtVideoRow,
    view: YtVideoView,
) -> Result<YtVideoDetail, AppError> {
    let detail = match view {
        YtVideoView::Basic => YtVideoDetail::Basic(row.into()),
        YtVideoView::WithChannel => {
            let channel = load_channel(db, &row).await?;
            YtVideoDetail::WithChannel(YtVideoWithChannel {
                video: row.into(),
                channel,
            })
        }
        YtVideoView::WithVisualizations => {
            let visualizations = yt_video_visualizations::list_for_video(db, &row.id).await?;
            YtVideoDetail::WithVisualizations(YtVideoWithVisualizations {
                video: row.into(),
                visualizations: visualizations.into_iter().map(Into::into).collect(),
            })
        }
        YtVideoView::WithPlaylists => {
            let playlists = yt_playlist_videos::list_playlists_for_video(db, &row.id).await?;
            YtVideoDetail::WithPlaylists(YtVideoWithPlaylists {
                video: row.into(),
                playlists: playlist_entries(playlists),
            })
        }
        YtVideoView::Full => {
            let channel = load_channel(db, &row).await?;
            let visualizations = yt_video_visualizations::list_for_video(db, &row.id).await?;
            let playlists = yt_playlist_videos::list_playlists_for_video(db, &row.id).await?;
            YtVideoDetail::Full(YtVideoFull {
                video: row.into(),
                channel,
                visualizations: visualizations.into_iter().map(Into::into).collect(),
                playlists: playlist_entries(playlists),
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
    view: YtVideoView,
    channel_id: Option<String>,
    #[serde(default)]
    order: SortOrder,
}

async fn list_videos(
    State(state): State<AppState>,
    Query(q): Query<ListQuery>,
) -> Result<Json<Vec<YtVideoDetail>>, AppError> {
    let limit = q.limit.unwrap_or(DEFAULT_LIMIT);
    check_page(q.offset, limit)?;

    let rows =
        yt_videos::list_videos(&state.db, q.channel_id.as_deref(), q.order, q.offset, limit)
            .await?;

    let mut items = Vec::with_capacity(rows.len());
    for row in rows {
        items.push(shape_video(&state.db, row, q.view).await?);
    }
    Ok(Json(items))
}

#[derive(Debug, Deserialize)]
struct GetQuery {
    #[serde(default)]
    view: YtVideoView,
}

async fn get_video(
    State(state): State<AppState>,
    Path(video_id): Path<String>,
    Query(q): Query<GetQuery>,
) -> Result<Json<YtVideoDetail>, AppError> {
    let row = yt_videos::get_video(&state.db, &video_id)
        .await?
        .ok_or_else(|| not_found(&video_id))?;

    Ok(Json(shape_video(&state.db, row, q.view).await?))
}

#[derive(Debug, Deserialize)]
struct YtVideoCreate {
    id: String,
    channel_id: String,
    title: String,
    published_at: Option<String>,
    description: Option<String>,
    url: Option<String>,
}

async fn create_video(
    State(state): State<AppState>,
    Json(body): Json<YtVideoCreate>,
) -> Result<(StatusCode, Json<YtVideoPublic>), AppError> {
    check_opt_date("published_at", body.published_at.as_deref())?;

    let row = YtVideoRow {
        id: body.id,
        channel_id: body.channel_id,
        title: body.title,
        published_at: body.published_at,
        description: body.description,
        url: body.url,
    };
    yt_videos::insert_video(&state.db, &row).await?;

    Ok((StatusCode::CREATED, Json(row.into())))
}

#[derive(Debug, Deserialize)]
struct YtVideoUpdate {
    channel_id: Option<String>,
    title: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    published_at: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    description: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    url: Option<Option<String>>,
}

async fn update_video(
    State(state): State<AppState>,
    Path(video_id): Path<String>,
    Json(body): Json<YtVideoUpdate>,
) -> Result<Json<YtVideoPublic>, AppError> {
    check_opt_date(
        "published_at",
        body.published_at.as_ref().and_then(|v| v.as_deref()),
    )?;

    let mut row = yt_videos::get_video(&state.db, &video_id)
        .await?
        .ok_or_else(|| not_found(&video_id))?;

    if let Some(channel_id) = body.channel_id {
        row.channel_id = channel_id;
    }
    if let Some(title) = body.title {
        row.title = title;
    }
    if let Some(published_at) = body.published_at {
        row.published_at = published_at;
    }
    if let Some(description) = body.description {
        row.description = description;
    }
    if let Some(url) = body.url {
        row.url = url;
    }

    yt_videos::update_video(&state.db, &row).await?;

    let refreshed = yt_videos::get_video(&state.db, &video_id)
        .await?
        .ok_or_else(|| not_found(&video_id))?;
    Ok(Json(refreshed.into()))
}

async fn delete_video(
    State(state): State<AppState>,
    Path(video_id): Path<String>,
) -> Result<StatusCode, AppError> {
    let deleted = yt_videos::delete_video(&state.db, &video_id).await?;
    if !deleted {
        return Err(not_found(&video_id).into());
    }
    Ok(StatusCode::NO_CONTENT)
}

fn not_found(video_id: &str) -> ApiError {
    ApiError::NotFound(format!("YouTube video with ID {video_id} not found"))
}
