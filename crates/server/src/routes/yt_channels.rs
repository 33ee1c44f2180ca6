use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use watchlog_core::error::ApiError;
use watchlog_core::views::YtChannelView;
use watchlog_db::repo::yt_channels::{self, YtChannelRow};
use watchlog_db::repo::{yt_playlists, yt_videos};

use crate::error::AppError;
use crate::patch::double_option;
use crate::routes::yt_playlists::YtPlaylistPublic;
use crate::routes::yt_videos::YtVideoPublic;
use crate::state::AppState;
use crate::validate::{check_opt_date, check_page, DEFAULT_LIMIT};

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/youtube/channels",
            get(list_channels).post(create_channel),
        )
        .route(
            "/youtube/channels/{channel_id}",
            get(get_channel).put(update_channel).delete(delete_channel),
        )
}

// ---------------------------------------------------------------------------
// Shapes
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct YtChannelPublic {
    pub id: String,
    pub name: String,
    pub url: String,
    pub created_at: Option<String>,
    pub description: Option<String>,
}

impl From<YtChannelRow> for YtChannelPublic {
    fn from(r: YtChannelRow) -> Self {
        Self {
            id: r.id,
            name: r.name,
            url: r.url,
            created_at: r.created_at,
            description: r.description,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct YtChannelWithVideos {
    #[serde(flatten)]
    pub channel: YtChannelPublic,
    pub videos: Vec<YtVideoPublic>,
}

#[derive(Debug, Serialize)]
pub struct YtChannelWithPlaylists {
    #[serde(flatten)]
    pub channel: YtChannelPublic,
    pub playlists: Vec<YtPlaylistPublic>,
}

#[derive(Debug, Serialize)]
pub struct YtChannelFull {
    #[serde(flatten)]
    pub channel: YtChannelPublic,
    pub videos: Vec<YtVideoPublic>,
    pub playlists: Vec<YtPlaylistPublic>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum YtChannelDetail {
    Basic(YtChannelPublic),
    WithVideos(YtChannelWithVideos),
    WithPlaylists(YtChannelWithPlaylists),
    Full(YtChannelFull),
}

async fn shape_channel(
    db: &SqlitePool,
    row: YtChannelRow,
    view: YtChannelView,
) -> Result<YtChannelDetail, AppError> {
    let detail = match view {
        YtChannelView::Basic => YtChannelDetail::Basic(row.into()),
        YtChannelView::WithVideos => {
            let videos = yt_videos::list_for_channel(db, &row.id).await?;
            YtChannelDetail::WithVideos(YtChannelWithVideos {
                channel: row.into(),
                videos: videos.into_iter().map(Into::into).collect(),
            })
        }
        YtChannelView::WithPlaylists => {
            let playlists = yt_playlists::list_for_channel(db, &row.id).await?;
            YtChannelDetail::WithPlaylists(YtChannelWithPlaylists {
                channel: row.into(),
                playlists: playlists.into_iter().map(Into::into).collect(),
            })
        }
        YtChannelView::Full => {
            let videos = yt_videos::list_for_channel(db, &row.id).await?;
            let playlists = yt_playlists::list_for_channel(db, &row.id).await?;
            YtChannelDetail::Full(YtChannelFull {
                channel: row.into(),
                videos: videos.into_iter().map(Into::into).collect(),
                playlists: playlists.into_iter().map(Into::into).collect(),
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
    view: YtChannelView,
}

async fn list_channels(
    State(state): State<AppState>,
    Query(q): Query<ListQuery>,
) -> Result<Json<Vec<YtChannelDetail>>, AppError> {
    let limit = q.limit.unwrap_or(DEFAULT_LIMIT);
    check_page(q.offset, limit)?;

    let rows = yt_channels::list_channels(&state.db, q.offset, limit).await?;

    let mut items = Vec::with_capacity(rows.len());
    for row in rows {
        items.push(shape_channel(&state.db, row, q.view).await?);
    }
    Ok(Json(items))
}

#[derive(Debug, Deserialize)]
struct GetQuery {
    #[serde(default)]
    view: YtChannelView,
}

async fn get_channel(
    State(state): State<AppState>,
    Path(channel_id): Path<String>,
    Query(q): Query<GetQuery>,
) -> Result<Json<YtChannelDetail>, AppError> {
    let row = yt_channels::get_channel(&state.db, &channel_id)
        .await?
        .ok_or_else(|| not_found(&channel_id))?;

    Ok(Json(shape_channel(&state.db, row, q.view).await?))
}

#[derive(Debug, Deserialize)]
struct YtChannelCreate {
    id: String,
    name: String,
    url: String,
    created_at: Option<String>,
    description: Option<String>,
}

async fn create_channel(
    State(state): State<AppState>,
    Json(body): Json<YtChannelCreate>,
) -> Result<(StatusCode, Json<YtChannelPublic>), AppError> {
    check_opt_date("created_at", body.created_at.as_deref())?;

    let row = YtChannelRow {
        id: body.id,
        name: body.name,
        url: body.url,
        created_at: body.created_at,
        description: body.description,
    };
    yt_channels::insert_channel(&state.db, &row).await?;

    Ok((StatusCode::CREATED, Json(row.into())))
}

#[derive(Debug, Deserialize)]
struct YtChannelUpdate {
    name: Option<String>,
    url: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    created_at: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    description: Option<Option<String>>,
}

async fn update_channel(
    State(state): State<AppState>,
    Path(channel_id): Path<String>,
    Json(body): Json<YtChannelUpdate>,
) -> Result<Json<YtChannelPublic>, AppError> {
    check_opt_date(
        "created_at",
        body.created_at.as_ref().and_then(|v| v.as_deref()),
    )?;

    let mut row = yt_channels::get_channel(&state.db, &channel_id)
        .await?
        .ok_or_else(|| not_found(&channel_id))?;

    if let Some(name) = body.name {
        row.name = name;
    }
    if let Some(url) = body.url {
        row.url = url;
    }
    if let Some(created_at) = body.created_at {
        row.created_at = created_at;
    }
    if let Some(description) = body.description {
        row.description = description;
    }

    yt_channels::update_channel(&state.db, &row).await?;

    let refreshed = yt_channels::get_channel(&state.db, &channel_id)
        .await?
        .ok_or_else(|| not_found(&channel_id))?;
    Ok(Json(refreshed.into()))
}

async fn delete_channel(
    State(state): State<AppState>,
    Path(channel_id): Path<String>,
) -> Result<StatusCode, AppError> {
    let deleted = yt_channels::delete_channel(&state.db, &channel_id).await?;
    if !deleted {
        return Err(not_found(&channel_id).into());
    }
    Ok(StatusCode::NO_CONTENT)
}

fn not_found(channel_id: &str) -> ApiError {
    ApiError::NotFound(format!("YouTube channel with ID {channel_id} not found"))
}
