use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use watchlog_core::error::ApiError;
use watchlog_core::types::MediaType;
use watchlog_core::views::MediaView;
use watchlog_db::repo::media::{self, MediaRow};
use watchlog_db::repo::{media_translations, media_visualizations, tv_show_episodes};

use crate::error::AppError;
use crate::patch::double_option;
use crate::routes::media_translations::MediaTranslationPublic;
use crate::routes::media_visualizations::MediaVisualizationPublic;
use crate::routes::tv_show_episodes::TvShowEpisodePublic;
use crate::state::AppState;
use crate::validate::{check_opt_date, check_page, DEFAULT_LIMIT};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/media", get(list_media).post(create_media))
        .route(
            "/media/{media_id}",
            get(get_media).put(update_media).delete(delete_media),
        )
}

// ---------------------------------------------------------------------------
// Shapes
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct MediaPublic {
    pub id: i64,
    pub tmdb_id: Option<i64>,
    #[serde(rename = "type")]
    pub kind: String,
    pub original_title: String,
    pub release_date: Option<String>,
}

impl From<MediaRow> for MediaPublic {
    fn from(r: MediaRow) -> Self {
        Self {
            id: r.id,
            tmdb_id: r.tmdb_id,
            kind: r.kind,
            original_title: r.original_title,
            release_date: r.release_date,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MediaWithTranslations {
    #[serde(flatten)]
    pub media: MediaPublic,
    pub translations: Vec<MediaTranslationPublic>,
}

#[derive(Debug, Serialize)]
pub struct MediaWithVisualizations {
    #[serde(flatten)]
    pub media: MediaPublic,
    pub visualizations: Vec<MediaVisualizationPublic>,
}

#[derive(Debug, Serialize)]
pub struct MediaFull {
    #[serde(flatten)]
    pub media: MediaPublic,
    pub translations: Vec<MediaTranslationPublic>,
    pub visualizations: Vec<MediaVisualizationPublic>,
}

#[derive(Debug, Serialize)]
pub struct MediaFullWithEpisodes {
    #[serde(flatten)]
    pub media: MediaPublic,
    pub translations: Vec<MediaTranslationPublic>,
    pub visualizations: Vec<MediaVisualizationPublic>,
    pub tv_show_episodes: Vec<TvShowEpisodePublic>,
}

/// The view-selected response shape for one media row.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum MediaDetail {
    Basic(MediaPublic),
    WithTranslations(MediaWithTranslations),
    WithVisualizations(MediaWithVisualizations),
    Full(MediaFull),
    FullWithEpisodes(MediaFullWithEpisodes),
}

/// Load whatever related rows the view asks for and wrap the row in the
/// matching shape. The episode list is only populated for the widest view;
/// for non-TV rows it simply comes back empty.
pub async fn shape_media(
    db: &SqlitePool,
    row: MediaRow,
    view: MediaView,
) -> Result<MediaDetail, AppError> {
    let detail = match view {
        MediaView::Basic => MediaDetail::Basic(row.into()),
        MediaView::WithTranslations => {
            let translations = media_translations::list_for_media(db, row.id).await?;
            MediaDetail::WithTranslations(MediaWithTranslations {
                media: row.into(),
                translations: translations.into_iter().map(Into::into).collect(),
            })
        }
        MediaView::WithVisualizations => {
            let visualizations = media_visualizations::list_for_media(db, row.id).await?;
            MediaDetail::WithVisualizations(MediaWithVisualizations {
                media: row.into(),
                visualizations: visualizations.into_iter().map(Into::into).collect(),
            })
        }
        MediaView::Full => {
            let translations = media_translations::list_for_media(db, row.id).await?;
            let visualizations = media_visualizations::list_for_media(db, row.id).await?;
            MediaDetail::Full(MediaFull {
                media: row.into(),
                translations: translations.into_iter().map(Into::into).collect(),
                visualizations: visualizations.into_iter().map(Into::into).collect(),
            })
        }
        MediaView::FullWithTvShowEpisodes => {
            let translations = media_translations::list_for_media(db, row.id).await?;
            let visualizations = media_visualizations::list_for_media(db, row.id).await?;
            let episodes = tv_show_episodes::list_for_show(db, row.id).await?;
            MediaDetail::FullWithEpisodes(MediaFullWithEpisodes {
                media: row.into(),
                translations: translations.into_iter().map(Into::into).collect(),
                visualizations: visualizations.into_iter().map(Into::into).collect(),
                tv_show_episodes: episodes.into_iter().map(Into::into).collect(),
            })
        }
    };
    Ok(detail)
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct ListMediaQuery {
    #[serde(default)]
    offset: i64,
    limit: Option<i64>,
    media_type: Option<MediaType>,
    #[serde(default)]
    view: MediaView,
}

async fn list_media(
    State(state): State<AppState>,
    Query(q): Query<ListMediaQuery>,
) -> Result<Json<Vec<MediaDetail>>, AppError> {
    let limit = q.limit.unwrap_or(DEFAULT_LIMIT);
    check_page(q.offset, limit)?;

    let rows = media::list_media(
        &state.db,
        q.media_type.map(MediaType::as_str),
        q.offset,
        limit,
    )
    .await?;

    let mut items = Vec::with_capacity(rows.len());
    for row in rows {
        items.push(shape_media(&state.db, row, q.view).await?);
    }
    Ok(Json(items))
}

#[derive(Debug, Deserialize)]
struct GetMediaQuery {
    #[serde(default)]
    view: MediaView,
}

async fn get_media(
    State(state): State<AppState>,
    Path(media_id): Path<i64>,
    Query(q): Query<GetMediaQuery>,
) -> Result<Json<MediaDetail>, AppError> {
    let row = media::get_media(&state.db, media_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Media with ID {media_id} not found")))?;

    Ok(Json(shape_media(&state.db, row, q.view).await?))
}

#[derive(Debug, Deserialize)]
struct MediaCreate {
    tmdb_id: Option<i64>,
    #[serde(rename = "type")]
    kind: MediaType,
    original_title: String,
    release_date: Option<String>,
}

async fn create_media(
    State(state): State<AppState>,
    Json(body): Json<MediaCreate>,
) -> Result<(StatusCode, Json<MediaPublic>), AppError> {
    check_opt_date("release_date", body.release_date.as_deref())?;

    let row = media::insert_media(
        &state.db,
        body.tmdb_id,
        body.kind.as_str(),
        &body.original_title,
        body.release_date.as_deref(),
    )
    .await?;

    Ok((StatusCode::CREATED, Json(row.into())))
}

#[derive(Debug, Deserialize)]
struct MediaUpdate {
    #[serde(default, deserialize_with = "double_option")]
    tmdb_id: Option<Option<i64>>,
    #[serde(rename = "type")]
    kind: Option<MediaType>,
    original_title: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    release_date: Option<Option<String>>,
}

async fn update_media(
    State(state): State<AppState>,
    Path(media_id): Path<i64>,
    Json(body): Json<MediaUpdate>,
) -> Result<Json<MediaPublic>, AppError> {
    check_opt_date(
        "release_date",
        body.release_date.as_ref().and_then(|v| v.as_deref()),
    )?;

    let mut row = media::get_media(&state.db, media_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Media with ID {media_id} not found")))?;

    // Apply only the fields the caller supplied; an explicit null clears
    if let Some(tmdb_id) = body.tmdb_id {
        row.tmdb_id = tmdb_id;
    }
    if let Some(kind) = body.kind {
        row.kind = kind.as_str().to_string();
    }
    if let Some(original_title) = body.original_title {
        row.original_title = original_title;
    }
    if let Some(release_date) = body.release_date {
        row.release_date = release_date;
    }

    media::update_media(&state.db, &row).await?;

    let refreshed = media::get_media(&state.db, media_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Media with ID {media_id} not found")))?;
    Ok(Json(refreshed.into()))
}

async fn delete_media(
    State(state): State<AppState>,
    Path(media_id): Path<i64>,
) -> Result<StatusCode, AppError> {
    let deleted = media::delete_media(&state.db, media_id).await?;
    if !deleted {
        return Err(ApiError::NotFound(format!("Media with ID {media_id} not found")).into());
    }
    Ok(StatusCode::NO_CONTENT)
}
