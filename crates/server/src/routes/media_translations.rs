use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use watchlog_core::error::ApiError;
use watchlog_core::views::MediaTranslationView;
use watchlog_db::repo::media;
use watchlog_db::repo::media_translations::{self, MediaTranslationRow};

use crate::error::AppError;
use crate::routes::media::MediaPublic;
use crate::state::AppState;
use crate::validate::{check_page, DEFAULT_LIMIT};

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/media/translations",
            get(list_translations).post(create_translation),
        )
        .route(
            "/media/translations/{media_id}",
            get(get_translation)
                .put(update_translation)
                .delete(delete_translation),
        )
}

// ---------------------------------------------------------------------------
// Shapes
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct MediaTranslationPublic {
    pub media_id: i64,
    pub language_code: String,
    pub title: String,
}

impl From<MediaTranslationRow> for MediaTranslationPublic {
    fn from(r: MediaTranslationRow) -> Self {
        Self {
            media_id: r.media_id,
            language_code: r.language_code,
            title: r.title,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MediaTranslationWithMedia {
    #[serde(flatten)]
    pub translation: MediaTranslationPublic,
    pub media: MediaPublic,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum MediaTranslationDetail {
    Basic(MediaTranslationPublic),
    WithMedia(MediaTranslationWithMedia),
}

async fn shape_translation(
    db: &SqlitePool,
    row: MediaTranslationRow,
    view: MediaTranslationView,
) -> Result<MediaTranslationDetail, AppError> {
    let detail = match view {
        MediaTranslationView::Basic => MediaTranslationDetail::Basic(row.into()),
        MediaTranslationView::WithMedia => {
            // The FK guarantees the parent; a miss here is a broken database.
            let parent = media::get_media(db, row.media_id).await?.ok_or_else(|| {
                ApiError::Storage(format!("media {} missing for translation", row.media_id))
            })?;
            MediaTranslationDetail::WithMedia(MediaTranslationWithMedia {
                translation: row.into(),
                media: parent.into(),
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
    view: MediaTranslationView,
}

async fn list_translations(
    State(state): State<AppState>,
    Query(q): Query<ListQuery>,
) -> Result<Json<Vec<MediaTranslationDetail>>, AppError> {
    let limit = q.limit.unwrap_or(DEFAULT_LIMIT);
    check_page(q.offset, limit)?;

    let rows = media_translations::list_translations(&state.db, q.offset, limit).await?;

    let mut items = Vec::with_capacity(rows.len());
    for row in rows {
        items.push(shape_translation(&state.db, row, q.view).await?);
    }
    Ok(Json(items))
}

#[derive(Debug, Deserialize)]
struct GetQuery {
    language_code: Option<String>,
    #[serde(default)]
    view: MediaTranslationView,
}

async fn get_translation(
    State(state): State<AppState>,
    Path(media_id): Path<i64>,
    Query(q): Query<GetQuery>,
) -> Result<Json<MediaTranslationDetail>, AppError> {
    let row = media_translations::get_translation(&state.db, media_id, q.language_code.as_deref())
        .await?
        .ok_or_else(|| not_found(media_id, q.language_code.as_deref()))?;

    Ok(Json(shape_translation(&state.db, row, q.view).await?))
}

#[derive(Debug, Deserialize)]
struct MediaTranslationCreate {
    media_id: i64,
    language_code: String,
    title: String,
}

async fn create_translation(
    State(state): State<AppState>,
    Json(body): Json<MediaTranslationCreate>,
) -> Result<(StatusCode, Json<MediaTranslationPublic>), AppError> {
    let row = media_translations::insert_translation(
        &state.db,
        body.media_id,
        &body.language_code,
        &body.title,
    )
    .await?;

    Ok((StatusCode::CREATED, Json(row.into())))
}

#[derive(Debug, Deserialize)]
struct KeyQuery {
    language_code: String,
}

#[derive(Debug, Deserialize)]
struct MediaTranslationUpdate {
    media_id: Option<i64>,
    language_code: Option<String>,
    title: Option<String>,
}

async fn update_translation(
    State(state): State<AppState>,
    Path(media_id): Path<i64>,
    Query(key): Query<KeyQuery>,
    Json(body): Json<MediaTranslationUpdate>,
) -> Result<Json<MediaTranslationPublic>, AppError> {
    let mut row =
        media_translations::get_translation(&state.db, media_id, Some(&key.language_code))
            .await?
            .ok_or_else(|| not_found(media_id, Some(&key.language_code)))?;

    if let Some(new_media_id) = body.media_id {
        row.media_id = new_media_id;
    }
    if let Some(new_code) = body.language_code {
        row.language_code = new_code;
    }
    if let Some(title) = body.title {
        row.title = title;
    }

    media_translations::update_translation(&state.db, media_id, &key.language_code, &row).await?;

    let refreshed =
        media_translations::get_translation(&state.db, row.media_id, Some(&row.language_code))
            .await?
            .ok_or_else(|| not_found(row.media_id, Some(&row.language_code)))?;
    Ok(Json(refreshed.into()))
}

async fn delete_translation(
    State(state): State<AppState>,
    Path(media_id): Path<i64>,
    Query(key): Query<KeyQuery>,
) -> Result<StatusCode, AppError> {
    let deleted =
        media_translations::delete_translation(&state.db, media_id, &key.language_code).await?;
    if !deleted {
        return Err(not_found(media_id, Some(&key.language_code)).into());
    }
    Ok(StatusCode::NO_CONTENT)
}

fn not_found(media_id: i64, language_code: Option<&str>) -> ApiError {
    match language_code {
        Some(code) => ApiError::NotFound(format!(
            "Media translation with ID {media_id} and language code {code} not found"
        )),
        None => ApiError::NotFound(format!("Media translation with ID {media_id} not found")),
    }
}
