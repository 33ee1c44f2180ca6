use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use watchlog_core::error::ApiError;
use watchlog_core::views::TvShowEpisodeTranslationView;
use watchlog_db::repo::tv_show_episode_translations::{self, TvShowEpisodeTranslationRow};
use watchlog_db::repo::tv_show_episodes;

use crate::error::AppError;
use crate::routes::tv_show_episodes::TvShowEpisodePublic;
use crate::state::AppState;
use crate::validate::{check_page, DEFAULT_LIMIT};

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/media/tv_show_episodes/translations",
            get(list_translations).post(create_translation),
        )
        .route(
            "/media/tv_show_episodes/translations/{episode_id}",
            get(get_translation)
                .put(update_translation)
                .delete(delete_translation),
        )
}

// ---------------------------------------------------------------------------
// Shapes
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct TvShowEpisodeTranslationPublic {
    pub episode_id: i64,
    pub language_code: String,
    pub title: String,
}

impl From<TvShowEpisodeTranslationRow> for TvShowEpisodeTranslationPublic {
    fn from(r: TvShowEpisodeTranslationRow) -> Self {
        Self {
            episode_id: r.episode_id,
            language_code: r.language_code,
            title: r.title,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TvShowEpisodeTranslationWithEpisode {
    #[serde(flatten)]
    pub translation: TvShowEpisodeTranslationPublic,
    pub episode: TvShowEpisodePublic,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum TvShowEpisodeTranslationDetail {
    Basic(TvShowEpisodeTranslationPublic),
    WithEpisode(TvShowEpisodeTranslationWithEpisode),
}

async fn shape_translation(
    db: &SqlitePool,
    row: TvShowEpisodeTranslationRow,
    view: TvShowEpisodeTranslationView,
) -> Result<TvShowEpisodeTranslationDetail, AppError> {
    let detail = match view {
        TvShowEpisodeTranslationView::Basic => TvShowEpisodeTranslationDetail::Basic(row.into()),
        TvShowEpisodeTranslationView::WithEpisode => {
            let episode = tv_show_episodes::get_episode(db, row.episode_id)
                .await?
                .ok_or_else(|| {
                    ApiError::Storage(format!(
                        "episode {} missing for translation",
                        row.episode_id
                    ))
                })?;
            TvShowEpisodeTranslationDetail::WithEpisode(TvShowEpisodeTranslationWithEpisode {
                translation: row.into(),
                episode: episode.into(),
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
    view: TvShowEpisodeTranslationView,
}

async fn list_translations(
    State(state): State<AppState>,
    Query(q): Query<ListQuery>,
) -> Result<Json<Vec<TvShowEpisodeTranslationDetail>>, AppError> {
    let limit = q.limit.unwrap_or(DEFAULT_LIMIT);
    check_page(q.offset, limit)?;

    let rows = tv_show_episode_translations::list_translations(&state.db, q.offset, limit).await?;

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
    view: TvShowEpisodeTranslationView,
}

async fn get_translation(
    State(state): State<AppState>,
    Path(episode_id): Path<i64>,
    Query(q): Query<GetQuery>,
) -> Result<Json<TvShowEpisodeTranslationDetail>, AppError> {
    let row = tv_show_episode_translations::get_translation(
        &state.db,
        episode_id,
        q.language_code.as_deref(),
    )
    .await?
    .ok_or_else(|| not_found(episode_id, q.language_code.as_deref()))?;

    Ok(Json(shape_translation(&state.db, row, q.view).await?))
}

#[derive(Debug, Deserialize)]
struct TvShowEpisodeTranslationCreate {
    episode_id: i64,
    language_code: String,
    title: String,
}

async fn create_translation(
    State(state): State<AppState>,
    Json(body): Json<TvShowEpisodeTranslationCreate>,
) -> Result<(StatusCode, Json<TvShowEpisodeTranslationPublic>), AppError> {
    let row = tv_show_episode_translations::insert_translation(
        &state.db,
        body.episode_id,
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
struct TvShowEpisodeTranslationUpdate {
    episode_id: Option<i64>,
    language_code: Option<String>,
    title: Option<String>,
}

async fn update_translation(
    State(state): State<AppState>,
    Path(episode_id): Path<i64>,
    Query(key): Query<KeyQuery>,
    Json(body): Json<TvShowEpisodeTranslationUpdate>,
) -> Result<Json<TvShowEpisodeTranslationPublic>, AppError> {
    let mut row = tv_show_episode_translations::get_translation(
        &state.db,
        episode_id,
        Some(&key.language_code),
    )
    .await?
    .ok_or_else(|| not_found(episode_id, Some(&key.language_code)))?;

    if let Some(new_episode_id) = body.episode_id {
        row.episode_id = new_episode_id;
    }
    if let Some(new_code) = body.language_code {
        row.language_code = new_code;
    }
    if let Some(title) = body.title {
        row.title = title;
    }

    tv_show_episode_translations::update_translation(
        &state.db,
        episode_id,
        &key.language_code,
        &row,
    )
    .await?;

    let refreshed = tv_show_episode_translations::get_translation(
        &state.db,
        row.episode_id,
        Some(&row.language_code),
    )
    .await?
    .ok_or_else(|| not_found(row.episode_id, Some(&row.language_code)))?;
    Ok(Json(refreshed.into()))
}

async fn delete_translation(
    State(state): State<AppState>,
    Path(episode_id): Path<i64>,
    Query(key): Query<KeyQuery>,
) -> Result<StatusCode, AppError> {
    let deleted = tv_show_episode_translations::delete_translation(
        &state.db,
        episode_id,
        &key.language_code,
    )
    .await?;
    if !deleted {
        return Err(not_found(episode_id, Some(&key.language_code)).into());
    }
    Ok(StatusCode::NO_CONTENT)
}

fn not_found(episode_id: i64, language_code: Option<&str>) -> ApiError {
    match language_code {
        Some(code) => ApiError::NotFound(format!(
            "Episode translation with ID {episode_id} and language code {code} not found"
        )),
        None => ApiError::NotFound(format!("Episode translation with ID {episode_id} not found")),
    }
}
