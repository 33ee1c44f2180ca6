use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use watchlog_core::error::ApiError;
use watchlog_core::views::TvShowEpisodeView;
use watchlog_db::repo::tv_show_episodes::{self, TvShowEpisodeRow};
use watchlog_db::repo::{media, tv_show_episode_translations, tv_show_episode_visualizations};

use crate::error::AppError;
use crate::patch::double_option;
use crate::routes::media::MediaPublic;
use crate::routes::tv_show_episode_translations::TvShowEpisodeTranslationPublic;
use crate::routes::tv_show_episode_visualizations::TvShowEpisodeVisualizationPublic;
use crate::state::AppState;
use crate::validate::{check_page, DEFAULT_LIMIT};

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/media/tv_show_episodes",
            get(list_episodes).post(create_episode),
        )
        .route(
            "/media/tv_show_episodes/{episode_id}",
            get(get_episode).put(update_episode).delete(delete_episode),
        )
}

// ---------------------------------------------------------------------------
// Shapes
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct TvShowEpisodePublic {
    pub id: i64,
    pub tv_show_id: i64,
    pub tmdb_id: Option<i64>,
    pub season_num: Option<i64>,
    pub episode_num: Option<i64>,
    pub original_title: String,
}

impl From<TvShowEpisodeRow> for TvShowEpisodePublic {
    fn from(r: TvShowEpisodeRow) -> Self {
        Self {
            id: r.id,
            tv_show_id: r.tv_show_id,
            tmdb_id: r.tmdb_id,
            season_num: r.season_num,
            episode_num: r.episode_num,
            original_title: r.original_title,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TvShowEpisodeWithTvShow {
    #[serde(flatten)]
    pub episode: TvShowEpisodePublic,
    pub tv_show: MediaPublic,
}

#[derive(Debug, Serialize)]
pub struct TvShowEpisodeWithTranslations {
    #[serde(flatten)]
    pub episode: TvShowEpisodePublic,
    pub translations: Vec<TvShowEpisodeTranslationPublic>,
}

#[derive(Debug, Serialize)]
pub struct TvShowEpisodeWithVisualizations {
    #[serde(flatten)]
    pub episode: TvShowEpisodePublic,
    pub visualizations: Vec<TvShowEpisodeVisualizationPublic>,
}

#[derive(Debug, Serialize)]
pub struct TvShowEpisodeFull {
    #[serde(flatten)]
    pub episode: TvShowEpisodePublic,
    pub translations: Vec<TvShowEpisodeTranslationPublic>,
    pub visualizations: Vec<TvShowEpisodeVisualizationPublic>,
}

#[derive(Debug, Serialize)]
pub struct TvShowEpisodeFullWithTvShow {
    #[serde(flatten)]
    pub episode: TvShowEpisodePublic,
    pub translations: Vec<TvShowEpisodeTranslationPublic>,
    pub visualizations: Vec<TvShowEpisodeVisualizationPublic>,
    pub tv_show: MediaPublic,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum TvShowEpisodeDetail {
    Basic(TvShowEpisodePublic),
    WithTvShow(TvShowEpisodeWithTvShow),
    WithTranslations(TvShowEpisodeWithTranslations),
    WithVisualizations(TvShowEpisodeWithVisualizations),
    Full(TvShowEpisodeFull),
    FullWithTvShow(TvShowEpisodeFullWithTvShow),
}

async fn parent_show(db: &SqlitePool, tv_show_id: i64) -> Result<MediaPublic, AppError> {
    let parent = media::get_media(db, tv_show_id).await?.ok_or_else(|| {
        ApiError::Storage(format!("media {tv_show_id} missing for episode"))
    })?;
    Ok(parent.into())
}

async fn shape_episode(
    db: &SqlitePool,
    row: TvShowEpisodeRow,
    view: TvShowEpisodeView,
) -> Result<TvShowEpisodeDetail, AppError> {
    let detail = match view {
        TvShowEpisodeView::Basic => TvShowEpisodeDetail::Basic(row.into()),
        TvShowEpisodeView::WithTvShow => {
            let tv_show = parent_show(db, row.tv_show_id).await?;
            TvShowEpisodeDetail::WithTvShow(TvShowEpisodeWithTvShow {
                episode: row.into(),
                tv_show,
            })
        }
        TvShowEpisodeView::WithTranslations => {
            let translations = tv_show_episode_translations::list_for_episode(db, row.id).await?;
            TvShowEpisodeDetail::WithTranslations(TvShowEpisodeWithTranslations {
                episode: row.into(),
                translations: translations.into_iter().map(Into::into).collect(),
            })
        }
        TvShowEpisodeView::WithVisualizations => {
            let visualizations =
                tv_show_episode_visualizations::list_for_episode(db, row.id).await?;
            TvShowEpisodeDetail::WithVisualizations(TvShowEpisodeWithVisualizations {
                episode: row.into(),
                visualizations: visualizations.into_iter().map(Into::into).collect(),
            })
        }
        TvShowEpisodeView::Full => {
            let translations = tv_show_episode_translations::list_for_episode(db, row.id).await?;
            let visualizations =
                tv_show_episode_visualizations::list_for_episode(db, row.id).await?;
            TvShowEpisodeDetail::Full(TvShowEpisodeFull {
                episode: row.into(),
                translations: translations.into_iter().map(Into::into).collect(),
                visualizations: visualizations.into_iter().map(Into::into).collect(),
            })
        }
        TvShowEpisodeView::FullWithTvShow => {
            let translations = tv_show_episode_translations::list_for_episode(db, row.id).await?;
            let visualizations =
                tv_show_episode_visualizations::list_for_episode(db, row.id).await?;
            let tv_show = parent_show(db, row.tv_show_id).await?;
            TvShowEpisodeDetail::FullWithTvShow(TvShowEpisodeFullWithTvShow {
                episode: row.into(),
                translations: translations.into_iter().map(Into::into).collect(),
                visualizations: visualizations.into_iter().map(Into::into).collect(),
                tv_show,
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
    view: TvShowEpisodeView,
}

async fn list_episodes(
    State(state): State<AppState>,
    Query(q): Query<ListQuery>,
) -> Result<Json<Vec<TvShowEpisodeDetail>>, AppError> {
    let limit = q.limit.unwrap_or(DEFAULT_LIMIT);
    check_page(q.offset, limit)?;

    let rows = tv_show_episodes::list_episodes(&state.db, q.offset, limit).await?;

    let mut items = Vec::with_capacity(rows.len());
    for row in rows {
        items.push(shape_episode(&state.db, row, q.view).await?);
    }
    Ok(Json(items))
}

#[derive(Debug, Deserialize)]
struct GetQuery {
    #[serde(default)]
    view: TvShowEpisodeView,
}

async fn get_episode(
    State(state): State<AppState>,
    Path(episode_id): Path<i64>,
    Query(q): Query<GetQuery>,
) -> Result<Json<TvShowEpisodeDetail>, AppError> {
    let row = tv_show_episodes::get_episode(&state.db, episode_id)
        .await?
        .ok_or_else(|| not_found(episode_id))?;

    Ok(Json(shape_episode(&state.db, row, q.view).await?))
}

#[derive(Debug, Deserialize)]
struct TvShowEpisodeCreate {
    tv_show_id: i64,
    tmdb_id: Option<i64>,
    season_num: Option<i64>,
    episode_num: Option<i64>,
    original_title: String,
}

async fn create_episode(
    State(state): State<AppState>,
    Json(body): Json<TvShowEpisodeCreate>,
) -> Result<(StatusCode, Json<TvShowEpisodePublic>), AppError> {
    let row = tv_show_episodes::insert_episode(
        &state.db,
        body.tv_show_id,
        body.tmdb_id,
        body.season_num,
        body.episode_num,
        &body.original_title,
    )
    .await?;

    Ok((StatusCode::CREATED, Json(row.into())))
}

#[derive(Debug, Deserialize)]
struct TvShowEpisodeUpdate {
    tv_show_id: Option<i64>,
    #[serde(default, deserialize_with = "double_option")]
    tmdb_id: Option<Option<i64>>,
    #[serde(default, deserialize_with = "double_option")]
    season_num: Option<Option<i64>>,
    #[serde(default, deserialize_with = "double_option")]
    episode_num: Option<Option<i64>>,
    original_title: Option<String>,
}

async fn update_episode(
    State(state): State<AppState>,
    Path(episode_id): Path<i64>,
    Json(body): Json<TvShowEpisodeUpdate>,
) -> Result<Json<TvShowEpisodePublic>, AppError> {
    let mut row = tv_show_episodes::get_episode(&state.db, episode_id)
        .await?
        .ok_or_else(|| not_found(episode_id))?;

    if let Some(tv_show_id) = body.tv_show_id {
        row.tv_show_id = tv_show_id;
    }
    if let Some(tmdb_id) = body.tmdb_id {
        row.tmdb_id = tmdb_id;
    }
    if let Some(season_num) = body.season_num {
        row.season_num = season_num;
    }
    if let Some(episode_num) = body.episode_num {
        row.episode_num = episode_num;
    }
    if let Some(original_title) = body.original_title {
        row.original_title = original_title;
    }

    tv_show_episodes::update_episode(&state.db, &row).await?;

    let refreshed = tv_show_episodes::get_episode(&state.db, episode_id)
        .await?
        .ok_or_else(|| not_found(episode_id))?;
    Ok(Json(refreshed.into()))
}

async fn delete_episode(
    State(state): State<AppState>,
    Path(episode_id): Path<i64>,
) -> Result<StatusCode, AppError> {
    let deleted = tv_show_episodes::delete_episode(&state.db, episode_id).await?;
    if !deleted {
        return Err(not_found(episode_id).into());
    }
    Ok(StatusCode::NO_CONTENT)
}

fn not_found(episode_id: i64) -> ApiError {
    ApiError::NotFound(format!("TV show episode with ID {episode_id} not found"))
}
