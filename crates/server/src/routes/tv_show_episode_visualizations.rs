use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use watchlog_core::error::ApiError;
use watchlog_core::views::TvShowEpisodeVisualizationView;
use watchlog_db::repo::tv_show_episode_visualizations::{self, TvShowEpisodeVisualizationRow};
use watchlog_db::repo::tv_show_episodes;

use crate::error::AppError;
use crate::patch::double_option;
use crate::routes::tv_show_episodes::TvShowEpisodePublic;
use crate::state::AppState;
use crate::validate::{check_date, check_opt_date, check_page, check_resume, DEFAULT_LIMIT};

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/media/tv_show_episodes/visualizations",
            get(list_visualizations).post(create_visualization),
        )
        .route(
            "/media/tv_show_episodes/visualizations/{visualization_id}",
            get(get_visualization)
                .put(update_visualization)
                .delete(delete_visualization),
        )
}

// ---------------------------------------------------------------------------
// Shapes
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct TvShowEpisodeVisualizationPublic {
    pub id: i64,
    pub episode_id: i64,
    pub visualization_date: String,
    pub resume: Option<i64>,
}

impl From<TvShowEpisodeVisualizationRow> for TvShowEpisodeVisualizationPublic {
    fn from(r: TvShowEpisodeVisualizationRow) -> Self {
        Self {
            id: r.id,
            episode_id: r.episode_id,
            visualization_date: r.visualization_date,
            resume: r.resume,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TvShowEpisodeVisualizationWithEpisode {
    #[serde(flatten)]
    pub visualization: TvShowEpisodeVisualizationPublic,
    pub episode: TvShowEpisodePublic,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum TvShowEpisodeVisualizationDetail {
    Basic(TvShowEpisodeVisualizationPublic),
    WithEpisode(TvShowEpisodeVisualizationWithEpisode),
}

async fn shape_visualization(
    db: &SqlitePool,
    row: TvShowEpisodeVisualizationRow,
    view: TvShowEpisodeVisualizationView,
) -> Result<TvShowEpisodeVisualizationDetail, AppError> {
    let detail = match view {
        TvShowEpisodeVisualizationView::Basic => {
            TvShowEpisodeVisualizationDetail::Basic(row.into())
        }
        TvShowEpisodeVisualizationView::WithEpisode => {
            let episode = tv_show_episodes::get_episode(db, row.episode_id)
                .await?
                .ok_or_else(|| {
                    ApiError::Storage(format!(
                        "episode {} missing for visualization",
                        row.episode_id
                    ))
                })?;
            TvShowEpisodeVisualizationDetail::WithEpisode(
                TvShowEpisodeVisualizationWithEpisode {
                    visualization: row.into(),
                    episode: episode.into(),
                },
            )
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
    view: TvShowEpisodeVisualizationView,
}

async fn list_visualizations(
    State(state): State<AppState>,
    Query(q): Query<ListQuery>,
) -> Result<Json<Vec<TvShowEpisodeVisualizationDetail>>, AppError> {
    let limit = q.limit.unwrap_or(DEFAULT_LIMIT);
    check_page(q.offset, limit)?;

    let rows =
        tv_show_episode_visualizations::list_visualizations(&state.db, q.offset, limit).await?;

    let mut items = Vec::with_capacity(rows.len());
    for row in rows {
        items.push(shape_visualization(&state.db, row, q.view).await?);
    }
    Ok(Json(items))
}

#[derive(Debug, Deserialize)]
struct GetQuery {
    #[serde(default)]
    view: TvShowEpisodeVisualizationView,
}

async fn get_visualization(
    State(state): State<AppState>,
    Path(visualization_id): Path<i64>,
    Query(q): Query<GetQuery>,
) -> Result<Json<TvShowEpisodeVisualizationDetail>, AppError> {
    let row = tv_show_episode_visualizations::get_visualization(&state.db, visualization_id)
        .await?
        .ok_or_else(|| not_found(visualization_id))?;

    Ok(Json(shape_visualization(&state.db, row, q.view).await?))
}

#[derive(Debug, Deserialize)]
struct TvShowEpisodeVisualizationCreate {
    episode_id: i64,
    visualization_date: String,
    resume: Option<i64>,
}

async fn create_visualization(
    State(state): State<AppState>,
    Json(body): Json<TvShowEpisodeVisualizationCreate>,
) -> Result<(StatusCode, Json<TvShowEpisodeVisualizationPublic>), AppError> {
    check_date("visualization_date", &body.visualization_date)?;
    check_resume(body.resume)?;

    let row = tv_show_episode_visualizations::insert_visualization(
        &state.db,
        body.episode_id,
        &body.visualization_date,
        body.resume,
    )
    .await?;

    Ok((StatusCode::CREATED, Json(row.into())))
}

#[derive(Debug, Deserialize)]
struct TvShowEpisodeVisualizationUpdate {
    episode_id: Option<i64>,
    visualization_date: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    resume: Option<Option<i64>>,
}

async fn update_visualization(
    State(state): State<AppState>,
    Path(visualization_id): Path<i64>,
    Json(body): Json<TvShowEpisodeVisualizationUpdate>,
) -> Result<Json<TvShowEpisodeVisualizationPublic>, AppError> {
    check_opt_date("visualization_date", body.visualization_date.as_deref())?;
    check_resume(body.resume.flatten())?;

    let mut row = tv_show_episode_visualizations::get_visualization(&state.db, visualization_id)
        .await?
        .ok_or_else(|| not_found(visualization_id))?;

    if let Some(episode_id) = body.episode_id {
        row.episode_id = episode_id;
    }
    if let Some(visualization_date) = body.visualization_date {
        row.visualization_date = visualization_date;
    }
    // explicit null means watched fully
    if let Some(resume) = body.resume {
        row.resume = resume;
    }

    tv_show_episode_visualizations::update_visualization(&state.db, &row).await?;

    let refreshed =
        tv_show_episode_visualizations::get_visualization(&state.db, visualization_id)
            .await?
            .ok_or_else(|| not_found(visualization_id))?;
    Ok(Json(refreshed.into()))
}

async fn delete_visualization(
    State(state): State<AppState>,
    Path(visualization_id): Path<i64>,
) -> Result<StatusCode, AppError> {
    let deleted =
        tv_show_episode_visualizations::delete_visualization(&state.db, visualization_id).await?;
    if !deleted {
        return Err(not_found(visualization_id).into());
    }
    Ok(StatusCode::NO_CONTENT)
}

fn not_found(visualization_id: i64) -> ApiError {
    ApiError::NotFound(format!(
        "Episode visualization with ID {visualization_id} not found"
    ))
}
