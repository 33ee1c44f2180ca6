use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use watchlog_core::error::ApiError;
use watchlog_core::views::YtVideoVisualizationView;
use watchlog_db::repo::yt_video_visualizations::{self, YtVideoVisualizationRow};
use watchlog_db::repo::yt_videos;

use crate::error::AppError;
use crate::patch::double_option;
use crate::routes::yt_videos::YtVideoPublic;
use crate::state::AppState;
use crate::validate::{check_date, check_page, check_resume, DEFAULT_LIMIT};

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/youtube/videos/visualizations",
            get(list_visualizations).post(create_visualization),
        )
        .route(
            "/youtube/videos/visualizations/{visualization_id}",
            get(get_visualization)
                .put(update_visualization)
                .delete(delete_visualization),
        )
}

// ---------------------------------------------------------------------------
// Shapes
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct YtVideoVisualizationPublic {
    pub id: i64,
    pub video_id: String,
    pub visualization_date: String,
    pub resume: Option<i64>,
}

impl From<YtVideoVisualizationRow> for YtVideoVisualizationPublic {
    fn from(r: YtVideoVisualizationRow) -> Self {
        Self {
            id: r.id,
            video_id: r.video_id,
            visualization_date: r.visualization_date,
            resume: r.resume,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct YtVideoVisualizationWithVideo {
    #[serde(flatten)]
    pub visualization: YtVideoVisualizationPublic,
    pub video: YtVideoPublic,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum YtVideoVisualizationDetail {
    Basic(YtVideoVisualizationPublic),
    WithVideo(YtVideoVisualizationWithVideo),
}

async fn shape_visualization(
    db: &SqlitePool,
    row: YtVideoVisualizationRow,
    view: YtVideoVisualizationView,
) -> Result<YtVideoVisualizationDetail, AppError> {
    let detail = match view {
        YtVideoVisualizationView::Basic => YtVideoVisualizationDetail::Basic(row.into()),
        YtVideoVisualizationView::WithVideo => {
            let video = yt_videos::get_video(db, &row.video_id).await?.ok_or_else(|| {
                ApiError::Storage(format!(
                    "video {} missing for visualization {}",
                    row.video_id, row.id
                ))
            })?;
            YtVideoVisualizationDetail::WithVideo(YtVideoVisualizationWithVideo {
                visualization: row.into(),
                video: video.into(),
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
    view: YtVideoVisualizationView,
}

async fn list_visualizations(
    State(state): State<AppState>,
    Query(q): Query<ListQuery>,
) -> Result<Json<Vec<YtVideoVisualizationDetail>>, AppError> {
    let limit = q.limit.unwrap_or(DEFAULT_LIMIT);
    check_page(q.offset, limit)?;

    let rows = yt_video_visualizations::list_visualizations(&state.db, q.offset, limit).await?;

    let mut items = Vec::with_capacity(rows.len());
    for row in rows {
        items.push(shape_visualization(&state.db, row, q.view).await?);
    }
    Ok(Json(items))
}

#[derive(Debug, Deserialize)]
struct GetQuery {
    #[serde(default)]
    view: YtVideoVisualizationView,
}

async fn get_visualization(
    State(state): State<AppState>,
    Path(visualization_id): Path<i64>,
    Query(q): Query<GetQuery>,
) -> Result<Json<YtVideoVisualizationDetail>, AppError> {
    let row = yt_video_visualizations::get_visualization(&state.db, visualization_id)
        .await?
        .ok_or_else(|| not_found(visualization_id))?;

    Ok(Json(shape_visualization(&state.db, row, q.view).await?))
}

#[derive(Debug, Deserialize)]
struct YtVideoVisualizationCreate {
    video_id: String,
    visualization_date: String,
    resume: Option<i64>,
}

async fn create_visualization(
    State(state): State<AppState>,
    Json(body): Json<YtVideoVisualizationCreate>,
) -> Result<(StatusCode, Json<YtVideoVisualizationPublic>), AppError> {
    check_date("visualization_date", &body.visualization_date)?;
    check_resume(body.resume)?;

    let row = yt_video_visualizations::insert_visualization(
        &state.db,
        &body.video_id,
        &body.visualization_date,
        body.resume,
    )
    .await?;

    Ok((StatusCode::CREATED, Json(row.into())))
}

#[derive(Debug, Deserialize)]
struct YtVideoVisualizationUpdate {
    video_id: Option<String>,
    visualization_date: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    resume: Option<Option<i64>>,
}

async fn update_visualization(
    State(state): State<AppState>,
    Path(visualization_id): Path<i64>,
    Json(body): Json<YtVideoVisualizationUpdate>,
) -> Result<Json<YtVideoVisualizationPublic>, AppError> {
    if let Some(date) = body.visualization_date.as_deref() {
        check_date("visualization_date", date)?;
    }
    check_resume(body.resume.flatten())?;

    let mut row = yt_video_visualizations::get_visualization(&state.db, visualization_id)
        .await?
        .ok_or_else(|| not_found(visualization_id))?;

    if let Some(video_id) = body.video_id {
        row.video_id = video_id;
    }
    if let Some(date) = body.visualization_date {
        row.visualization_date = date;
    }
    // explicit null means watched fully
    if let Some(resume) = body.resume {
        row.resume = resume;
    }

    yt_video_visualizations::update_visualization(&state.db, &row).await?;

    let refreshed = yt_video_visualizations::get_visualization(&state.db, visualization_id)
        .await?
        .ok_or_else(|| not_found(visualization_id))?;
    Ok(Json(refreshed.into()))
}

async fn delete_visualization(
    State(state): State<AppState>,
    Path(visualization_id): Path<i64>,
) -> Result<StatusCode, AppError> {
    let deleted =
        yt_video_visualizations::delete_visualization(&state.db, visualization_id).await?;
    if !deleted {
        return Err(not_found(visualization_id).into());
    }
    Ok(StatusCode::NO_CONTENT)
}

fn not_found(visualization_id: i64) -> ApiError {
    ApiError::NotFound(format!(
        "YouTube video visualization with ID {visualization_id} not found"
    ))
}
