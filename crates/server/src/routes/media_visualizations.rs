use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use watchlog_core::error::ApiError;
use watchlog_core::views::MediaVisualizationView;
use watchlog_db::repo::media;
use watchlog_db::repo::media_visualizations::{self, MediaVisualizationRow};

use crate::error::AppError;
use crate::patch::double_option;
use crate::routes::media::MediaPublic;
use crate::state::AppState;
use crate::validate::{check_date, check_opt_date, check_page, check_resume, DEFAULT_LIMIT};

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/media/visualizations",
            get(list_visualizations).post(create_visualization),
        )
        .route(
            "/media/visualizations/{visualization_id}",
            get(get_visualization)
                .put(update_visualization)
                .delete(delete_visualization),
        )
}

// ---------------------------------------------------------------------------
// Shapes
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct MediaVisualizationPublic {
    pub id: i64,
    pub media_id: i64,
    pub visualization_date: String,
    pub resume: Option<i64>,
}

impl From<MediaVisualizationRow> for MediaVisualizationPublic {
    fn from(r: MediaVisualizationRow) -> Self {
        Self {
            id: r.id,
            media_id: r.media_id,
            visualization_date: r.visualization_date,
            resume: r.resume,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MediaVisualizationWithMedia {
    #[serde(flatten)]
    pub visualization: MediaVisualizationPublic,
    pub media: MediaPublic,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum MediaVisualizationDetail {
    Basic(MediaVisualizationPublic),
    WithMedia(MediaVisualizationWithMedia),
}

async fn shape_visualization(
    db: &SqlitePool,
    row: MediaVisualizationRow,
    view: MediaVisualizationView,
) -> Result<MediaVisualizationDetail, AppError> {
    let detail = match view {
        MediaVisualizationView::Basic => MediaVisualizationDetail::Basic(row.into()),
        MediaVisualizationView::WithMedia => {
            let parent = media::get_media(db, row.media_id).await?.ok_or_else(|| {
                ApiError::Storage(format!("media {} missing for visualization", row.media_id))
            })?;
            MediaVisualizationDetail::WithMedia(MediaVisualizationWithMedia {
                visualization: row.into(),
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
    view: MediaVisualizationView,
}

async fn list_visualizations(
    State(state): State<AppState>,
    Query(q): Query<ListQuery>,
) -> Result<Json<Vec<MediaVisualizationDetail>>, AppError> {
    let limit = q.limit.unwrap_or(DEFAULT_LIMIT);
    check_page(q.offset, limit)?;

    let rows = media_visualizations::list_visualizations(&state.db, q.offset, limit).await?;

    let mut items = Vec::with_capacity(rows.len());
    for row in rows {
        items.push(shape_visualization(&state.db, row, q.view).await?);
    }
    Ok(Json(items))
}

#[derive(Debug, Deserialize)]
struct GetQuery {
    #[serde(default)]
    view: MediaVisualizationView,
}

async fn get_visualization(
    State(state): State<AppState>,
    Path(visualization_id): Path<i64>,
    Query(q): Query<GetQuery>,
) -> Result<Json<MediaVisualizationDetail>, AppError> {
    let row = media_visualizations::get_visualization(&state.db, visualization_id)
        .await?
        .ok_or_else(|| not_found(visualization_id))?;

    Ok(Json(shape_visualization(&state.db, row, q.view).await?))
}

#[derive(Debug, Deserialize)]
struct MediaVisualizationCreate {
    media_id: i64,
    visualization_date: String,
    resume: Option<i64>,
}

async fn create_visualization(
    State(state): State<AppState>,
    Json(body): Json<MediaVisualizationCreate>,
) -> Result<(StatusCode, Json<MediaVisualizationPublic>), AppError> {
    check_date("visualization_date", &body.visualization_date)?;
    check_resume(body.resume)?;

    let row = media_visualizations::insert_visualization(
        &state.db,
        body.media_id,
        &body.visualization_date,
        body.resume,
    )
    .await?;

    Ok((StatusCode::CREATED, Json(row.into())))
}

#[derive(Debug, Deserialize)]
struct MediaVisualizationUpdate {
    media_id: Option<i64>,
    visualization_date: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    resume: Option<Option<i64>>,
}

async fn update_visualization(
    State(state): State<AppState>,
    Path(visualization_id): Path<i64>,
    Json(body): Json<MediaVisualizationUpdate>,
) -> Result<Json<MediaVisualizationPublic>, AppError> {
    check_opt_date("visualization_date", body.visualization_date.as_deref())?;
    check_resume(body.resume.flatten())?;

    let mut row = media_visualizations::get_visualization(&state.db, visualization_id)
        .await?
        .ok_or_else(|| not_found(visualization_id))?;

    if let Some(media_id) = body.media_id {
        row.media_id = media_id;
    }
    if let Some(visualization_date) = body.visualization_date {
        row.visualization_date = visualization_date;
    }
    // explicit null means watched fully
    if let Some(resume) = body.resume {
        row.resume = resume;
    }

    media_visualizations::update_visualization(&state.db, &row).await?;

    let refreshed = media_visualizations::get_visualization(&state.db, visualization_id)
        .await?
        .ok_or_else(|| not_found(visualization_id))?;
    Ok(Json(refreshed.into()))
}

async fn delete_visualization(
    State(state): State<AppState>,
    Path(visualization_id): Path<i64>,
) -> Result<StatusCode, AppError> {
    let deleted =
        media_visualizations::delete_visualization(&state.db, visualization_id).await?;
    if !deleted {
        return Err(not_found(visualization_id).into());
    }
    Ok(StatusCode::NO_CONTENT)
}

fn not_found(visualization_id: i64) -> ApiError {
    ApiError::NotFound(format!(
        "Media visualization with ID {visualization_id} not found"
    ))
}
