use sqlx::SqlitePool;

use crate::effective_limit;

#[derive(Debug, Clone)]
pub struct YtVideoVisualizationRow {
    pub id: i64,
    pub video_id: String,
    pub visualization_date: String,
    pub resume: Option<i64>,
}

fn row_to_visualization(r: (i64, String, String, Option<i64>)) -> YtVideoVisualizationRow {
    YtVideoVisualizationRow {
        id: r.0,
        video_id: r.1,
        visualization_date: r.2,
        resume: r.3,
    }
}

pub async fn list_visualizations(
    pool: &SqlitePool,
    offset: i64,
    limit: i64,
) -> Result<Vec<YtVideoVisualizationRow>, sqlx::Error> {
    let rows: Vec<(i64, String, String, Option<i64>)> = sqlx::query_as(
        "SELECT id, video_id, visualization_date, resume FROM yt_video_visualizations \
         ORDER BY id LIMIT ? OFFSET ?",
    )
    .bind(effective_limit(limit))
    .bind(offset)
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(row_to_visualization).collect())
}

pub async fn get_visualization(
    pool: &SqlitePool,
    visualization_id: i64,
) -> Result<Option<YtVideoVisualizationRow>, sqlx::Error> {
    let row: Option<(i64, String, String, Option<i64>)> = sqlx::query_as(
        "SELECT id, video_id, visualization_date, resume FROM yt_video_visualizations \
         WHERE id = ?",
    )
    .bind(visualization_id)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(row_to_visualization))
}

pub async fn list_for_video(
    pool: &SqlitePool,
    video_id: &str,
) -> Result<Vec<YtVideoVisualizationRow>, sqlx::Error> {
    let rows: Vec<(i64, String, String, Option<i64>)> = sqlx::query_as(
        "SELECT id, video_id, visualization_date, resume FROM yt_video_visualizations \
         WHERE video_id = ? ORDER BY id",
    )
    .bind(video_id)
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(row_to_visualization).collect())
}

pub async fn insert_visualization(
    pool: &SqlitePool,
    video_id: &str,
    visualization_date: &str,
    resume: Option<i64>,
) -> Result<YtVideoVisualizationRow, sqlx::Error> {
    let result = sqlx::query(
        "INSERT INTO yt_video_visualizations (video_id, visualization_date, resume) \
         VALUES (?, ?, ?)",
    )
    .bind(video_id)
    .bind(visualization_date)
    .bind(resume)
    .execute(pool)
    .await?;

    Ok(YtVideoVisualizationRow {
        id: result.last_insert_rowid(),
        video_id: video_id.to_string(),
        visualization_date: visualization_date.to_string(),
        resume,
    })
}

pub async fn update_visualization(
    pool: &SqlitePool,
    row: &YtVideoVisualizationRow,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "UPDATE yt_video_visualizations SET video_id = ?, visualization_date = ?, resume = ? \
         WHERE id = ?",
    )
    .bind(&row.video_id)
    .bind(&row.visualization_date)
    .bind(row.resume)
    .bind(row.id)
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn delete_visualization(
    pool: &SqlitePool,
    visualization_id: i64,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM yt_video_visualizations WHERE id = ?")
        .bind(visualization_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
