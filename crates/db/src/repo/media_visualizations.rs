use sqlx::SqlitePool;

use crate::effective_limit;

#[derive(Debug, Clone)]
pub struct MediaVisualizationRow {
    pub id: i64,
    pub media_id: i64,
    pub visualization_date: String,
    pub resume: Option<i64>,
}

fn row_to_visualization(r: (i64, i64, String, Option<i64>)) -> MediaVisualizationRow {
    MediaVisualizationRow {
        id: r.0,
        media_id: r.1,
        visualization_date: r.2,
        resume: r.3,
    }
}

pub async fn list_visualizations(
    pool: &SqlitePool,
    offset: i64,
    limit: i64,
) -> Result<Vec<MediaVisualizationRow>, sqlx::Error> {
    let rows: Vec<(i64, i64, String, Option<i64>)> = sqlx::query_as(
        "SELECT id, media_id, visualization_date, resume FROM media_visualizations \
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
) -> Result<Option<MediaVisualizationRow>, sqlx::Error> {
    let row: Option<(i64, i64, String, Option<i64>)> = sqlx::query_as(
        "SELECT id, media_id, visualization_date, resume FROM media_visualizations WHERE id = ?",
    )
    .bind(visualization_id)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(row_to_visualization))
}

/// All visualizations for one media row, for view shaping.
pub async fn list_for_media(
    pool: &SqlitePool,
    media_id: i64,
) -> Result<Vec<MediaVisualizationRow>, sqlx::Error> {
    let rows: Vec<(i64, i64, String, Option<i64>)> = sqlx::query_as(
        "SELECT id, media_id, visualization_date, resume FROM media_visualizations \
         WHERE media_id = ? ORDER BY id",
    )
    .bind(media_id)
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(row_to_visualization).collect())
}

pub async fn insert_visualization(
    pool: &SqlitePool,
    media_id: i64,
    visualization_date: &str,
    resume: Option<i64>,
) -> Result<MediaVisualizationRow, sqlx::Error> {
    let result = sqlx::query(
        "INSERT INTO media_visualizations (media_id, visualization_date, resume) VALUES (?, ?, ?)",
    )
    .bind(media_id)
    .bind(visualization_date)
    .bind(resume)
    .execute(pool)
    .await?;

    Ok(MediaVisualizationRow {
        id: result.last_insert_rowid(),
        media_id,
        visualization_date: visualization_date.to_string(),
        resume,
    })
}

pub async fn update_visualization(
    pool: &SqlitePool,
    row: &MediaVisualizationRow,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "UPDATE media_visualizations SET media_id = ?, visualization_date = ?, resume = ? \
         WHERE id = ?",
    )
    .bind(row.media_id)
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
    let result = sqlx::query("DELETE FROM media_visualizations WHERE id = ?")
        .bind(visualization_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
