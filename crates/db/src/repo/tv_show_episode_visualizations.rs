use sqlx::SqlitePool;

use crate::effective_limit;

#[derive(Debug, Clone)]
pub struct TvShowEpisodeVisualizationRow {
    pub id: i64,
    pub episode_id: i64,
    pub visualization_date: String,
    pub resume: Option<i64>,
}

fn row_to_visualization(r: (i64, i64, String, Option<i64>)) -> TvShowEpisodeVisualizationRow {
    TvShowEpisodeVisualizationRow {
        id: r.0,
        episode_id: r.1,
        visualization_date: r.2,
        resume: r.3,
    }
}

pub async fn list_visualizations(
    pool: &SqlitePool,
    offset: i64,
    limit: i64,
) -> Result<Vec<TvShowEpisodeVisualizationRow>, sqlx::Error> {
    let rows: Vec<(i64, i64, String, Option<i64>)> = sqlx::query_as(
        "SELECT id, episode_id, visualization_date, resume FROM tv_show_episode_visualizations \
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
) -> Result<Option<TvShowEpisodeVisualizationRow>, sqlx::Error> {
    let row: Option<(i64, i64, String, Option<i64>)> = sqlx::query_as(
        "SELECT id, episode_id, visualization_date, resume FROM tv_show_episode_visualizations \
         WHERE id = ?",
    )
    .bind(visualization_id)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(row_to_visualization))
}

pub async fn list_for_episode(
    pool: &SqlitePool,
    episode_id: i64,
) -> Result<Vec<TvShowEpisodeVisualizationRow>, sqlx::Error> {
    let rows: Vec<(i64, i64, String, Option<i64>)> = sqlx::query_as(
        "SELECT id, episode_id, visualization_date, resume FROM tv_show_episode_visualizations \
         WHERE episode_id = ? ORDER BY id",
    )
    .bind(episode_id)
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(row_to_visualization).collect())
}

pub async fn insert_visualization(
    pool: &SqlitePool,
    episode_id: i64,
    visualization_date: &str,
    resume: Option<i64>,
) -> Result<TvShowEpisodeVisualizationRow, sqlx::Error> {
    let result = sqlx::query(
        "INSERT INTO tv_show_episode_visualizations (episode_id, visualization_date, resume) \
         VALUES (?, ?, ?)",
    )
    .bind(episode_id)
    .bind(visualization_date)
    .bind(resume)
    .execute(pool)
    .await?;

    Ok(TvShowEpisodeVisualizationRow {
        id: result.last_insert_rowid(),
        episode_id,
        visualization_date: visualization_date.to_string(),
        resume,
    })
}

pub async fn update_visualization(
    pool: &SqlitePool,
    row: &TvShowEpisodeVisualizationRow,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "UPDATE tv_show_episode_visualizations SET episode_id = ?, visualization_date = ?, \
         resume = ? WHERE id = ?",
    )
    .bind(row.episode_id)
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
    let result = sqlx::query("DELETE FROM tv_show_episode_visualizations WHERE id = ?")
        .bind(visualization_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
