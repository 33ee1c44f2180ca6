use sqlx::SqlitePool;
use watchlog_core::types::SortOrder;

use crate::effective_limit;

#[derive(Debug, Clone)]
pub struct YtVideoRow {
    pub id: String,
    pub channel_id: String,
    pub title: String,
    pub published_at: Option<String>,
    pub description: Option<String>,
    pub url: Option<String>,
}

type VideoTuple = (
    String,
    String,
    String,
    Option<String>,
    Option<String>,
    Option<String>,
);

fn row_to_video(r: VideoTuple) -> YtVideoRow {
    YtVideoRow {
        id: r.0,
        channel_id: r.1,
        title: r.2,
        published_at: r.3,
        description: r.4,
        url: r.5,
    }
}

/// List videos sorted by title, optionally narrowed to one channel.
pub async fn list_videos(
    pool: &SqlitePool,
    channel_id: Option<&str>,
    order: SortOrder,
    offset: i64,
    limit: i64,
) -> Result<Vec<YtVideoRow>, sqlx::Error> {
    // ORDER BY direction cannot be bound as a parameter; SortOrder is a
    // closed enum so the interpolation stays safe.
    let rows: Vec<VideoTuple> = match channel_id {
        Some(channel_id) => {
            let query = format!(
                "SELECT id, channel_id, title, published_at, description, url FROM yt_videos \
                 WHERE channel_id = ? ORDER BY title {} LIMIT ? OFFSET ?",
                order.as_sql()
            );
            sqlx::query_as(&query)
                .bind(channel_id)
                .bind(effective_limit(limit))
                .bind(offset)
                .fetch_all(pool)
                .await?
        }
        None => {
            let query = format!(
                "SELECT id, channel_id, title, published_at, description, url FROM yt_videos \
                 ORDER BY title {} LIMIT ? OFFSET ?",
                order.as_sql()
            );
            sqlx::query_as(&query)
                .bind(effective_limit(limit))
                .bind(offset)
                .fetch_all(pool)
                .await?
        }
    };

    Ok(rows.into_iter().map(row_to_video).collect())
}

pub async fn get_video(pool: &SqlitePool, video_id: &str) -> Result<Option<YtVideoRow>, sqlx::Error> {
    let row: Option<VideoTuple> = sqlx::query_as(
        "SELECT id, channel_id, title, published_at, description, url FROM yt_videos WHERE id = ?",
    )
    .bind(video_id)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(row_to_video))
}

/// All videos of one channel, title order, for view shaping.
pub async fn list_for_channel(
    pool: &SqlitePool,
    channel_id: &str,
) -> Result<Vec<YtVideoRow>, sqlx::Error> {
    let rows: Vec<VideoTuple> = sqlx::query_as(
        "SELECT id, channel_id, title, published_at, description, url FROM yt_videos \
         WHERE channel_id = ? ORDER BY title",
    )
    .bind(channel_id)
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(row_to_video).collect())
}

pub async fn insert_video(pool: &SqlitePool, row: &YtVideoRow) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO yt_videos (id, channel_id, title, published_at, description, url) \
         VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(&row.id)
    .bind(&row.channel_id)
    .bind(&row.title)
    .bind(row.published_at.as_deref())
    .bind(row.description.as_deref())
    .bind(row.url.as_deref())
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn update_video(pool: &SqlitePool, row: &YtVideoRow) -> Result<(), sqlx::Error> {
    sqlx::query(
        "UPDATE yt_videos SET channel_id = ?, title = ?, published_at = ?, description = ?, \
         url = ? WHERE id = ?",
    )
    .bind(&row.channel_id)
    .bind(&row.title)
    .bind(row.published_at.as_deref())
    .bind(row.description.as_deref())
    .bind(row.url.as_deref())
    .bind(&row.id)
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn delete_video(pool: &SqlitePool, video_id: &str) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM yt_videos WHERE id = ?")
        .bind(video_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
