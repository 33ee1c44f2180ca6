use sqlx::SqlitePool;

use crate::effective_limit;

#[derive(Debug, Clone)]
pub struct YtChannelRow {
    pub id: String,
    pub name: String,
    pub url: String,
    pub created_at: Option<String>,
    pub description: Option<String>,
}

type ChannelTuple = (String, String, String, Option<String>, Option<String>);

fn row_to_channel(r: ChannelTuple) -> YtChannelRow {
    YtChannelRow {
        id: r.0,
        name: r.1,
        url: r.2,
        created_at: r.3,
        description: r.4,
    }
}

pub async fn list_channels(
    pool: &SqlitePool,
    offset: i64,
    limit: i64,
) -> Result<Vec<YtChannelRow>, sqlx::Error> {
    let rows: Vec<ChannelTuple> = sqlx::query_as(
        "SELECT id, name, url, created_at, description FROM yt_channels \
         ORDER BY rowid LIMIT ? OFFSET ?",
    )
    .bind(effective_limit(limit))
    .bind(offset)
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(row_to_channel).collect())
}

pub async fn get_channel(
    pool: &SqlitePool,
    channel_id: &str,
) -> Result<Option<YtChannelRow>, sqlx::Error> {
    let row: Option<ChannelTuple> =
        sqlx::query_as("SELECT id, name, url, created_at, description FROM yt_channels WHERE id = ?")
            .bind(channel_id)
            .fetch_optional(pool)
            .await?;

    Ok(row.map(row_to_channel))
}

/// Channel ids come from YouTube, not from storage.
pub async fn insert_channel(pool: &SqlitePool, row: &YtChannelRow) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO yt_channels (id, name, url, created_at, description) VALUES (?, ?, ?, ?, ?)",
    )
    .bind(&row.id)
    .bind(&row.name)
    .bind(&row.url)
    .bind(row.created_at.as_deref())
    .bind(row.description.as_deref())
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn update_channel(pool: &SqlitePool, row: &YtChannelRow) -> Result<(), sqlx::Error> {
    sqlx::query(
        "UPDATE yt_channels SET name = ?, url = ?, created_at = ?, description = ? WHERE id = ?",
    )
    .bind(&row.name)
    .bind(&row.url)
    .bind(row.created_at.as_deref())
    .bind(row.description.as_deref())
    .bind(&row.id)
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn delete_channel(pool: &SqlitePool, channel_id: &str) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM yt_channels WHERE id = ?")
        .bind(channel_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
