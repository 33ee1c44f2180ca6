use sqlx::SqlitePool;

use crate::effective_limit;

#[derive(Debug, Clone)]
pub struct YtPlaylistRow {
    pub id: String,
    pub channel_id: String,
    pub title: String,
    pub url: String,
}

fn row_to_playlist(r: (String, String, String, String)) -> YtPlaylistRow {
    YtPlaylistRow {
        id: r.0,
        channel_id: r.1,
        title: r.2,
        url: r.3,
    }
}

pub async fn list_playlists(
    pool: &SqlitePool,
    channel_id: Option<&str>,
    offset: i64,
    limit: i64,
) -> Result<Vec<YtPlaylistRow>, sqlx::Error> {
    let rows: Vec<(String, String, String, String)> = match channel_id {
        Some(channel_id) => {
            sqlx::query_as(
                "SELECT id, channel_id, title, url FROM yt_playlists \
                 WHERE channel_id = ? ORDER BY rowid LIMIT ? OFFSET ?",
            )
            .bind(channel_id)
            .bind(effective_limit(limit))
            .bind(offset)
            .fetch_all(pool)
            .await?
        }
        None => {
            sqlx::query_as(
                "SELECT id, channel_id, title, url FROM yt_playlists \
                 ORDER BY rowid LIMIT ? OFFSET ?",
            )
            .bind(effective_limit(limit))
            .bind(offset)
            .fetch_all(pool)
            .await?
        }
    };

    Ok(rows.into_iter().map(row_to_playlist).collect())
}

pub async fn get_playlist(
    pool: &SqlitePool,
    playlist_id: &str,
) -> Result<Option<YtPlaylistRow>, sqlx::Error> {
    let row: Option<(String, String, String, String)> =
        sqlx::query_as("SELECT id, channel_id, title, url FROM yt_playlists WHERE id = ?")
            .bind(playlist_id)
            .fetch_optional(pool)
            .await?;

    Ok(row.map(row_to_playlist))
}

/// All playlists of one channel, for view shaping.
pub async fn list_for_channel(
    pool: &SqlitePool,
    channel_id: &str,
) -> Result<Vec<YtPlaylistRow>, sqlx::Error> {
    let rows: Vec<(String, String, String, String)> = sqlx::query_as(
        "SELECT id, channel_id, title, url FROM yt_playlists WHERE channel_id = ? ORDER BY title",
    )
    .bind(channel_id)
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(row_to_playlist).collect())
}

pub async fn insert_playlist(pool: &SqlitePool, row: &YtPlaylistRow) -> Result<(), sqlx::Error> {
    sqlx::query("INSERT INTO yt_playlists (id, channel_id, title, url) VALUES (?, ?, ?, ?)")
        .bind(&row.id)
        .bind(&row.channel_id)
        .bind(&row.title)
        .bind(&row.url)
        .execute(pool)
        .await?;
    Ok(())
}

pub async fn update_playlist(pool: &SqlitePool, row: &YtPlaylistRow) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE yt_playlists SET channel_id = ?, title = ?, url = ? WHERE id = ?")
        .bind(&row.channel_id)
        .bind(&row.title)
        .bind(&row.url)
        .bind(&row.id)
        .execute(pool)
        .await?;
    Ok(())
}

pub async fn delete_playlist(pool: &SqlitePool, playlist_id: &str) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM yt_playlists WHERE id = ?")
        .bind(playlist_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
