use sqlx::SqlitePool;

use crate::effective_limit;
use crate::repo::yt_playlists::YtPlaylistRow;
use crate::repo::yt_videos::YtVideoRow;

#[derive(Debug, Clone)]
pub struct YtPlaylistVideoRow {
    pub id: i64,
    pub playlist_id: String,
    pub video_id: String,
    pub position: Option<i64>,
}

fn row_to_link(r: (i64, String, String, Option<i64>)) -> YtPlaylistVideoRow {
    YtPlaylistVideoRow {
        id: r.0,
        playlist_id: r.1,
        video_id: r.2,
        position: r.3,
    }
}

pub async fn list_links(
    pool: &SqlitePool,
    offset: i64,
    limit: i64,
) -> Result<Vec<YtPlaylistVideoRow>, sqlx::Error> {
    let rows: Vec<(i64, String, String, Option<i64>)> = sqlx::query_as(
        "SELECT id, playlist_id, video_id, position FROM yt_playlist_videos \
         ORDER BY id LIMIT ? OFFSET ?",
    )
    .bind(effective_limit(limit))
    .bind(offset)
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(row_to_link).collect())
}

pub async fn get_link(
    pool: &SqlitePool,
    link_id: i64,
) -> Result<Option<YtPlaylistVideoRow>, sqlx::Error> {
    let row: Option<(i64, String, String, Option<i64>)> = sqlx::query_as(
        "SELECT id, playlist_id, video_id, position FROM yt_playlist_videos WHERE id = ?",
    )
    .bind(link_id)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(row_to_link))
}

/// Playlists a video belongs to, joined with the link position.
pub async fn list_playlists_for_video(
    pool: &SqlitePool,
    video_id: &str,
) -> Result<Vec<(YtPlaylistRow, Option<i64>)>, sqlx::Error> {
    let rows: Vec<(String, String, String, String, Option<i64>)> = sqlx::query_as(
        "SELECT p.id, p.channel_id, p.title, p.url, pv.position \
         FROM yt_playlist_videos pv \
         JOIN yt_playlists p ON p.id = pv.playlist_id \
         WHERE pv.video_id = ? ORDER BY pv.id",
    )
    .bind(video_id)
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(|(id, channel_id, title, url, position)| {
            (
                YtPlaylistRow {
                    id,
                    channel_id,
                    title,
                    url,
                },
                position,
            )
        })
        .collect())
}

/// Videos inside a playlist, joined with the link position. Positioned
/// entries come first, in order; unpositioned ones trail in insertion order.
pub async fn list_videos_for_playlist(
    pool: &SqlitePool,
    playlist_id: &str,
) -> Result<Vec<(YtVideoRow, Option<i64>)>, sqlx::Error> {
    let rows: Vec<(
        String,
        String,
        String,
        Option<String>,
        Option<String>,
        Option<String>,
        Option<i64>,
    )> = sqlx::query_as(
        "SELECT v.id, v.channel_id, v.title, v.published_at, v.description, v.url, pv.position \
         FROM yt_playlist_videos pv \
         JOIN yt_videos v ON v.id = pv.video_id \
         WHERE pv.playlist_id = ? \
         ORDER BY pv.position IS NULL, pv.position, pv.id",
    )
    .bind(playlist_id)
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(
            |(id, channel_id, title, published_at, description, url, position)| {
                (
                    YtVideoRow {
                        id,
                        channel_id,
                        title,
                        published_at,
                        description,
                        url,
                    },
                    position,
                )
            },
        )
        .collect())
}

pub async fn insert_link(
    pool: &SqlitePool,
    playlist_id: &str,
    video_id: &str,
    position: Option<i64>,
) -> Result<YtPlaylistVideoRow, sqlx::Error> {
    let result = sqlx::query(
        "INSERT INTO yt_playlist_videos (playlist_id, video_id, position) VALUES (?, ?, ?)",
    )
    .bind(playlist_id)
    .bind(video_id)
    .bind(position)
    .execute(pool)
    .await?;

    Ok(YtPlaylistVideoRow {
        id: result.last_insert_rowid(),
        playlist_id: playlist_id.to_string(),
        video_id: video_id.to_string(),
        position,
    })
}

pub async fn update_link(pool: &SqlitePool, row: &YtPlaylistVideoRow) -> Result<(), sqlx::Error> {
    sqlx::query(
        "UPDATE yt_playlist_videos SET playlist_id = ?, video_id = ?, position = ? WHERE id = ?",
    )
    .bind(&row.playlist_id)
    .bind(&row.video_id)
    .bind(row.position)
    .bind(row.id)
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn delete_link(pool: &SqlitePool, link_id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM yt_playlist_videos WHERE id = ?")
        .bind(link_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
