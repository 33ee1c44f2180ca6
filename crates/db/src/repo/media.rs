use sqlx::SqlitePool;

use crate::effective_limit;

#[derive(Debug, Clone)]
pub struct MediaRow {
    pub id: i64,
    pub tmdb_id: Option<i64>,
    pub kind: String,
    pub original_title: String,
    pub release_date: Option<String>,
}

fn row_to_media(r: (i64, Option<i64>, String, String, Option<String>)) -> MediaRow {
    MediaRow {
        id: r.0,
        tmdb_id: r.1,
        kind: r.2,
        original_title: r.3,
        release_date: r.4,
    }
}

/// List media rows in insertion order, optionally narrowed to one kind.
/// `limit <= 0` means unbounded.
pub async fn list_media(
    pool: &SqlitePool,
    kind: Option<&str>,
    offset: i64,
    limit: i64,
) -> Result<Vec<MediaRow>, sqlx::Error> {
    let rows: Vec<(i64, Option<i64>, String, String, Option<String>)> = match kind {
        Some(kind) => {
            sqlx::query_as(
                "SELECT id, tmdb_id, kind, original_title, release_date FROM media \
                 WHERE kind = ? ORDER BY id LIMIT ? OFFSET ?",
            )
            .bind(kind)
            .bind(effective_limit(limit))
            .bind(offset)
            .fetch_all(pool)
            .await?
        }
        None => {
            sqlx::query_as(
                "SELECT id, tmdb_id, kind, original_title, release_date FROM media \
                 ORDER BY id LIMIT ? OFFSET ?",
            )
            .bind(effective_limit(limit))
            .bind(offset)
            .fetch_all(pool)
            .await?
        }
    };

    Ok(rows.into_iter().map(row_to_media).collect())
}

pub async fn get_media(pool: &SqlitePool, media_id: i64) -> Result<Option<MediaRow>, sqlx::Error> {
    let row: Option<(i64, Option<i64>, String, String, Option<String>)> = sqlx::query_as(
        "SELECT id, tmdb_id, kind, original_title, release_date FROM media WHERE id = ?",
    )
    .bind(media_id)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(row_to_media))
}

pub async fn insert_media(
    pool: &SqlitePool,
    tmdb_id: Option<i64>,
    kind: &str,
    original_title: &str,
    release_date: Option<&str>,
) -> Result<MediaRow, sqlx::Error> {
    let result = sqlx::query(
        "INSERT INTO media (tmdb_id, kind, original_title, release_date) VALUES (?, ?, ?, ?)",
    )
    .bind(tmdb_id)
    .bind(kind)
    .bind(original_title)
    .bind(release_date)
    .execute(pool)
    .await?;

    Ok(MediaRow {
        id: result.last_insert_rowid(),
        tmdb_id,
        kind: kind.to_string(),
        original_title: original_title.to_string(),
        release_date: release_date.map(str::to_string),
    })
}

/// Write back a fully merged row. Callers load the row first and apply only
/// the fields supplied in the partial update.
pub async fn update_media(pool: &SqlitePool, row: &MediaRow) -> Result<(), sqlx::Error> {
    sqlx::query(
        "UPDATE media SET tmdb_id = ?, kind = ?, original_title = ?, release_date = ? \
         WHERE id = ?",
    )
    .bind(row.tmdb_id)
    .bind(&row.kind)
    .bind(&row.original_title)
    .bind(row.release_date.as_deref())
    .bind(row.id)
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn delete_media(pool: &SqlitePool, media_id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM media WHERE id = ?")
        .bind(media_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn test_pool() -> SqlitePool {
        let pool = crate::connect(":memory:").await.unwrap();
        crate::migrate::run(&pool).await.unwrap();
        pool
    }

    #[tokio::test]
    async fn zero_limit_returns_every_row() {
        let pool = test_pool().await;
        for i in 0..150 {
            insert_media(&pool, None, "movie", &format!("Movie {i:03}"), None)
                .await
                .unwrap();
        }

        // limit=0 lifts the bound entirely, beyond any default page size
        let all = list_media(&pool, None, 0, 0).await.unwrap();
        assert_eq!(all.len(), 150);

        let page = list_media(&pool, None, 0, 100).await.unwrap();
        assert_eq!(page.len(), 100);

        // offset still applies without a limit
        let tail = list_media(&pool, None, 140, 0).await.unwrap();
        assert_eq!(tail.len(), 10);
        assert_eq!(tail[0].original_title, "Movie 140");
    }
}
