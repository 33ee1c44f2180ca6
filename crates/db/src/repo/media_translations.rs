use sqlx::SqlitePool;

use crate::effective_limit;

#[derive(Debug, Clone)]
pub struct MediaTranslationRow {
    pub media_id: i64,
    pub language_code: String,
    pub title: String,
}

fn row_to_translation(r: (i64, String, String)) -> MediaTranslationRow {
    MediaTranslationRow {
        media_id: r.0,
        language_code: r.1,
        title: r.2,
    }
}

pub async fn list_translations(
    pool: &SqlitePool,
    offset: i64,
    limit: i64,
) -> Result<Vec<MediaTranslationRow>, sqlx::Error> {
    let rows: Vec<(i64, String, String)> = sqlx::query_as(
        "SELECT media_id, language_code, title FROM media_translations \
         ORDER BY media_id, language_code LIMIT ? OFFSET ?",
    )
    .bind(effective_limit(limit))
    .bind(offset)
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(row_to_translation).collect())
}

/// Fetch one translation. Without a language code any row sharing the media
/// id may come back.
pub async fn get_translation(
    pool: &SqlitePool,
    media_id: i64,
    language_code: Option<&str>,
) -> Result<Option<MediaTranslationRow>, sqlx::Error> {
    let row: Option<(i64, String, String)> = match language_code {
        Some(code) => {
            sqlx::query_as(
                "SELECT media_id, language_code, title FROM media_translations \
                 WHERE media_id = ? AND language_code = ?",
            )
            .bind(media_id)
            .bind(code)
            .fetch_optional(pool)
            .await?
        }
        None => {
            sqlx::query_as(
                "SELECT media_id, language_code, title FROM media_translations \
                 WHERE media_id = ? LIMIT 1",
            )
            .bind(media_id)
            .fetch_optional(pool)
            .await?
        }
    };

    Ok(row.map(row_to_translation))
}

/// All translations for one media row, for view shaping.
pub async fn list_for_media(
    pool: &SqlitePool,
    media_id: i64,
) -> Result<Vec<MediaTranslationRow>, sqlx::Error> {
    let rows: Vec<(i64, String, String)> = sqlx::query_as(
        "SELECT media_id, language_code, title FROM media_translations \
         WHERE media_id = ? ORDER BY language_code",
    )
    .bind(media_id)
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(row_to_translation).collect())
}

pub async fn insert_translation(
    pool: &SqlitePool,
    media_id: i64,
    language_code: &str,
    title: &str,
) -> Result<MediaTranslationRow, sqlx::Error> {
    sqlx::query("INSERT INTO media_translations (media_id, language_code, title) VALUES (?, ?, ?)")
        .bind(media_id)
        .bind(language_code)
        .bind(title)
        .execute(pool)
        .await?;

    Ok(MediaTranslationRow {
        media_id,
        language_code: language_code.to_string(),
        title: title.to_string(),
    })
}

/// Replace the row found at the old composite key with the merged row.
/// The key fields are themselves updatable.
pub async fn update_translation(
    pool: &SqlitePool,
    media_id: i64,
    language_code: &str,
    row: &MediaTranslationRow,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "UPDATE media_translations SET media_id = ?, language_code = ?, title = ? \
         WHERE media_id = ? AND language_code = ?",
    )
    .bind(row.media_id)
    .bind(&row.language_code)
    .bind(&row.title)
    .bind(media_id)
    .bind(language_code)
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn delete_translation(
    pool: &SqlitePool,
    media_id: i64,
    language_code: &str,
) -> Result<bool, sqlx::Error> {
    let result =
        sqlx::query("DELETE FROM media_translations WHERE media_id = ? AND language_code = ?")
            .bind(media_id)
            .bind(language_code)
            .execute(pool)
            .await?;
    Ok(result.rows_affected() > 0)
}
