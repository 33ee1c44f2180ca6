use sqlx::SqlitePool;

use crate::effective_limit;

#[derive(Debug, Clone)]
pub struct TvShowEpisodeTranslationRow {
    pub episode_id: i64,
    pub language_code: String,
    pub title: String,
}

fn row_to_translation(r: (i64, String, String)) -> TvShowEpisodeTranslationRow {
    TvShowEpisodeTranslationRow {
        episode_id: r.0,
        language_code: r.1,
        title: r.2,
    }
}

pub async fn list_translations(
    pool: &SqlitePool,
    offset: i64,
    limit: i64,
) -> Result<Vec<TvShowEpisodeTranslationRow>, sqlx::Error> {
    let rows: Vec<(i64, String, String)> = sqlx::query_as(
        "SELECT episode_id, language_code, title FROM tv_show_episode_translations \
         ORDER BY episode_id, language_code LIMIT ? OFFSET ?",
    )
    .bind(effective_limit(limit))
    .bind(offset)
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(row_to_translation).collect())
}

/// Fetch one translation. Without a language code any row sharing the
/// episode id may come back.
pub async fn get_translation(
    pool: &SqlitePool,
    episode_id: i64,
    language_code: Option<&str>,
) -> Result<Option<TvShowEpisodeTranslationRow>, sqlx::Error> {
    let row: Option<(i64, String, String)> = match language_code {
        Some(code) => {
            sqlx::query_as(
                "SELECT episode_id, language_code, title FROM tv_show_episode_translations \
                 WHERE episode_id = ? AND language_code = ?",
            )
            .bind(episode_id)
            .bind(code)
            .fetch_optional(pool)
            .await?
        }
        None => {
            sqlx::query_as(
                "SELECT episode_id, language_code, title FROM tv_show_episode_translations \
                 WHERE episode_id = ? LIMIT 1",
            )
            .bind(episode_id)
            .fetch_optional(pool)
            .await?
        }
    };

    Ok(row.map(row_to_translation))
}

pub async fn list_for_episode(
    pool: &SqlitePool,
    episode_id: i64,
) -> Result<Vec<TvShowEpisodeTranslationRow>, sqlx::Error> {
    let rows: Vec<(i64, String, String)> = sqlx::query_as(
        "SELECT episode_id, language_code, title FROM tv_show_episode_translations \
         WHERE episode_id = ? ORDER BY language_code",
    )
    .bind(episode_id)
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(row_to_translation).collect())
}

pub async fn insert_translation(
    pool: &SqlitePool,
    episode_id: i64,
    language_code: &str,
    title: &str,
) -> Result<TvShowEpisodeTranslationRow, sqlx::Error> {
    sqlx::query(
        "INSERT INTO tv_show_episode_translations (episode_id, language_code, title) \
         VALUES (?, ?, ?)",
    )
    .bind(episode_id)
    .bind(language_code)
    .bind(title)
    .execute(pool)
    .await?;

    Ok(TvShowEpisodeTranslationRow {
        episode_id,
        language_code: language_code.to_string(),
        title: title.to_string(),
    })
}

pub async fn update_translation(
    pool: &SqlitePool,
    episode_id: i64,
    language_code: &str,
    row: &TvShowEpisodeTranslationRow,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "UPDATE tv_show_episode_translations SET episode_id = ?, language_code = ?, title = ? \
         WHERE episode_id = ? AND language_code = ?",
    )
    .bind(row.episode_id)
    .bind(&row.language_code)
    .bind(&row.title)
    .bind(episode_id)
    .bind(language_code)
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn delete_translation(
    pool: &SqlitePool,
    episode_id: i64,
    language_code: &str,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        "DELETE FROM tv_show_episode_translations WHERE episode_id = ? AND language_code = ?",
    )
    .bind(episode_id)
    .bind(language_code)
    .execute(pool)
    .await?;
    Ok(result.rows_affected() > 0)
}
