use sqlx::SqlitePool;

use crate::effective_limit;

#[derive(Debug, Clone)]
pub struct TvShowEpisodeRow {
    pub id: i64,
    pub tv_show_id: i64,
    pub tmdb_id: Option<i64>,
    pub season_num: Option<i64>,
    pub episode_num: Option<i64>,
    pub original_title: String,
}

type EpisodeTuple = (i64, i64, Option<i64>, Option<i64>, Option<i64>, String);

fn row_to_episode(r: EpisodeTuple) -> TvShowEpisodeRow {
    TvShowEpisodeRow {
        id: r.0,
        tv_show_id: r.1,
        tmdb_id: r.2,
        season_num: r.3,
        episode_num: r.4,
        original_title: r.5,
    }
}

pub async fn list_episodes(
    pool: &SqlitePool,
    offset: i64,
    limit: i64,
) -> Result<Vec<TvShowEpisodeRow>, sqlx::Error> {
    let rows: Vec<EpisodeTuple> = sqlx::query_as(
        "SELECT id, tv_show_id, tmdb_id, season_num, episode_num, original_title \
         FROM tv_show_episodes ORDER BY id LIMIT ? OFFSET ?",
    )
    .bind(effective_limit(limit))
    .bind(offset)
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(row_to_episode).collect())
}

pub async fn get_episode(
    pool: &SqlitePool,
    episode_id: i64,
) -> Result<Option<TvShowEpisodeRow>, sqlx::Error> {
    let row: Option<EpisodeTuple> = sqlx::query_as(
        "SELECT id, tv_show_id, tmdb_id, season_num, episode_num, original_title \
         FROM tv_show_episodes WHERE id = ?",
    )
    .bind(episode_id)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(row_to_episode))
}

/// All episodes of one show, season/episode ordered, for view shaping.
pub async fn list_for_show(
    pool: &SqlitePool,
    tv_show_id: i64,
) -> Result<Vec<TvShowEpisodeRow>, sqlx::Error> {
    let rows: Vec<EpisodeTuple> = sqlx::query_as(
        "SELECT id, tv_show_id, tmdb_id, season_num, episode_num, original_title \
         FROM tv_show_episodes WHERE tv_show_id = ? ORDER BY season_num, episode_num, id",
    )
    .bind(tv_show_id)
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(row_to_episode).collect())
}

pub async fn insert_episode(
    pool: &SqlitePool,
    tv_show_id: i64,
    tmdb_id: Option<i64>,
    season_num: Option<i64>,
    episode_num: Option<i64>,
    original_title: &str,
) -> Result<TvShowEpisodeRow, sqlx::Error> {
    let result = sqlx::query(
        "INSERT INTO tv_show_episodes (tv_show_id, tmdb_id, season_num, episode_num, original_title) \
         VALUES (?, ?, ?, ?, ?)",
    )
    .bind(tv_show_id)
    .bind(tmdb_id)
    .bind(season_num)
    .bind(episode_num)
    .bind(original_title)
    .execute(pool)
    .await?;

    Ok(TvShowEpisodeRow {
        id: result.last_insert_rowid(),
        tv_show_id,
        tmdb_id,
        season_num,
        episode_num,
        original_title: original_title.to_string(),
    })
}

pub async fn update_episode(pool: &SqlitePool, row: &TvShowEpisodeRow) -> Result<(), sqlx::Error> {
    sqlx::query(
        "UPDATE tv_show_episodes SET tv_show_id = ?, tmdb_id = ?, season_num = ?, \
         episode_num = ?, original_title = ? WHERE id = ?",
    )
    .bind(row.tv_show_id)
    .bind(row.tmdb_id)
    .bind(row.season_num)
    .bind(row.episode_num)
    .bind(&row.original_title)
    .bind(row.id)
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn delete_episode(pool: &SqlitePool, episode_id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM tv_show_episodes WHERE id = ?")
        .bind(episode_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
