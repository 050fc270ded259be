use anyhow::Result;

use crate::models as domain_models;
use crate::state::DBPool;

pub mod models {
    use chrono::NaiveDate;

    use crate::models as domain_models;

    /// Episode row joined with its season for the season number.
    #[derive(Debug, sqlx::FromRow)]
    pub struct Episode {
        pub id: i64,
        pub season_id: i64,
        pub season_number: i32,
        pub episode_number: i32,
        pub title: String,
        pub description: String,
        pub video_file: String,
        pub file_size: String,
        pub file_format: String,
        pub quality: String,
        pub download_count: i64,
        pub release_date: Option<NaiveDate>,
        pub duration_minutes: i32,
    }

    impl From<Episode> for domain_models::Episode {
        fn from(e: Episode) -> Self {
            Self {
                id: e.id,
                season_id: e.season_id,
                season_number: e.season_number,
                episode_number: e.episode_number,
                title: e.title,
                description: e.description,
                video_file: e.video_file,
                file_size: e.file_size,
                file_format: e.file_format,
                quality: e.quality,
                download_count: e.download_count,
                release_date: e.release_date,
                duration: e.duration_minutes,
            }
        }
    }
}

#[derive(Debug)]
pub struct NewEpisode {
    pub season_id: i64,
    pub episode_number: i32,
    pub title: String,
    pub description: String,
    pub video_file: String,
    pub file_size: String,
    pub file_format: String,
    pub quality: String,
    pub release_date: Option<chrono::NaiveDate>,
    pub duration_minutes: i32,
}

const SELECT_WITH_SEASON: &str =
    "SELECT e.*, s.season_number FROM episodes e JOIN seasons s ON s.id = e.season_id";

pub async fn get(
    pool: &DBPool,
    series_id: i64,
    season_number: i32,
    episode_number: i32,
) -> Result<Option<domain_models::Episode>> {
    let sql = format!(
        "{SELECT_WITH_SEASON} \
         WHERE s.series_id = $1 AND s.season_number = $2 AND e.episode_number = $3"
    );
    let row = sqlx::query_as::<_, models::Episode>(&sql)
        .bind(series_id)
        .bind(season_number)
        .bind(episode_number)
        .fetch_optional(pool)
        .await?;
    Ok(row.map(Into::into))
}

pub async fn list_for_season(pool: &DBPool, season_id: i64) -> Result<Vec<domain_models::Episode>> {
    let sql = format!("{SELECT_WITH_SEASON} WHERE e.season_id = $1 ORDER BY e.episode_number");
    let rows = sqlx::query_as::<_, models::Episode>(&sql)
        .bind(season_id)
        .fetch_all(pool)
        .await?;
    Ok(rows.into_iter().map(Into::into).collect())
}

pub async fn insert(pool: &DBPool, episode: &NewEpisode) -> Result<i64> {
    let (id,): (i64,) = sqlx::query_as(
        "INSERT INTO episodes (season_id, episode_number, title, description, video_file, \
         file_size, file_format, quality, release_date, duration_minutes) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) RETURNING id",
    )
    .bind(episode.season_id)
    .bind(episode.episode_number)
    .bind(&episode.title)
    .bind(&episode.description)
    .bind(&episode.video_file)
    .bind(&episode.file_size)
    .bind(&episode.file_format)
    .bind(&episode.quality)
    .bind(episode.release_date)
    .bind(episode.duration_minutes)
    .fetch_one(pool)
    .await?;
    Ok(id)
}
