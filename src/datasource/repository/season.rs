use anyhow::Result;

use crate::models as domain_models;
use crate::state::DBPool;

pub mod models {
    use crate::models as domain_models;

    #[derive(Debug, sqlx::FromRow)]
    pub struct Season {
        pub id: i64,
        pub series_id: i64,
        pub season_number: i32,
        pub title: Option<String>,
        pub poster: Option<String>,
    }

    impl From<Season> for domain_models::Season {
        fn from(s: Season) -> Self {
            Self {
                id: s.id,
                series_id: s.series_id,
                season_number: s.season_number,
                title: s.title,
                poster: s.poster,
            }
        }
    }
}

#[derive(Debug)]
pub struct NewSeason {
    pub series_id: i64,
    pub season_number: i32,
    pub title: Option<String>,
    pub poster: Option<String>,
}

pub async fn get(
    pool: &DBPool,
    series_id: i64,
    season_number: i32,
) -> Result<Option<domain_models::Season>> {
    let row = sqlx::query_as::<_, models::Season>(
        "SELECT * FROM seasons WHERE series_id = $1 AND season_number = $2",
    )
    .bind(series_id)
    .bind(season_number)
    .fetch_optional(pool)
    .await?;
    Ok(row.map(Into::into))
}

pub async fn list_for_series(pool: &DBPool, series_id: i64) -> Result<Vec<domain_models::Season>> {
    let rows = sqlx::query_as::<_, models::Season>(
        "SELECT * FROM seasons WHERE series_id = $1 ORDER BY season_number",
    )
    .bind(series_id)
    .fetch_all(pool)
    .await?;
    Ok(rows.into_iter().map(Into::into).collect())
}

pub async fn insert(pool: &DBPool, season: &NewSeason) -> Result<i64> {
    let (id,): (i64,) = sqlx::query_as(
        "INSERT INTO seasons (series_id, season_number, title, poster) \
         VALUES ($1, $2, $3, $4) RETURNING id",
    )
    .bind(season.series_id)
    .bind(season.season_number)
    .bind(&season.title)
    .bind(&season.poster)
    .fetch_one(pool)
    .await?;
    Ok(id)
}

/// Episodes go with it, the schema cascades.
pub async fn delete(pool: &DBPool, id: i64) -> Result<bool> {
    let result = sqlx::query("DELETE FROM seasons WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
