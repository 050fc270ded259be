use anyhow::Result;
use sqlx::QueryBuilder;

use crate::datasource::repository::genre;
use crate::models as domain_models;
use crate::state::DBPool;

pub mod models {
    use crate::models as domain_models;

    #[derive(Debug, sqlx::FromRow)]
    pub struct Series {
        pub id: i64,
        pub title: String,
        pub description: String,
        pub start_year: i32,
        pub end_year: Option<i32>,
        pub poster: String,
    }

    impl Series {
        pub(super) fn into_domain(self, genres: Vec<String>) -> domain_models::Series {
            domain_models::Series {
                id: self.id,
                title: self.title,
                description: self.description,
                start_year: self.start_year,
                end_year: self.end_year,
                poster: self.poster,
                genres,
            }
        }
    }

    #[derive(Debug, sqlx::FromRow)]
    pub struct Totals {
        pub total_seasons: i64,
        pub total_episodes: i64,
    }
}

#[derive(Debug)]
pub struct NewSeries {
    pub title: String,
    pub description: String,
    pub start_year: i32,
    pub end_year: Option<i32>,
    pub poster: String,
}

pub async fn list(pool: &DBPool, limit: Option<i64>) -> Result<Vec<domain_models::Series>> {
    let mut qb = QueryBuilder::new("SELECT * FROM series ORDER BY start_year DESC, title");
    if let Some(limit) = limit {
        qb.push(" LIMIT ").push_bind(limit);
    }
    let rows = qb.build_query_as::<models::Series>().fetch_all(pool).await?;
    with_genres(pool, rows).await
}

pub async fn search(pool: &DBPool, query: &str) -> Result<Vec<domain_models::Series>> {
    let pattern = format!("%{}%", super::escape_like(query));
    let mut qb = QueryBuilder::new("SELECT * FROM series WHERE title ILIKE ");
    qb.push_bind(pattern.clone())
        .push(" OR description ILIKE ")
        .push_bind(pattern)
        .push(" ORDER BY start_year DESC, title");
    let rows = qb.build_query_as::<models::Series>().fetch_all(pool).await?;
    with_genres(pool, rows).await
}

pub async fn get(pool: &DBPool, id: i64) -> Result<Option<domain_models::Series>> {
    let row = sqlx::query_as::<_, models::Series>("SELECT * FROM series WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    let Some(row) = row else {
        return Ok(None);
    };
    Ok(with_genres(pool, vec![row]).await?.pop())
}

/// Season and episode counts for one series.
pub async fn totals(pool: &DBPool, id: i64) -> Result<models::Totals> {
    let totals = sqlx::query_as::<_, models::Totals>(
        "SELECT count(DISTINCT s.id) AS total_seasons, count(e.id) AS total_episodes \
         FROM seasons s LEFT JOIN episodes e ON e.season_id = s.id \
         WHERE s.series_id = $1",
    )
    .bind(id)
    .fetch_one(pool)
    .await?;
    Ok(totals)
}

pub async fn insert(pool: &DBPool, series: &NewSeries) -> Result<i64> {
    let (id,): (i64,) = sqlx::query_as(
        "INSERT INTO series (title, description, start_year, end_year, poster) \
         VALUES ($1, $2, $3, $4, $5) RETURNING id",
    )
    .bind(&series.title)
    .bind(&series.description)
    .bind(series.start_year)
    .bind(series.end_year)
    .bind(&series.poster)
    .fetch_one(pool)
    .await?;
    Ok(id)
}

/// Seasons and their episodes go with it, the schema cascades.
pub async fn delete(pool: &DBPool, id: i64) -> Result<bool> {
    let result = sqlx::query("DELETE FROM series WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

async fn with_genres(
    pool: &DBPool,
    rows: Vec<models::Series>,
) -> Result<Vec<domain_models::Series>> {
    if rows.is_empty() {
        return Ok(Vec::new());
    }
    let ids: Vec<_> = rows.iter().map(|r| r.id).collect();
    let mut genres = genre::get_for_series(pool, &ids).await?;
    let series = rows
        .into_iter()
        .map(|r| {
            let names = genres.remove(&r.id).unwrap_or_default();
            r.into_domain(names)
        })
        .collect();
    Ok(series)
}
