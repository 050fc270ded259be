use anyhow::Result;
use sqlx::QueryBuilder;

use crate::datasource::repository::genre;
use crate::models as domain_models;
use crate::state::DBPool;

pub mod models {
    use crate::models as domain_models;

    #[derive(Debug, sqlx::FromRow)]
    pub struct Movie {
        pub id: i64,
        pub title: String,
        pub description: String,
        pub year: i32,
        pub poster: String,
        pub video_file: String,
        pub duration_minutes: i32,
        pub director: String,
        pub rating: f64,
        pub file_size: String,
        pub file_format: String,
        pub quality: String,
        pub download_count: i64,
        pub is_featured: bool,
    }

    impl Movie {
        pub(super) fn into_domain(self, genres: Vec<String>) -> domain_models::Movie {
            domain_models::Movie {
                id: self.id,
                title: self.title,
                description: self.description,
                year: self.year,
                poster: self.poster,
                video_file: self.video_file,
                duration: self.duration_minutes,
                director: self.director,
                rating: self.rating,
                file_size: self.file_size,
                file_format: self.file_format,
                quality: self.quality,
                download_count: self.download_count,
                is_featured: self.is_featured,
                genres,
            }
        }
    }
}

#[derive(Debug)]
pub struct NewMovie {
    pub title: String,
    pub description: String,
    pub year: i32,
    pub poster: String,
    pub video_file: String,
    pub duration_minutes: i32,
    pub director: String,
    pub rating: f64,
    pub file_size: String,
    pub file_format: String,
    pub quality: String,
    pub is_featured: bool,
}

pub async fn list_all(pool: &DBPool) -> Result<Vec<domain_models::Movie>> {
    let rows = sqlx::query_as::<_, models::Movie>("SELECT * FROM movies ORDER BY year DESC, title")
        .fetch_all(pool)
        .await?;
    with_genres(pool, rows).await
}

pub async fn list_featured(pool: &DBPool, limit: i64) -> Result<Vec<domain_models::Movie>> {
    let rows = sqlx::query_as::<_, models::Movie>(
        "SELECT * FROM movies WHERE is_featured ORDER BY year DESC, title LIMIT $1",
    )
    .bind(limit)
    .fetch_all(pool)
    .await?;
    with_genres(pool, rows).await
}

/// Most recently added first, insertion order.
pub async fn list_latest(pool: &DBPool, limit: i64) -> Result<Vec<domain_models::Movie>> {
    let rows =
        sqlx::query_as::<_, models::Movie>("SELECT * FROM movies ORDER BY id DESC LIMIT $1")
            .bind(limit)
            .fetch_all(pool)
            .await?;
    with_genres(pool, rows).await
}

pub async fn list_popular(pool: &DBPool, limit: i64) -> Result<Vec<domain_models::Movie>> {
    let rows = sqlx::query_as::<_, models::Movie>(
        "SELECT * FROM movies ORDER BY download_count DESC LIMIT $1",
    )
    .bind(limit)
    .fetch_all(pool)
    .await?;
    with_genres(pool, rows).await
}

pub async fn search(pool: &DBPool, query: &str) -> Result<Vec<domain_models::Movie>> {
    let pattern = format!("%{}%", super::escape_like(query));
    let mut qb = QueryBuilder::new("SELECT * FROM movies WHERE title ILIKE ");
    qb.push_bind(pattern.clone())
        .push(" OR description ILIKE ")
        .push_bind(pattern)
        .push(" ORDER BY year DESC, title");
    let rows = qb.build_query_as::<models::Movie>().fetch_all(pool).await?;
    with_genres(pool, rows).await
}

pub async fn get(pool: &DBPool, id: i64) -> Result<Option<domain_models::Movie>> {
    let row = sqlx::query_as::<_, models::Movie>("SELECT * FROM movies WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    let Some(row) = row else {
        return Ok(None);
    };
    Ok(with_genres(pool, vec![row]).await?.pop())
}

/// Up to `limit` movies other than `exclude_id`, order unspecified.
pub async fn list_similar(
    pool: &DBPool,
    exclude_id: i64,
    limit: i64,
) -> Result<Vec<domain_models::Movie>> {
    let rows = sqlx::query_as::<_, models::Movie>(
        "SELECT * FROM movies WHERE id <> $1 ORDER BY random() LIMIT $2",
    )
    .bind(exclude_id)
    .bind(limit)
    .fetch_all(pool)
    .await?;
    with_genres(pool, rows).await
}

pub async fn insert(pool: &DBPool, movie: &NewMovie) -> Result<i64> {
    let (id,): (i64,) = sqlx::query_as(
        "INSERT INTO movies (title, description, year, poster, video_file, duration_minutes, \
         director, rating, file_size, file_format, quality, is_featured) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12) RETURNING id",
    )
    .bind(&movie.title)
    .bind(&movie.description)
    .bind(movie.year)
    .bind(&movie.poster)
    .bind(&movie.video_file)
    .bind(movie.duration_minutes)
    .bind(&movie.director)
    .bind(movie.rating)
    .bind(&movie.file_size)
    .bind(&movie.file_format)
    .bind(&movie.quality)
    .bind(movie.is_featured)
    .fetch_one(pool)
    .await?;
    Ok(id)
}

async fn with_genres(
    pool: &DBPool,
    rows: Vec<models::Movie>,
) -> Result<Vec<domain_models::Movie>> {
    if rows.is_empty() {
        return Ok(Vec::new());
    }
    let ids: Vec<_> = rows.iter().map(|r| r.id).collect();
    let mut genres = genre::get_for_movies(pool, &ids).await?;
    let movies = rows
        .into_iter()
        .map(|r| {
            let names = genres.remove(&r.id).unwrap_or_default();
            r.into_domain(names)
        })
        .collect();
    Ok(movies)
}
