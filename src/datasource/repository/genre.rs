use std::collections::HashMap;

use anyhow::Result;
use sqlx::QueryBuilder;

use crate::state::DBPool;

pub mod models {
    #[derive(Debug, sqlx::FromRow)]
    pub struct OwnedName {
        pub owner_id: i64,
        pub name: String,
    }
}

pub async fn insert(pool: &DBPool, name: &str) -> Result<i64> {
    let (id,): (i64,) = sqlx::query_as("INSERT INTO genres (name) VALUES ($1) RETURNING id")
        .bind(name)
        .fetch_one(pool)
        .await?;
    Ok(id)
}

pub async fn assign_to_movie(pool: &DBPool, movie_id: i64, genre_id: i64) -> Result<()> {
    sqlx::query(
        "INSERT INTO movie_genres (movie_id, genre_id) VALUES ($1, $2) ON CONFLICT DO NOTHING",
    )
    .bind(movie_id)
    .bind(genre_id)
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn assign_to_series(pool: &DBPool, series_id: i64, genre_id: i64) -> Result<()> {
    sqlx::query(
        "INSERT INTO series_genres (series_id, genre_id) VALUES ($1, $2) ON CONFLICT DO NOTHING",
    )
    .bind(series_id)
    .bind(genre_id)
    .execute(pool)
    .await?;
    Ok(())
}

pub(super) async fn get_for_movies(
    pool: &DBPool,
    movie_ids: &[i64],
) -> Result<HashMap<i64, Vec<String>>> {
    get_names(
        pool,
        "SELECT mg.movie_id AS owner_id, g.name \
         FROM movie_genres mg JOIN genres g ON g.id = mg.genre_id \
         WHERE mg.movie_id IN (",
        movie_ids,
    )
    .await
}

pub(super) async fn get_for_series(
    pool: &DBPool,
    series_ids: &[i64],
) -> Result<HashMap<i64, Vec<String>>> {
    get_names(
        pool,
        "SELECT sg.series_id AS owner_id, g.name \
         FROM series_genres sg JOIN genres g ON g.id = sg.genre_id \
         WHERE sg.series_id IN (",
        series_ids,
    )
    .await
}

async fn get_names(
    pool: &DBPool,
    select: &str,
    owner_ids: &[i64],
) -> Result<HashMap<i64, Vec<String>>> {
    if owner_ids.is_empty() {
        return Ok(HashMap::new());
    }
    let mut qb = QueryBuilder::new(select);
    let mut separated = qb.separated(", ");
    for &id in owner_ids {
        separated.push_bind(id);
    }
    separated.push_unseparated(")");
    qb.push(" ORDER BY g.name");
    let rows = qb.build_query_as::<models::OwnedName>().fetch_all(pool).await?;

    let mut map: HashMap<i64, Vec<String>> = HashMap::new();
    for row in rows {
        map.entry(row.owner_id).or_default().push(row.name);
    }
    Ok(map)
}
