use std::result::Result;

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::datasource::repository::{episode, movie, season, series};
use crate::errors::Error;
use crate::models::{Episode, Movie, Season, Series};
use crate::state::DBPool;

const FEATURED_LIMIT: i64 = 8;
const LATEST_LIMIT: i64 = 6;
const POPULAR_LIMIT: i64 = 6;
const SIMILAR_LIMIT: i64 = 4;

#[derive(Debug, Deserialize)]
pub(crate) struct SearchQuery {
    q: Option<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct HomePage {
    featured_movies: Vec<Movie>,
    featured_series: Vec<Series>,
    latest_movies: Vec<Movie>,
    popular_movies: Vec<Movie>,
    search_query: String,
}

pub(crate) async fn home(
    Query(params): Query<SearchQuery>,
    State(pool): State<DBPool>,
) -> Result<Json<HomePage>, Error> {
    let query = normalize_query(params.q.as_deref());
    let (featured_movies, featured_series) = match query {
        Some(q) => (
            movie::search(&pool, q).await?,
            series::search(&pool, q).await?,
        ),
        None => (
            movie::list_featured(&pool, FEATURED_LIMIT).await?,
            series::list(&pool, Some(FEATURED_LIMIT)).await?,
        ),
    };
    let latest_movies = movie::list_latest(&pool, LATEST_LIMIT).await?;
    let popular_movies = movie::list_popular(&pool, POPULAR_LIMIT).await?;
    Ok(Json(HomePage {
        featured_movies,
        featured_series,
        latest_movies,
        popular_movies,
        search_query: query.unwrap_or_default().to_string(),
    }))
}

/// An absent, empty, or all-whitespace `q` falls back to the default
/// listings instead of an empty search result.
fn normalize_query(q: Option<&str>) -> Option<&str> {
    q.map(str::trim).filter(|q| !q.is_empty())
}

pub(crate) async fn movie_list(State(pool): State<DBPool>) -> Result<Json<Vec<Movie>>, Error> {
    let movies = movie::list_all(&pool).await?;
    Ok(Json(movies))
}

#[derive(Debug, Serialize)]
pub(crate) struct MovieDetail {
    duration_formatted: String,
    movie: Movie,
    similar_movies: Vec<Movie>,
}

pub(crate) async fn movie_detail(
    Path(id): Path<i64>,
    State(pool): State<DBPool>,
) -> Result<Json<MovieDetail>, Error> {
    let movie = movie::get(&pool, id).await?.ok_or(Error::NotFound("movie"))?;
    let similar_movies = movie::list_similar(&pool, id, SIMILAR_LIMIT).await?;
    Ok(Json(MovieDetail {
        duration_formatted: movie.duration_formatted(),
        movie,
        similar_movies,
    }))
}

pub(crate) async fn series_list(State(pool): State<DBPool>) -> Result<Json<Vec<Series>>, Error> {
    let series = series::list(&pool, None).await?;
    Ok(Json(series))
}

#[derive(Debug, Serialize)]
pub(crate) struct SeriesDetail {
    series: Series,
    years: String,
    total_seasons: i64,
    total_episodes: i64,
    seasons: Vec<Season>,
}

pub(crate) async fn series_detail(
    Path(id): Path<i64>,
    State(pool): State<DBPool>,
) -> Result<Json<SeriesDetail>, Error> {
    let series = series::get(&pool, id)
        .await?
        .ok_or(Error::NotFound("series"))?;
    let totals = series::totals(&pool, id).await?;
    let seasons = season::list_for_series(&pool, id).await?;
    Ok(Json(SeriesDetail {
        years: series.years(),
        series,
        total_seasons: totals.total_seasons,
        total_episodes: totals.total_episodes,
        seasons,
    }))
}

#[derive(Debug, Serialize)]
pub(crate) struct SeasonDetail {
    season: Season,
    episodes: Vec<Episode>,
}

pub(crate) async fn season_detail(
    Path((series_id, season_number)): Path<(i64, i32)>,
    State(pool): State<DBPool>,
) -> Result<Json<SeasonDetail>, Error> {
    let season = season::get(&pool, series_id, season_number)
        .await?
        .ok_or(Error::NotFound("season"))?;
    let episodes = episode::list_for_season(&pool, season.id).await?;
    Ok(Json(SeasonDetail { season, episodes }))
}

#[derive(Debug, Serialize)]
pub(crate) struct EpisodeDetail {
    episode_code: String,
    duration_formatted: String,
    episode: Episode,
}

pub(crate) async fn episode_detail(
    Path((series_id, season_number, episode_number)): Path<(i64, i32, i32)>,
    State(pool): State<DBPool>,
) -> Result<Json<EpisodeDetail>, Error> {
    let episode = episode::get(&pool, series_id, season_number, episode_number)
        .await?
        .ok_or(Error::NotFound("episode"))?;
    Ok(Json(EpisodeDetail {
        episode_code: episode.episode_code(),
        duration_formatted: episode.duration_formatted(),
        episode,
    }))
}

#[cfg(test)]
mod tests {
    use super::normalize_query;

    #[test]
    fn missing_query_uses_default_listings() {
        assert_eq!(normalize_query(None), None);
    }

    #[test]
    fn empty_and_whitespace_queries_use_default_listings() {
        assert_eq!(normalize_query(Some("")), None);
        assert_eq!(normalize_query(Some("   ")), None);
    }

    #[test]
    fn query_is_trimmed() {
        assert_eq!(normalize_query(Some("  heat ")), Some("heat"));
    }
}
