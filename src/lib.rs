use std::net::{IpAddr, Ipv6Addr, SocketAddr};

use anyhow::Result;
use axum::{routing::get, Router};
use tower::ServiceBuilder;
use tower_http::compression::predicate::NotForContentType;
use tower_http::compression::{CompressionLayer, DefaultPredicate, Predicate};
use tower_http::trace::TraceLayer;

use crate::controllers::{catalog, downloads};
use crate::state::AppState;

pub mod admin;
pub mod controllers;
pub mod datasource;
pub mod errors;
pub mod models;
pub mod state;
pub mod storage;

const ADDRESS: SocketAddr = SocketAddr::new(IpAddr::V6(Ipv6Addr::UNSPECIFIED), 8000);

pub fn router(app_state: AppState) -> Router {
    // video downloads go out as-is
    let compression_predicate =
        DefaultPredicate::new().and(NotForContentType::const_new("video/mp4"));
    Router::new()
        .route("/", get(catalog::home))
        .route("/movies", get(catalog::movie_list))
        .route("/movie/:id", get(catalog::movie_detail))
        .route("/movie/:id/download", get(downloads::movie))
        .route("/series", get(catalog::series_list))
        .route("/series/:id", get(catalog::series_detail))
        .route("/series/:id/season/:season", get(catalog::season_detail))
        .route(
            "/series/:id/season/:season/episode/:episode",
            get(catalog::episode_detail),
        )
        .route("/episode/:id/download", get(downloads::episode))
        .with_state(app_state)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new().compress_when(compression_predicate)),
        )
}

pub async fn serve(app_state: AppState) -> Result<()> {
    let app = router(app_state);

    let listener = tokio::net::TcpListener::bind(ADDRESS).await?;
    tracing::debug!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}
