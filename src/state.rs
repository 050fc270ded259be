use std::path::PathBuf;

use anyhow::Result;
use axum::extract::FromRef;
use serde::Deserialize;
use sqlx::postgres::PgPoolOptions;
use sqlx::{Pool, Postgres};
use url::Url;

use crate::storage::MediaStore;

#[derive(Debug, Clone)]
pub struct AppState {
    pub pool: DBPool,
    pub media: MediaStore,
}

pub type DBPool = Pool<Postgres>;

impl FromRef<AppState> for DBPool {
    fn from_ref(input: &AppState) -> Self {
        input.pool.clone()
    }
}

impl FromRef<AppState> for MediaStore {
    fn from_ref(input: &AppState) -> Self {
        input.media.clone()
    }
}

#[derive(Debug, Deserialize)]
struct DbConfig {
    host: String,
    port: u16,
    user: String,
    pass: String,
    database: String,
}

pub fn create_db_pool() -> Result<DBPool> {
    let config: DbConfig = envy::prefixed("PG_").from_env()?;

    let mut url = Url::parse("postgres://")?;
    url.set_host(Some(&config.host))?;
    url.set_password(Some(&config.pass))
        .expect("password should be accepted");
    url.set_username(&config.user)
        .expect("username should be accepted");
    url.set_port(Some(config.port))
        .expect("port should be accepted");
    url.set_path(&config.database);

    Ok(PgPoolOptions::new().connect_lazy(url.as_ref())?)
}

#[derive(Debug, Deserialize)]
struct MediaConfig {
    #[serde(default = "default_media_root")]
    media_root: PathBuf,
}

fn default_media_root() -> PathBuf {
    PathBuf::from("media")
}

pub fn create_media_store() -> Result<MediaStore> {
    let config: MediaConfig = envy::from_env()?;
    Ok(MediaStore::new(config.media_root))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn media_root_defaults_when_unset() {
        let config: MediaConfig = envy::from_iter(std::iter::empty()).unwrap();
        assert_eq!(config.media_root, PathBuf::from("media"));
    }

    #[test]
    fn media_root_from_environment() {
        let vars = [("MEDIA_ROOT".to_string(), "/srv/media".to_string())];
        let config: MediaConfig = envy::from_iter(vars).unwrap();
        assert_eq!(config.media_root, PathBuf::from("/srv/media"));
    }
}
