use movie_service::errors::InternalError;
use movie_service::{admin, serve, state};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), InternalError> {
    // initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .init();

    let pool = state::create_db_pool()?;
    let media = state::create_media_store()?;

    sqlx::migrate!().run(&pool).await?;

    let admin_config = admin::AdminConfig::from_env()?;
    admin::ensure_operator(&pool, &admin_config).await?;

    serve(state::AppState { pool, media }).await
}
