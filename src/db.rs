// src/db.rs
use crate::config::DbPoolConfig;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

/// Opens the contact store pool and brings the schema up to date.
pub async fn create_pool(db_url: &str, settings: &DbPoolConfig) -> Result<PgPool, sqlx::Error> {
    tracing::debug!(
        "Connecting to contact store (max {} connections, {:?} acquire timeout)",
        settings.max_connections,
        settings.acquire_timeout
    );
    let pool = pool_options(settings).connect(db_url).await?;

    run_migrations(&pool).await?;

    Ok(pool)
}

fn pool_options(settings: &DbPoolConfig) -> PgPoolOptions {
    PgPoolOptions::new()
        .max_connections(settings.max_connections)
        .acquire_timeout(settings.acquire_timeout)
}

async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::Error> {
    tracing::info!("Applying contact_submissions migrations");
    sqlx::migrate!("./migrations").run(pool).await?;
    tracing::info!("Contact store schema is current");
    Ok(())
}
