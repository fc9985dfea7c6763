use anyhow::{Context, Result};
use sqlx::{Pool, Sqlite};
use tracing::info;

// Schema lives in ./migrations and is embedded at compile time.
pub async fn run_migrations(pool: &Pool<Sqlite>) -> Result<()> {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .context("failed to apply database migrations")?;
    info!("Database migrations applied");
    Ok(())
}
