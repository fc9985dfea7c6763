// src/main.rs
use std::env;

use dotenvy::dotenv;
use finwise_profiles::backend::FamilyProfileService;
use finwise_profiles::config::Config;
use finwise_profiles::database::db::{connection, migrate};
use finwise_profiles::cli;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let config = Config::load()?;
    let pool = connection::get_db_pool(&config).await?;
    migrate::run_migrations(&pool).await?;

    let service = FamilyProfileService::new(pool);
    let args: Vec<String> = env::args().skip(1).collect();

    cli::run(&service, &args).await
}
