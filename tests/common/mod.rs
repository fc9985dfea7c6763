use finwise_profiles::backend::{FamilyProfileDto, FamilyProfileService};
use finwise_profiles::database::db::{migrate, queries};
use finwise_profiles::database::models::RiskTolerance;
use rust_decimal::Decimal;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::{Pool, Sqlite};

// One connection so every query sees the same in-memory database.
pub async fn memory_pool() -> Pool<Sqlite> {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .expect("in-memory sqlite");
    migrate::run_migrations(&pool).await.expect("migrations");
    pool
}

pub async fn service() -> FamilyProfileService {
    FamilyProfileService::new(memory_pool().await)
}

pub async fn user(service: &FamilyProfileService, principal: &str) -> i64 {
    queries::create_user(service.pool(), principal, None)
        .await
        .expect("create user")
}

pub fn sample_profile(user_id: i64) -> FamilyProfileDto {
    FamilyProfileDto {
        user_id: Some(user_id),
        family_size: Some(3),
        monthly_income: Some(Decimal::new(620000, 2)),
        monthly_expenses: Some(Decimal::new(410050, 2)),
        location: Some("Montreal".to_string()),
        risk_tolerance: Some(RiskTolerance::Medium),
        ..Default::default()
    }
}
