use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

// Owned by the identity provider; this crate only reads it and clears `is_new_user`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct User {
    pub user_id: i64,
    pub principal: String,             // login name / email handed over by the identity provider
    pub display_name: Option<String>,
    pub is_new_user: bool,             // true until the first family profile is created
    pub user_created_at: NaiveDateTime,
}
