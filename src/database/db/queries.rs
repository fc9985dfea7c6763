use std::str::FromStr;

use chrono::{NaiveDateTime, Utc};
use rust_decimal::Decimal;
use sqlx::sqlite::SqliteRow;
use sqlx::{Pool, Row, Sqlite};

use crate::database::models::{FamilyProfile, NewFamilyProfile, RiskTolerance, User};

/*
Runtime-checked SQLite queries for users and family profiles.
Each function is one round trip (or one transaction) against the pool.
 */

fn now() -> NaiveDateTime {
    Utc::now().naive_utc()
}

// Amounts are stored as TEXT, convert back to Decimal
fn decode_decimal(row: &SqliteRow, column: &str) -> Result<Option<Decimal>, sqlx::Error> {
    let text: Option<String> = row.try_get(column)?;
    text.map(|t| {
        Decimal::from_str(&t).map_err(|e| {
            sqlx::Error::Decode(format!("Invalid Decimal format for {}: {}", column, e).into())
        })
    })
    .transpose()
}

fn encode_decimal(value: Option<Decimal>) -> Option<String> {
    value.map(|d| d.to_string())
}

fn family_profile_from_row(row: &SqliteRow) -> Result<FamilyProfile, sqlx::Error> {
    let risk_text: Option<String> = row.try_get("risk_tolerance")?;
    let risk_tolerance = risk_text
        .map(|r| RiskTolerance::from_str(&r).map_err(|e| sqlx::Error::Decode(e.into())))
        .transpose()?;

    Ok(FamilyProfile {
        id: row.try_get("profile_id")?,
        user_id: row.try_get("user_id")?,
        family_size: row.try_get("family_size")?,
        monthly_income: decode_decimal(row, "monthly_income")?,
        monthly_expenses: decode_decimal(row, "monthly_expenses")?,
        location: row.try_get("location")?,
        risk_tolerance,
        created_at: row.try_get("profile_created_at")?,
        updated_at: row.try_get("profile_updated_at")?,
    })
}

 /*==========User Queries=========== */

// Create user (normally done by the identity provider on first login)
pub async fn create_user(
    pool: &Pool<Sqlite>,
    principal: &str,
    display_name: Option<&str>,
) -> Result<i64, sqlx::Error> {
    let row = sqlx::query(
        r#"
        INSERT INTO users (principal, display_name, is_new_user, user_created_at)
        VALUES (?, ?, 1, ?)
        RETURNING user_id
        "#,
    )
    .bind(principal)
    .bind(display_name)
    .bind(now())
    .fetch_one(pool)
    .await?;

    row.try_get("user_id")
}

pub async fn get_user_by_id(pool: &Pool<Sqlite>, user_id: i64) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(
        r#"
        SELECT user_id, principal, display_name, is_new_user, user_created_at
        FROM users
        WHERE user_id = ?
        "#,
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await
}

pub async fn get_user_by_principal(
    pool: &Pool<Sqlite>,
    principal: &str,
) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(
        r#"
        SELECT user_id, principal, display_name, is_new_user, user_created_at
        FROM users
        WHERE principal = ?
        "#,
    )
    .bind(principal)
    .fetch_optional(pool)
    .await
}

 /*==========Family Profile Queries=========== */

// Create a profile for `user_id` and clear the user's "new user" flag in one transaction.
// Returns None (and writes nothing) when the user does not exist.
pub async fn create_family_profile(
    pool: &Pool<Sqlite>,
    user_id: i64,
    draft: &NewFamilyProfile,
) -> Result<Option<FamilyProfile>, sqlx::Error> {
    let mut tx = pool.begin().await?;

    let cleared = sqlx::query(
        r#"
        UPDATE users
        SET is_new_user = 0
        WHERE user_id = ?
        "#,
    )
    .bind(user_id)
    .execute(&mut *tx)
    .await?;

    if cleared.rows_affected() == 0 {
        tx.rollback().await?;
        return Ok(None);
    }

    let created_at = now();
    let row = sqlx::query(
        r#"
        INSERT INTO family_profiles (
            user_id, family_size, monthly_income, monthly_expenses,
            location, risk_tolerance, profile_created_at, profile_updated_at
        )
        VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        RETURNING
            profile_id, user_id, family_size, monthly_income, monthly_expenses,
            location, risk_tolerance, profile_created_at, profile_updated_at
        "#,
    )
    .bind(user_id)
    .bind(draft.family_size)
    .bind(encode_decimal(draft.monthly_income))
    .bind(encode_decimal(draft.monthly_expenses))
    .bind(draft.location.as_deref())
    .bind(draft.risk_tolerance.map(|r| r.as_str()))
    .bind(created_at)
    .bind(created_at)
    .fetch_one(&mut *tx)
    .await?;

    let profile = family_profile_from_row(&row)?;
    tx.commit().await?;

    Ok(Some(profile))
}

// Get all profiles in storage order
pub async fn get_all_family_profiles(pool: &Pool<Sqlite>) -> Result<Vec<FamilyProfile>, sqlx::Error> {
    sqlx::query(
        r#"
        SELECT
            profile_id, user_id, family_size, monthly_income, monthly_expenses,
            location, risk_tolerance, profile_created_at, profile_updated_at
        FROM family_profiles
        ORDER BY profile_id ASC
        "#,
    )
    .fetch_all(pool)
    .await?
    .iter()
    .map(family_profile_from_row)
    .collect::<Result<Vec<FamilyProfile>, sqlx::Error>>()
}

pub async fn get_family_profile_by_id(
    pool: &Pool<Sqlite>,
    profile_id: i64,
) -> Result<Option<FamilyProfile>, sqlx::Error> {
    sqlx::query(
        r#"
        SELECT
            profile_id, user_id, family_size, monthly_income, monthly_expenses,
            location, risk_tolerance, profile_created_at, profile_updated_at
        FROM family_profiles
        WHERE profile_id = ?
        "#,
    )
    .bind(profile_id)
    .fetch_optional(pool)
    .await?
    .as_ref()
    .map(family_profile_from_row)
    .transpose()
}

// Several profiles may point at one user; the oldest wins.
pub async fn get_family_profile_by_user_id(
    pool: &Pool<Sqlite>,
    user_id: i64,
) -> Result<Option<FamilyProfile>, sqlx::Error> {
    sqlx::query(
        r#"
        SELECT
            profile_id, user_id, family_size, monthly_income, monthly_expenses,
            location, risk_tolerance, profile_created_at, profile_updated_at
        FROM family_profiles
        WHERE user_id = ?
        ORDER BY profile_id ASC
        LIMIT 1
        "#,
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await?
    .as_ref()
    .map(family_profile_from_row)
    .transpose()
}

pub async fn family_profile_exists(pool: &Pool<Sqlite>, profile_id: i64) -> Result<bool, sqlx::Error> {
    let found: i64 = sqlx::query_scalar(
        r#"
        SELECT EXISTS (SELECT 1 FROM family_profiles WHERE profile_id = ?)
        "#,
    )
    .bind(profile_id)
    .fetch_one(pool)
    .await?;

    Ok(found != 0)
}

// Save every column of an existing profile. Returns None if the row is gone.
pub async fn update_family_profile(
    pool: &Pool<Sqlite>,
    profile: &FamilyProfile,
) -> Result<Option<FamilyProfile>, sqlx::Error> {
    sqlx::query(
        r#"
        UPDATE family_profiles
        SET user_id = ?,
            family_size = ?,
            monthly_income = ?,
            monthly_expenses = ?,
            location = ?,
            risk_tolerance = ?,
            profile_updated_at = ?
        WHERE profile_id = ?
        RETURNING
            profile_id, user_id, family_size, monthly_income, monthly_expenses,
            location, risk_tolerance, profile_created_at, profile_updated_at
        "#,
    )
    .bind(profile.user_id)
    .bind(profile.family_size)
    .bind(encode_decimal(profile.monthly_income))
    .bind(encode_decimal(profile.monthly_expenses))
    .bind(profile.location.as_deref())
    .bind(profile.risk_tolerance.map(|r| r.as_str()))
    .bind(now())
    .bind(profile.id)
    .fetch_optional(pool)
    .await?
    .as_ref()
    .map(family_profile_from_row)
    .transpose()
}

// Delete profile
pub async fn delete_family_profile(pool: &Pool<Sqlite>, profile_id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
        DELETE FROM family_profiles
        WHERE profile_id = ?
        "#,
    )
    .bind(profile_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}
