//! User database queries.

use sqlx::PgPool;

use super::AuthError;
use crate::models::auth::User;

/// Fetch a user by email, returning (id, name, password_hash, role).
pub async fn find_user_by_email(
    pool: &PgPool,
    email: &str,
) -> Result<Option<(String, Option<String>, String, String)>, AuthError> {
    let row = sqlx::query_as::<_, (String, Option<String>, String, String)>(
        "SELECT id::text, name, password_hash, role FROM users WHERE email = $1",
    )
    .bind(email)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

/// Create a new user, returning the user ID.
pub async fn create_user(
    pool: &PgPool,
    email: &str,
    name: Option<&str>,
    password_hash: &str,
    role: &str,
) -> Result<String, AuthError> {
    let user_id = sqlx::query_scalar::<_, String>(
        "INSERT INTO users (email, name, password_hash, role) \
         VALUES ($1, $2, $3, $4) RETURNING id::text",
    )
    .bind(email)
    .bind(name)
    .bind(password_hash)
    .bind(role)
    .fetch_one(pool)
    .await?;
    Ok(user_id)
}

/// Check whether an email is already registered.
pub async fn email_exists(pool: &PgPool, email: &str) -> Result<bool, AuthError> {
    let exists =
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
            .bind(email)
            .fetch_one(pool)
            .await?;
    Ok(exists)
}

/// Count total users.
pub async fn user_count(pool: &PgPool) -> Result<i64, AuthError> {
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users")
        .fetch_one(pool)
        .await?;
    Ok(count)
}

/// Fetch a user by ID.
pub async fn get_user_by_id(pool: &PgPool, user_id: &str) -> Result<Option<User>, AuthError> {
    let row = sqlx::query_as::<_, (String, Option<String>, String)>(
        "SELECT email, name, role FROM users WHERE id = $1::uuid",
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await?;
    Ok(row.map(|(email, name, role)| User {
        id: user_id.to_string(),
        email,
        name,
        role,
    }))
}

/// List users ordered by creation time, returning one page plus the total.
pub async fn list_users(
    pool: &PgPool,
    limit: i64,
    offset: i64,
) -> Result<(Vec<User>, i64), AuthError> {
    let total = user_count(pool).await?;
    let rows = sqlx::query_as::<_, (String, String, Option<String>, String)>(
        "SELECT id::text, email, name, role FROM users \
         ORDER BY created_at ASC LIMIT $1 OFFSET $2",
    )
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;
    let users = rows
        .into_iter()
        .map(|(id, email, name, role)| User {
            id,
            email,
            name,
            role,
        })
        .collect();
    Ok((users, total))
}

/// Set a user's role, returning false when the user does not exist.
pub async fn set_user_role(pool: &PgPool, user_id: &str, role: &str) -> Result<bool, AuthError> {
    let result = sqlx::query("UPDATE users SET role = $2 WHERE id = $1::uuid")
        .bind(user_id)
        .bind(role)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// Delete a user, returning false when the user does not exist.
pub async fn delete_user(pool: &PgPool, user_id: &str) -> Result<bool, AuthError> {
    let result = sqlx::query("DELETE FROM users WHERE id = $1::uuid")
        .bind(user_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
