use sqlx::{PgExecutor, Result};
use uuid::Uuid;

use crate::models::{UserCredentialsRow, UserRow};

#[derive(Debug, Clone)]
pub struct CreateUserData {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password_hash: String,
}

pub async fn get_by_id<'e>(executor: impl PgExecutor<'e>, id: Uuid) -> Result<Option<UserRow>> {
    sqlx::query_as::<_, UserRow>(
        "SELECT id, first_name, last_name, email, created_at, updated_at FROM users WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(executor)
    .await
}

pub async fn email_exists<'e>(executor: impl PgExecutor<'e>, email: &str) -> Result<bool> {
    sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE LOWER(email) = LOWER($1))")
        .bind(email)
        .fetch_one(executor)
        .await
}

/// Fetch the stored password hash for login.
pub async fn get_credentials_by_email<'e>(
    executor: impl PgExecutor<'e>,
    email: &str,
) -> Result<Option<UserCredentialsRow>> {
    sqlx::query_as::<_, UserCredentialsRow>(
        "SELECT id, email, password_hash FROM users WHERE LOWER(email) = LOWER($1)",
    )
    .bind(email)
    .fetch_optional(executor)
    .await
}

pub async fn create<'e>(executor: impl PgExecutor<'e>, data: CreateUserData) -> Result<UserRow> {
    sqlx::query_as::<_, UserRow>(
        r#"
        INSERT INTO users (first_name, last_name, email, password_hash)
        VALUES ($1, $2, $3, $4)
        RETURNING id, first_name, last_name, email, created_at, updated_at
        "#,
    )
    .bind(&data.first_name)
    .bind(&data.last_name)
    .bind(&data.email)
    .bind(&data.password_hash)
    .fetch_one(executor)
    .await
}
