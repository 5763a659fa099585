use sqlx::{PgExecutor, Result};
use uuid::Uuid;

use crate::models::ClientRow;

const CLIENT_COLUMNS: &str =
    "id, first_name, last_name, company, email, telephone, seller_id, created_at, updated_at";

#[derive(Debug, Clone)]
pub struct CreateClientData {
    pub first_name: String,
    pub last_name: String,
    pub company: String,
    pub email: String,
    pub telephone: Option<String>,
    pub seller_id: Uuid,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateClientData {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub company: Option<String>,
    pub email: Option<String>,
    /// `None` keeps the stored number, `Some(None)` clears it.
    pub telephone: Option<Option<String>>,
}

pub async fn list<'e>(executor: impl PgExecutor<'e>) -> Result<Vec<ClientRow>> {
    sqlx::query_as::<_, ClientRow>(&format!(
        "SELECT {CLIENT_COLUMNS} FROM clients ORDER BY created_at ASC, id ASC"
    ))
    .fetch_all(executor)
    .await
}

pub async fn list_by_seller<'e>(
    executor: impl PgExecutor<'e>,
    seller_id: Uuid,
) -> Result<Vec<ClientRow>> {
    sqlx::query_as::<_, ClientRow>(&format!(
        "SELECT {CLIENT_COLUMNS} FROM clients WHERE seller_id = $1 ORDER BY created_at ASC, id ASC"
    ))
    .bind(seller_id)
    .fetch_all(executor)
    .await
}

pub async fn get_by_id<'e>(executor: impl PgExecutor<'e>, id: Uuid) -> Result<Option<ClientRow>> {
    sqlx::query_as::<_, ClientRow>(&format!(
        "SELECT {CLIENT_COLUMNS} FROM clients WHERE id = $1"
    ))
    .bind(id)
    .fetch_optional(executor)
    .await
}

/// True when another client already uses `email`. `exclude` skips the client being updated.
pub async fn email_taken<'e>(
    executor: impl PgExecutor<'e>,
    email: &str,
    exclude: Option<Uuid>,
) -> Result<bool> {
    sqlx::query_scalar::<_, bool>(
        r#"
        SELECT EXISTS(
            SELECT 1 FROM clients
            WHERE LOWER(email) = LOWER($1)
              AND ($2::uuid IS NULL OR id <> $2)
        )
        "#,
    )
    .bind(email)
    .bind(exclude)
    .fetch_one(executor)
    .await
}

pub async fn create<'e>(executor: impl PgExecutor<'e>, data: CreateClientData) -> Result<ClientRow> {
    sqlx::query_as::<_, ClientRow>(&format!(
        r#"
        INSERT INTO clients (first_name, last_name, company, email, telephone, seller_id)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING {CLIENT_COLUMNS}
        "#
    ))
    .bind(&data.first_name)
    .bind(&data.last_name)
    .bind(&data.company)
    .bind(&data.email)
    .bind(&data.telephone)
    .bind(data.seller_id)
    .fetch_one(executor)
    .await
}

pub async fn update<'e>(
    executor: impl PgExecutor<'e>,
    id: Uuid,
    data: UpdateClientData,
) -> Result<Option<ClientRow>> {
    sqlx::query_as::<_, ClientRow>(&format!(
        r#"
        UPDATE clients
        SET first_name = COALESCE($2, first_name),
            last_name = COALESCE($3, last_name),
            company = COALESCE($4, company),
            email = COALESCE($5, email),
            telephone = CASE WHEN $7 THEN $6 ELSE telephone END,
            updated_at = NOW()
        WHERE id = $1
        RETURNING {CLIENT_COLUMNS}
        "#
    ))
    .bind(id)
    .bind(&data.first_name)
    .bind(&data.last_name)
    .bind(&data.company)
    .bind(&data.email)
    .bind(data.telephone.as_ref().and_then(|t| t.as_deref()))
    .bind(data.telephone.is_some())
    .fetch_optional(executor)
    .await
}

pub async fn delete<'e>(executor: impl PgExecutor<'e>, id: Uuid) -> Result<bool> {
    let result = sqlx::query("DELETE FROM clients WHERE id = $1")
        .bind(id)
        .execute(executor)
        .await?;

    Ok(result.rows_affected() > 0)
}
