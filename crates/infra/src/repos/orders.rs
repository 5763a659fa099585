use sqlx::types::Json;
use sqlx::{PgExecutor, Result};
use uuid::Uuid;

use crate::models::{OrderLine, OrderRow};

const ORDER_COLUMNS: &str =
    "id, items, total, client_id, seller_id, state, created_at, updated_at";

#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "order_state", rename_all = "lowercase")]
pub enum OrderState {
    Pending,
    Completed,
    Cancelled,
}

#[derive(Debug, Clone)]
pub struct CreateOrderData {
    pub items: Vec<OrderLine>,
    pub total: f64,
    pub client_id: Uuid,
    pub seller_id: Uuid,
    pub state: OrderState,
}

#[derive(Debug, Clone)]
pub struct UpdateOrderData {
    pub items: Option<Vec<OrderLine>>,
    pub total: Option<f64>,
    pub client_id: Uuid,
    pub state: Option<OrderState>,
}

pub async fn list<'e>(executor: impl PgExecutor<'e>) -> Result<Vec<OrderRow>> {
    sqlx::query_as::<_, OrderRow>(&format!(
        "SELECT {ORDER_COLUMNS} FROM orders ORDER BY created_at ASC, id ASC"
    ))
    .fetch_all(executor)
    .await
}

pub async fn list_by_seller<'e>(
    executor: impl PgExecutor<'e>,
    seller_id: Uuid,
) -> Result<Vec<OrderRow>> {
    sqlx::query_as::<_, OrderRow>(&format!(
        "SELECT {ORDER_COLUMNS} FROM orders WHERE seller_id = $1 ORDER BY created_at ASC, id ASC"
    ))
    .bind(seller_id)
    .fetch_all(executor)
    .await
}

pub async fn list_by_state<'e>(
    executor: impl PgExecutor<'e>,
    state: OrderState,
) -> Result<Vec<OrderRow>> {
    sqlx::query_as::<_, OrderRow>(&format!(
        "SELECT {ORDER_COLUMNS} FROM orders WHERE state = $1 ORDER BY created_at ASC, id ASC"
    ))
    .bind(state)
    .fetch_all(executor)
    .await
}

pub async fn get_by_id<'e>(executor: impl PgExecutor<'e>, id: Uuid) -> Result<Option<OrderRow>> {
    sqlx::query_as::<_, OrderRow>(&format!(
        "SELECT {ORDER_COLUMNS} FROM orders WHERE id = $1"
    ))
    .bind(id)
    .fetch_optional(executor)
    .await
}

/// Same as [`get_by_id`] but holds a row lock for the rest of the transaction.
pub async fn get_by_id_for_update<'e>(
    executor: impl PgExecutor<'e>,
    id: Uuid,
) -> Result<Option<OrderRow>> {
    sqlx::query_as::<_, OrderRow>(&format!(
        "SELECT {ORDER_COLUMNS} FROM orders WHERE id = $1 FOR UPDATE"
    ))
    .bind(id)
    .fetch_optional(executor)
    .await
}

pub async fn create<'e>(executor: impl PgExecutor<'e>, data: CreateOrderData) -> Result<OrderRow> {
    sqlx::query_as::<_, OrderRow>(&format!(
        r#"
        INSERT INTO orders (items, total, client_id, seller_id, state)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING {ORDER_COLUMNS}
        "#
    ))
    .bind(Json(&data.items))
    .bind(data.total)
    .bind(data.client_id)
    .bind(data.seller_id)
    .bind(data.state)
    .fetch_one(executor)
    .await
}

pub async fn update<'e>(
    executor: impl PgExecutor<'e>,
    id: Uuid,
    data: UpdateOrderData,
) -> Result<Option<OrderRow>> {
    sqlx::query_as::<_, OrderRow>(&format!(
        r#"
        UPDATE orders
        SET items = COALESCE($2, items),
            total = COALESCE($3, total),
            client_id = $4,
            state = COALESCE($5, state),
            updated_at = NOW()
        WHERE id = $1
        RETURNING {ORDER_COLUMNS}
        "#
    ))
    .bind(id)
    .bind(data.items.as_ref().map(Json))
    .bind(data.total)
    .bind(data.client_id)
    .bind(data.state)
    .fetch_optional(executor)
    .await
}

pub async fn delete<'e>(executor: impl PgExecutor<'e>, id: Uuid) -> Result<bool> {
    let result = sqlx::query("DELETE FROM orders WHERE id = $1")
        .bind(id)
        .execute(executor)
        .await?;

    Ok(result.rows_affected() > 0)
}

