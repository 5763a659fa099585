use sqlx::{PgExecutor, Result};
use uuid::Uuid;

use crate::models::ProductRow;

const PRODUCT_COLUMNS: &str = "id, name, stock, price, created_at, updated_at";

#[derive(Debug, Clone)]
pub struct CreateProductData {
    pub name: String,
    pub stock: i32,
    pub price: f64,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateProductData {
    pub name: Option<String>,
    pub stock: Option<i32>,
    pub price: Option<f64>,
}

pub async fn list<'e>(executor: impl PgExecutor<'e>) -> Result<Vec<ProductRow>> {
    sqlx::query_as::<_, ProductRow>(&format!(
        "SELECT {PRODUCT_COLUMNS} FROM products ORDER BY created_at ASC, id ASC"
    ))
    .fetch_all(executor)
    .await
}

pub async fn get_by_id<'e>(executor: impl PgExecutor<'e>, id: Uuid) -> Result<Option<ProductRow>> {
    sqlx::query_as::<_, ProductRow>(&format!(
        "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1"
    ))
    .bind(id)
    .fetch_optional(executor)
    .await
}

/// Load products by id and lock them until the surrounding transaction ends.
pub async fn lock_by_ids<'e>(
    executor: impl PgExecutor<'e>,
    ids: &[Uuid],
) -> Result<Vec<ProductRow>> {
    sqlx::query_as::<_, ProductRow>(&format!(
        "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = ANY($1::uuid[]) ORDER BY id FOR UPDATE"
    ))
    .bind(ids)
    .fetch_all(executor)
    .await
}

/// Case-insensitive substring search on the product name.
pub async fn search_by_name<'e>(
    executor: impl PgExecutor<'e>,
    text: &str,
    limit: i64,
) -> Result<Vec<ProductRow>> {
    let pattern = format!("%{}%", escape_like(text));

    sqlx::query_as::<_, ProductRow>(&format!(
        r#"
        SELECT {PRODUCT_COLUMNS}
        FROM products
        WHERE name ILIKE $1 ESCAPE '\'
        ORDER BY name ASC, id ASC
        LIMIT $2
        "#
    ))
    .bind(pattern)
    .bind(limit)
    .fetch_all(executor)
    .await
}

pub async fn create<'e>(executor: impl PgExecutor<'e>, data: CreateProductData) -> Result<ProductRow> {
    sqlx::query_as::<_, ProductRow>(&format!(
        r#"
        INSERT INTO products (name, stock, price)
        VALUES ($1, $2, $3)
        RETURNING {PRODUCT_COLUMNS}
        "#
    ))
    .bind(&data.name)
    .bind(data.stock)
    .bind(data.price)
    .fetch_one(executor)
    .await
}

/// Apply a partial update. Fields left as `None` keep their stored value.
pub async fn update<'e>(
    executor: impl PgExecutor<'e>,
    id: Uuid,
    data: UpdateProductData,
) -> Result<Option<ProductRow>> {
    sqlx::query_as::<_, ProductRow>(&format!(
        r#"
        UPDATE products
        SET name = COALESCE($2, name),
            stock = COALESCE($3, stock),
            price = COALESCE($4, price),
            updated_at = NOW()
        WHERE id = $1
        RETURNING {PRODUCT_COLUMNS}
        "#
    ))
    .bind(id)
    .bind(&data.name)
    .bind(data.stock)
    .bind(data.price)
    .fetch_optional(executor)
    .await
}

/// Add `delta` (possibly negative) to the stock of a product.
pub async fn adjust_stock<'e>(executor: impl PgExecutor<'e>, id: Uuid, delta: i32) -> Result<()> {
    sqlx::query("UPDATE products SET stock = stock + $2, updated_at = NOW() WHERE id = $1")
        .bind(id)
        .bind(delta)
        .execute(executor)
        .await?;

    Ok(())
}

pub async fn delete<'e>(executor: impl PgExecutor<'e>, id: Uuid) -> Result<bool> {
    let result = sqlx::query("DELETE FROM products WHERE id = $1")
        .bind(id)
        .execute(executor)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// Escape `%`, `_` and `\` so user text matches literally inside a LIKE pattern.
pub fn escape_like(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
