//! Aggregate reports over completed orders.

use sqlx::{PgExecutor, Result};

use crate::models::{TopClientRow, TopSellerRow};

/// Clients ranked by the summed total of their completed orders.
pub async fn best_clients<'e>(executor: impl PgExecutor<'e>, limit: i64) -> Result<Vec<TopClientRow>> {
    sqlx::query_as::<_, TopClientRow>(
        r#"
        SELECT SUM(o.total)::DOUBLE PRECISION AS total,
               c.id, c.first_name, c.last_name, c.company, c.email, c.telephone,
               c.seller_id, c.created_at, c.updated_at
        FROM orders o
        JOIN clients c ON c.id = o.client_id
        WHERE o.state = 'completed'
        GROUP BY c.id
        ORDER BY total DESC, c.id ASC
        LIMIT $1
        "#,
    )
    .bind(limit)
    .fetch_all(executor)
    .await
}

/// Sellers ranked by the summed total of their completed orders.
pub async fn best_sellers<'e>(executor: impl PgExecutor<'e>, limit: i64) -> Result<Vec<TopSellerRow>> {
    sqlx::query_as::<_, TopSellerRow>(
        r#"
        SELECT SUM(o.total)::DOUBLE PRECISION AS total,
               u.id, u.first_name, u.last_name, u.email, u.created_at, u.updated_at
        FROM orders o
        JOIN users u ON u.id = o.seller_id
        WHERE o.state = 'completed'
        GROUP BY u.id
        ORDER BY total DESC, u.id ASC
        LIMIT $1
        "#,
    )
    .bind(limit)
    .fetch_all(executor)
    .await
}
