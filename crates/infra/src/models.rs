use crate::repos::orders::OrderState;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, FromRow)]
pub struct UserRow {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// User row including the stored bcrypt hash. Only used by authentication.
#[derive(Debug, Clone, FromRow)]
pub struct UserCredentialsRow {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
}

#[derive(Debug, Clone, FromRow)]
pub struct ProductRow {
    pub id: Uuid,
    pub name: String,
    pub stock: i32,
    pub price: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow)]
pub struct ClientRow {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub company: String,
    pub email: String,
    pub telephone: Option<String>,
    pub seller_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Line item snapshot stored inside `orders.items`.
///
/// `product_id` refers to the product at order time; `name` and `price` are
/// copied so later product edits do not rewrite past orders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLine {
    pub product_id: Uuid,
    pub quantity: i32,
    pub name: String,
    pub price: f64,
}

#[derive(Debug, Clone, FromRow)]
pub struct OrderRow {
    pub id: Uuid,
    pub items: Json<Vec<OrderLine>>,
    pub total: f64,
    pub client_id: Uuid,
    pub seller_id: Uuid,
    pub state: OrderState,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow)]
pub struct TopClientRow {
    pub total: f64,
    #[sqlx(flatten)]
    pub client: ClientRow,
}

#[derive(Debug, Clone, FromRow)]
pub struct TopSellerRow {
    pub total: f64,
    #[sqlx(flatten)]
    pub seller: UserRow,
}
