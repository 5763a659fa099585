use async_graphql::{InputObject, SimpleObject, ID};

use crate::gql::common::helpers::format_timestamp;

#[derive(SimpleObject, Clone, Debug)]
pub struct Product {
    pub id: ID,
    pub name: String,
    pub stock: i32,
    pub price: f64,
    pub created_at: String,
}

impl From<infra::models::ProductRow> for Product {
    fn from(row: infra::models::ProductRow) -> Self {
        Self {
            id: row.id.into(),
            name: row.name,
            stock: row.stock,
            price: row.price,
            created_at: format_timestamp(row.created_at),
        }
    }
}

#[derive(InputObject)]
pub struct ProductInput {
    pub name: String,
    pub stock: i32,
    pub price: f64,
}

/// Partial update: omitted fields keep their stored value.
#[derive(InputObject, Default)]
pub struct ProductUpdateInput {
    pub name: Option<String>,
    pub stock: Option<i32>,
    pub price: Option<f64>,
}
