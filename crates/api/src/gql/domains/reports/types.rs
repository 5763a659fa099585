use async_graphql::SimpleObject;

use crate::gql::domains::clients::types::Client;
use crate::gql::domains::users::types::User;

/// A client with the summed total of its completed orders.
#[derive(SimpleObject, Clone)]
pub struct TopClient {
    pub total: f64,
    pub client: Vec<Client>,
}

impl From<infra::models::TopClientRow> for TopClient {
    fn from(row: infra::models::TopClientRow) -> Self {
        Self {
            total: row.total,
            client: vec![row.client.into()],
        }
    }
}

/// A seller with the summed total of their completed orders.
#[derive(SimpleObject, Clone)]
pub struct TopUser {
    pub total: f64,
    pub seller: Vec<User>,
}

impl From<infra::models::TopSellerRow> for TopUser {
    fn from(row: infra::models::TopSellerRow) -> Self {
        Self {
            total: row.total,
            seller: vec![row.seller.into()],
        }
    }
}
