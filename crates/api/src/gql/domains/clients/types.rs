use async_graphql::{InputObject, MaybeUndefined, SimpleObject, ID};

use crate::gql::common::helpers::format_timestamp;

#[derive(SimpleObject, Clone, Debug)]
pub struct Client {
    pub id: ID,
    pub first_name: String,
    pub last_name: String,
    pub company: String,
    pub email: String,
    pub telephone: Option<String>,
    pub created_at: String,
    /// Id of the user (seller) who registered this client
    pub seller: ID,
}

impl From<infra::models::ClientRow> for Client {
    fn from(row: infra::models::ClientRow) -> Self {
        Self {
            id: row.id.into(),
            first_name: row.first_name,
            last_name: row.last_name,
            company: row.company,
            email: row.email,
            telephone: row.telephone,
            created_at: format_timestamp(row.created_at),
            seller: row.seller_id.into(),
        }
    }
}

#[derive(InputObject)]
pub struct ClientInput {
    pub first_name: String,
    pub last_name: String,
    pub company: String,
    pub email: String,
    pub telephone: Option<String>,
}

/// Partial update: omitted fields keep their stored value.
#[derive(InputObject, Default)]
pub struct ClientUpdateInput {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub company: Option<String>,
    pub email: Option<String>,
    /// Explicit `null` or an empty string removes the number
    pub telephone: MaybeUndefined<String>,
}
