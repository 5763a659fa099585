use async_graphql::{InputObject, SimpleObject, ID};

use crate::gql::common::helpers::format_timestamp;

#[derive(SimpleObject, Clone, Debug)]
pub struct User {
    pub id: ID,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub created_at: String,
}

impl From<infra::models::UserRow> for User {
    fn from(row: infra::models::UserRow) -> Self {
        Self {
            id: row.id.into(),
            first_name: row.first_name,
            last_name: row.last_name,
            email: row.email,
            created_at: format_timestamp(row.created_at),
        }
    }
}

#[derive(InputObject)]
pub struct UserInput {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
}

#[derive(InputObject)]
pub struct AuthInput {
    pub email: String,
    pub password: String,
}

#[derive(SimpleObject, Clone)]
pub struct Token {
    pub token: String,
}
