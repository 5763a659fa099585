use async_graphql::{Context, Object, Result};

use crate::auth::permissions::require_user;
use crate::gql::error::ResultExt;
use crate::state::AppState;

use super::service;
use super::types::{AuthInput, Token, User, UserInput};

#[derive(Default)]
pub struct UserQuery;

#[Object]
impl UserQuery {
    /// The user identified by the bearer token of this request
    async fn get_authenticated_user(&self, ctx: &Context<'_>) -> Result<User> {
        let user_id = require_user(ctx).gql()?;
        let state = ctx.data::<AppState>()?;

        let row = service::get_user(state, user_id).await.gql()?;
        Ok(row.into())
    }
}

#[derive(Default)]
pub struct UserMutation;

#[Object]
impl UserMutation {
    async fn create_user(&self, ctx: &Context<'_>, input: UserInput) -> Result<User> {
        let state = ctx.data::<AppState>()?;
        let row = service::create_user(state, input).await.gql()?;
        Ok(row.into())
    }

    /// Exchange email and password for a signed token
    async fn authenticate_user(&self, ctx: &Context<'_>, input: AuthInput) -> Result<Token> {
        let state = ctx.data::<AppState>()?;
        let token = service::authenticate(state, input).await.gql()?;
        Ok(Token { token })
    }
}
