use async_graphql::{Context, ErrorExtensions, Object, Result, ID};

use crate::auth::permissions::require_user;
use crate::gql::common::helpers::parse_id;
use crate::gql::error::{GqlError, ResultExt};
use crate::state::AppState;
use infra::repos::clients;

use super::service;
use super::types::{Client, ClientInput, ClientUpdateInput};

#[derive(Default)]
pub struct ClientQuery;

#[Object]
impl ClientQuery {
    async fn get_all_clients(&self, ctx: &Context<'_>) -> Result<Vec<Client>> {
        let state = ctx.data::<AppState>()?;
        let rows = clients::list(&state.db).await.gql()?;
        Ok(rows.into_iter().map(Client::from).collect())
    }

    /// Clients registered by the authenticated seller
    async fn get_clients_by_seller(&self, ctx: &Context<'_>) -> Result<Vec<Client>> {
        let seller_id = require_user(ctx).gql()?;
        let state = ctx.data::<AppState>()?;

        let rows = clients::list_by_seller(&state.db, seller_id).await.gql()?;
        Ok(rows.into_iter().map(Client::from).collect())
    }

    async fn get_client_by_id(&self, ctx: &Context<'_>, id: ID) -> Result<Client> {
        let client_id = parse_id(&id, "Client").gql()?;
        let state = ctx.data::<AppState>()?;

        let row = clients::get_by_id(&state.db, client_id)
            .await
            .gql()?
            .ok_or_else(|| GqlError::not_found("Client", id.as_str()).extend())?;

        Ok(row.into())
    }
}

#[derive(Default)]
pub struct ClientMutation;

#[Object]
impl ClientMutation {
    /// Register a client owned by the authenticated seller
    async fn create_client(&self, ctx: &Context<'_>, input: ClientInput) -> Result<Client> {
        let seller_id = require_user(ctx).gql()?;
        let state = ctx.data::<AppState>()?;

        let row = service::create_client(state, seller_id, input).await.gql()?;
        Ok(row.into())
    }

    async fn update_client(
        &self,
        ctx: &Context<'_>,
        id: ID,
        input: ClientUpdateInput,
    ) -> Result<Client> {
        let seller_id = require_user(ctx).gql()?;
        let client_id = parse_id(&id, "Client").gql()?;
        let state = ctx.data::<AppState>()?;

        let row = service::update_client(state, seller_id, client_id, input)
            .await
            .gql()?;
        Ok(row.into())
    }

    async fn delete_client(&self, ctx: &Context<'_>, id: ID) -> Result<String> {
        let seller_id = require_user(ctx).gql()?;
        let client_id = parse_id(&id, "Client").gql()?;
        let state = ctx.data::<AppState>()?;

        service::delete_client(state, seller_id, client_id).await.gql()?;
        Ok("Client deleted".to_string())
    }
}
