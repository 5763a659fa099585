use async_graphql::{Context, ErrorExtensions, Object, Result, ID};

use crate::auth::permissions::require_user;
use crate::gql::common::helpers::parse_id;
use crate::gql::error::{GqlError, ResultExt};
use crate::state::AppState;
use infra::repos::orders;

use super::service;
use super::types::{Order, OrderInput, OrderState};

#[derive(Default)]
pub struct OrderQuery;

#[Object]
impl OrderQuery {
    async fn get_all_orders(&self, ctx: &Context<'_>) -> Result<Vec<Order>> {
        let state = ctx.data::<AppState>()?;
        let rows = orders::list(&state.db).await.gql()?;
        Ok(rows.into_iter().map(Order::from).collect())
    }

    /// Orders placed by the authenticated seller
    async fn get_order_by_seller(&self, ctx: &Context<'_>) -> Result<Vec<Order>> {
        let seller_id = require_user(ctx).gql()?;
        let state = ctx.data::<AppState>()?;

        let rows = orders::list_by_seller(&state.db, seller_id).await.gql()?;
        Ok(rows.into_iter().map(Order::from).collect())
    }

    async fn get_order_by_id(&self, ctx: &Context<'_>, id: ID) -> Result<Order> {
        let order_id = parse_id(&id, "Order").gql()?;
        let state = ctx.data::<AppState>()?;

        let row = orders::get_by_id(&state.db, order_id)
            .await
            .gql()?
            .ok_or_else(|| GqlError::not_found("Order", id.as_str()).extend())?;

        Ok(row.into())
    }

    async fn get_order_by_status(&self, ctx: &Context<'_>, state: OrderState) -> Result<Vec<Order>> {
        let app_state = ctx.data::<AppState>()?;

        let rows = orders::list_by_state(&app_state.db, state.into())
            .await
            .gql()?;
        Ok(rows.into_iter().map(Order::from).collect())
    }
}

#[derive(Default)]
pub struct OrderMutation;

#[Object]
impl OrderMutation {
    /// Place an order for one of the authenticated seller's clients
    async fn create_order(&self, ctx: &Context<'_>, input: OrderInput) -> Result<Order> {
        let seller_id = require_user(ctx).gql()?;
        let state = ctx.data::<AppState>()?;

        let row = service::create_order(state, seller_id, input).await.gql()?;
        Ok(row.into())
    }

    async fn update_order(&self, ctx: &Context<'_>, id: ID, input: OrderInput) -> Result<Order> {
        let seller_id = require_user(ctx).gql()?;
        let order_id = parse_id(&id, "Order").gql()?;
        let state = ctx.data::<AppState>()?;

        let row = service::update_order(state, seller_id, order_id, input)
            .await
            .gql()?;
        Ok(row.into())
    }

    async fn delete_order(&self, ctx: &Context<'_>, id: ID) -> Result<String> {
        let seller_id = require_user(ctx).gql()?;
        let order_id = parse_id(&id, "Order").gql()?;
        let state = ctx.data::<AppState>()?;

        service::delete_order(state, seller_id, order_id).await.gql()?;
        Ok("Order deleted".to_string())
    }
}
