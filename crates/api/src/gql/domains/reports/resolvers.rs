use async_graphql::{Context, Object, Result};
use infra::repos::reports;

use crate::gql::error::ResultExt;
use crate::state::AppState;

use super::types::{TopClient, TopUser};

const BEST_CLIENTS_LIMIT: i64 = 10;
const BEST_SELLERS_LIMIT: i64 = 3;

#[derive(Default)]
pub struct ReportQuery;

#[Object]
impl ReportQuery {
    /// Clients ranked by the value of their completed orders
    async fn get_best_clients(&self, ctx: &Context<'_>) -> Result<Vec<TopClient>> {
        let state = ctx.data::<AppState>()?;

        let rows = reports::best_clients(&state.db, BEST_CLIENTS_LIMIT)
            .await
            .gql()?;
        Ok(rows.into_iter().map(TopClient::from).collect())
    }

    /// Sellers ranked by the value of their completed orders
    async fn get_best_sellers(&self, ctx: &Context<'_>) -> Result<Vec<TopUser>> {
        let state = ctx.data::<AppState>()?;

        let rows = reports::best_sellers(&state.db, BEST_SELLERS_LIMIT)
            .await
            .gql()?;
        Ok(rows.into_iter().map(TopUser::from).collect())
    }
}
