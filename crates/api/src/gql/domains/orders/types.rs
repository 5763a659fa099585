use async_graphql::dataloader::DataLoader;
use async_graphql::{
    ComplexObject, Context, Enum, ErrorExtensions, InputObject, SimpleObject, ID,
};
use uuid::Uuid;

use crate::gql::common::helpers::format_timestamp;
use crate::gql::domains::clients::types::Client;
use crate::gql::error::GqlError;
use crate::gql::loaders::ClientLoader;

#[derive(Enum, Copy, Clone, Eq, PartialEq, Debug)]
pub enum OrderState {
    #[graphql(name = "PENDING")]
    Pending,
    #[graphql(name = "COMPLETED")]
    Completed,
    #[graphql(name = "CANCELLED")]
    Cancelled,
}

impl From<OrderState> for infra::repos::OrderState {
    fn from(state: OrderState) -> Self {
        match state {
            OrderState::Pending => infra::repos::OrderState::Pending,
            OrderState::Completed => infra::repos::OrderState::Completed,
            OrderState::Cancelled => infra::repos::OrderState::Cancelled,
        }
    }
}

impl From<infra::repos::OrderState> for OrderState {
    fn from(state: infra::repos::OrderState) -> Self {
        match state {
            infra::repos::OrderState::Pending => OrderState::Pending,
            infra::repos::OrderState::Completed => OrderState::Completed,
            infra::repos::OrderState::Cancelled => OrderState::Cancelled,
        }
    }
}

/// One line of an order, as captured when the order was placed.
#[derive(SimpleObject, Clone, Debug)]
pub struct OrderProduct {
    /// Id of the ordered product
    pub id: ID,
    pub quantity: i32,
    pub name: String,
    pub price: f64,
}

impl From<infra::models::OrderLine> for OrderProduct {
    fn from(line: infra::models::OrderLine) -> Self {
        Self {
            id: line.product_id.into(),
            quantity: line.quantity,
            name: line.name,
            price: line.price,
        }
    }
}

#[derive(SimpleObject, Clone, Debug)]
#[graphql(complex)]
pub struct Order {
    pub id: ID,
    pub order: Vec<OrderProduct>,
    pub total: f64,
    #[graphql(skip)]
    pub client_id: Uuid,
    pub seller: ID,
    pub state: OrderState,
    pub created_at: String,
}

impl From<infra::models::OrderRow> for Order {
    fn from(row: infra::models::OrderRow) -> Self {
        Self {
            id: row.id.into(),
            order: row.items.0.into_iter().map(OrderProduct::from).collect(),
            total: row.total,
            client_id: row.client_id,
            seller: row.seller_id.into(),
            state: row.state.into(),
            created_at: format_timestamp(row.created_at),
        }
    }
}

#[ComplexObject]
impl Order {
    async fn client(&self, ctx: &Context<'_>) -> async_graphql::Result<Option<Client>> {
        let loader = ctx.data::<DataLoader<ClientLoader>>()?;

        let client = loader
            .load_one(self.client_id)
            .await
            .map_err(|e| {
                GqlError::Internal(format!("Loading client failed: {e}")).extend()
            })?;

        Ok(client.map(Client::from))
    }
}

#[derive(InputObject, Clone, Default)]
pub struct OrderProductInput {
    /// Id of the product being ordered
    pub id: Option<ID>,
    pub quantity: Option<i32>,
    /// Defaults to the product's current name
    pub name: Option<String>,
    /// Defaults to the product's current price
    pub price: Option<f64>,
}

#[derive(InputObject)]
pub struct OrderInput {
    pub order: Option<Vec<OrderProductInput>>,
    /// Defaults to the sum of quantity × price over the lines
    pub total: Option<f64>,
    pub client: ID,
    pub state: Option<OrderState>,
}
