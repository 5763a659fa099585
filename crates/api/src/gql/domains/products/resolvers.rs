use async_graphql::{Context, ErrorExtensions, Object, Result, ID};

use crate::gql::common::helpers::{parse_id, required_text};
use crate::gql::error::{GqlError, ResultExt};
use crate::state::AppState;
use infra::repos::products;

use super::service::{self, SEARCH_LIMIT};
use super::types::{Product, ProductInput, ProductUpdateInput};

#[derive(Default)]
pub struct ProductQuery;

#[Object]
impl ProductQuery {
    async fn get_all_products(&self, ctx: &Context<'_>) -> Result<Vec<Product>> {
        let state = ctx.data::<AppState>()?;
        let rows = products::list(&state.db).await.gql()?;
        Ok(rows.into_iter().map(Product::from).collect())
    }

    async fn get_product_by_id(&self, ctx: &Context<'_>, id: ID) -> Result<Product> {
        let product_id = parse_id(&id, "Product").gql()?;
        let state = ctx.data::<AppState>()?;

        let row = products::get_by_id(&state.db, product_id)
            .await
            .gql()?
            .ok_or_else(|| GqlError::not_found("Product", id.as_str()).extend())?;

        Ok(row.into())
    }

    /// Case-insensitive substring match on the product name
    async fn search_product_by_name(&self, ctx: &Context<'_>, text: String) -> Result<Vec<Product>> {
        let text = required_text("text", text).gql()?;
        let state = ctx.data::<AppState>()?;

        let rows = products::search_by_name(&state.db, &text, SEARCH_LIMIT)
            .await
            .gql()?;

        Ok(rows.into_iter().map(Product::from).collect())
    }
}

#[derive(Default)]
pub struct ProductMutation;

#[Object]
impl ProductMutation {
    async fn create_product(&self, ctx: &Context<'_>, input: ProductInput) -> Result<Product> {
        let data = service::validate_create(input).gql()?;
        let state = ctx.data::<AppState>()?;

        let row = products::create(&state.db, data).await.gql()?;

        tracing::info!(product_id = %row.id, "Product created");
        Ok(row.into())
    }

    async fn update_product(
        &self,
        ctx: &Context<'_>,
        id: ID,
        input: ProductUpdateInput,
    ) -> Result<Product> {
        let product_id = parse_id(&id, "Product").gql()?;
        let data = service::validate_update(input).gql()?;
        let state = ctx.data::<AppState>()?;

        let row = products::update(&state.db, product_id, data)
            .await
            .gql()?
            .ok_or_else(|| GqlError::not_found("Product", id.as_str()).extend())?;

        tracing::info!(product_id = %row.id, "Product updated");
        Ok(row.into())
    }

    async fn delete_product(&self, ctx: &Context<'_>, id: ID) -> Result<String> {
        let product_id = parse_id(&id, "Product").gql()?;
        let state = ctx.data::<AppState>()?;

        if !products::delete(&state.db, product_id).await.gql()? {
            return Err(GqlError::not_found("Product", id.as_str()).extend());
        }

        tracing::info!(product_id = %product_id, "Product deleted");
        Ok("Product deleted".to_string())
    }
}
