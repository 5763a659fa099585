use infra::repos::{CreateProductData, UpdateProductData};

use crate::gql::common::helpers::{
    non_negative_amount, non_negative_int, optional_text, required_text,
};
use crate::gql::error::GqlResult;

use super::types::{ProductInput, ProductUpdateInput};

/// Upper bound on `searchProductByName` results.
pub const SEARCH_LIMIT: i64 = 50;

pub fn validate_create(input: ProductInput) -> GqlResult<CreateProductData> {
    Ok(CreateProductData {
        name: required_text("name", input.name)?,
        stock: non_negative_int("stock", input.stock)?,
        price: non_negative_amount("price", input.price)?,
    })
}

pub fn validate_update(input: ProductUpdateInput) -> GqlResult<UpdateProductData> {
    Ok(UpdateProductData {
        name: optional_text("name", input.name)?,
        stock: input
            .stock
            .map(|s| non_negative_int("stock", s))
            .transpose()?,
        price: input
            .price
            .map(|p| non_negative_amount("price", p))
            .transpose()?,
    })
}
