use async_graphql::MergedObject;

use crate::gql::domains::clients::ClientMutation;
use crate::gql::domains::orders::OrderMutation;
use crate::gql::domains::products::ProductMutation;
use crate::gql::domains::users::UserMutation;

#[derive(MergedObject, Default)]
pub struct MutationRoot(UserMutation, ProductMutation, ClientMutation, OrderMutation);
