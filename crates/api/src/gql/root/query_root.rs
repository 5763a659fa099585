use async_graphql::MergedObject;

use crate::gql::domains::clients::ClientQuery;
use crate::gql::domains::orders::OrderQuery;
use crate::gql::domains::products::ProductQuery;
use crate::gql::domains::reports::ReportQuery;
use crate::gql::domains::users::UserQuery;

#[derive(MergedObject, Default)]
pub struct QueryRoot(UserQuery, ProductQuery, ClientQuery, OrderQuery, ReportQuery);
