use async_graphql::dataloader::DataLoader;
use async_graphql::{EmptySubscription, Schema};

use super::loaders::ClientLoader;
use super::{MutationRoot, QueryRoot};
use crate::state::AppState;

pub type AppSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

/// Build the GraphQL schema and inject shared state (AppState) into the context.
pub fn build_schema(state: AppState, introspection: bool) -> AppSchema {
    let client_loader = DataLoader::new(ClientLoader::new(state.db.clone()), tokio::spawn);

    let mut builder = Schema::build(
        QueryRoot::default(),
        MutationRoot::default(),
        EmptySubscription,
    )
    .data(state) // AppState is Clone; available in resolvers via ctx.data::<AppState>()
    .data(client_loader)
    .limit_depth(15)
    .limit_complexity(200);

    if !introspection {
        builder = builder.disable_introspection();
    }

    builder.finish()
}
