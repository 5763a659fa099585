use async_graphql::Context;
use uuid::Uuid;

use crate::auth::Claims;
use crate::gql::error::{GqlError, GqlResult};

/// Resolve the authenticated caller's user id from the GraphQL context.
pub fn require_user(ctx: &Context<'_>) -> GqlResult<Uuid> {
    let claims = ctx
        .data_opt::<Claims>()
        .ok_or_else(|| GqlError::unauthenticated("You must be logged in to perform this action"))?;

    claims
        .user_id()
        .ok_or_else(|| GqlError::unauthenticated("Invalid token subject"))
}

/// Ensure the caller is the seller that owns a client or order.
pub fn require_owner(owner_id: Uuid, caller_id: Uuid, resource: &str) -> GqlResult<()> {
    if owner_id != caller_id {
        return Err(GqlError::forbidden(format!(
            "Access denied: this {resource} belongs to another seller"
        )));
    }
    Ok(())
}
