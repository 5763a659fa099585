use async_graphql::MaybeUndefined;
use uuid::Uuid;

use infra::db::{is_foreign_key_violation, is_unique_violation};
use infra::models::ClientRow;
use infra::repos::{clients, CreateClientData, UpdateClientData};

use crate::auth::permissions::require_owner;
use crate::gql::common::helpers::{blank_to_none, optional_text, required_text, validate_email};
use crate::gql::error::{GqlError, GqlResult};
use crate::state::AppState;

use super::types::{ClientInput, ClientUpdateInput};

const DUPLICATE_EMAIL: &str = "A client with this email already exists";

pub fn validate_create(input: ClientInput, seller_id: Uuid) -> GqlResult<CreateClientData> {
    Ok(CreateClientData {
        first_name: required_text("firstName", input.first_name)?,
        last_name: required_text("lastName", input.last_name)?,
        company: required_text("company", input.company)?,
        email: validate_email("email", input.email)?,
        telephone: blank_to_none(input.telephone),
        seller_id,
    })
}

pub fn validate_update(input: ClientUpdateInput) -> GqlResult<UpdateClientData> {
    Ok(UpdateClientData {
        first_name: optional_text("firstName", input.first_name)?,
        last_name: optional_text("lastName", input.last_name)?,
        company: optional_text("company", input.company)?,
        email: input
            .email
            .map(|e| validate_email("email", e))
            .transpose()?,
        telephone: match input.telephone {
            MaybeUndefined::Undefined => None,
            MaybeUndefined::Null => Some(None),
            MaybeUndefined::Value(t) => Some(blank_to_none(Some(t))),
        },
    })
}

fn map_write_error(e: sqlx::Error) -> GqlError {
    if is_unique_violation(&e) {
        GqlError::conflict(DUPLICATE_EMAIL)
    } else {
        GqlError::from(e)
    }
}

/// Load a client and check that `seller_id` owns it.
pub async fn get_owned(state: &AppState, client_id: Uuid, seller_id: Uuid) -> GqlResult<ClientRow> {
    let client = clients::get_by_id(&state.db, client_id)
        .await?
        .ok_or_else(|| GqlError::not_found("Client", client_id))?;

    require_owner(client.seller_id, seller_id, "client")?;
    Ok(client)
}

pub async fn create_client(
    state: &AppState,
    seller_id: Uuid,
    input: ClientInput,
) -> GqlResult<ClientRow> {
    let data = validate_create(input, seller_id)?;

    if clients::email_taken(&state.db, &data.email, None).await? {
        return Err(GqlError::conflict(DUPLICATE_EMAIL));
    }

    let row = clients::create(&state.db, data)
        .await
        .map_err(map_write_error)?;

    tracing::info!(client_id = %row.id, seller_id = %seller_id, "Client created");
    Ok(row)
}

pub async fn update_client(
    state: &AppState,
    seller_id: Uuid,
    client_id: Uuid,
    input: ClientUpdateInput,
) -> GqlResult<ClientRow> {
    let data = validate_update(input)?;
    get_owned(state, client_id, seller_id).await?;

    if let Some(ref email) = data.email {
        if clients::email_taken(&state.db, email, Some(client_id)).await? {
            return Err(GqlError::conflict(DUPLICATE_EMAIL));
        }
    }

    let row = clients::update(&state.db, client_id, data)
        .await
        .map_err(map_write_error)?
        .ok_or_else(|| GqlError::not_found("Client", client_id))?;

    tracing::info!(client_id = %row.id, "Client updated");
    Ok(row)
}

pub async fn delete_client(state: &AppState, seller_id: Uuid, client_id: Uuid) -> GqlResult<()> {
    get_owned(state, client_id, seller_id).await?;

    let deleted = clients::delete(&state.db, client_id).await.map_err(|e| {
        if is_foreign_key_violation(&e) {
            GqlError::conflict("Client still has orders; delete them first")
        } else {
            GqlError::from(e)
        }
    })?;

    if !deleted {
        return Err(GqlError::not_found("Client", client_id));
    }

    tracing::info!(client_id = %client_id, "Client deleted");
    Ok(())
}
