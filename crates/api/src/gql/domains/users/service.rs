use uuid::Uuid;

use infra::db::is_unique_violation;
use infra::models::UserRow;
use infra::repos::{users, CreateUserData};

use crate::auth::PasswordService;
use crate::gql::common::helpers::{required_text, validate_email};
use crate::gql::error::{GqlError, GqlResult};
use crate::state::AppState;

use super::types::{AuthInput, UserInput};

const DUPLICATE_EMAIL: &str = "A user with this email already exists";
const INVALID_CREDENTIALS: &str = "Invalid credentials";

/// Validated registration data; the password is still in clear text.
#[derive(Debug)]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
}

pub fn validate_user_input(input: UserInput) -> GqlResult<NewUser> {
    PasswordService::validate_password_strength(&input.password)
        .map_err(|msg| GqlError::validation("password", msg))?;

    Ok(NewUser {
        first_name: required_text("firstName", input.first_name)?,
        last_name: required_text("lastName", input.last_name)?,
        email: validate_email("email", input.email)?,
        password: input.password,
    })
}

pub async fn create_user(state: &AppState, input: UserInput) -> GqlResult<UserRow> {
    let new_user = validate_user_input(input)?;

    if users::email_exists(&state.db, &new_user.email).await? {
        return Err(GqlError::conflict(DUPLICATE_EMAIL));
    }

    let password_hash =
        PasswordService::hash_password(&new_user.password, state.auth_config().bcrypt_cost)?;

    let row = users::create(
        &state.db,
        CreateUserData {
            first_name: new_user.first_name,
            last_name: new_user.last_name,
            email: new_user.email,
            password_hash,
        },
    )
    .await
    .map_err(|e| {
        // Lost a race with a concurrent registration for the same email
        if is_unique_violation(&e) {
            GqlError::conflict(DUPLICATE_EMAIL)
        } else {
            GqlError::from(e)
        }
    })?;

    tracing::info!(user_id = %row.id, "User registered");
    Ok(row)
}

/// Check the credentials and issue a signed token.
pub async fn authenticate(state: &AppState, input: AuthInput) -> GqlResult<String> {
    let email = input.email.trim().to_lowercase();

    let credentials = match users::get_credentials_by_email(&state.db, &email).await? {
        Some(row) => row,
        None => {
            tracing::warn!("Login attempt for unknown email");
            return Err(GqlError::unauthenticated(INVALID_CREDENTIALS));
        }
    };

    if !PasswordService::verify_password(&input.password, &credentials.password_hash)? {
        tracing::warn!(user_id = %credentials.id, "Login attempt with wrong password");
        return Err(GqlError::unauthenticated(INVALID_CREDENTIALS));
    }

    let token = state
        .jwt_service()
        .create_token(credentials.id, credentials.email)?;

    tracing::info!(user_id = %credentials.id, "User authenticated");
    Ok(token)
}

pub async fn get_user(state: &AppState, user_id: Uuid) -> GqlResult<UserRow> {
    users::get_by_id(&state.db, user_id)
        .await?
        .ok_or_else(|| GqlError::not_found("User", user_id))
}
