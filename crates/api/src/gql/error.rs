use async_graphql::ErrorExtensions;
use thiserror::Error;

/// Unified error type for GraphQL resolvers.
///
/// Every variant maps to a stable `extensions.code` so clients can branch on
/// the kind of failure instead of parsing messages:
///   - `Validation` → `VALIDATION_FAILED` (plus the offending `field`)
///   - `Unauthenticated` → `UNAUTHENTICATED`
///   - `Forbidden` → `FORBIDDEN`
///   - `NotFound` → `NOT_FOUND` (plus the `resource` kind)
///   - `Conflict` → `CONFLICT`
///   - `Database` / `Internal` → `INTERNAL_ERROR`, detail logged server-side only
#[derive(Debug, Error)]
pub enum GqlError {
    #[error("Validation failed for '{field}': {message}")]
    Validation { field: String, message: String },

    #[error("{0}")]
    Unauthenticated(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("{resource} with id '{id}' not found")]
    NotFound { resource: &'static str, id: String },

    #[error("{0}")]
    Conflict(String),

    #[error("Internal database error")]
    Database(#[from] sqlx::Error),

    #[error("Internal server error")]
    Internal(String),
}

pub type GqlResult<T> = std::result::Result<T, GqlError>;

impl GqlError {
    pub fn validation(field: &str, message: impl Into<String>) -> Self {
        GqlError::Validation {
            field: field.to_string(),
            message: message.into(),
        }
    }

    pub fn unauthenticated(message: impl Into<String>) -> Self {
        GqlError::Unauthenticated(message.into())
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        GqlError::Forbidden(message.into())
    }

    pub fn not_found(resource: &'static str, id: impl std::fmt::Display) -> Self {
        GqlError::NotFound {
            resource,
            id: id.to_string(),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        GqlError::Conflict(message.into())
    }

    pub fn code(&self) -> &'static str {
        match self {
            GqlError::Validation { .. } => "VALIDATION_FAILED",
            GqlError::Unauthenticated(_) => "UNAUTHENTICATED",
            GqlError::Forbidden(_) => "FORBIDDEN",
            GqlError::NotFound { .. } => "NOT_FOUND",
            GqlError::Conflict(_) => "CONFLICT",
            GqlError::Database(_) | GqlError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl From<crate::error::AppError> for GqlError {
    fn from(e: crate::error::AppError) -> Self {
        match e {
            crate::error::AppError::Db(e) => GqlError::Database(e),
            other => GqlError::Internal(other.to_string()),
        }
    }
}

impl ErrorExtensions for GqlError {
    fn extend(&self) -> async_graphql::Error {
        match self {
            // Log the real error server-side; clients only see the generic message
            GqlError::Database(e) => tracing::error!("Database error: {e}"),
            GqlError::Internal(detail) => tracing::error!("Internal error: {detail}"),
            _ => {}
        }

        async_graphql::Error::new(self.to_string()).extend_with(|_, ext| {
            ext.set("code", self.code());
            match self {
                GqlError::Validation { field, .. } => ext.set("field", field.as_str()),
                GqlError::NotFound { resource, .. } => ext.set("resource", *resource),
                _ => {}
            }
        })
    }
}

/// Extension trait that turns a service `GqlResult<T>` into the
/// `async_graphql::Result<T>` resolvers return, keeping the error code.
///
/// Usage: `products::service::create(state, input).await.gql()`
pub trait ResultExt<T> {
    fn gql(self) -> async_graphql::Result<T>;
}

impl<T> ResultExt<T> for GqlResult<T> {
    fn gql(self) -> async_graphql::Result<T> {
        self.map_err(|e| e.extend())
    }
}

impl<T> ResultExt<T> for std::result::Result<T, sqlx::Error> {
    fn gql(self) -> async_graphql::Result<T> {
        self.map_err(|e| GqlError::from(e).extend())
    }
}
