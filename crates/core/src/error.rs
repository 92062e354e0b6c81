//! Domain-level error type shared across the workspace.

use crate::types::DbId;

/// Domain errors produced by core logic and surfaced by the API layer.
///
/// The API crate maps each variant onto an HTTP status code; see
/// `cardfolio_api::error::AppError`.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// An entity lookup by id came back empty.
    #[error("{entity} with id {id} not found")]
    NotFound {
        /// Entity name for the error message (e.g. `"BusinessCard"`).
        entity: &'static str,
        id: DbId,
    },

    /// Input failed a domain validation rule.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The operation conflicts with existing state (duplicate row, taken slug).
    #[error("Conflict: {0}")]
    Conflict(String),

    /// The caller is not authenticated.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// The caller is authenticated but not allowed to do this.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// An unexpected internal failure.
    #[error("Internal error: {0}")]
    Internal(String),
}
