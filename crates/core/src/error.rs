/// Domain error taxonomy.
///
/// Each variant maps 1:1 to an HTTP status at the API boundary, but this
/// crate stays transport-agnostic: services and repositories return these
/// by value instead of using errors as control flow.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// `key` is the lookup key as given by the caller: a numeric id for most
    /// entities, a username for user-by-name lookups.
    #[error("Entity not found: {entity} {key}")]
    NotFound { entity: &'static str, key: String },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
