//! Database error types

use thiserror::Error;
use uuid::Uuid;

/// Errors from the persistence layer
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("Not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: String },

    /// The conditional order insert found an existing order for the
    /// quotation
    #[error("An order already exists for quotation {0}")]
    DuplicateOrder(Uuid),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl DatabaseError {
    /// Creates a NotFound error
    pub fn not_found(entity: &'static str, id: impl std::fmt::Display) -> Self {
        DatabaseError::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    /// Returns true if the underlying error is a unique-constraint violation
    pub fn is_unique_violation(&self) -> bool {
        match self {
            DatabaseError::Sqlx(sqlx::Error::Database(db)) => {
                db.code().as_deref() == Some("23505")
            }
            _ => false,
        }
    }
}
