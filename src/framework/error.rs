//! # Store Errors
//!
//! Errors raised by the store plumbing itself, as opposed to the entity's own
//! validation errors (carried in [`StoreError::Entity`]).

/// Errors that can occur within the resource store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Store closed")]
    Closed,
    #[error("Store dropped response channel")]
    Dropped,
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("Key already in use: {0}")]
    Conflict(String),
    #[error("Entity error: {0}")]
    Entity(Box<dyn std::error::Error + Send + Sync>),
}
