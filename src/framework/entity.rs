//! # ActorEntity Trait
//!
//! The contract a stored resource implements to be served by the generic
//! [`ResourceActor`](crate::framework::ResourceActor). It names the id and DTO
//! types and provides the lifecycle hooks the actor calls.
//!
//! # Provided Methods (Hooks)
//! - [`ActorEntity::lookup_key`]
//! - [`ActorEntity::on_delete`]
//!
//! You do **not** need to implement these unless you want to customize behavior.

use chrono::{DateTime, Utc};
use std::fmt::{Debug, Display};

/// Trait that any resource entity must implement to be managed by ResourceActor.
///
/// The store owns identity and time: ids come from its counter (hence
/// `From<u32>`) and every hook that creates or changes an entity receives the
/// store's clock reading.
pub trait ActorEntity: Clone + Send + Sync + 'static {
    /// The unique identifier for this entity. Ordered so listings are stable.
    type Id: Ord + Clone + Send + Sync + Display + Debug + From<u32>;

    /// The data required to create a new instance.
    type Create: Send + Sync + Debug;

    /// The data required to update an existing instance.
    type Update: Send + Sync + Debug;

    /// The error type for this entity.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Construct the full entity from the store-assigned id, the payload and
    /// the creation time.
    fn from_create_params(
        id: Self::Id,
        params: Self::Create,
        now: DateTime<Utc>,
    ) -> Result<Self, Self::Error>;

    /// A secondary key that must be unique across the store (e.g. a slug).
    fn lookup_key(&self) -> Option<&str> {
        None
    }

    /// Apply an update. Must leave `self` unchanged when it returns an error.
    fn on_update(&mut self, update: Self::Update, now: DateTime<Utc>) -> Result<(), Self::Error>;

    /// Called immediately before the entity is removed from the store.
    fn on_delete(&self) -> Result<(), Self::Error> {
        Ok(())
    }
}
