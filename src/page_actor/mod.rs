//! # Page Store
//!
//! The Page resource served by the generic [`ResourceActor`].
//!
//! - [`entity`] - [`ActorEntity`](crate::framework::ActorEntity) implementation for [`Page`]
//! - [`error`] - [`PageError`] type for type-safe error handling
//! - [`new()`] - Factory function that creates the actor and client

pub mod entity;
pub mod error;

pub use error::*;

use crate::framework::{ResourceActor, ResourceClient};
use crate::model::Page;

/// Creates a new Page actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<Page>, ResourceClient<Page>) {
    ResourceActor::new(buffer_size)
}
