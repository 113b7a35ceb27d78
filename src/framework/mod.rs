//! Generic in-process resource store.
//!
//! This module provides the building blocks for serving a collection of
//! entities through an actor with a standard CRUD surface.
//!
//! # Main Components
//!
//! - [`ActorEntity`] - Trait that resource types implement to be managed by actors
//! - [`ResourceActor`] - Generic actor that owns and serves the entities
//! - [`ResourceClient`] - Type-safe, cloneable handle for sending requests
//! - [`StoreError`] - Common error types
//!
//! # Testing
//!
//! See [`mock`] module for utilities to test clients without spawning full actors.

pub mod actor;
pub mod client;
pub mod entity;
pub mod error;
pub mod message;
pub mod mock;

pub use actor::ResourceActor;
pub use client::ResourceClient;
pub use entity::ActorEntity;
pub use error::StoreError;
pub use message::{ResourceRequest, Response};
