//! Pure data structures for the page document.
//!
//! - [`Block`]: one visual element with a type tag and a property bag.
//! - [`Page`]: the stored document, an ordered list of blocks plus metadata.
//!
//! [`Page`] implements the [`ActorEntity`](crate::framework::ActorEntity) trait
//! (see [`crate::page_actor`]) so it can be served by a
//! [`ResourceActor`](crate::framework::ResourceActor).

pub mod block;
pub mod page;

pub use block::*;
pub use page::*;
