//! Runtime orchestration and lifecycle management.
//!
//! - [`PageSystem`] - starts the page store and shuts it down
//! - [`setup_tracing`] - initializes the tracing/logging infrastructure

pub mod page_system;
pub mod tracing;

pub use page_system::*;
pub use self::tracing::*;
