//! Persistence clients for pages.

pub mod http_client;
pub mod page_client;
pub mod page_store;

pub use http_client::*;
pub use page_client::*;
pub use page_store::*;
