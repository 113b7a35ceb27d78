//! # PageStore Trait
//!
//! The persistence interface the editor depends on. Two implementations ship
//! with the crate:
//!
//! - [`PageClient`](crate::clients::PageClient) talks to an in-process page store.
//! - [`HttpPageStore`](crate::clients::HttpPageStore) speaks the `/pages` HTTP API
//!   over any [`Transport`](crate::api::Transport).
//!
//! Calls are request/response: each one resolves only once the store has
//! answered, and errors are returned to the caller, never swallowed.

use crate::model::{Page, PageCreate, PageId, PageUpdate};
use crate::page_actor::PageError;
use async_trait::async_trait;

#[async_trait]
pub trait PageStore: Send + Sync {
    /// All pages, ordered by id.
    async fn list(&self) -> Result<Vec<Page>, PageError>;

    /// One page by id. Missing pages are [`PageError::NotFound`].
    async fn get(&self, id: PageId) -> Result<Page, PageError>;

    /// One page by slug. Missing pages are [`PageError::NotFound`].
    async fn get_by_slug(&self, slug: &str) -> Result<Page, PageError>;

    /// Stores a new page; the store assigns its id and timestamps.
    async fn create(&self, page: PageCreate) -> Result<Page, PageError>;

    /// Changes the mutable fields present in `update`.
    async fn update(&self, id: PageId, update: PageUpdate) -> Result<Page, PageError>;

    async fn delete(&self, id: PageId) -> Result<(), PageError>;
}
