//! # Page Client
//!
//! [`PageStore`] implementation backed by the in-process page actor.
use crate::clients::page_store::PageStore;
use crate::framework::{ResourceClient, StoreError};
use crate::model::{Page, PageCreate, PageId, PageUpdate};
use crate::page_actor::PageError;
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Client for interacting with the Page actor.
#[derive(Clone)]
pub struct PageClient {
    inner: ResourceClient<Page>,
}

impl PageClient {
    pub fn new(inner: ResourceClient<Page>) -> Self {
        Self { inner }
    }

    /// Map store errors to page errors, recovering the page's own
    /// validation error when there is one.
    fn map_error(e: StoreError) -> PageError {
        match e {
            StoreError::NotFound(id) => PageError::NotFound(id),
            StoreError::Conflict(slug) => PageError::SlugTaken(slug),
            StoreError::Entity(inner) => match inner.downcast::<PageError>() {
                Ok(page_error) => *page_error,
                Err(other) => PageError::Unavailable(other.to_string()),
            },
            StoreError::Closed | StoreError::Dropped => PageError::Unavailable(e.to_string()),
        }
    }
}

#[async_trait]
impl PageStore for PageClient {
    #[instrument(skip(self))]
    async fn list(&self) -> Result<Vec<Page>, PageError> {
        debug!("Sending request");
        self.inner.list().await.map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    async fn get(&self, id: PageId) -> Result<Page, PageError> {
        debug!("Sending request");
        self.inner
            .get(id)
            .await
            .map_err(Self::map_error)?
            .ok_or_else(|| PageError::NotFound(id.to_string()))
    }

    #[instrument(skip(self))]
    async fn get_by_slug(&self, slug: &str) -> Result<Page, PageError> {
        debug!("Sending request");
        self.inner
            .find(slug.to_string())
            .await
            .map_err(Self::map_error)?
            .ok_or_else(|| PageError::NotFound(slug.to_string()))
    }

    #[instrument(skip(self, page), fields(slug = %page.slug))]
    async fn create(&self, page: PageCreate) -> Result<Page, PageError> {
        debug!(?page, "create called");
        self.inner.create(page).await.map_err(Self::map_error)
    }

    #[instrument(skip(self, update))]
    async fn update(&self, id: PageId, update: PageUpdate) -> Result<Page, PageError> {
        debug!(?update, "update called");
        self.inner.update(id, update).await.map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: PageId) -> Result<(), PageError> {
        debug!("Sending request");
        self.inner.delete(id).await.map_err(Self::map_error)
    }
}
