//! # Editor Session
//!
//! One page open for editing: its metadata, its [`EditorController`] and the
//! in-flight save flag.
//!
//! Saving is request/response. Nothing local changes until the store answers;
//! then only the store-owned fields (id and timestamps) are adopted. While a
//! save is outstanding, further saves are refused.

use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::{debug, info, instrument, warn};

use super::controller::EditorController;
use crate::clients::PageStore;
use crate::model::{Page, PageCreate, PageId, PageStatus, PageUpdate};
use crate::page_actor::PageError;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SaveError {
    /// Title or slug is blank; no request was sent.
    #[error("Title and slug are required")]
    MissingFields,

    #[error("A save is already in progress")]
    InProgress,

    #[error(transparent)]
    Store(#[from] PageError),
}

/// What a save sends to the store.
#[derive(Debug, Clone, PartialEq)]
pub enum SaveRequest {
    /// The page has never been saved.
    Create(PageCreate),
    Update(PageId, PageUpdate),
}

#[derive(Debug, Default)]
pub struct EditorSession {
    page_id: Option<PageId>,
    pub title: String,
    pub slug: String,
    pub status: PageStatus,
    created_at: Option<DateTime<Utc>>,
    updated_at: Option<DateTime<Utc>>,
    editor: EditorController,
    saving: bool,
}

impl EditorSession {
    /// A new, unsaved draft with no blocks.
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens a stored page for editing.
    pub fn from_page(page: Page) -> Self {
        Self {
            page_id: Some(page.id),
            title: page.title,
            slug: page.slug,
            status: page.status,
            created_at: Some(page.created_at),
            updated_at: Some(page.updated_at),
            editor: EditorController::from_blocks(page.blocks),
            saving: false,
        }
    }

    /// Fetches the page with `slug` and opens it.
    #[instrument(skip(store))]
    pub async fn load<S: PageStore + ?Sized>(store: &S, slug: &str) -> Result<Self, PageError> {
        let page = store.get_by_slug(slug).await?;
        info!(id = %page.id, blocks = page.blocks.len(), "Page loaded");
        Ok(Self::from_page(page))
    }

    pub fn page_id(&self) -> Option<PageId> {
        self.page_id
    }

    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }

    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }

    pub fn editor(&self) -> &EditorController {
        &self.editor
    }

    pub fn editor_mut(&mut self) -> &mut EditorController {
        &mut self.editor
    }

    pub fn is_saving(&self) -> bool {
        self.saving
    }

    /// Checks that the page may be saved and marks the save as in flight.
    pub fn begin_save(&mut self) -> Result<SaveRequest, SaveError> {
        if self.saving {
            return Err(SaveError::InProgress);
        }
        if self.title.trim().is_empty() || self.slug.trim().is_empty() {
            debug!("Save blocked, title or slug missing");
            return Err(SaveError::MissingFields);
        }

        let blocks = self.editor.blocks().to_vec();
        let request = match self.page_id {
            None => SaveRequest::Create(PageCreate {
                title: self.title.clone(),
                slug: self.slug.clone(),
                status: self.status,
                blocks,
            }),
            Some(id) => SaveRequest::Update(
                id,
                PageUpdate {
                    title: Some(self.title.clone()),
                    slug: Some(self.slug.clone()),
                    status: Some(self.status),
                    blocks: Some(blocks),
                },
            ),
        };
        self.saving = true;
        Ok(request)
    }

    /// Records the store's answer to the outstanding save.
    pub fn finish_save(&mut self, result: Result<Page, PageError>) -> Result<PageId, SaveError> {
        self.saving = false;
        match result {
            Ok(page) => {
                self.page_id = Some(page.id);
                self.created_at = Some(page.created_at);
                self.updated_at = Some(page.updated_at);
                info!(id = %page.id, "Page saved");
                Ok(page.id)
            }
            Err(e) => {
                warn!(error = %e, "Save failed");
                Err(SaveError::Store(e))
            }
        }
    }

    /// Sends the page to `store`: a create the first time, an update after.
    #[instrument(skip(self, store), fields(slug = %self.slug))]
    pub async fn save<S: PageStore + ?Sized>(&mut self, store: &S) -> Result<PageId, SaveError> {
        let result = match self.begin_save()? {
            SaveRequest::Create(create) => store.create(create).await,
            SaveRequest::Update(id, update) => store.update(id, update).await,
        };
        self.finish_save(result)
    }
}
