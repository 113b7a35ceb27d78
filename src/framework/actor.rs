//! # Generic Actor Server
//!
//! This module defines the `ResourceActor`, the component that owns a
//! collection of entities. It processes messages sequentially, so the store
//! needs no locks.

use crate::framework::client::ResourceClient;
use crate::framework::entity::ActorEntity;
use crate::framework::error::StoreError;
use crate::framework::message::ResourceRequest;
use chrono::Utc;
use std::collections::BTreeMap;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// The generic actor that manages a collection of entities.
///
/// This struct is the "Server" half of the actor. It owns the state (`store`)
/// and the receiver end of the channel. Every request is handled to completion
/// before the next one is read, so each operation is atomic.
///
/// # Usage Pattern
///
/// 1.  **Create**: Call `ResourceActor::new()` to get the `actor` (server) and `client` (interface).
/// 2.  **Run**: Spawn the actor's run loop in a background task.
/// 3.  **Stop**: Drop every client; the loop ends when the channel closes.
///
/// # Operations
///
/// * **Create**: assigns the next id from the internal counter, builds the
///   entity, rejects it if its lookup key is taken, then stores it.
/// * **Get** / **Find**: clone of the entity by id / by lookup key, or `None`.
/// * **List**: clones of every entity, ordered by id.
/// * **Update**: applies the update to a copy, checks the lookup key, then
///   commits the copy. A failed update leaves the stored entity untouched.
/// * **Delete**: calls `on_delete`, then removes the entity.
pub struct ResourceActor<T: ActorEntity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: BTreeMap<T::Id, T>,
    next_id: u32,
}

impl<T: ActorEntity> ResourceActor<T> {
    /// Creates a new `ResourceActor` and its associated `ResourceClient`.
    ///
    /// `buffer_size` is the capacity of the request channel; when it is full,
    /// client calls wait for space.
    pub fn new(buffer_size: usize) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            store: BTreeMap::new(),
            next_id: 1,
        };
        let client = ResourceClient::new(sender);
        (actor, client)
    }

    fn key_taken(&self, candidate: &T, except: Option<&T::Id>) -> Option<String> {
        let key = candidate.lookup_key()?;
        self.store
            .iter()
            .filter(|(id, _)| Some(*id) != except)
            .any(|(_, other)| other.lookup_key() == Some(key))
            .then(|| key.to_string())
    }

    /// Runs the actor's event loop, processing messages until the channel closes.
    pub async fn run(mut self) {
        // Just the type name, e.g. "Page" instead of "page_editor::model::page::Page"
        let entity_type = std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(entity_type, "Actor started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::List { respond_to } => {
                    debug!(entity_type, size = self.store.len(), "List");
                    let _ = respond_to.send(Ok(self.store.values().cloned().collect()));
                }
                ResourceRequest::Create { params, respond_to } => {
                    debug!(entity_type, ?params, "Create");
                    let id = T::Id::from(self.next_id);

                    let item = match T::from_create_params(id.clone(), params, Utc::now()) {
                        Ok(item) => item,
                        Err(e) => {
                            warn!(entity_type, error = %e, "Create failed");
                            let _ = respond_to.send(Err(StoreError::Entity(Box::new(e))));
                            continue;
                        }
                    };
                    if let Some(key) = self.key_taken(&item, None) {
                        warn!(entity_type, %key, "Create conflict");
                        let _ = respond_to.send(Err(StoreError::Conflict(key)));
                        continue;
                    }

                    self.next_id += 1;
                    self.store.insert(id.clone(), item.clone());
                    info!(entity_type, %id, size = self.store.len(), "Created");
                    let _ = respond_to.send(Ok(item));
                }
                ResourceRequest::Get { id, respond_to } => {
                    let item = self.store.get(&id).cloned();
                    debug!(entity_type, %id, found = item.is_some(), "Get");
                    let _ = respond_to.send(Ok(item));
                }
                ResourceRequest::Find { key, respond_to } => {
                    let item = self
                        .store
                        .values()
                        .find(|item| item.lookup_key() == Some(key.as_str()))
                        .cloned();
                    debug!(entity_type, %key, found = item.is_some(), "Find");
                    let _ = respond_to.send(Ok(item));
                }
                ResourceRequest::Update {
                    id,
                    update,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?update, "Update");
                    let Some(current) = self.store.get(&id) else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(StoreError::NotFound(id.to_string())));
                        continue;
                    };

                    let mut next = current.clone();
                    if let Err(e) = next.on_update(update, Utc::now()) {
                        warn!(entity_type, %id, error = %e, "Update failed");
                        let _ = respond_to.send(Err(StoreError::Entity(Box::new(e))));
                        continue;
                    }
                    if let Some(key) = self.key_taken(&next, Some(&id)) {
                        warn!(entity_type, %id, %key, "Update conflict");
                        let _ = respond_to.send(Err(StoreError::Conflict(key)));
                        continue;
                    }

                    self.store.insert(id.clone(), next.clone());
                    info!(entity_type, %id, "Updated");
                    let _ = respond_to.send(Ok(next));
                }
                ResourceRequest::Delete { id, respond_to } => {
                    debug!(entity_type, %id, "Delete");
                    let Some(item) = self.store.get(&id) else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(StoreError::NotFound(id.to_string())));
                        continue;
                    };
                    if let Err(e) = item.on_delete() {
                        warn!(entity_type, %id, error = %e, "on_delete failed");
                        let _ = respond_to.send(Err(StoreError::Entity(Box::new(e))));
                        continue;
                    }
                    self.store.remove(&id);
                    info!(entity_type, %id, size = self.store.len(), "Deleted");
                    let _ = respond_to.send(Ok(()));
                }
            }
        }

        info!(entity_type, size = self.store.len(), "Shutdown");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};

    // --- Domain Definition ---

    #[derive(Clone, Debug, PartialEq)]
    struct Lead {
        id: u32,
        email: String,
        touched_at: DateTime<Utc>,
    }

    #[derive(Debug)]
    struct LeadCreate {
        email: String,
    }

    #[derive(Debug)]
    struct LeadUpdate {
        email: Option<String>,
    }

    #[derive(Debug, thiserror::Error)]
    #[error("Invalid lead: {0}")]
    struct LeadError(String);

    impl ActorEntity for Lead {
        type Id = u32;
        type Create = LeadCreate;
        type Update = LeadUpdate;
        type Error = LeadError;

        fn from_create_params(id: u32, params: LeadCreate, now: DateTime<Utc>) -> Result<Self, LeadError> {
            if !params.email.contains('@') {
                return Err(LeadError(params.email));
            }
            Ok(Self {
                id,
                email: params.email,
                touched_at: now,
            })
        }

        fn lookup_key(&self) -> Option<&str> {
            Some(&self.email)
        }

        fn on_update(&mut self, update: LeadUpdate, now: DateTime<Utc>) -> Result<(), LeadError> {
            if let Some(email) = update.email {
                if !email.contains('@') {
                    return Err(LeadError(email));
                }
                self.email = email;
            }
            self.touched_at = now;
            Ok(())
        }
    }

    fn create(email: &str) -> LeadCreate {
        LeadCreate {
            email: email.to_string(),
        }
    }

    // --- Test ---

    #[tokio::test]
    async fn test_resource_actor_lifecycle() {
        let (actor, client) = ResourceActor::<Lead>::new(10);
        let handle = tokio::spawn(actor.run());

        // 1. Create
        let first = client.create(create("a@example.com")).await.unwrap();
        let second = client.create(create("b@example.com")).await.unwrap();
        assert_eq!((first.id, second.id), (1, 2));

        // 2. Find by key
        let found = client.find("b@example.com".to_string()).await.unwrap();
        assert_eq!(found.map(|l| l.id), Some(2));

        // 3. Update
        let update = LeadUpdate {
            email: Some("c@example.com".to_string()),
        };
        let updated = client.update(1, update).await.unwrap();
        assert_eq!(updated.email, "c@example.com");
        assert!(updated.touched_at >= first.touched_at);

        // 4. List is ordered by id
        let all = client.list().await.unwrap();
        assert_eq!(all.iter().map(|l| l.id).collect::<Vec<_>>(), vec![1, 2]);

        // 5. Delete
        client.delete(2).await.unwrap();
        assert!(client.get(2).await.unwrap().is_none());
        assert!(matches!(client.delete(2).await, Err(StoreError::NotFound(_))));

        drop(client);
        handle.await.unwrap();
    }

    #[tokio::test]
    async fn test_rejections_leave_store_untouched() {
        let (actor, client) = ResourceActor::<Lead>::new(10);
        tokio::spawn(actor.run());

        assert!(matches!(
            client.create(create("not-an-email")).await,
            Err(StoreError::Entity(_))
        ));
        client.create(create("a@example.com")).await.unwrap();
        client.create(create("b@example.com")).await.unwrap();

        // Duplicate key on create
        assert!(matches!(
            client.create(create("a@example.com")).await,
            Err(StoreError::Conflict(key)) if key == "a@example.com"
        ));

        // Duplicate key on update
        let steal = LeadUpdate {
            email: Some("a@example.com".to_string()),
        };
        assert!(matches!(client.update(2, steal).await, Err(StoreError::Conflict(_))));

        // Invalid update
        let invalid = LeadUpdate {
            email: Some("broken".to_string()),
        };
        assert!(matches!(client.update(2, invalid).await, Err(StoreError::Entity(_))));

        let lead = client.get(2).await.unwrap().unwrap();
        assert_eq!(lead.email, "b@example.com");

        // Rejected creates do not consume ids
        let next = client.create(create("c@example.com")).await.unwrap();
        assert_eq!(next.id, 3);
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let (actor, client) = ResourceActor::<Lead>::new(10);
        tokio::spawn(actor.run());

        let result = client.update(42, LeadUpdate { email: None }).await;
        assert!(matches!(result, Err(StoreError::NotFound(id)) if id == "42"));
    }
}
