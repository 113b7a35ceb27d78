//! # HTTP Page Store
//!
//! [`PageStore`] implementation that speaks the `/pages` API over a
//! [`Transport`]. Every request carries the bearer token; without one, calls
//! fail with [`PageError::Unauthorized`] and nothing is sent.

use async_trait::async_trait;
use axum::body::Body;
use http::{header, Method, Request, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, instrument, warn};

use crate::api::{error_message, read_body, Transport};
use crate::clients::page_store::PageStore;
use crate::config::EditorConfig;
use crate::model::{is_url_safe, Page, PageCreate, PageId, PageUpdate};
use crate::page_actor::PageError;

/// Maps a non-2xx status to the matching [`PageError`].
fn status_error(status: StatusCode, body: &[u8]) -> PageError {
    let message = error_message(body);
    match status {
        StatusCode::UNAUTHORIZED => PageError::Unauthorized,
        StatusCode::NOT_FOUND => PageError::NotFound(message),
        StatusCode::CONFLICT => PageError::SlugTaken(message),
        StatusCode::UNPROCESSABLE_ENTITY => PageError::Validation(message),
        status => PageError::Unavailable(format!("HTTP {}: {}", status, message)),
    }
}

/// Reads the body; errors for any non-2xx status.
async fn success_body(response: Response<Body>) -> Result<Vec<u8>, PageError> {
    let status = response.status();
    let body = read_body(response.into_body()).await?;
    if !status.is_success() {
        return Err(status_error(status, &body));
    }
    Ok(body)
}

async fn decode<R: DeserializeOwned>(response: Response<Body>) -> Result<R, PageError> {
    let body = success_body(response).await?;
    serde_json::from_slice(&body).map_err(|e| PageError::Decode(e.to_string()))
}

pub struct HttpPageStore<T: Transport> {
    transport: T,
    token: Option<String>,
}

impl<T: Transport> HttpPageStore<T> {
    pub fn new(transport: T, token: Option<String>) -> Self {
        Self { transport, token }
    }

    /// Uses the token from `config`.
    pub fn from_config(transport: T, config: &EditorConfig) -> Self {
        Self::new(transport, config.auth_token.clone())
    }

    /// Replaces the bearer token, e.g. after the user logs in again.
    pub fn set_token(&mut self, token: Option<String>) {
        self.token = token;
    }

    async fn send<B: Serialize>(
        &self,
        method: Method,
        path: &str,
        payload: Option<&B>,
    ) -> Result<Response<Body>, PageError> {
        let Some(token) = self.token.as_deref() else {
            warn!(%method, path, "No token, request not sent");
            return Err(PageError::Unauthorized);
        };

        let mut builder = Request::builder()
            .method(method.clone())
            .uri(path)
            .header(header::AUTHORIZATION, format!("Bearer {}", token));
        let body = match payload {
            Some(payload) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                let json = serde_json::to_vec(payload).map_err(|e| PageError::Decode(e.to_string()))?;
                Body::from(json)
            }
            None => Body::empty(),
        };
        let request = builder
            .body(body)
            .map_err(|e| PageError::Unavailable(e.to_string()))?;

        debug!(%method, path, "Sending request");
        self.transport.send(request).await
    }

    async fn send_empty(&self, method: Method, path: &str) -> Result<Response<Body>, PageError> {
        self.send::<()>(method, path, None).await
    }
}

#[async_trait]
impl<T: Transport> PageStore for HttpPageStore<T> {
    #[instrument(skip(self))]
    async fn list(&self) -> Result<Vec<Page>, PageError> {
        decode(self.send_empty(Method::GET, "/pages").await?).await
    }

    /// `GET /pages/:key` resolves slugs first, so a page whose slug is the
    /// number asked for can shadow the id. Falls back to the full list then.
    #[instrument(skip(self))]
    async fn get(&self, id: PageId) -> Result<Page, PageError> {
        let path = format!("/pages/{}", id);
        let page: Page = decode(self.send_empty(Method::GET, &path).await?).await?;
        if page.id == id {
            return Ok(page);
        }
        debug!(%id, shadowed_by = %page.id, "Slug matched another page");
        self.list()
            .await?
            .into_iter()
            .find(|page| page.id == id)
            .ok_or_else(|| PageError::NotFound(id.to_string()))
    }

    #[instrument(skip(self))]
    async fn get_by_slug(&self, slug: &str) -> Result<Page, PageError> {
        if !is_url_safe(slug) {
            return Err(PageError::NotFound(slug.to_string()));
        }
        let path = format!("/pages/{}", slug);
        let page: Page = decode(self.send_empty(Method::GET, &path).await?).await?;
        if page.slug != slug {
            // Resolved as a numeric id instead.
            return Err(PageError::NotFound(slug.to_string()));
        }
        Ok(page)
    }

    #[instrument(skip(self, page), fields(slug = %page.slug))]
    async fn create(&self, page: PageCreate) -> Result<Page, PageError> {
        decode(self.send(Method::POST, "/pages", Some(&page)).await?).await
    }

    #[instrument(skip(self, update))]
    async fn update(&self, id: PageId, update: PageUpdate) -> Result<Page, PageError> {
        let path = format!("/pages/{}", id);
        decode(self.send(Method::PUT, &path, Some(&update)).await?).await
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: PageId) -> Result<(), PageError> {
        let path = format!("/pages/{}", id);
        success_body(self.send_empty(Method::DELETE, &path).await?).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};
    use std::sync::{Arc, Mutex};

    /// What the scripted transport saw of one request.
    #[derive(Debug)]
    struct Seen {
        method: Method,
        path: String,
        authorization: Option<String>,
        body: Option<Value>,
    }

    /// Records requests and answers each with a canned status and body.
    struct Scripted {
        seen: Arc<Mutex<Vec<Seen>>>,
        replies: Mutex<Vec<(StatusCode, Value)>>,
    }

    impl Scripted {
        fn new(replies: Vec<(StatusCode, Value)>) -> (Self, Arc<Mutex<Vec<Seen>>>) {
            let seen = Arc::new(Mutex::new(Vec::new()));
            let transport = Self {
                seen: seen.clone(),
                replies: Mutex::new(replies.into_iter().rev().collect()),
            };
            (transport, seen)
        }
    }

    #[async_trait]
    impl Transport for Scripted {
        async fn send(&self, request: Request<Body>) -> Result<Response<Body>, PageError> {
            let (parts, body) = request.into_parts();
            let bytes = read_body(body).await?;
            self.seen.lock().unwrap().push(Seen {
                method: parts.method,
                path: parts.uri.path().to_string(),
                authorization: parts
                    .headers
                    .get(header::AUTHORIZATION)
                    .and_then(|v| v.to_str().ok())
                    .map(str::to_string),
                body: serde_json::from_slice(&bytes).ok(),
            });
            let (status, reply) = self
                .replies
                .lock()
                .unwrap()
                .pop()
                .ok_or_else(|| PageError::Unavailable("no scripted reply".to_string()))?;
            Ok(Response::builder()
                .status(status)
                .body(Body::from(reply.to_string()))
                .unwrap())
        }
    }

    fn page_json(id: u32, slug: &str) -> Value {
        json!({
            "id": id,
            "title": "Home",
            "slug": slug,
            "status": "draft",
            "blocks": [],
            "created_at": "2026-01-05T10:00:00Z",
            "updated_at": "2026-01-05T10:00:00Z",
        })
    }

    fn error(message: &str) -> Value {
        json!({ "error": message })
    }

    #[tokio::test]
    async fn test_missing_token_sends_nothing() {
        let (transport, seen) = Scripted::new(vec![]);
        let store = HttpPageStore::new(transport, None);

        assert_eq!(store.list().await, Err(PageError::Unauthorized));
        assert_eq!(store.delete(PageId(1)).await, Err(PageError::Unauthorized));
        assert!(seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_bearer_and_body_are_attached() {
        let (transport, seen) = Scripted::new(vec![(StatusCode::CREATED, page_json(1, "home"))]);
        let store = HttpPageStore::new(transport, Some("secret".to_string()));

        let page = store
            .create(PageCreate {
                title: "Home".to_string(),
                slug: "home".to_string(),
                status: Default::default(),
                blocks: vec![],
            })
            .await
            .unwrap();
        assert_eq!(page.id, PageId(1));

        let seen = seen.lock().unwrap();
        assert_eq!(seen[0].method, Method::POST);
        assert_eq!(seen[0].path, "/pages");
        assert_eq!(seen[0].authorization.as_deref(), Some("Bearer secret"));
        assert_eq!(seen[0].body.as_ref().unwrap()["slug"], json!("home"));
    }

    #[tokio::test]
    async fn test_status_mapping() {
        let (transport, _) = Scripted::new(vec![
            (StatusCode::UNAUTHORIZED, error("expired")),
            (StatusCode::NOT_FOUND, error("7")),
            (StatusCode::CONFLICT, error("home")),
            (StatusCode::UNPROCESSABLE_ENTITY, error("title is required")),
            (StatusCode::INTERNAL_SERVER_ERROR, error("boom")),
        ]);
        let store = HttpPageStore::new(transport, Some("secret".to_string()));

        assert_eq!(store.list().await, Err(PageError::Unauthorized));
        assert_eq!(
            store.update(PageId(7), PageUpdate::default()).await,
            Err(PageError::NotFound("7".to_string()))
        );
        assert_eq!(
            store.update(PageId(2), PageUpdate::default()).await,
            Err(PageError::SlugTaken("home".to_string()))
        );
        assert_eq!(
            store.update(PageId(2), PageUpdate::default()).await,
            Err(PageError::Validation("title is required".to_string()))
        );
        assert!(matches!(store.list().await, Err(PageError::Unavailable(_))));
    }

    #[tokio::test]
    async fn test_get_falls_back_when_slug_shadows_id() {
        let (transport, seen) = Scripted::new(vec![
            (StatusCode::OK, page_json(4, "2")),
            (StatusCode::OK, json!([page_json(2, "home"), page_json(4, "2")])),
        ]);
        let store = HttpPageStore::new(transport, Some("secret".to_string()));

        let page = store.get(PageId(2)).await.unwrap();
        assert_eq!(page.slug, "home");
        assert_eq!(seen.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_get_by_slug_rejects_id_match() {
        let (transport, _) = Scripted::new(vec![(StatusCode::OK, page_json(3, "home"))]);
        let store = HttpPageStore::new(transport, Some("secret".to_string()));

        assert_eq!(
            store.get_by_slug("3").await,
            Err(PageError::NotFound("3".to_string()))
        );
        assert_eq!(
            store.get_by_slug("Not A Slug").await,
            Err(PageError::NotFound("Not A Slug".to_string()))
        );
    }

    #[tokio::test]
    async fn test_malformed_body_is_decode_error() {
        let (transport, _) = Scripted::new(vec![(StatusCode::OK, json!({ "id": "x" }))]);
        let store = HttpPageStore::new(transport, Some("secret".to_string()));
        assert!(matches!(store.list().await, Err(PageError::Decode(_))));
    }
}
