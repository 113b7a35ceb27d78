//! # Page Server
//!
//! The `/pages` routes as an [`axum::Router`] over a [`PageClient`].
//! [`LoopbackServer`] drives that router in-process through
//! [`tower::ServiceExt::oneshot`], which makes it a [`Transport`] for
//! [`HttpPageStore`](crate::clients::HttpPageStore). The same router can be
//! served over TCP with `axum::serve`.

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Request, State};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use http::StatusCode;
use tower::ServiceExt;
use tracing::{debug, info, instrument, warn};

use super::wire::{bearer_token, ErrorBody, Transport};
use crate::clients::{PageClient, PageStore};
use crate::model::{Page, PageCreate, PageId, PageUpdate};
use crate::page_actor::PageError;

#[derive(Clone)]
struct ApiState {
    store: PageClient,
    token: Arc<str>,
}

/// A [`PageError`] on its way out as a status and an [`ErrorBody`].
#[derive(Debug)]
pub struct ApiError(pub PageError);

impl From<PageError> for ApiError {
    fn from(e: PageError) -> Self {
        Self(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error) = match self.0 {
            PageError::NotFound(key) => (StatusCode::NOT_FOUND, key),
            PageError::SlugTaken(slug) => (StatusCode::CONFLICT, slug),
            PageError::Validation(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            PageError::Unauthorized => {
                (StatusCode::UNAUTHORIZED, "missing or invalid token".to_string())
            }
            PageError::Decode(msg) => (StatusCode::BAD_REQUEST, msg),
            PageError::Unavailable(msg) => (StatusCode::SERVICE_UNAVAILABLE, msg),
        };
        (status, Json(ErrorBody { error })).into_response()
    }
}

async fn require_token(State(state): State<ApiState>, request: Request, next: Next) -> Response {
    if bearer_token(request.headers()) != Some(&*state.token) {
        warn!(path = %request.uri().path(), "Rejected request without a valid token");
        return ApiError(PageError::Unauthorized).into_response();
    }
    next.run(request).await
}

fn parse_id(key: &str) -> Result<PageId, PageError> {
    key.parse().map_err(|_| PageError::NotFound(key.to_string()))
}

fn body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, PageError> {
    payload
        .map(|Json(value)| value)
        .map_err(|rejection| PageError::Decode(rejection.body_text()))
}

#[instrument(skip(state))]
async fn list_pages(State(state): State<ApiState>) -> Result<Json<Vec<Page>>, ApiError> {
    Ok(Json(state.store.list().await?))
}

/// Slug first, then numeric id.
#[instrument(skip(state))]
async fn get_page(
    State(state): State<ApiState>,
    Path(key): Path<String>,
) -> Result<Json<Page>, ApiError> {
    let page = match state.store.get_by_slug(&key).await {
        Err(PageError::NotFound(_)) => {
            let id = parse_id(&key)?;
            debug!(%id, "No page with this slug, trying id");
            state.store.get(id).await?
        }
        other => other?,
    };
    Ok(Json(page))
}

#[instrument(skip(state, payload))]
async fn create_page(
    State(state): State<ApiState>,
    payload: Result<Json<PageCreate>, JsonRejection>,
) -> Result<(StatusCode, Json<Page>), ApiError> {
    let page = state.store.create(body(payload)?).await?;
    Ok((StatusCode::CREATED, Json(page)))
}

#[instrument(skip(state, payload))]
async fn update_page(
    State(state): State<ApiState>,
    Path(key): Path<String>,
    payload: Result<Json<PageUpdate>, JsonRejection>,
) -> Result<Json<Page>, ApiError> {
    let id = parse_id(&key)?;
    let page = state.store.update(id, body(payload)?).await?;
    Ok(Json(page))
}

#[instrument(skip(state))]
async fn delete_page(
    State(state): State<ApiState>,
    Path(key): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.store.delete(parse_id(&key)?).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Builds the `/pages` routes. Every route requires `Authorization: Bearer <token>`.
pub fn page_routes(store: PageClient, token: impl Into<String>) -> Router {
    let state = ApiState {
        store,
        token: Arc::from(token.into()),
    };
    Router::new()
        .route("/pages", get(list_pages).post(create_page))
        .route(
            "/pages/:key",
            get(get_page).put(update_page).delete(delete_page),
        )
        .layer(middleware::from_fn_with_state(state.clone(), require_token))
        .with_state(state)
}

/// In-process HTTP server for pages.
#[derive(Clone)]
pub struct LoopbackServer {
    router: Router,
}

impl LoopbackServer {
    /// Serves `store`, accepting only requests that carry `token`.
    pub fn new(store: PageClient, token: impl Into<String>) -> Self {
        Self {
            router: page_routes(store, token),
        }
    }

    /// The underlying router, e.g. for `axum::serve`.
    pub fn router(&self) -> Router {
        self.router.clone()
    }
}

#[async_trait]
impl Transport for LoopbackServer {
    async fn send(&self, request: Request<Body>) -> Result<Response<Body>, PageError> {
        let method = request.method().clone();
        let path = request.uri().path().to_string();
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .map_err(|never| -> PageError { match never {} })?;
        info!(%method, %path, status = response.status().as_u16(), "Handled");
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::wire::read_body;
    use http::{header, Method};
    use serde_json::{json, Value};

    const TOKEN: &str = "test-token";

    fn server() -> LoopbackServer {
        let (actor, client) = crate::page_actor::new(8);
        tokio::spawn(actor.run());
        LoopbackServer::new(PageClient::new(client), TOKEN)
    }

    async fn call(
        server: &LoopbackServer,
        method: Method,
        uri: &str,
        token: Option<&str>,
        payload: Option<Value>,
    ) -> (StatusCode, Option<Value>) {
        let mut builder = http::Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let body = match payload {
            Some(value) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(value.to_string())
            }
            None => Body::empty(),
        };
        let response = server.send(builder.body(body).unwrap()).await.unwrap();
        let status = response.status();
        let bytes = read_body(response.into_body()).await.unwrap();
        (status, serde_json::from_slice(&bytes).ok())
    }

    async fn get(server: &LoopbackServer, uri: &str) -> (StatusCode, Option<Value>) {
        call(server, Method::GET, uri, Some(TOKEN), None).await
    }

    async fn post(server: &LoopbackServer, payload: Value) -> (StatusCode, Option<Value>) {
        call(server, Method::POST, "/pages", Some(TOKEN), Some(payload)).await
    }

    #[tokio::test]
    async fn test_token_is_required() {
        let server = server();
        let (status, body) = call(&server, Method::GET, "/pages", None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert!(body.unwrap()["error"].is_string());

        let (status, _) = call(&server, Method::GET, "/pages", Some("nope"), None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_create_then_get_by_slug_and_id() {
        let server = server();
        let (status, body) = post(&server, json!({ "title": "Home", "slug": "home" })).await;
        assert_eq!(status, StatusCode::CREATED);
        let body = body.unwrap();
        assert_eq!(body["id"], json!(1));
        assert_eq!(body["status"], json!("draft"));
        assert_eq!(body["blocks"], json!([]));

        let (status, by_slug) = get(&server, "/pages/home").await;
        assert_eq!(status, StatusCode::OK);
        let (_, by_id) = get(&server, "/pages/1").await;
        assert_eq!(by_id, by_slug);

        let (status, _) = get(&server, "/pages/pricing").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_slug_wins_over_id() {
        let server = server();
        post(&server, json!({ "title": "Home", "slug": "home" })).await;
        post(&server, json!({ "title": "Numbered", "slug": "1" })).await;

        let (_, body) = get(&server, "/pages/1").await;
        assert_eq!(body.unwrap()["slug"], json!("1"));
    }

    #[tokio::test]
    async fn test_error_statuses() {
        let server = server();
        post(&server, json!({ "title": "Home", "slug": "home" })).await;

        let (status, body) = post(&server, json!({ "title": "Other", "slug": "home" })).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body.unwrap()["error"], json!("home"));

        let (status, _) = post(&server, json!({ "title": "", "slug": "blank" })).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

        let (status, _) = post(&server, json!({ "title": 3 })).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = call(
            &server,
            Method::PUT,
            "/pages/9",
            Some(TOKEN),
            Some(json!({ "title": "Ghost" })),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = get(&server, "/users").await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = call(&server, Method::DELETE, "/pages", Some(TOKEN), None).await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn test_repeated_block_ids_are_unprocessable() {
        let server = server();
        let block = json!({ "id": "x", "type": "text", "props": { "content": "Hi" } });
        let (status, body) = post(
            &server,
            json!({ "title": "Home", "slug": "home", "blocks": [block.clone(), block] }),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body.unwrap()["error"].as_str().unwrap().contains("`x`"));

        let (_, listed) = get(&server, "/pages").await;
        assert_eq!(listed, Some(json!([])));
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let server = server();
        post(&server, json!({ "title": "Home", "slug": "home" })).await;

        let (status, body) = call(
            &server,
            Method::PUT,
            "/pages/1",
            Some(TOKEN),
            Some(json!({ "status": "published" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.unwrap()["status"], json!("published"));

        let (status, body) = call(&server, Method::DELETE, "/pages/1", Some(TOKEN), None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        assert!(body.is_none());

        let (_, listed) = get(&server, "/pages").await;
        assert_eq!(listed, Some(json!([])));
    }
}
