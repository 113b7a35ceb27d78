//! Error bodies, body helpers and the [`Transport`] seam between client and server.

use async_trait::async_trait;
use axum::body::Body;
use http::{header, HeaderMap, Request, Response};
use serde::{Deserialize, Serialize};

use crate::page_actor::PageError;

/// Largest response body a client will read.
pub const BODY_LIMIT: usize = 8 * 1024 * 1024;

/// Body of every non-2xx response the page server produces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

/// The token of an `Authorization: Bearer <token>` header, if present.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

/// Reads a whole body into memory.
pub async fn read_body(body: Body) -> Result<Vec<u8>, PageError> {
    axum::body::to_bytes(body, BODY_LIMIT)
        .await
        .map(|bytes| bytes.to_vec())
        .map_err(|e| PageError::Unavailable(e.to_string()))
}

/// The `error` message of a failure body, or an empty string.
pub fn error_message(body: &[u8]) -> String {
    serde_json::from_slice::<ErrorBody>(body)
        .map(|body| body.error)
        .unwrap_or_default()
}

/// Carries one request to a server and brings back its response.
///
/// Implementations report only transport failures as errors; any HTTP status,
/// including 4xx and 5xx, comes back as a [`Response`].
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: Request<Body>) -> Result<Response<Body>, PageError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::HeaderValue;

    #[test]
    fn test_bearer_token() {
        let mut headers = HeaderMap::new();
        assert_eq!(bearer_token(&headers), None);

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Basic abc"));
        assert_eq!(bearer_token(&headers), None);

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer secret"));
        assert_eq!(bearer_token(&headers), Some("secret"));
    }

    #[test]
    fn test_error_message() {
        assert_eq!(error_message(br#"{"error":"home"}"#), "home");
        assert_eq!(error_message(b"plain text"), "");
        assert_eq!(error_message(b""), "");
    }

    #[tokio::test]
    async fn test_read_body() {
        let body = Body::from(r#"{"error":"x"}"#);
        assert_eq!(read_body(body).await.unwrap(), br#"{"error":"x"}"#.to_vec());
    }
}
