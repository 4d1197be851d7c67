//! Test utilities for Lambda handler testing.
//!
//! Provides in-process [`PostStore`] implementations and API Gateway request
//! builders, so handlers can be driven end to end without AWS.
//!
//! ```ignore
//! use posts_lambda_shared::test_utils::{proxy_request, MemoryStore};
//!
//! let store = MemoryStore::default();
//! let request = proxy_request("POST", None, Some(r#"{"title":"A"}"#));
//! ```

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use aws_lambda_events::apigw::ApiGatewayProxyRequest;
use http::Method;

use posts_lib::{Post, PostStore, StoreError};

/// Thread-safe in-memory posts table.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    items: Arc<Mutex<HashMap<String, Post>>>,
}

impl MemoryStore {
    /// A store pre-populated with `posts`.
    pub fn with_posts(posts: impl IntoIterator<Item = Post>) -> Self {
        let items = posts.into_iter().map(|p| (p.id.clone(), p)).collect();
        Self {
            items: Arc::new(Mutex::new(items)),
        }
    }

    /// The post currently stored under `id`.
    pub fn snapshot(&self, id: &str) -> Option<Post> {
        self.items.lock().expect("store lock").get(id).cloned()
    }

    pub fn len(&self) -> usize {
        self.items.lock().expect("store lock").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl PostStore for MemoryStore {
    async fn get(&self, id: &str) -> Result<Option<Post>, StoreError> {
        Ok(self.snapshot(id))
    }

    async fn put(&self, post: &Post) -> Result<(), StoreError> {
        self.items
            .lock()
            .expect("store lock")
            .insert(post.id.clone(), post.clone());
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        self.items.lock().expect("store lock").remove(id);
        Ok(())
    }
}

/// A store whose every call fails with a backend error.
#[derive(Debug, Clone)]
pub struct FailingStore {
    pub message: String,
}

impl FailingStore {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Default for FailingStore {
    fn default() -> Self {
        Self::new("ProvisionedThroughputExceededException: rate exceeded")
    }
}

#[async_trait]
impl PostStore for FailingStore {
    async fn get(&self, _id: &str) -> Result<Option<Post>, StoreError> {
        Err(StoreError::Backend(self.message.clone()))
    }

    async fn put(&self, _post: &Post) -> Result<(), StoreError> {
        Err(StoreError::Backend(self.message.clone()))
    }

    async fn delete(&self, _id: &str) -> Result<(), StoreError> {
        Err(StoreError::Backend(self.message.clone()))
    }
}

/// A store that serves reads from an inner [`MemoryStore`] but fails every
/// write and delete, leaving the stored posts untouched.
#[derive(Debug, Clone)]
pub struct ReadOnlyStore {
    pub inner: MemoryStore,
    pub message: String,
}

impl ReadOnlyStore {
    pub fn new(inner: MemoryStore, message: impl Into<String>) -> Self {
        Self {
            inner,
            message: message.into(),
        }
    }
}

#[async_trait]
impl PostStore for ReadOnlyStore {
    async fn get(&self, id: &str) -> Result<Option<Post>, StoreError> {
        self.inner.get(id).await
    }

    async fn put(&self, _post: &Post) -> Result<(), StoreError> {
        Err(StoreError::Backend(self.message.clone()))
    }

    async fn delete(&self, _id: &str) -> Result<(), StoreError> {
        Err(StoreError::Backend(self.message.clone()))
    }
}

/// A store whose calls never complete; used to exercise the call deadline.
#[derive(Debug, Clone, Copy, Default)]
pub struct StalledStore;

#[async_trait]
impl PostStore for StalledStore {
    async fn get(&self, _id: &str) -> Result<Option<Post>, StoreError> {
        std::future::pending().await
    }

    async fn put(&self, _post: &Post) -> Result<(), StoreError> {
        std::future::pending().await
    }

    async fn delete(&self, _id: &str) -> Result<(), StoreError> {
        std::future::pending().await
    }
}

/// Build a proxy request for `method`, with an optional `id` path parameter
/// and an optional plain-text body.
///
/// # Panics
///
/// Panics if `method` is not a valid HTTP method token.
pub fn proxy_request(method: &str, id: Option<&str>, body: Option<&str>) -> ApiGatewayProxyRequest {
    let mut request = ApiGatewayProxyRequest::default();
    request.http_method = Method::from_bytes(method.as_bytes()).expect("valid HTTP method");
    request.path = Some(match id {
        Some(id) => format!("/posts/{id}"),
        None => "/posts".to_string(),
    });
    request.path_parameters = id
        .map(|id| HashMap::from([("id".to_string(), id.to_string())]))
        .unwrap_or_default();
    request.body = body.map(str::to_string);
    request.request_context.request_id = Some(mock_request_id(method));
    request
}

/// Create a mock request ID for testing.
///
/// `lambda_runtime::Context` is non-exhaustive, so tests assert against the
/// request id string directly.
pub fn mock_request_id(suffix: &str) -> String {
    format!("test-request-{}", suffix)
}

/// A fully populated post for fixtures.
pub fn sample_post(id: &str) -> Post {
    Post {
        id: id.to_string(),
        title: "A".to_string(),
        body: "B".to_string(),
        user_id: 3,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn memory_store_round_trips() {
        let store = MemoryStore::default();
        store.put(&sample_post("p1")).await.unwrap();

        assert_eq!(store.get("p1").await.unwrap(), Some(sample_post("p1")));
        store.delete("p1").await.unwrap();
        assert!(store.is_empty());
        store.delete("p1").await.unwrap();
    }

    #[tokio::test]
    async fn read_only_store_reads_but_rejects_writes() {
        let store = ReadOnlyStore::new(MemoryStore::with_posts([sample_post("p1")]), "read only");

        assert_eq!(store.get("p1").await.unwrap(), Some(sample_post("p1")));
        assert!(store.put(&sample_post("p2")).await.is_err());
        assert!(store.delete("p1").await.is_err());
        assert_eq!(store.inner.len(), 1);
    }

    #[tokio::test]
    async fn failing_store_reports_backend_error() {
        let err = FailingStore::new("boom").get("x").await.unwrap_err();
        assert_eq!(err, StoreError::Backend("boom".to_string()));
    }

    #[test]
    fn proxy_request_sets_path_parameter() {
        use crate::events::ProxyRequestExt;

        let request = proxy_request("GET", Some("p1"), None);
        assert_eq!(request.http_method, Method::GET);
        assert_eq!(request.path_parameter("id"), Some("p1"));
        assert_eq!(request.gateway_request_id(), Some("test-request-GET"));
        assert_eq!(request.path.as_deref(), Some("/posts/p1"));
        assert!(request.body.is_none());
    }

    #[test]
    fn mock_request_id_formats_correctly() {
        assert_eq!(mock_request_id("123"), "test-request-123");
    }
}
